pub mod collection;
pub mod connection;
pub mod migrations;
pub mod queries;

pub use collection::{save_plant, KeyValueCollection, PlantCollection};
pub use connection::Database;
