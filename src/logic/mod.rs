pub mod assessor;
pub mod classifier;
pub mod ranges;
pub mod recommendations;
pub mod service;
pub mod suitability;

pub use service::PlantService;
