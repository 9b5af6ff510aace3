pub mod assessment;
pub mod environmental;
pub mod plant;
pub mod saved_plant;

pub use assessment::*;
pub use environmental::*;
pub use plant::*;
pub use saved_plant::*;
