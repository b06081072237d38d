pub mod emi;
pub mod harvest;
pub mod listings;
pub mod market;
pub mod trend;
pub mod view;
pub mod weather;

pub use crate::domain::model::*;
pub use crate::domain::ports::{ConfigProvider, DiseaseDetector, KeyValueStore};
pub use crate::utils::error::Result;
