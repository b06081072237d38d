pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::Cli;

pub use adapters::{ApiClient, FileStore, MemoryStore};
pub use app::AppContext;
pub use config::AppConfig;
pub use core::listings::ListingStore;
pub use utils::error::{KisanError, Result};
