pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod server;
pub mod utils;

pub use adapters::file::FileDocument;
pub use config::{AppConfig, CliConfig};
pub use crate::core::counter::{CounterConfig, RegionCounter};
pub use crate::core::locks::ResourceLocks;
pub use crate::core::service::CountService;
pub use domain::model::{CountResult, PatternConfig};
pub use utils::error::{CounterError, Result};
