pub mod counter;
pub mod line_reader;
pub mod locks;
pub mod service;

pub use crate::domain::model::{CountResult, PatternConfig};
pub use crate::domain::ports::DocumentSource;
pub use crate::utils::error::Result;
