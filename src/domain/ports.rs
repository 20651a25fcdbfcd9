use crate::utils::error::Result;
use std::io::Read;

/// A document that can be opened fresh for every counting request.
pub trait DocumentSource: Send + Sync {
    /// Identity of the underlying resource. Sources sharing a key share a lock.
    fn resource_key(&self) -> String;

    fn open(&self) -> Result<Box<dyn Read + Send>>;
}

