use crate::domain::ports::DocumentSource;
use crate::utils::error::Result;
use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

/// A document on the local filesystem, reopened for every count.
#[derive(Debug, Clone)]
pub struct FileDocument {
    path: PathBuf,
    key: String,
}

impl FileDocument {
    /// The resource key is fixed here: the canonical path if the file exists
    /// now, otherwise the path as given.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let key = std::fs::canonicalize(&path)
            .unwrap_or_else(|_| path.clone())
            .display()
            .to_string();
        Self { path, key }
    }
}

impl DocumentSource for FileDocument {
    fn resource_key(&self) -> String {
        self.key.clone()
    }

    fn open(&self) -> Result<Box<dyn Read + Send>> {
        let file = File::open(&self.path)?;
        Ok(Box::new(file))
    }
}
