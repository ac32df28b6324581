//! Error types for conf-tree

/// Result type for conf-tree operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in conf-tree operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Element not found: {path}")]
    ElementMissing { path: String },
}

impl Error {
    pub fn missing(path: impl Into<String>) -> Self {
        Self::ElementMissing { path: path.into() }
    }
}
