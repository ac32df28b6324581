//! Error types for conf-sync

/// Result type for conf-sync operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during synthesis
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Cannot combine {a} and {b} into a single patch tree")]
    StructuralMismatch { a: String, b: String },

    #[error(transparent)]
    Model(#[from] conf_tree::Error),
}
