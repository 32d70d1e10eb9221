//! Error types for the content store

use thiserror::Error;

/// Errors returned by [`crate::store::ContentStore`] lookups
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No article carries the requested identifier
    #[error("article not found: {0}")]
    NotFound(String),
}

/// Errors raised while turning a file into an article
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("invalid article identifier {0:?}, expected YYYY-MM-DD-slug")]
    InvalidIdentifier(String),

    #[error("document does not start with a `---` front-matter line")]
    MissingFrontMatter,

    #[error("front-matter block is not closed by a `---` line")]
    UnterminatedFrontMatter,

    #[error("invalid YAML front-matter: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
