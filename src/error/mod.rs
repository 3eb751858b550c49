//! Error types for toolrun.

use thiserror::Error;

/// Primary error type for all toolrun operations.
#[derive(Error, Debug)]
pub enum AgentError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Catalog load error at {path}:{line}: {source}")]
    CatalogLoad {
        path: String,
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Chat service error: {0}")]
    ChatService(String),

    #[error("Rank service error: {0}")]
    RankService(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AgentError {
    /// Whether this error aborts the whole batch rather than one query.
    ///
    /// Only a broken catalog, bad config, or an unwritable output file is
    /// fatal; chat and rank failures surface at the query or turn level and
    /// the batch keeps going.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::CatalogLoad { .. } | Self::Configuration(_) | Self::Io(_)
        )
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, AgentError>;
