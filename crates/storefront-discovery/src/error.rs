//! Discovery error types.

use thiserror::Error;

/// Errors a collaborator store can report while fetching a snapshot.
///
/// None of these are fatal to the engine; the snapshot loader replaces the
/// affected collection with an empty one and records a notice.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    /// The backing source could not be reached or read.
    #[error("Fetch failed for {source_name}: {message}")]
    Fetch { source_name: String, message: String },

    /// The source answered with data that could not be decoded.
    #[error("Malformed data from {source_name}: {message}")]
    Malformed { source_name: String, message: String },
}

impl StoreError {
    /// Create a fetch error.
    pub fn fetch(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        StoreError::Fetch {
            source_name: source_name.into(),
            message: message.into(),
        }
    }

    /// Create a malformed-data error.
    pub fn malformed(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        StoreError::Malformed {
            source_name: source_name.into(),
            message: message.into(),
        }
    }
}

/// Errors surfaced by the fallible parts of the library API.
#[derive(Error, Debug)]
pub enum DiscoveryError {
    /// Collaborator store error.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Invalid configuration value.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Unknown sort key.
    #[error("Unknown sort key: {0}")]
    UnknownSortKey(String),

    /// Rating outside the 1..=5 star scale.
    #[error("Rating {0} is outside the 1-5 star scale")]
    InvalidRating(i64),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for DiscoveryError {
    fn from(e: serde_json::Error) -> Self {
        DiscoveryError::Serialization(e.to_string())
    }
}
