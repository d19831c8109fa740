//! Error taxonomy for persisted reader state.
//!
//! Nothing in the public store API propagates these to a reading flow; they
//! surface only through the strict `try_*` accessors and in log output.

/// Failure while reading or writing one persisted key.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage io failed for key {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("stored value for key {key} is corrupt: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode value for key {key}: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    pub fn io(key: &str, source: std::io::Error) -> Self {
        Self::Io {
            key: key.to_string(),
            source,
        }
    }

    pub fn corrupt(key: &str, source: serde_json::Error) -> Self {
        Self::Corrupt {
            key: key.to_string(),
            source,
        }
    }

    pub fn encode(key: &str, source: serde_json::Error) -> Self {
        Self::Encode {
            key: key.to_string(),
            source,
        }
    }

    /// Key the failure was raised for.
    pub fn key(&self) -> &str {
        match self {
            Self::Io { key, .. } | Self::Corrupt { key, .. } | Self::Encode { key, .. } => key,
        }
    }

    pub fn is_corrupt(&self) -> bool {
        matches!(self, Self::Corrupt { .. })
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
