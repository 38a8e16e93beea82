/// Crate-wide result alias.
pub type CineloreResult<T> = Result<T, CineloreError>;

/// Errors surfaced by configuration, data loading, and media tooling.
///
/// Runtime hiccups on the hot paths (a missing decoded frame, a stalled seek) are absorbed where
/// they happen and never reach this type.
#[derive(thiserror::Error, Debug)]
pub enum CineloreError {
    /// Invalid configuration or data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Frame extraction failure.
    #[error("extraction error: {0}")]
    Extraction(String),

    /// Media tooling failure (probe, decode, encode).
    #[error("media error: {0}")]
    Media(String),

    /// JSON (de)serialization failure.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CineloreError {
    /// Build a [`CineloreError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`CineloreError::Extraction`].
    pub fn extraction(msg: impl Into<String>) -> Self {
        Self::Extraction(msg.into())
    }

    /// Build a [`CineloreError::Media`].
    pub fn media(msg: impl Into<String>) -> Self {
        Self::Media(msg.into())
    }

    /// Build a [`CineloreError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for CineloreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
