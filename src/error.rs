use thiserror::Error;

/// Every failure the library can report.
#[derive(Debug, Error)]
pub enum MlpError {
    /// Missing or unparsable task configuration.
    #[error("config error: {0}")]
    Config(String),

    /// A vector or matrix did not have the size its owner declared.
    #[error("shape mismatch for {what}: got {got}, expected {expected}")]
    ShapeMismatch {
        what: &'static str,
        got: usize,
        expected: usize,
    },

    #[error("training data is empty")]
    EmptyDataset,

    /// A model snapshot was structurally valid JSON but not a valid network.
    #[error("format error: {0}")]
    Format(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl MlpError {
    pub(crate) fn shape(what: &'static str, got: usize, expected: usize) -> Self {
        MlpError::ShapeMismatch { what, got, expected }
    }
}

pub type Result<T> = std::result::Result<T, MlpError>;
