use thiserror::Error;

/// Errors raised by the analysis pipeline stages.
///
/// Every variant is a call-site problem (bad block length, bad bin count,
/// unknown algorithm name); nothing here is transient.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("unsupported configuration: {0}")]
    UnsupportedConfiguration(String),
}

pub type Result<T> = std::result::Result<T, AnalysisError>;

pub(crate) fn invalid(msg: impl Into<String>) -> AnalysisError {
    AnalysisError::InvalidInput(msg.into())
}

pub(crate) fn unsupported(msg: impl Into<String>) -> AnalysisError {
    AnalysisError::UnsupportedConfiguration(msg.into())
}
