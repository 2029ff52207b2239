use thiserror::Error;

/// Fatal conversion errors. Per-file problems never surface here; they are
/// logged and skipped by the services that hit them.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("Archive error: {0}")]
    Archive(String),
    #[error("I/O error: {0}")]
    Io(String),
    #[error("Output error: {0}")]
    Output(String),
}

pub type ConvertResult<T> = Result<T, ConvertError>;
