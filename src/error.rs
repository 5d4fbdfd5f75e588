//! Error types shared by every module of the crate.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, MlpError>;

#[derive(Error, Debug)]
pub enum MlpError {
    /// A vector did not have the fixed length its context requires.
    #[error("dimension mismatch in {context}: expected {expected}, got {actual}")]
    DimensionMismatch {
        context: &'static str,
        expected: usize,
        actual: usize,
    },

    /// The network shape cannot support the requested operation.
    #[error("structural precondition violated: {0}")]
    StructuralPrecondition(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl MlpError {
    pub(crate) fn check_len(context: &'static str, expected: usize, actual: usize) -> Result<()> {
        if expected == actual {
            Ok(())
        } else {
            Err(MlpError::DimensionMismatch { context, expected, actual })
        }
    }
}
