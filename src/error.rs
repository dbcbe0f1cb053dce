//! Errors raised by the data preparation core.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum PrepError {

    /// No words were given to build a vocabulary from.
    #[error("cannot build a vocabulary from an empty token sequence")]
    EmptyInput,

    /// A word with zero relative frequency reached the subsampler.
    #[error("word '{word}' has zero frequency")]
    DivisionByZero { word: String },

    /// An embedding row has zero (or non finite) L2 norm.
    #[error("embedding row {row} has zero norm, cosine similarity is undefined")]
    ZeroVector { row: usize },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl PrepError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}
