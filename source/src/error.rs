//! Transaction source errors.

use thiserror::Error;

use crate::codec::DecodeError;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SourceError {
    /// The requested transaction or block is unknown to the source.
    #[error("not found: {0}")]
    NotFound(String),

    /// The source rejected a request parameter.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The source answered, but the answer could not be decoded.
    #[error("malformed response: {0}")]
    Decode(String),

    /// The source cannot be set up from the given settings.
    #[error("configuration error: {0}")]
    Config(String),

    /// The source could not be reached or is in a bad state.
    #[error("source unavailable: {0}")]
    Transport(String),
}

impl SourceError {
    /// Whether the failure indicates the source itself can no longer be trusted.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Config(_))
    }
}

impl From<DecodeError> for SourceError {
    fn from(e: DecodeError) -> Self {
        Self::Decode(e.to_string())
    }
}
