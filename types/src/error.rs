//! Errors raised while constructing core types from external input.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypesError {
    #[error("invalid hash string {input:?}: {reason}")]
    InvalidHash { input: String, reason: String },

    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("unknown network: {0}")]
    UnknownNetwork(String),
}
