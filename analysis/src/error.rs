//! Analysis errors.
//!
//! Every error is either recoverable (the vote it concerns is skipped and the
//! run continues) or fatal (the run stops and no report is produced).

use thiserror::Error;

use votetime_source::SourceError;
use votetime_types::TxHash;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("invalid transaction id {txid:?}: {reason}")]
    InvalidIdentity { txid: String, reason: String },

    #[error("vote {vote} has {inputs} inputs, expected at least 2")]
    MalformedVoteTransaction { vote: TxHash, inputs: usize },

    #[error("transaction {txid} is not yet mined")]
    UnconfirmedTransaction { txid: TxHash },

    #[error("ticket {ticket} has no output {index}")]
    OutputIndexOutOfRange { ticket: TxHash, index: u32 },

    /// Heights or block times too far apart to subtract; only corrupt chain
    /// data produces this.
    #[error("{what} of {txid} is out of range")]
    ArithmeticOverflow { txid: TxHash, what: &'static str },

    /// A lookup failed for this vote only; the source itself is healthy.
    #[error("{operation} failed: {source}")]
    Lookup {
        operation: &'static str,
        source: SourceError,
    },

    #[error("source unavailable during {operation}: {source}")]
    SourceUnavailable {
        operation: &'static str,
        source: SourceError,
    },

    #[error("no votes found")]
    NoVotesFound,
}

impl AnalysisError {
    /// Classify a source failure: transport and configuration problems are
    /// fatal, everything else is scoped to the vote being resolved.
    pub fn from_source(operation: &'static str, source: SourceError) -> Self {
        if source.is_fatal() {
            Self::SourceUnavailable { operation, source }
        } else {
            Self::Lookup { operation, source }
        }
    }

    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::SourceUnavailable { .. } | Self::NoVotesFound)
    }

    /// Whether the run may continue past this error by skipping one vote.
    pub fn is_recoverable(&self) -> bool {
        !self.is_fatal()
    }
}
