//! Nullable infrastructure for deterministic testing.
//!
//! The wallet RPC source is abstracted behind the `TransactionSource` trait.
//! [`NullTransactionSource`] implements it from in-memory maps and can be told
//! to fail specific calls, so the analysis can be driven without a wallet.

pub mod fixtures;
pub mod source;

pub use fixtures::TicketVote;
pub use source::{NullTransactionSource, SourceCall};
