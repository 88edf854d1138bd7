//! Vote wait-time analysis.
//!
//! Traces every vote in a wallet's history back to the ticket it redeemed and
//! measures how long, in blocks and in seconds, the vote came after the ticket
//! matured:
//!
//! - [`dedup`] collapses the wallet listing to distinct vote ids
//! - [`resolver`] finds the ticket outpoint a vote spends and where the vote was mined
//! - [`maturity`] finds the ticket's price, purchase point and maturity block
//! - [`wait`] computes the block and time differences
//! - [`report`] aggregates the records, orders them and renders the report
//! - [`pipeline`] wires the steps together for one run

pub mod config;
pub mod dedup;
pub mod error;
pub mod maturity;
pub mod pipeline;
pub mod record;
pub mod report;
pub mod resolver;
pub mod wait;

pub use config::AnalysisConfig;
pub use error::AnalysisError;
pub use pipeline::{analyze_vote, run, RunOutcome, SkippedVote};
pub use record::VoteRecord;
pub use report::{Aggregator, Report, Summary};
