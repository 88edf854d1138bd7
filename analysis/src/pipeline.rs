//! One analysis run: list, deduplicate, resolve each vote, aggregate.
//!
//! Votes are resolved one at a time. A recoverable failure skips the vote it
//! concerns; a fatal failure ends the run without a report.

use votetime_source::TransactionSource;
use votetime_types::TxHash;
use votetime_utils::time::format_duration;

use crate::dedup::unique_vote_ids;
use crate::maturity::ticket_maturity;
use crate::resolver::resolve_vote;
use crate::{AnalysisConfig, AnalysisError, Aggregator, Report, VoteRecord};

/// A vote that was left out of the report, and why.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkippedVote {
    pub txid: String,
    pub reason: String,
}

/// Result of a completed run.
#[derive(Clone, Debug)]
pub struct RunOutcome {
    pub report: Report,
    pub skipped: Vec<SkippedVote>,
}

/// Analyse every vote in the wallet's transaction listing.
pub async fn run<S>(source: &S, config: &AnalysisConfig) -> Result<RunOutcome, AnalysisError>
where
    S: TransactionSource + ?Sized,
{
    tracing::info!(account = %config.account, "listing all transaction inputs and outputs");
    let listing = source
        .list_transactions(&config.account, config.max_count, config.start_index)
        .await
        .map_err(|source| AnalysisError::SourceUnavailable {
            operation: "listtransactions",
            source,
        })?;

    let vote_ids = unique_vote_ids(&listing);
    tracing::info!(
        entries = listing.len(),
        votes = vote_ids.len(),
        "collected unique votes"
    );

    let mut aggregator = Aggregator::with_capacity(vote_ids.len());
    let mut skipped = Vec::new();

    for txid in vote_ids {
        match analyze_vote(source, txid, config.stake_maturity).await {
            Ok(record) => aggregator.push(record),
            Err(e) if e.is_recoverable() => {
                tracing::warn!(vote = %txid, error = %e, "skipping vote");
                skipped.push(SkippedVote {
                    txid: txid.to_string(),
                    reason: e.to_string(),
                });
            }
            Err(e) => {
                tracing::error!(vote = %txid, error = %e, "aborting run");
                return Err(e);
            }
        }
    }

    let report = aggregator.finish()?;
    Ok(RunOutcome { report, skipped })
}

/// Resolve one vote, by id, into a [`VoteRecord`].
pub async fn analyze_vote<S>(
    source: &S,
    txid: &str,
    stake_maturity: u32,
) -> Result<VoteRecord, AnalysisError>
where
    S: TransactionSource + ?Sized,
{
    let vote = txid
        .parse::<TxHash>()
        .map_err(|e| AnalysisError::InvalidIdentity {
            txid: txid.to_string(),
            reason: e.to_string(),
        })?;

    let resolution = resolve_vote(source, &vote).await?;
    let maturity = ticket_maturity(source, &resolution.ticket, stake_maturity).await?;
    let record = VoteRecord::new(&resolution, &maturity)?;

    if record.wait().is_negative() {
        tracing::warn!(
            vote = %vote,
            ticket = %record.ticket(),
            wait_blocks = record.wait_blocks(),
            wait_secs = record.wait_secs(),
            "vote precedes ticket maturity"
        );
    }
    tracing::debug!(
        vote = %vote,
        ticket = %record.ticket(),
        wait_blocks = record.wait_blocks(),
        wait = %format_duration(record.wait_secs()),
        "resolved vote"
    );

    Ok(record)
}
