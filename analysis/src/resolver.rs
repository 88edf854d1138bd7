//! Vote-to-ticket resolution.

use votetime_source::TransactionSource;
use votetime_types::{OutPoint, Timestamp, TxHash};

use crate::AnalysisError;

/// Input of a vote that spends the ticket's stake submission output.
pub const TICKET_INPUT_INDEX: usize = 1;

/// Where a vote was mined and which ticket output it redeemed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VoteResolution {
    pub vote: TxHash,
    /// The ticket transaction and the index of its staked output.
    pub ticket: OutPoint,
    pub vote_height: i64,
    pub vote_time: Timestamp,
}

/// Trace `vote` back to the ticket it spends.
///
/// The vote's second input spends the ticket's stake submission, so its
/// previous outpoint names the ticket transaction and output. The vote's own
/// block height and time come from the verbose transaction detail.
pub async fn resolve_vote<S>(source: &S, vote: &TxHash) -> Result<VoteResolution, AnalysisError>
where
    S: TransactionSource + ?Sized,
{
    let body = source
        .get_transaction(vote)
        .await
        .map_err(|e| AnalysisError::from_source("getrawtransaction(vote)", e))?;

    let ticket = *body
        .spent_outpoint(TICKET_INPUT_INDEX)
        .ok_or(AnalysisError::MalformedVoteTransaction {
            vote: *vote,
            inputs: body.inputs.len(),
        })?;

    let detail = source
        .get_transaction_verbose(vote)
        .await
        .map_err(|e| AnalysisError::from_source("getrawtransaction verbose(vote)", e))?;
    let (vote_height, vote_time) = detail
        .confirmed_at()
        .ok_or(AnalysisError::UnconfirmedTransaction { txid: *vote })?;

    Ok(VoteResolution {
        vote: *vote,
        ticket,
        vote_height,
        vote_time,
    })
}
