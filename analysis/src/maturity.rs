//! Ticket maturity lookup.

use votetime_source::TransactionSource;
use votetime_types::{Amount, OutPoint, Timestamp, TxHash};

use crate::AnalysisError;

/// When a ticket was bought, what it cost, and when it matured.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TicketMaturity {
    pub ticket: TxHash,
    pub price: Amount,
    pub purchase_height: i64,
    pub purchase_time: Timestamp,
    pub maturity_height: i64,
    pub maturity_time: Timestamp,
}

/// Height at which a ticket bought at `purchase_height` may first vote.
/// `None` if the sum does not fit in an `i64`.
pub fn maturity_height(purchase_height: i64, stake_maturity: u32) -> Option<i64> {
    purchase_height.checked_add(i64::from(stake_maturity))
}

/// Look up the purchase and maturity points of the ticket behind `staked`.
///
/// The ticket price is the value of the staked output. The maturity time is
/// the timestamp of the main-chain block at the maturity height.
pub async fn ticket_maturity<S>(
    source: &S,
    staked: &OutPoint,
    stake_maturity: u32,
) -> Result<TicketMaturity, AnalysisError>
where
    S: TransactionSource + ?Sized,
{
    let ticket = staked.hash;
    let detail = source
        .get_transaction_verbose(&ticket)
        .await
        .map_err(|e| AnalysisError::from_source("getrawtransaction verbose(ticket)", e))?;
    let (purchase_height, purchase_time) = detail
        .confirmed_at()
        .ok_or(AnalysisError::UnconfirmedTransaction { txid: ticket })?;
    let price = detail
        .output_value(staked.index)
        .ok_or(AnalysisError::OutputIndexOutOfRange {
            ticket,
            index: staked.index,
        })?;

    let maturity_height = maturity_height(purchase_height, stake_maturity).ok_or(
        AnalysisError::ArithmeticOverflow {
            txid: ticket,
            what: "maturity height",
        },
    )?;
    let block_hash = source
        .get_block_hash(maturity_height)
        .await
        .map_err(|e| AnalysisError::from_source("getblockhash(maturity)", e))?;
    let header = source
        .get_block_header(&block_hash)
        .await
        .map_err(|e| AnalysisError::from_source("getblockheader(maturity)", e))?;

    Ok(TicketMaturity {
        ticket,
        price,
        purchase_height,
        purchase_time,
        maturity_height,
        maturity_time: header.time,
    })
}
