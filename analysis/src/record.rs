//! The per-vote result of the analysis.

use serde::Serialize;

use votetime_types::{Amount, Timestamp, TxHash};

use crate::maturity::TicketMaturity;
use crate::resolver::VoteResolution;
use crate::wait::{wait_time, WaitTime};
use crate::AnalysisError;

/// A fully resolved vote and its wait after ticket maturity.
///
/// Built once from a resolution and a maturity lookup; read-only afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct VoteRecord {
    vote: TxHash,
    vote_height: i64,
    vote_time: Timestamp,
    ticket_price: Amount,
    ticket: TxHash,
    ticket_height: i64,
    ticket_time: Timestamp,
    ticket_maturity_height: i64,
    ticket_maturity_time: Timestamp,
    wait_blocks: i64,
    wait_secs: i64,
}

impl VoteRecord {
    /// Fails with [`AnalysisError::ArithmeticOverflow`] when the heights or
    /// times are too far apart to subtract.
    pub fn new(
        resolution: &VoteResolution,
        maturity: &TicketMaturity,
    ) -> Result<Self, AnalysisError> {
        let wait = wait_time(
            resolution.vote_height,
            resolution.vote_time,
            maturity.maturity_height,
            maturity.maturity_time,
        )
        .ok_or(AnalysisError::ArithmeticOverflow {
            txid: resolution.vote,
            what: "wait time",
        })?;
        Ok(Self {
            vote: resolution.vote,
            vote_height: resolution.vote_height,
            vote_time: resolution.vote_time,
            ticket_price: maturity.price,
            ticket: maturity.ticket,
            ticket_height: maturity.purchase_height,
            ticket_time: maturity.purchase_time,
            ticket_maturity_height: maturity.maturity_height,
            ticket_maturity_time: maturity.maturity_time,
            wait_blocks: wait.blocks,
            wait_secs: wait.secs,
        })
    }

    pub fn vote(&self) -> &TxHash {
        &self.vote
    }

    pub fn vote_height(&self) -> i64 {
        self.vote_height
    }

    pub fn vote_time(&self) -> Timestamp {
        self.vote_time
    }

    pub fn ticket_price(&self) -> Amount {
        self.ticket_price
    }

    pub fn ticket(&self) -> &TxHash {
        &self.ticket
    }

    pub fn ticket_height(&self) -> i64 {
        self.ticket_height
    }

    pub fn ticket_time(&self) -> Timestamp {
        self.ticket_time
    }

    pub fn ticket_maturity_height(&self) -> i64 {
        self.ticket_maturity_height
    }

    pub fn ticket_maturity_time(&self) -> Timestamp {
        self.ticket_maturity_time
    }

    pub fn wait(&self) -> WaitTime {
        WaitTime {
            blocks: self.wait_blocks,
            secs: self.wait_secs,
        }
    }

    pub fn wait_blocks(&self) -> i64 {
        self.wait_blocks
    }

    pub fn wait_secs(&self) -> i64 {
        self.wait_secs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use votetime_types::OutPoint;

    fn sides(vote_time: i64, maturity_time: i64) -> (VoteResolution, TicketMaturity) {
        let ticket = TxHash::new([1; 32]);
        let resolution = VoteResolution {
            vote: TxHash::new([2; 32]),
            ticket: OutPoint::new(ticket, 0, 1),
            vote_height: 1_300,
            vote_time: Timestamp::new(vote_time),
        };
        let maturity = TicketMaturity {
            ticket,
            price: Amount::from_atoms(9_000_000_000),
            purchase_height: 1_000,
            purchase_time: Timestamp::new(1_000),
            maturity_height: 1_256,
            maturity_time: Timestamp::new(maturity_time),
        };
        (resolution, maturity)
    }

    #[test]
    fn record_carries_both_sides_and_the_wait() {
        let (resolution, maturity) = sides(90_000, 77_800);
        let ticket = maturity.ticket;

        let record = VoteRecord::new(&resolution, &maturity).unwrap();
        assert_eq!(record.ticket(), &ticket);
        assert_eq!(record.ticket_height(), 1_000);
        assert_eq!(record.ticket_maturity_height(), 1_256);
        assert_eq!(record.wait_blocks(), 44);
        assert_eq!(record.wait_secs(), 12_200);
    }

    #[test]
    fn corrupt_block_time_is_an_error() {
        let (resolution, maturity) = sides(i64::MIN, 77_800);
        let err = VoteRecord::new(&resolution, &maturity).unwrap_err();
        assert_eq!(
            err,
            AnalysisError::ArithmeticOverflow {
                txid: resolution.vote,
                what: "wait time"
            }
        );
        assert!(err.is_recoverable());
    }
}
