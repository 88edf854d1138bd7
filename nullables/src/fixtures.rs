//! Ready-made ticket/vote chains for populating a [`NullTransactionSource`].

use votetime_types::{
    Amount, BlockHash, BlockHeader, OutPoint, RawTransactionRecord, Timestamp, TransactionBody,
    TxHash, TxInput, TxType, VerboseOutput, VerboseTransaction,
};

use crate::NullTransactionSource;

/// Unix time of block zero in generated chains.
pub const GENESIS_TIME: i64 = 1_454_954_400;

/// Block spacing in generated chains.
pub const BLOCK_SECS: i64 = 300;

/// A ticket purchase and the vote that spends it.
#[derive(Clone, Debug)]
pub struct TicketVote {
    pub ticket: TxHash,
    pub ticket_output: u32,
    pub ticket_height: i64,
    pub price: Amount,
    pub vote: TxHash,
    pub vote_height: i64,
    pub vote_time: Timestamp,
    pub maturity: u32,
}

impl TicketVote {
    /// A ticket bought at `ticket_height` that votes `wait_blocks` blocks and
    /// `wait_secs` seconds after maturing. `seed` distinguishes the hashes.
    pub fn new(seed: u8, ticket_height: i64, maturity: u32, wait_blocks: i64, wait_secs: i64) -> Self {
        let maturity_height = ticket_height + i64::from(maturity);
        Self {
            ticket: tagged_hash(0x71, seed),
            ticket_output: 0,
            ticket_height,
            price: Amount::from_atoms(100 * 100_000_000 + i64::from(seed)),
            vote: tagged_hash(0x7e, seed),
            vote_height: maturity_height + wait_blocks,
            vote_time: Timestamp::new(block_time(maturity_height) + wait_secs),
            maturity,
        }
    }

    pub fn maturity_height(&self) -> i64 {
        self.ticket_height + i64::from(self.maturity)
    }

    /// The vote transaction: a stakebase input followed by the ticket spend.
    pub fn vote_body(&self) -> TransactionBody {
        TransactionBody {
            version: 1,
            inputs: vec![
                TxInput {
                    previous_outpoint: OutPoint::new(TxHash::ZERO, u32::MAX, 0),
                    sequence: u32::MAX,
                },
                TxInput {
                    previous_outpoint: OutPoint::new(self.ticket, self.ticket_output, 1),
                    sequence: u32::MAX,
                },
            ],
            ..Default::default()
        }
    }
}

/// Deterministic timestamp of the block at `height`.
pub fn block_time(height: i64) -> i64 {
    GENESIS_TIME + height * BLOCK_SECS
}

/// Deterministic hash of the block at `height`.
pub fn block_hash(height: i64) -> BlockHash {
    let mut bytes = [0xbb; 32];
    bytes[..8].copy_from_slice(&height.to_le_bytes());
    BlockHash::new(bytes)
}

pub fn block_header(height: i64) -> BlockHeader {
    BlockHeader {
        hash: block_hash(height),
        height,
        time: Timestamp::new(block_time(height)),
    }
}

fn tagged_hash(tag: u8, seed: u8) -> TxHash {
    let mut bytes = [seed; 32];
    bytes[31] = tag;
    TxHash::new(bytes)
}

impl NullTransactionSource {
    /// Register the ticket, the vote, the maturity block, and wallet listing
    /// entries for `tv`. The vote is listed twice, as wallets list it once per
    /// wallet-relevant output.
    pub fn add_ticket_vote(&self, tv: &TicketVote) {
        let ticket_outputs = (0..=tv.ticket_output)
            .map(|index| VerboseOutput {
                index,
                value: if index == tv.ticket_output {
                    tv.price
                } else {
                    Amount::ZERO
                },
            })
            .collect();
        self.add_verbose(VerboseTransaction {
            txid: tv.ticket,
            block_hash: Some(block_hash(tv.ticket_height)),
            block_height: Some(tv.ticket_height),
            block_time: Some(Timestamp::new(block_time(tv.ticket_height))),
            outputs: ticket_outputs,
        });

        self.add_transaction(tv.vote, tv.vote_body());
        self.add_verbose(VerboseTransaction {
            txid: tv.vote,
            block_hash: Some(block_hash(tv.vote_height)),
            block_height: Some(tv.vote_height),
            block_time: Some(tv.vote_time),
            outputs: Vec::new(),
        });

        self.add_block(block_header(tv.maturity_height()));

        self.push_listing(RawTransactionRecord::new(tv.ticket.to_string(), TxType::Ticket));
        self.push_listing(RawTransactionRecord::new(tv.vote.to_string(), TxType::Vote));
        self.push_listing(RawTransactionRecord::new(tv.vote.to_string(), TxType::Vote));
    }
}
