use proptest::prelude::*;

use votetime_analysis::dedup::unique_vote_ids;
use votetime_analysis::maturity::{maturity_height, TicketMaturity};
use votetime_analysis::resolver::VoteResolution;
use votetime_analysis::wait::wait_time;
use votetime_analysis::{Aggregator, VoteRecord};
use votetime_types::{Amount, OutPoint, RawTransactionRecord, Timestamp, TxHash, TxType};

fn tx_type() -> impl Strategy<Value = TxType> {
    prop_oneof![
        Just(TxType::Vote),
        Just(TxType::Ticket),
        Just(TxType::Regular),
        Just(TxType::Revocation),
    ]
}

fn listing() -> impl Strategy<Value = Vec<RawTransactionRecord>> {
    prop::collection::vec(
        (0u8..8, tx_type()).prop_map(|(id, t)| RawTransactionRecord::new(format!("tx{id}"), t)),
        0..40,
    )
}

fn record(wait_blocks: i64, wait_secs: i64) -> VoteRecord {
    let ticket = TxHash::new([1; 32]);
    let maturity = TicketMaturity {
        ticket,
        price: Amount::from_atoms(1),
        purchase_height: 100,
        purchase_time: Timestamp::new(0),
        maturity_height: 116,
        maturity_time: Timestamp::new(1_000_000),
    };
    let resolution = VoteResolution {
        vote: TxHash::new([2; 32]),
        ticket: OutPoint::new(ticket, 0, 1),
        vote_height: 116 + wait_blocks,
        vote_time: Timestamp::new(1_000_000 + wait_secs),
    };
    VoteRecord::new(&resolution, &maturity).unwrap()
}

proptest! {
    /// Deduplicated votes never outnumber the listing and contain no repeats.
    #[test]
    fn dedup_is_bounded_and_unique(listing in listing()) {
        let ids = unique_vote_ids(&listing);
        prop_assert!(ids.len() <= listing.len());
        let mut sorted = ids.clone();
        sorted.sort();
        sorted.dedup();
        prop_assert_eq!(sorted.len(), ids.len());
        for id in &ids {
            prop_assert!(listing.iter().any(|r| r.txid == *id && r.tx_type == TxType::Vote));
        }
    }

    /// Deduplicating the same listing twice gives the same result.
    #[test]
    fn dedup_is_idempotent(listing in listing()) {
        prop_assert_eq!(unique_vote_ids(&listing), unique_vote_ids(&listing));
    }

    /// Maturity height is exactly purchase height plus the constant.
    #[test]
    fn maturity_arithmetic_exact(purchase in 0i64..=i64::from(u32::MAX), maturity in 0u32..=u32::MAX) {
        let height = maturity_height(purchase, maturity).unwrap();
        prop_assert_eq!(height - purchase, i64::from(maturity));
    }

    /// Votes at or after maturity never wait a negative number of blocks.
    #[test]
    fn wait_sign_follows_vote_position(maturity_h in 0i64..1_000_000, offset in -10_000i64..10_000) {
        let wait = wait_time(maturity_h + offset, Timestamp::new(0), maturity_h, Timestamp::new(0)).unwrap();
        prop_assert_eq!(wait.blocks, offset);
        prop_assert_eq!(wait.blocks >= 0, offset >= 0);
    }

    /// Mean wait in days is the arithmetic mean of the seconds over 86400.
    #[test]
    fn mean_days_matches_definition(waits in prop::collection::vec(-100_000i64..10_000_000, 1..30)) {
        let mut agg = Aggregator::new();
        for (i, secs) in waits.iter().enumerate() {
            agg.push(record(i as i64, *secs));
        }
        let report = agg.finish().unwrap();
        let expected = waits.iter().sum::<i64>() as f64 / waits.len() as f64 / 86_400.0;
        let got = report.summary().mean_wait_days;
        prop_assert!((got - expected).abs() <= 1e-6 * expected.abs().max(1e-9) + 1e-12);
    }

    /// Reported records are non-decreasing in wait seconds.
    #[test]
    fn report_is_sorted(waits in prop::collection::vec(-100_000i64..10_000_000, 1..30)) {
        let mut agg = Aggregator::new();
        for secs in &waits {
            agg.push(record(0, *secs));
        }
        let report = agg.finish().unwrap();
        for pair in report.votes().windows(2) {
            prop_assert!(pair[0].wait_secs() <= pair[1].wait_secs());
        }
        prop_assert_eq!(report.votes().len(), waits.len());
    }
}
