//! End-to-end runs of the analysis pipeline against an in-memory source:
//! listing → deduplication → resolution → maturity → aggregation → report.

use votetime_analysis::{run, AnalysisConfig, AnalysisError};
use votetime_nullables::{NullTransactionSource, SourceCall, TicketVote};
use votetime_source::SourceError;
use votetime_types::{RawTransactionRecord, TxType};

const MATURITY: u32 = 256;

fn config() -> AnalysisConfig {
    AnalysisConfig {
        stake_maturity: MATURITY,
        ..Default::default()
    }
}

fn three_vote_source() -> (NullTransactionSource, [TicketVote; 3]) {
    let source = NullTransactionSource::new();
    let votes = [
        TicketVote::new(1, 10_000, MATURITY, 10, 30_000),
        TicketVote::new(2, 11_000, MATURITY, 5, 15_000),
        TicketVote::new(3, 12_000, MATURITY, 20, 60_000),
    ];
    for tv in &votes {
        source.add_ticket_vote(tv);
    }
    (source, votes)
}

// ---------------------------------------------------------------------------
// Reported statistics
// ---------------------------------------------------------------------------

#[tokio::test]
async fn three_votes_are_ordered_and_averaged() {
    let (source, votes) = three_vote_source();

    let outcome = run(&source, &config()).await.unwrap();
    assert!(outcome.skipped.is_empty());

    let report = outcome.report;
    let waits: Vec<(i64, i64)> = report
        .votes()
        .iter()
        .map(|r| (r.wait_blocks(), r.wait_secs()))
        .collect();
    assert_eq!(waits, vec![(5, 15_000), (10, 30_000), (20, 60_000)]);
    assert_eq!(report.votes()[0].ticket(), &votes[1].ticket);

    let summary = report.summary();
    assert_eq!(summary.votes, 3);
    assert!((summary.mean_wait_blocks - 35.0 / 3.0).abs() < 1e-9);
    let expected_days = 35_000.0 / 86_400.0;
    assert!((summary.mean_wait_days - expected_days).abs() / expected_days < 1e-6);

    let lines: Vec<String> = report.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[0].contains("voted 5 blocks (0.17 days)"));
    assert!(lines[2].contains("voted 20 blocks (0.69 days)"));
    assert_eq!(lines[3], "Mean wait for 3 votes: 11.7 blocks, 0.41 days.");
}

#[tokio::test]
async fn duplicate_listing_entries_count_once() {
    let (source, votes) = three_vote_source();
    for _ in 0..3 {
        source.push_listing(RawTransactionRecord::new(votes[0].vote.to_string(), TxType::Vote));
    }

    let outcome = run(&source, &config()).await.unwrap();
    assert_eq!(outcome.report.summary().votes, 3);
    let vote_lookups = source
        .calls()
        .iter()
        .filter(|c| **c == SourceCall::GetTransaction(votes[0].vote))
        .count();
    assert_eq!(vote_lookups, 1);
}

#[tokio::test]
async fn listing_window_is_passed_through() {
    let (source, _) = three_vote_source();
    // Each fixture contributes three entries: ticket, vote, vote.
    let config = AnalysisConfig {
        start_index: 3,
        max_count: 3,
        ..config()
    };

    let outcome = run(&source, &config).await.unwrap();
    assert_eq!(outcome.report.summary().votes, 1);
    assert_eq!(outcome.report.votes()[0].wait_blocks(), 5);
}

// ---------------------------------------------------------------------------
// Failure policy
// ---------------------------------------------------------------------------

#[tokio::test]
async fn empty_wallet_reports_no_votes() {
    let source = NullTransactionSource::new();
    let err = run(&source, &config()).await.unwrap_err();
    assert_eq!(err, AnalysisError::NoVotesFound);
}

#[tokio::test]
async fn wallet_without_votes_reports_no_votes() {
    let source = NullTransactionSource::new();
    source.push_listing(RawTransactionRecord::new("aa".repeat(32), TxType::Ticket));
    source.push_listing(RawTransactionRecord::new("bb".repeat(32), TxType::Regular));

    let err = run(&source, &config()).await.unwrap_err();
    assert_eq!(err, AnalysisError::NoVotesFound);
}

#[tokio::test]
async fn unknown_vote_is_skipped_and_run_continues() {
    let (source, _) = three_vote_source();
    let stray = "cd".repeat(32);
    source.push_listing(RawTransactionRecord::new(stray.clone(), TxType::Vote));

    let outcome = run(&source, &config()).await.unwrap();
    assert_eq!(outcome.report.summary().votes, 3);
    assert_eq!(outcome.skipped.len(), 1);
    assert_eq!(outcome.skipped[0].txid, stray);
}

#[tokio::test]
async fn malformed_vote_is_skipped() {
    let (source, votes) = three_vote_source();
    let mut body = votes[2].vote_body();
    body.inputs.truncate(1);
    source.add_transaction(votes[2].vote, body);

    let outcome = run(&source, &config()).await.unwrap();
    assert_eq!(outcome.report.summary().votes, 2);
    assert!(outcome.skipped[0].reason.contains("expected at least 2"));
}

#[tokio::test]
async fn every_vote_skipped_reports_no_votes() {
    let source = NullTransactionSource::new();
    source.push_listing(RawTransactionRecord::new("zz", TxType::Vote));

    let err = run(&source, &config()).await.unwrap_err();
    assert_eq!(err, AnalysisError::NoVotesFound);
}

#[tokio::test]
async fn transport_failure_aborts_the_run() {
    let (source, votes) = three_vote_source();
    source.fail(
        SourceCall::GetTransactionVerbose(votes[1].ticket),
        SourceError::Transport("connection refused".into()),
    );

    let err = run(&source, &config()).await.unwrap_err();
    assert!(matches!(err, AnalysisError::SourceUnavailable { .. }));
    assert!(err.is_fatal());

    // Resolution stopped at the failing vote; the third vote was never touched.
    let calls = source.calls();
    assert!(!calls.contains(&SourceCall::GetTransaction(votes[2].vote)));
}

#[tokio::test]
async fn listing_failure_aborts_the_run() {
    let source = NullTransactionSource::new();
    source.fail(
        SourceCall::ListTransactions,
        SourceError::Transport("wallet offline".into()),
    );
    let err = run(&source, &config()).await.unwrap_err();
    assert!(matches!(
        err,
        AnalysisError::SourceUnavailable {
            operation: "listtransactions",
            ..
        }
    ));
}
