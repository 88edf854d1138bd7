//! Aggregation and reporting of vote records.

use serde::Serialize;
use std::io;

use votetime_utils::time::secs_to_days;

use crate::{AnalysisError, VoteRecord};

/// Leading bytes of the ticket id shown per report line.
pub const ABBREVIATED_ID_BYTES: usize = 8;

/// Collects vote records and the running wait totals.
///
/// Totals are kept as `i128` so that summing any number of `i64` waits
/// cannot overflow.
#[derive(Debug, Default)]
pub struct Aggregator {
    records: Vec<VoteRecord>,
    total_wait_blocks: i128,
    total_wait_secs: i128,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Vec::with_capacity(capacity),
            ..Default::default()
        }
    }

    pub fn push(&mut self, record: VoteRecord) {
        self.total_wait_blocks += i128::from(record.wait_blocks());
        self.total_wait_secs += i128::from(record.wait_secs());
        self.records.push(record);
    }

    /// Compute the means and order the records by wait time.
    ///
    /// Fails with [`AnalysisError::NoVotesFound`] when nothing was collected.
    /// Records with equal wait times keep the order they were pushed in.
    pub fn finish(self) -> Result<Report, AnalysisError> {
        if self.records.is_empty() {
            return Err(AnalysisError::NoVotesFound);
        }

        let count = self.records.len() as f64;
        let mean_wait_secs = self.total_wait_secs as f64 / count;
        let summary = Summary {
            votes: self.records.len(),
            mean_wait_blocks: self.total_wait_blocks as f64 / count,
            mean_wait_secs,
            mean_wait_days: secs_to_days(mean_wait_secs),
        };

        let mut votes = self.records;
        votes.sort_by_key(VoteRecord::wait_secs);

        Ok(Report { votes, summary })
    }
}

/// Mean wait over all records.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Summary {
    pub votes: usize,
    pub mean_wait_blocks: f64,
    pub mean_wait_secs: f64,
    pub mean_wait_days: f64,
}

/// Vote records ordered by ascending wait time, with their summary.
#[derive(Clone, Debug, Serialize)]
pub struct Report {
    votes: Vec<VoteRecord>,
    summary: Summary,
}

impl Report {
    pub fn votes(&self) -> &[VoteRecord] {
        &self.votes
    }

    pub fn summary(&self) -> &Summary {
        &self.summary
    }

    /// One line per vote, then the summary line.
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.votes
            .iter()
            .map(vote_line)
            .chain(std::iter::once(summary_line(&self.summary)))
    }

    pub fn write_text<W: io::Write>(&self, out: &mut W) -> io::Result<()> {
        for line in self.lines() {
            writeln!(out, "{line}")?;
        }
        Ok(())
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

pub fn vote_line(record: &VoteRecord) -> String {
    format!(
        "Ticket {}... ({}) mined in block {}, voted {} blocks ({:.2} days) after maturity.",
        record.ticket().short(ABBREVIATED_ID_BYTES),
        record.ticket_price(),
        record.ticket_height(),
        record.wait_blocks(),
        record.wait().days(),
    )
}

pub fn summary_line(summary: &Summary) -> String {
    format!(
        "Mean wait for {} votes: {:.1} blocks, {:.2} days.",
        summary.votes, summary.mean_wait_blocks, summary.mean_wait_days
    )
}
