//! Vote deduplication.

use std::collections::HashSet;

use votetime_types::RawTransactionRecord;

/// Distinct ids of the vote transactions in `listing`, in first-seen order.
///
/// A wallet lists a transaction once per input or output it tracks, so the
/// same vote can appear several times. Non-vote entries are dropped. Ids are
/// compared as strings; parsing happens later, per vote.
pub fn unique_vote_ids(listing: &[RawTransactionRecord]) -> Vec<&str> {
    let mut seen = HashSet::with_capacity(listing.len());
    listing
        .iter()
        .filter(|record| record.is_vote())
        .map(|record| record.txid.as_str())
        .filter(|txid| seen.insert(*txid))
        .collect()
}
