//! Commit segmentation of a step log.
//!
//! A step whose minimum fitness reaches the threshold `f0` closes a commit.
//! Commit `k` covers the steps from the previous boundary (inclusive) up to
//! boundary `k` (exclusive); its size comes from the code-size deltas of
//! those steps.

use serde::{Deserialize, Serialize};

use crate::engine::StatisticsLog;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitSize {
    /// Step index of the boundary closing this commit.
    pub boundary: u64,
    /// Steps covered.
    pub steps: usize,
    /// Lines added.
    pub added: u64,
    /// Lines deleted.
    pub removed: u64,
    /// added - removed
    pub net: i64,
    /// max(added, removed)
    pub max: u64,
}

/// Record positions whose fmin is at least `f0`.
pub fn commit_boundaries(log: &StatisticsLog, f0: f64) -> Vec<usize> {
    log.records()
        .iter()
        .enumerate()
        .filter(|(_, r)| r.fmin >= f0)
        .map(|(i, _)| i)
        .collect()
}

/// Code-size delta per record. The first record is compared with the
/// log's initial code size.
pub fn size_deltas(log: &StatisticsLog) -> Vec<i64> {
    let mut previous = log.initial_code_size as i64;
    log.records()
        .iter()
        .map(|r| {
            let size = r.code_size as i64;
            let delta = size - previous;
            previous = size;
            delta
        })
        .collect()
}

/// Per-commit line counts for one log.
pub fn commit_sizes(log: &StatisticsLog, f0: f64) -> Vec<CommitSize> {
    let deltas = size_deltas(log);
    let records = log.records();
    let mut start = 0usize;

    commit_boundaries(log, f0)
        .into_iter()
        .map(|end| {
            let slice = &deltas[start..end];
            let added: u64 = slice.iter().filter(|d| **d > 0).map(|d| d.unsigned_abs()).sum();
            let removed: u64 = slice.iter().filter(|d| **d < 0).map(|d| d.unsigned_abs()).sum();
            let commit = CommitSize {
                boundary: records[end].step,
                steps: end - start,
                added,
                removed,
                net: added as i64 - removed as i64,
                max: added.max(removed),
            };
            start = end;
            commit
        })
        .collect()
}
