//! Post-run analysis of step logs.

pub mod commits;

pub use commits::{commit_boundaries, commit_sizes, size_deltas, CommitSize};
