//! Shared data-structure re-exports.

pub mod collections;

pub use collections::{FxHashMap, FxHashSet};
