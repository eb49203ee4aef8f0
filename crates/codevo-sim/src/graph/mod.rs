//! Reference graph and class registry.

pub mod classes;
pub mod types;

pub use classes::{ClassNode, ClassRegistry};
pub use types::{CallEdge, MethodNode, ReferenceGraph, Statement};
