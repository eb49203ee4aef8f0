//! Shared foundation for the codevo workspace.
//! Errors, layered configuration, tracing setup, simulation events, collections, constants.

pub mod config;
pub mod constants;
pub mod errors;
pub mod events;
pub mod tracing;
pub mod types;
