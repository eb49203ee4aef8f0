//! Tests for tracing initialization.

use std::sync::Mutex;

use codevo_core::constants::LOG_ENV_VAR;
use codevo_core::tracing::init_tracing;

/// Serializes tests that touch `CODEVO_LOG`.
static TRACING_MUTEX: Mutex<()> = Mutex::new(());

#[test]
fn test_per_module_filter_accepted() {
    let _lock = TRACING_MUTEX.lock().unwrap();
    std::env::set_var(LOG_ENV_VAR, "codevo_sim::actions=debug,codevo_sim::engine=info");
    init_tracing();
    std::env::remove_var(LOG_ENV_VAR);
}

#[test]
fn test_init_is_idempotent() {
    let _lock = TRACING_MUTEX.lock().unwrap();
    init_tracing();
    init_tracing();
    tracing::info!("still logging after repeated init");
}

// Garbage filters fall back to codevo=info instead of panicking.
#[test]
fn test_invalid_filter_falls_back() {
    let _lock = TRACING_MUTEX.lock().unwrap();
    std::env::set_var(LOG_ENV_VAR, "===not a filter===");
    init_tracing();
    std::env::remove_var(LOG_ENV_VAR);
}
