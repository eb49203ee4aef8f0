//! Shared constants for the codevo simulation engine.

/// codevo version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default number of steps per simulation run.
pub const DEFAULT_ITERATIONS: u64 = 1000;

/// Default RNG seed.
pub const DEFAULT_SEED: u64 = 42;

/// Default number of simulations in a batch.
pub const DEFAULT_SIMULATIONS: u32 = 1;

/// Default action weights: create, call, update, remove, batch.
pub const DEFAULT_P_CREATE_METHOD: f64 = 0.1;
pub const DEFAULT_P_CALL_METHOD: f64 = 0.4;
pub const DEFAULT_P_UPDATE_METHOD: f64 = 0.45;
pub const DEFAULT_P_REMOVE_METHOD: f64 = 0.05;
pub const DEFAULT_P_BATCH_CHANGE: f64 = 0.0;

/// Tolerance when checking that action weights sum to 1.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Probability that create-method also creates a new class.
pub const DEFAULT_P_CREATE_CLASS: f64 = 0.1;

/// Probability that a new class has no parent class.
pub const DEFAULT_P_NO_INHERIT: f64 = 0.2;

/// Probability that update-method adds (rather than removes) a statement.
pub const DEFAULT_P_ADD_STATEMENT: f64 = 0.5;

/// Maximum no-op attempts per step before the run is reported as stalled.
pub const DEFAULT_MAX_RETRIES: u32 = 10_000;

/// Centrality fitness: PageRank damping factor.
pub const DEFAULT_DAMPING: f64 = 0.9;

/// Centrality fitness: maximum power iterations.
pub const DEFAULT_CENTRALITY_ITERATIONS: u32 = 100;

/// Centrality fitness: convergence tolerance (L1 over all nodes).
pub const CENTRALITY_TOLERANCE: f64 = 1e-6;

/// Centrality fitness: noise half-width for a method holding no lines.
pub const DEFAULT_CENTRALITY_NOISE: f64 = 0.2;

/// Exponential sampler: default decay rate over normalized rank.
pub const DEFAULT_EXPONENTIAL_RATE: f64 = 10.0;

/// Truncated-normal sampler: default standard deviation over normalized rank.
pub const DEFAULT_NORMAL_SIGMA: f64 = 0.1;

/// Batch change: exclusive upper bound on follow-up updates.
pub const BATCH_MAX_UPDATES: u32 = 10;

/// Default minimum-fitness threshold that closes a commit.
pub const DEFAULT_COMMIT_THRESHOLD: f64 = 0.1;

/// Environment variable holding the tracing filter.
pub const LOG_ENV_VAR: &str = "CODEVO_LOG";
