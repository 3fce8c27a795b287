//! Debugging feature flags.
//!
//! Toggle individual diagnostics here; keep the noisy ones `false` so the
//! interactive prompt stays readable in normal runs.

/// Emit selector interaction logs (toggles, select-all, clear-all, filter edits).
pub const PRINT_SELECTOR_EVENTS: bool = true;

/// Emit detailed serialization/deserialization logs for the catalog cache.
pub const PRINT_SERDE: bool = false;

/// Emit per-attempt logs while the REST fetch is retrying.
pub const PRINT_FETCH_RETRIES: bool = false;
