/*!
 * System Limits and Constants
 *
 * Defaults and environment knobs for the buddy ledger.
 */

// =============================================================================
// MEMORY LIMITS
// =============================================================================

/// Default managed range (1024 units)
/// Matches the reference demonstration sequence
pub const DEFAULT_TOTAL_SIZE: usize = 1024;

const _: () = assert!(DEFAULT_TOTAL_SIZE.is_power_of_two());

/// Usage ratio at which pressure is reported as Medium
pub const PRESSURE_MEDIUM_THRESHOLD: f64 = 0.60;

/// Usage ratio at which pressure is reported as High
pub const PRESSURE_HIGH_THRESHOLD: f64 = 0.80;

/// Usage ratio at which pressure is reported as Critical
pub const PRESSURE_CRITICAL_THRESHOLD: f64 = 0.95;

// =============================================================================
// ENVIRONMENT
// =============================================================================

/// Overrides the managed range size for the demo binary
pub const TOTAL_SIZE_ENV: &str = "BUDDY_TOTAL_SIZE";

/// Enables JSON trace output when set to `1` or `true`
pub const TRACE_JSON_ENV: &str = "BUDDY_TRACE_JSON";
