/// Name given to a demand loaded or added without one
pub const DEFAULT_DEMAND_NAME: &str = "none";

/// Reservable share of capacity when none is configured, in percent
pub const DEFAULT_PERCENT_RESERVABLE_BANDWIDTH: f64 = 100.0;

/// Absolute tolerance used when comparing bandwidth figures
pub const BANDWIDTH_EPSILON: f64 = 1e-9;

/// Returns true when two bandwidth values are equal within tolerance
pub fn bandwidth_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= BANDWIDTH_EPSILON * a.abs().max(b.abs()).max(1.0)
}
