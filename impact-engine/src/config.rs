//! Engine configuration with sane defaults.

use crate::error::EngineError;

/// Lower bound for monthly team capacity (hours).
pub const MIN_CAPACITY: f64 = 40.0;
/// Upper bound for monthly team capacity (hours).
pub const MAX_CAPACITY: f64 = 320.0;
/// Capacity used when none is configured (one QA, full month).
pub const DEFAULT_CAPACITY: f64 = 160.0;

/// Tunable parameters for metric and aggregation computation.
#[derive(Debug, Clone)]
pub struct Config {
  /// Team capacity in hours/month, denominator of the environment score.
  pub capacity_hours: f64,
  /// First hour of day retained in the heatmap (inclusive).
  pub heatmap_hour_min: u32,
  /// Last hour of day retained in the heatmap (inclusive).
  pub heatmap_hour_max: u32,
  /// Hour assigned to incidents recorded without a start time.
  pub default_start_hour: u32,
  /// Width of each trend comparison window, in days.
  pub trend_window_days: i64,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      capacity_hours: DEFAULT_CAPACITY,
      heatmap_hour_min: 8,
      heatmap_hour_max: 19,
      default_start_hour: 12,
      trend_window_days: 7,
    }
  }
}

/// Validate a capacity value at the configuration boundary. The metric
/// calculator itself assumes `capacity_hours > 0`.
pub fn validate_capacity(hours: f64) -> Result<(), EngineError> {
  if !hours.is_finite() || hours <= 0.0 {
    return Err(EngineError::validation(
      "capacity_hours",
      "must be a positive number",
    ));
  }
  if !(MIN_CAPACITY..=MAX_CAPACITY).contains(&hours) {
    return Err(EngineError::validation(
      "capacity_hours",
      &format!("must be within [{}, {}] hours/month", MIN_CAPACITY, MAX_CAPACITY),
    ));
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn default_capacity_is_valid() {
    assert!(validate_capacity(Config::default().capacity_hours).is_ok());
  }

  #[test]
  fn rejects_non_positive_capacity() {
    assert!(validate_capacity(0.0).is_err());
    assert!(validate_capacity(-160.0).is_err());
    assert!(validate_capacity(f64::NAN).is_err());
  }

  #[test]
  fn rejects_out_of_bounds_capacity() {
    assert!(validate_capacity(39.9).is_err());
    assert!(validate_capacity(320.1).is_err());
    assert!(validate_capacity(40.0).is_ok());
    assert!(validate_capacity(320.0).is_ok());
  }
}
