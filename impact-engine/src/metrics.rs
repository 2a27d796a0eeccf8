//! Metric calculator: LPH conversion, environment score, score banding.

use crate::types::{Incident, ScoreBand};

/// Lost productive hours for one incident: duration × severity weight.
/// No rounding here; rounding is a presentation concern.
pub fn compute_lph(duration_hours: f64, weight: f64) -> f64 {
  duration_hours * weight
}

/// Environment health score in [0, 10]: `10 * (1 - total_lph / capacity)`,
/// clamped. Assumes `capacity_hours > 0` (enforced at the config boundary,
/// see [`crate::config::validate_capacity`]).
pub fn compute_environment_score(total_lph: f64, capacity_hours: f64) -> f64 {
  (10.0 * (1.0 - total_lph / capacity_hours)).clamp(0.0, 10.0)
}

impl ScoreBand {
  /// Band thresholds: >= 7 healthy, >= 4 attention, below that critical.
  pub fn from_score(score: f64) -> Self {
    if score >= 7.0 {
      Self::Healthy
    } else if score >= 4.0 {
      Self::Attention
    } else {
      Self::Critical
    }
  }
}

/// Scalar summary of a record set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
  pub incident_count: u64,
  pub total_lph: f64,
  pub mean_lph: f64,
}

/// Sum and average LPH over a record set. The empty set yields all zeros
/// rather than NaN.
pub fn summarize(records: &[Incident]) -> Summary {
  let total_lph: f64 = records.iter().map(|r| r.lph).sum();
  let incident_count = records.len() as u64;
  let mean_lph = if records.is_empty() {
    0.0
  } else {
    total_lph / records.len() as f64
  };
  Summary {
    incident_count,
    total_lph,
    mean_lph,
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::testutil::incident;

  #[test]
  fn lph_is_exact_product() {
    assert_eq!(compute_lph(2.0, 1.0), 2.0);
    assert_eq!(compute_lph(4.0, 0.25), 1.0);
    assert_eq!(compute_lph(1.0, 0.75), 0.75);
    assert_eq!(compute_lph(1.5, 0.0), 0.0);
  }

  #[test]
  fn score_extremes() {
    assert_eq!(compute_environment_score(0.0, 160.0), 10.0);
    assert_eq!(compute_environment_score(160.0, 160.0), 0.0);
  }

  #[test]
  fn score_is_clamped_not_negative() {
    assert_eq!(compute_environment_score(320.0, 160.0), 0.0);
  }

  #[test]
  fn score_midpoint() {
    let score = compute_environment_score(80.0, 160.0);
    assert!((score - 5.0).abs() < 1e-12);
  }

  #[test]
  fn band_boundaries() {
    assert_eq!(ScoreBand::from_score(10.0), ScoreBand::Healthy);
    assert_eq!(ScoreBand::from_score(7.0), ScoreBand::Healthy);
    assert_eq!(ScoreBand::from_score(6.99), ScoreBand::Attention);
    assert_eq!(ScoreBand::from_score(4.0), ScoreBand::Attention);
    assert_eq!(ScoreBand::from_score(3.99), ScoreBand::Critical);
    assert_eq!(ScoreBand::from_score(0.0), ScoreBand::Critical);
  }

  #[test]
  fn summarize_empty_is_zeroed() {
    let s = summarize(&[]);
    assert_eq!(s.incident_count, 0);
    assert_eq!(s.total_lph, 0.0);
    assert_eq!(s.mean_lph, 0.0);
  }

  #[test]
  fn summarize_totals() {
    let records = vec![
      incident(1, "2025-03-10", "A", 2.0, 1.0),
      incident(2, "2025-03-11", "A", 4.0, 0.25),
      incident(3, "2025-03-12", "B", 1.0, 0.75),
    ];
    let s = summarize(&records);
    assert_eq!(s.incident_count, 3);
    assert_eq!(s.total_lph, 3.75);
    assert_eq!(s.mean_lph, 1.25);
  }
}
