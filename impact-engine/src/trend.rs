//! Trend comparator: rolling 7-day window vs the 7 days before it.

use chrono::Duration;

use crate::config::Config;
use crate::types::{Incident, Trend};

/// Compare the last `trend_window_days` against the window before it.
///
/// The reference day is max(date) over the records, not the wall clock, so
/// the result is a deterministic function of the stored data. With
/// `today = max(date)`, the current window is `[today - 7d, today]` and the
/// baseline window is `[today - 14d, today - 7d)`.
///
/// An empty baseline window reports zero deltas: a team's first week of data
/// is not a spike against nothing. Empty record sets likewise report zeros.
pub fn compute_trend(records: &[Incident], config: &Config) -> Trend {
  let today = match records.iter().map(|r| r.date).max() {
    Some(d) => d,
    None => return Trend { lph_delta: 0.0, incident_delta: 0 },
  };
  let window = Duration::days(config.trend_window_days);
  let current_start = today - window;
  let baseline_start = today - window - window;

  let mut current_lph = 0.0;
  let mut current_count: i64 = 0;
  let mut baseline_lph = 0.0;
  let mut baseline_count: i64 = 0;

  for record in records {
    if record.date >= current_start && record.date <= today {
      current_lph += record.lph;
      current_count += 1;
    } else if record.date >= baseline_start && record.date < current_start {
      baseline_lph += record.lph;
      baseline_count += 1;
    }
  }

  if baseline_count == 0 {
    return Trend { lph_delta: 0.0, incident_delta: 0 };
  }

  Trend {
    lph_delta: current_lph - baseline_lph,
    incident_delta: current_count - baseline_count,
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::testutil::incident;

  fn trend_of(records: &[Incident]) -> Trend {
    compute_trend(records, &Config::default())
  }

  #[test]
  fn empty_set_is_zero() {
    let t = trend_of(&[]);
    assert_eq!(t.lph_delta, 0.0);
    assert_eq!(t.incident_delta, 0);
  }

  #[test]
  fn empty_baseline_is_zero_regardless_of_current_window() {
    // All records within the last 7 days of the max date; no baseline at all.
    let records = vec![
      incident(1, "2025-03-10", "A", 8.0, 1.0),
      incident(2, "2025-03-12", "A", 4.0, 1.0),
      incident(3, "2025-03-14", "B", 2.0, 1.0),
    ];
    let t = trend_of(&records);
    assert_eq!(t.lph_delta, 0.0);
    assert_eq!(t.incident_delta, 0);
  }

  #[test]
  fn deltas_between_consecutive_windows() {
    // Reference day 2025-03-20: current [03-13, 03-20], baseline [03-06, 03-13).
    let records = vec![
      incident(1, "2025-03-20", "A", 4.0, 1.0), // current
      incident(2, "2025-03-15", "A", 2.0, 1.0), // current
      incident(3, "2025-03-10", "A", 1.0, 1.0), // baseline
    ];
    let t = trend_of(&records);
    assert_eq!(t.lph_delta, 5.0);
    assert_eq!(t.incident_delta, 1);
  }

  #[test]
  fn window_boundaries_are_inclusive_exclusive() {
    // Reference day 2025-03-20: 03-13 belongs to the current window (inclusive
    // lower bound), 03-06 to the baseline, 03-05 to neither.
    let records = vec![
      incident(1, "2025-03-20", "A", 1.0, 1.0),
      incident(2, "2025-03-13", "A", 2.0, 1.0),
      incident(3, "2025-03-06", "A", 4.0, 1.0),
      incident(4, "2025-03-05", "A", 100.0, 1.0),
    ];
    let t = trend_of(&records);
    assert_eq!(t.lph_delta, (1.0 + 2.0) - 4.0);
    assert_eq!(t.incident_delta, 1);
  }

  #[test]
  fn negative_delta_when_things_improve() {
    let records = vec![
      incident(1, "2025-03-20", "A", 1.0, 1.0), // current
      incident(2, "2025-03-08", "A", 4.0, 1.0), // baseline
      incident(3, "2025-03-09", "A", 4.0, 1.0), // baseline
    ];
    let t = trend_of(&records);
    assert_eq!(t.lph_delta, -7.0);
    assert_eq!(t.incident_delta, -1);
  }
}
