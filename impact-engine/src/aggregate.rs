//! Aggregator: group-by breakdowns, weekday×hour heatmap, daily timeline.
//!
//! Every function here is a pure fold over a record-set snapshot; callers may
//! hand in the full set or a pre-filtered subset, and inputs are never
//! mutated.

use chrono::{Datelike, Timelike};
use std::collections::BTreeMap;

use crate::config::Config;
use crate::types::{AggregateRow, HeatmapCell, Incident, TimelinePoint};

/// Group records by a key, summing LPH and counting per group.
///
/// Rows come back sorted by total LPH descending ("top offenders" order),
/// tie-broken by key ascending for determinism. Pareto-style consumers
/// reverse the slice.
pub fn group_by<'a, F>(records: &'a [Incident], key_fn: F) -> Vec<AggregateRow>
where
  F: Fn(&'a Incident) -> &'a str,
{
  let mut groups: BTreeMap<&str, (f64, u64)> = BTreeMap::new();
  for record in records {
    let entry = groups.entry(key_fn(record)).or_insert((0.0, 0));
    entry.0 += record.lph;
    entry.1 += 1;
  }

  let mut rows: Vec<AggregateRow> = groups
    .into_iter()
    .map(|(key, (total_lph, count))| AggregateRow {
      key: key.to_string(),
      total_lph,
      count,
    })
    .collect();
  rows.sort_by(|a, b| {
    b.total_lph
      .total_cmp(&a.total_lph)
      .then_with(|| a.key.cmp(&b.key))
  });
  rows
}

/// Placeholder key for records without a product. Shared with the browse
/// filter so a key shown in the breakdown is always filterable.
pub const UNSPECIFIED_PRODUCT: &str = "(unspecified)";

/// Key for the product breakdown. Records without a product are bucketed
/// under a visible placeholder so every breakdown conserves total LPH.
pub fn product_key(record: &Incident) -> &str {
  record.product.as_deref().unwrap_or(UNSPECIFIED_PRODUCT)
}

/// Short ISO weekday labels, indexed by days-from-Monday.
const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Pivot records into weekday × start-hour cells, summing LPH per cell.
///
/// Each record lands in exactly one cell: the weekday of its date and the
/// hour of its start time. Records without a start time are bucketed at
/// `config.default_start_hour` (noon by default — a documented convention).
/// Only hours within the configured window survive; when nothing survives
/// the result is empty, signalling "insufficient data" rather than a
/// zero-filled grid. Cells are ordered Mon..Sun, then by hour.
pub fn heatmap(records: &[Incident], config: &Config) -> Vec<HeatmapCell> {
  let mut cells: BTreeMap<(u32, u32), f64> = BTreeMap::new();
  for record in records {
    let hour = record
      .start_time
      .map(|t| t.hour())
      .unwrap_or(config.default_start_hour);
    if hour < config.heatmap_hour_min || hour > config.heatmap_hour_max {
      continue;
    }
    let day_index = record.date.weekday().num_days_from_monday();
    *cells.entry((day_index, hour)).or_insert(0.0) += record.lph;
  }

  cells
    .into_iter()
    .map(|((day_index, hour), total_lph)| HeatmapCell {
      day: WEEKDAYS[day_index as usize].to_string(),
      hour,
      total_lph,
    })
    .collect()
}

/// One point per distinct calendar date, summed LPH, ordered ascending.
pub fn timeline(records: &[Incident]) -> Vec<TimelinePoint> {
  let mut days: BTreeMap<chrono::NaiveDate, f64> = BTreeMap::new();
  for record in records {
    *days.entry(record.date).or_insert(0.0) += record.lph;
  }
  days
    .into_iter()
    .map(|(date, total_lph)| TimelinePoint { date, total_lph })
    .collect()
}
