//! Core types for the impact engine (JSON contracts + internal models).

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::EngineError;

// ---------------------------------------------------------------------------
// Inbound types (JSON contract — what the caller sends)
// ---------------------------------------------------------------------------

/// One request line from stdin, tagged by `op`. Unknown fields are ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Request {
  Config(ConfigInput),
  Incident(IncidentInput),
  Dashboard,
  Browse(BrowseQuery),
}

/// Partial configuration update. Absent fields keep their current value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigInput {
  #[serde(default)]
  pub capacity_hours: Option<f64>,
  #[serde(default)]
  pub impact_weights: Option<BTreeMap<String, f64>>,
  #[serde(default)]
  pub squads: Option<Vec<String>>,
}

/// One inbound incident record, before validation/admission.
///
/// `weight` is only set when replaying an already-stored record; for a new
/// incident it is snapshotted from the current weight table at admission.
#[derive(Debug, Clone, Deserialize)]
pub struct IncidentInput {
  /// Calendar date, "YYYY-MM-DD".
  pub date: String,
  /// Time of day, "HH:MM". Optional; heatmap buckets missing times at noon.
  #[serde(default)]
  pub start_time: Option<String>,
  pub squad: String,
  #[serde(default)]
  pub product: Option<String>,
  pub category: String,
  pub impact_type: String,
  pub duration_hours: f64,
  #[serde(default)]
  pub description: Option<String>,
  #[serde(default)]
  pub weight: Option<f64>,
  /// RFC 3339 creation stamp; defaults to the admission clock when absent.
  #[serde(default)]
  pub created_at: Option<String>,
}

// ---------------------------------------------------------------------------
// Weight table (validated configuration mapping)
// ---------------------------------------------------------------------------

/// Impact-type name → severity weight in [0, 1]. Keys are validated at this
/// boundary so the aggregation core never sees an out-of-range weight.
#[derive(Debug, Clone, Default)]
pub struct WeightTable {
  weights: BTreeMap<String, f64>,
}

impl WeightTable {
  pub fn new() -> Self {
    Self::default()
  }

  /// The impact types seeded on first run, before any configuration arrives.
  pub fn with_defaults() -> Self {
    let mut table = Self::new();
    for (name, weight) in [
      ("Total Blockage (system down)", 1.0),
      ("Severe Slowdown (heavy degradation)", 0.75),
      ("Moderate Slowdown (light instability)", 0.25),
    ] {
      // Literals above are in range; insert cannot fail here.
      let _ = table.insert(name, weight);
    }
    table
  }

  pub fn insert(&mut self, name: &str, weight: f64) -> Result<(), EngineError> {
    if name.trim().is_empty() {
      return Err(EngineError::validation("impact_type", "name must not be empty"));
    }
    if !(0.0..=1.0).contains(&weight) || !weight.is_finite() {
      return Err(EngineError::validation(
        "weight",
        &format!("must be in [0, 1], got {}", weight),
      ));
    }
    self.weights.insert(name.trim().to_string(), weight);
    Ok(())
  }

  pub fn get(&self, name: &str) -> Option<f64> {
    self.weights.get(name.trim()).copied()
  }

  pub fn is_empty(&self) -> bool {
    self.weights.is_empty()
  }
}

// ---------------------------------------------------------------------------
// Canonical internal record
// ---------------------------------------------------------------------------

/// Canonical incident after validation. `weight` is a creation-time snapshot
/// and `lph == duration_hours * weight` always; neither is ever re-derived
/// from the current weight table.
#[derive(Debug, Clone, Serialize)]
pub struct Incident {
  pub id: u64,
  pub date: NaiveDate,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub start_time: Option<NaiveTime>,
  pub squad: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub product: Option<String>,
  pub category: String,
  pub impact_type: String,
  pub weight: f64,
  pub duration_hours: f64,
  pub lph: f64,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
  pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Score banding
// ---------------------------------------------------------------------------

/// Health classification of the environment score (0-10).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreBand {
  Healthy,
  Attention,
  Critical,
}

// ---------------------------------------------------------------------------
// Browse query (filter / sort / page)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
  Date,
  Lph,
  Duration,
  Squad,
  Category,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDir {
  #[default]
  Asc,
  Desc,
}

fn default_page_size() -> usize {
  20
}

fn default_page() -> usize {
  1
}

/// Filter/sort/page request. Empty set filters constrain nothing; all
/// constraints are conjunctive. Pagination is 1-indexed.
#[derive(Debug, Clone, Deserialize)]
pub struct BrowseQuery {
  #[serde(default)]
  pub date_from: Option<NaiveDate>,
  #[serde(default)]
  pub date_to: Option<NaiveDate>,
  #[serde(default)]
  pub squads: Vec<String>,
  #[serde(default)]
  pub products: Vec<String>,
  #[serde(default)]
  pub categories: Vec<String>,
  #[serde(default)]
  pub impact_types: Vec<String>,
  #[serde(default)]
  pub sort_by: Option<SortKey>,
  #[serde(default)]
  pub direction: SortDir,
  #[serde(default = "default_page_size")]
  pub page_size: usize,
  #[serde(default = "default_page")]
  pub page: usize,
}

impl Default for BrowseQuery {
  fn default() -> Self {
    Self {
      date_from: None,
      date_to: None,
      squads: Vec::new(),
      products: Vec::new(),
      categories: Vec::new(),
      impact_types: Vec::new(),
      sort_by: None,
      direction: SortDir::Asc,
      page_size: default_page_size(),
      page: default_page(),
    }
  }
}

// ---------------------------------------------------------------------------
// Output types (JSON contract — what we emit)
// ---------------------------------------------------------------------------

/// Summed LPH + record count for one grouping key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateRow {
  pub key: String,
  pub total_lph: f64,
  pub count: u64,
}

/// One heatmap cell: ISO weekday ("Mon".."Sun") × hour of day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatmapCell {
  pub day: String,
  pub hour: u32,
  pub total_lph: f64,
}

/// One daily timeline point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelinePoint {
  pub date: NaiveDate,
  pub total_lph: f64,
}

/// Rolling 7-day window deltas (last 7 days vs the 7 before them).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Trend {
  pub lph_delta: f64,
  pub incident_delta: i64,
}

/// Everything the reporting surface renders for one snapshot of the record set.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardReport {
  pub incident_count: u64,
  pub total_lph: f64,
  pub mean_lph: f64,
  pub environment_score: f64,
  pub score_band: ScoreBand,
  pub trend: Trend,
  pub by_category: Vec<AggregateRow>,
  pub by_squad: Vec<AggregateRow>,
  pub by_product: Vec<AggregateRow>,
  pub heatmap: Vec<HeatmapCell>,
  pub timeline: Vec<TimelinePoint>,
}

/// One browse result page.
#[derive(Debug, Clone, Serialize)]
pub struct Page {
  pub records: Vec<Incident>,
  pub page: usize,
  pub total_pages: usize,
  pub total_records: usize,
}

/// Acknowledgement for requests with no payload to return.
#[derive(Debug, Clone, Serialize)]
pub struct Ack {
  pub ok: bool,
}

// ---------------------------------------------------------------------------
// CLI stream wrappers
// ---------------------------------------------------------------------------

/// Structured error output for invalid input lines.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorOutput {
  pub error: bool,
  pub message: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub field: Option<String>,
}

impl ErrorOutput {
  pub fn new(message: impl Into<String>) -> Self {
    Self {
      error: true,
      message: message.into(),
      field: None,
    }
  }

  pub fn with_field(mut self, field: impl Into<String>) -> Self {
    self.field = Some(field.into());
    self
  }
}
