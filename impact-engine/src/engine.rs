//! Session facade: owns the configuration and the admitted record set, and
//! delegates every computation to the pure modules. Each report call works
//! from the snapshot as it stands; nothing here retries or blocks.

use chrono::{NaiveDate, Utc};

use crate::aggregate;
use crate::browse;
use crate::config::{self, Config};
use crate::error::EngineError;
use crate::metrics;
use crate::trend;
use crate::types::{
  BrowseQuery, ConfigInput, DashboardReport, Incident, IncidentInput, Page, ScoreBand,
  WeightTable,
};
use crate::validate::{self, AdmissionContext};

/// The impact metrics engine. Holds in-memory state across requests.
pub struct Engine {
  config: Config,
  weights: WeightTable,
  squads: Vec<String>,
  incidents: Vec<Incident>,
  next_id: u64,
  today: NaiveDate,
}

impl Engine {
  pub fn new(config: Config) -> Self {
    Self {
      config,
      weights: WeightTable::with_defaults(),
      squads: Vec::new(),
      incidents: Vec::new(),
      next_id: 1,
      today: Utc::now().date_naive(),
    }
  }

  pub fn with_defaults() -> Self {
    Self::new(Config::default())
  }

  /// Pin the reference date for the no-future-date rule (tests).
  pub fn with_today(mut self, today: NaiveDate) -> Self {
    self.today = today;
    self
  }

  pub fn records(&self) -> &[Incident] {
    &self.incidents
  }

  /// Apply a partial configuration update. Every field is validated at this
  /// boundary; admitted incidents are never touched (their weight is a
  /// creation-time snapshot).
  pub fn apply_config(&mut self, input: &ConfigInput) -> Result<(), EngineError> {
    if let Some(capacity) = input.capacity_hours {
      config::validate_capacity(capacity)?;
      self.config.capacity_hours = capacity;
    }
    if let Some(weights) = &input.impact_weights {
      let mut table = WeightTable::new();
      for (name, weight) in weights {
        table.insert(name, *weight)?;
      }
      self.weights = table;
    }
    if let Some(squads) = &input.squads {
      self.squads = squads
        .iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    }
    Ok(())
  }

  /// Validate and admit one incident, assigning the next id. Returns the
  /// stored canonical record.
  pub fn admit(&mut self, raw: &IncidentInput) -> Result<Incident, EngineError> {
    let ctx = AdmissionContext {
      weights: &self.weights,
      squads: &self.squads,
      today: self.today,
      now: Utc::now(),
    };
    let record = validate::admit(raw, self.next_id, &ctx)?;
    self.next_id += 1;
    self.incidents.push(record.clone());
    Ok(record)
  }

  /// Compute the full dashboard report from the current snapshot. The empty
  /// set produces defined empty results: zero sums, a perfect score, empty
  /// breakdowns, and zero trend deltas.
  pub fn dashboard(&self) -> DashboardReport {
    let records = &self.incidents;
    let summary = metrics::summarize(records);
    let environment_score =
      metrics::compute_environment_score(summary.total_lph, self.config.capacity_hours);

    DashboardReport {
      incident_count: summary.incident_count,
      total_lph: summary.total_lph,
      mean_lph: summary.mean_lph,
      environment_score,
      score_band: ScoreBand::from_score(environment_score),
      trend: trend::compute_trend(records, &self.config),
      by_category: aggregate::group_by(records, |r| r.category.as_str()),
      by_squad: aggregate::group_by(records, |r| r.squad.as_str()),
      by_product: aggregate::group_by(records, aggregate::product_key),
      heatmap: aggregate::heatmap(records, &self.config),
      timeline: aggregate::timeline(records),
    }
  }

  /// Filter/sort/page the current snapshot.
  pub fn browse(&self, query: &BrowseQuery) -> Result<Page, EngineError> {
    browse::browse(&self.incidents, query)
  }
}
