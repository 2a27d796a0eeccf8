//! Shared fixture builders for unit tests.

use chrono::{NaiveTime, TimeZone, Utc};

use crate::metrics::compute_lph;
use crate::types::Incident;

/// Minimal canonical incident: fixed squad, no product, no start time.
pub fn incident(id: u64, date: &str, category: &str, duration_hours: f64, weight: f64) -> Incident {
  incident_full(
    id,
    date,
    None,
    "Squad Alpha",
    None,
    category,
    "Total Blockage (system down)",
    duration_hours,
    weight,
  )
}

/// Incident with an explicit start time ("HH:MM").
pub fn incident_at(
  id: u64,
  date: &str,
  start_time: Option<&str>,
  category: &str,
  duration_hours: f64,
  weight: f64,
) -> Incident {
  incident_full(
    id,
    date,
    start_time,
    "Squad Alpha",
    None,
    category,
    "Total Blockage (system down)",
    duration_hours,
    weight,
  )
}

#[allow(clippy::too_many_arguments)]
pub fn incident_full(
  id: u64,
  date: &str,
  start_time: Option<&str>,
  squad: &str,
  product: Option<&str>,
  category: &str,
  impact_type: &str,
  duration_hours: f64,
  weight: f64,
) -> Incident {
  Incident {
    id,
    date: date.parse().expect("fixture date"),
    start_time: start_time.map(|t| NaiveTime::parse_from_str(t, "%H:%M").expect("fixture time")),
    squad: squad.to_string(),
    product: product.map(String::from),
    category: category.to_string(),
    impact_type: impact_type.to_string(),
    weight,
    duration_hours,
    lph: compute_lph(duration_hours, weight),
    description: None,
    created_at: Utc.with_ymd_and_hms(2025, 3, 20, 12, 0, 0).unwrap(),
  }
}
