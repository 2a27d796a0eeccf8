//! Admission of inbound incident records: parse, validate, snapshot weight,
//! compute LPH. The canonical record that comes out of here is frozen — no
//! later configuration edit touches it.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::error::EngineError;
use crate::metrics;
use crate::types::{Incident, IncidentInput, WeightTable};

/// Everything admission needs besides the record itself. `today` is the
/// reference for the no-future-date rule; `now` stamps `created_at` when the
/// input carries none. Both are injected so admission stays deterministic
/// under test.
pub struct AdmissionContext<'a> {
  pub weights: &'a WeightTable,
  /// Known squads; empty means "accept any" (squad is stored as a free
  /// string either way — deleting a squad later never cascades).
  pub squads: &'a [String],
  pub today: NaiveDate,
  pub now: DateTime<Utc>,
}

/// Validate one inbound record and produce the canonical incident.
///
/// The weight is resolved exactly once, here: an explicit `weight` on the
/// input (a stored record being replayed) wins; otherwise the current table
/// is consulted and an unknown impact type is a validation error. Either
/// way the stored weight is a snapshot from this moment on.
pub fn admit(raw: &IncidentInput, id: u64, ctx: &AdmissionContext) -> Result<Incident, EngineError> {
  let date: NaiveDate = raw
    .date
    .parse()
    .map_err(|_| EngineError::validation("date", "expected YYYY-MM-DD"))?;
  if date > ctx.today {
    return Err(EngineError::validation("date", "must not be in the future"));
  }

  let start_time = match &raw.start_time {
    Some(s) => Some(
      NaiveTime::parse_from_str(s, "%H:%M")
        .map_err(|_| EngineError::validation("start_time", "expected HH:MM"))?,
    ),
    None => None,
  };

  if raw.squad.trim().is_empty() {
    return Err(EngineError::validation("squad", "must not be empty"));
  }
  if !ctx.squads.is_empty() && !ctx.squads.iter().any(|s| s == raw.squad.trim()) {
    return Err(EngineError::validation("squad", "unknown squad"));
  }
  if raw.category.trim().is_empty() {
    return Err(EngineError::validation("category", "must not be empty"));
  }
  if raw.impact_type.trim().is_empty() {
    return Err(EngineError::validation("impact_type", "must not be empty"));
  }

  if !raw.duration_hours.is_finite() || raw.duration_hours <= 0.0 {
    return Err(EngineError::validation(
      "duration_hours",
      "must be greater than zero",
    ));
  }
  if raw.duration_hours > 24.0 {
    return Err(EngineError::validation(
      "duration_hours",
      "must not exceed 24 hours",
    ));
  }

  let weight = match raw.weight {
    Some(w) => {
      if !(0.0..=1.0).contains(&w) || !w.is_finite() {
        return Err(EngineError::validation("weight", "must be in [0, 1]"));
      }
      w
    }
    None => ctx.weights.get(&raw.impact_type).ok_or_else(|| {
      EngineError::validation("impact_type", "not present in the weight table")
    })?,
  };

  let created_at = match &raw.created_at {
    Some(s) => DateTime::parse_from_rfc3339(s)
      .map_err(|e| EngineError::validation("created_at", &format!("invalid RFC3339: {}", e)))?
      .with_timezone(&Utc),
    None => ctx.now,
  };

  Ok(Incident {
    id,
    date,
    start_time,
    squad: raw.squad.trim().to_string(),
    product: raw
      .product
      .as_deref()
      .map(str::trim)
      .filter(|p| !p.is_empty())
      .map(String::from),
    category: raw.category.trim().to_string(),
    impact_type: raw.impact_type.trim().to_string(),
    weight,
    duration_hours: raw.duration_hours,
    lph: metrics::compute_lph(raw.duration_hours, weight),
    description: raw.description.clone().filter(|d| !d.trim().is_empty()),
    created_at,
  })
}
