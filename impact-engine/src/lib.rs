//! B.I.T. Impact Metrics Engine — deterministic, rule-based.
//!
//! Turns raw QA blocker incidents (duration × impact weight) into lost
//! productive hours (LPH), aggregates them into category/squad/product
//! rankings, a weekday×hour heatmap and a daily timeline, derives a 0-10
//! environment health score with 7-day trend deltas, and serves
//! filter/sort/page browsing over the record set.
//!
//! No AI, no DB, no network; pure computation + in-memory state.

pub mod aggregate;
pub mod browse;
pub mod config;
pub mod engine;
pub mod error;
pub mod metrics;
pub mod trend;
pub mod types;
pub mod validate;

#[cfg(test)]
pub(crate) mod testutil;

pub use config::Config;
pub use engine::Engine;
pub use error::EngineError;
pub use types::{BrowseQuery, DashboardReport, Incident, IncidentInput, Request};
