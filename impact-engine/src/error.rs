//! Structured error types for the impact engine.
//!
//! Everything this engine rejects is an input that failed validation before
//! any computation ran; malformed JSON on the wire never reaches the engine
//! (the binary reports it directly as an error line).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
  /// Rejection naming the offending field, raised before any computation.
  #[error("validation: {field}: {reason}")]
  Validation { field: String, reason: String },
}

impl EngineError {
  pub fn validation(field: &str, reason: &str) -> Self {
    Self::Validation {
      field: field.to_string(),
      reason: reason.to_string(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn display_names_the_offending_field() {
    let err = EngineError::validation("duration_hours", "must be greater than zero");
    assert_eq!(
      err.to_string(),
      "validation: duration_hours: must be greater than zero"
    );
  }
}
