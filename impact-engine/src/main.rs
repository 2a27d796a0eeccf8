//! Binary entrypoint: read JSON lines from stdin, write JSON lines to stdout.
//!
//! Each input line is a Request tagged by "op": config, incident, dashboard
//! or browse. Output lines are, respectively, an Ack, the admitted canonical
//! record, a DashboardReport, or a Page — and an ErrorOutput whenever a line
//! fails validation. Bad lines never stop the stream.

use impact_engine::types::{Ack, ErrorOutput, Request};
use impact_engine::{Engine, EngineError};
use std::io::{self, BufRead, Write};

fn main() {
  let stdin = io::stdin();
  let stdout = io::stdout();
  let mut out = io::BufWriter::new(stdout.lock());
  let mut engine = Engine::with_defaults();

  for line in stdin.lock().lines() {
    let line = match line {
      Ok(l) => l,
      Err(e) => {
        let _ = writeln!(io::stderr(), "impact-engine: read error: {}", e);
        std::process::exit(1);
      }
    };

    // Skip blank lines.
    let trimmed = line.trim();
    if trimmed.is_empty() {
      continue;
    }

    let request: Request = match serde_json::from_str(trimmed) {
      Ok(v) => v,
      Err(e) => {
        emit(&mut out, &ErrorOutput::new(format!("json parse: {}", e)));
        continue;
      }
    };

    match request {
      Request::Config(input) => match engine.apply_config(&input) {
        Ok(()) => emit(&mut out, &Ack { ok: true }),
        Err(e) => emit_error(&mut out, &e),
      },
      Request::Incident(input) => match engine.admit(&input) {
        Ok(record) => emit(&mut out, &record),
        Err(e) => emit_error(&mut out, &e),
      },
      Request::Dashboard => emit(&mut out, &engine.dashboard()),
      Request::Browse(query) => match engine.browse(&query) {
        Ok(page) => emit(&mut out, &page),
        Err(e) => emit_error(&mut out, &e),
      },
    }
  }

  let _ = out.flush();
}

fn emit<W: Write, T: serde::Serialize>(out: &mut W, value: &T) {
  let _ = serde_json::to_writer(&mut *out, value);
  let _ = writeln!(out);
}

fn emit_error<W: Write>(out: &mut W, e: &EngineError) {
  let err = match e {
    EngineError::Validation { field, reason } => {
      ErrorOutput::new(reason.clone()).with_field(field.clone())
    }
  };
  emit(out, &err);
}
