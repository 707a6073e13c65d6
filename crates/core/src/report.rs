//! Operator reporting seam.
//!
//! The pipeline emits a stage-boundary event stream through the `Reporter`
//! trait. Reporting is a pure sink: nothing downstream of it affects
//! control flow. The CLI renders events on the terminal; libraries and
//! tests use `LogReporter` which forwards to the tracing subscriber.

use tracing::{error, info, warn};

/// Severity of a reported event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
  Info,
  Success,
  Warning,
  Error,
}

/// Sink for human-facing pipeline status.
pub trait Reporter {
  fn event(&self, severity: Severity, message: &str);
}

/// Reporter that forwards events to the tracing subscriber.
#[derive(Debug, Default)]
pub struct LogReporter;

impl Reporter for LogReporter {
  fn event(&self, severity: Severity, message: &str) {
    match severity {
      Severity::Info | Severity::Success => info!("{}", message),
      Severity::Warning => warn!("{}", message),
      Severity::Error => error!("{}", message),
    }
  }
}
