//! Structured logging setup and machine-readable report lines.

mod format;

pub use format::{ReportLine, StructuredLogger};
