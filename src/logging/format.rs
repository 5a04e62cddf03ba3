//! JSON log lines: one JSON object per line (ndjson) for ingestion by downstream tooling.

use crate::eval::EvalReport;
use serde::Serialize;
use std::io::Write;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// One evaluation result as emitted on stdout
#[derive(Serialize)]
pub struct ReportLine<'a> {
    pub ts: String,
    pub label: &'a str,
    pub threshold: f64,
    pub tp: u64,
    pub fp: u64,
    #[serde(rename = "fn")]
    pub fn_: u64,
    pub score: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excluded: Option<u64>,
}

impl<'a> ReportLine<'a> {
    pub fn new(report: &'a EvalReport, threshold: f64) -> Self {
        Self {
            ts: chrono::Utc::now().to_rfc3339(),
            label: &report.label,
            threshold,
            tp: report.confusion.tp,
            fp: report.confusion.fp,
            fn_: report.confusion.fn_,
            score: report.score,
            excluded: (report.excluded > 0).then_some(report.excluded),
        }
    }
}

pub struct StructuredLogger;

impl StructuredLogger {
    /// Install the global subscriber. Logs go to stderr so stdout carries only
    /// report lines; JSON or plain text, level from RUST_LOG or `default_level`.
    pub fn init(json: bool, default_level: &str) {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
        if json {
            let fmt = tracing_subscriber::fmt::layer()
                .json()
                .with_span_events(FmtSpan::NONE)
                .with_writer(std::io::stderr);
            tracing_subscriber::registry().with(filter).with(fmt).init();
        } else {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    /// Write one ndjson line (e.g. an evaluation result), bypassing tracing.
    pub fn emit_json(event: &impl Serialize, w: &mut impl Write) {
        if let Ok(line) = serde_json::to_string(event) {
            let _ = writeln!(w, "{}", line);
        }
    }
}
