//! Bot scorer entrypoint: loads the run configuration, scores authors, prints
//! one report line per evaluated dataset.

use bot_scorer::{
    config::ScorerConfig,
    logging::{ReportLine, StructuredLogger},
    runner::{self, RunMode},
};
use std::path::PathBuf;
use tracing::{error, info};

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config_path = std::env::var("BOT_SCORER_CONFIG_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.json"));
    let config = ScorerConfig::load(&config_path)?;

    StructuredLogger::init(config.log.json, &config.log.level);

    let mode = if config.cross_validation.enabled {
        RunMode::CrossValidation
    } else {
        RunMode::Single
    };
    info!(config = %config_path.display(), ?mode, threshold = config.decision.threshold, "bot scorer starting");

    let report = match runner::run(&config) {
        Ok(r) => r,
        Err(e) => {
            error!(error = %e, "run failed");
            return Err(e.into());
        }
    };

    let mut stdout = std::io::stdout().lock();
    for eval in &report.evaluations {
        StructuredLogger::emit_json(&ReportLine::new(eval, report.threshold), &mut stdout);
    }
    info!(
        authors = report.scores.len(),
        detections = report.detections.len(),
        "bot scorer complete"
    );
    Ok(())
}
