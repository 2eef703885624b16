use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use incident_store::{Dataset, JsonFileSource};
use once_cell::sync::OnceCell;
use tracing::info;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::EnvFilter;

use crate::commands::Cli;
use crate::config;

#[derive(Default)]
pub struct AppContext {
    config: OnceCell<config::Config>,
    dataset_override: Option<PathBuf>,
}

impl AppContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// `--dataset` wins over `INCIDENT_DATASET_PATH`.
    pub fn with_dataset_override(dataset: Option<PathBuf>) -> Self {
        Self {
            config: OnceCell::new(),
            dataset_override: dataset,
        }
    }

    pub fn config(&self) -> Result<&config::Config> {
        self.config.get_or_try_init(|| {
            let mut cfg = config::load_config()?;
            if let Some(path) = &self.dataset_override {
                cfg.dataset_path = path.clone();
            }
            Ok(cfg)
        })
    }

    pub fn load_dataset(&self) -> Result<Dataset> {
        let cfg = self.config()?;
        let source = JsonFileSource::new(&cfg.dataset_path);
        let dataset = Dataset::load(&source, cfg.record_policy).with_context(|| {
            format!(
                "failed to load incident data from {}",
                cfg.dataset_path.display()
            )
        })?;
        info!(
            records = dataset.len(),
            rejected = dataset.report().rejected.len(),
            "dataset ready"
        );
        Ok(dataset)
    }
}

pub async fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();
    let cli = Cli::parse();
    let ctx = AppContext::with_dataset_override(cli.dataset.clone());
    cli.execute(&ctx).await
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn dataset_override_is_loaded() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"events": [{{
                "id": "evt-1",
                "title": "Clash near the market",
                "summary": "",
                "location": {{"lat": 23.81, "lng": 90.41, "address": "", "division": "Dhaka", "district": "Dhaka"}},
                "casualties": {{"injured": 3, "dead": 0}},
                "politicalParty": "A",
                "opposingParty": "B",
                "date": "2024-08-01T10:00:00Z",
                "severity": "high",
                "source": "test",
                "verified": true
            }}]}}"#
        )
        .unwrap();

        let ctx = AppContext::with_dataset_override(Some(file.path().to_path_buf()));
        let dataset = ctx.load_dataset().unwrap();
        assert_eq!(dataset.len(), 1);
        assert_eq!(ctx.config().unwrap().dataset_path, file.path());
    }

    #[test]
    fn missing_dataset_reports_the_path() {
        let missing = PathBuf::from("/nonexistent/events.json");
        let ctx = AppContext::with_dataset_override(Some(missing));
        let err = ctx.load_dataset().unwrap_err();
        assert!(format!("{:#}", err).contains("/nonexistent/events.json"));
    }
}
