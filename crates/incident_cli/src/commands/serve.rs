use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use clap::Args;
use core_model::region::RegionConfig;
use dashboard_api::{run_dashboard_server, DashboardServerSettings};
use incident_store::JsonFileSource;

use crate::app::AppContext;
use crate::commands::CliCommand;

#[derive(Args, Debug, Clone, Default)]
#[command(about = "Run the dashboard API server")]
pub struct ServeCommand {
    /// Address to bind. Defaults to DASHBOARD_BIND or 127.0.0.1:4000
    #[arg(long)]
    pub bind: Option<String>,
    /// Directory of built frontend assets to serve next to the API
    #[arg(long)]
    pub static_dir: Option<PathBuf>,
}

#[async_trait]
impl CliCommand for ServeCommand {
    async fn execute(&self, ctx: &AppContext) -> Result<()> {
        let cfg = ctx.config()?;
        let raw_bind = self.bind.as_deref().unwrap_or(&cfg.dashboard_bind);
        let bind: SocketAddr = raw_bind
            .parse()
            .with_context(|| format!("failed to parse dashboard bind `{}`", raw_bind))?;

        let settings = DashboardServerSettings {
            source: Arc::new(JsonFileSource::new(&cfg.dataset_path)),
            record_policy: cfg.record_policy,
            region: RegionConfig::bangladesh(),
            bind,
            static_dir: self
                .static_dir
                .clone()
                .or_else(|| cfg.dashboard_static_dir.clone()),
        };

        run_dashboard_server(settings).await
    }
}
