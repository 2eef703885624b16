pub mod facets;
pub mod query;
pub mod serve;
pub mod stats;

use std::path::PathBuf;

use anyhow::Result;
use async_trait::async_trait;
use clap::{Parser, Subcommand};

use crate::app::AppContext;

pub use facets::FacetsCommand;
pub use query::QueryCommand;
pub use serve::ServeCommand;
pub use stats::StatsCommand;

#[async_trait]
pub trait CliCommand {
    async fn execute(&self, ctx: &AppContext) -> Result<()>;
}

#[derive(Parser, Debug, Clone)]
#[command(name = "incident-map", version, about)]
pub struct Cli {
    /// Dataset document to load. Defaults to INCIDENT_DATASET_PATH or ./public/events.json
    #[arg(long, global = true)]
    pub dataset: Option<PathBuf>,
    #[command(subcommand)]
    pub command: RootCommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum RootCommand {
    Serve(ServeCommand),
    Query(QueryCommand),
    Facets(FacetsCommand),
    Stats(StatsCommand),
}

impl Cli {
    pub async fn execute(self, ctx: &AppContext) -> Result<()> {
        match self.command {
            RootCommand::Serve(cmd) => cmd.execute(ctx).await,
            RootCommand::Query(cmd) => cmd.execute(ctx).await,
            RootCommand::Facets(cmd) => cmd.execute(ctx).await,
            RootCommand::Stats(cmd) => cmd.execute(ctx).await,
        }
    }
}
