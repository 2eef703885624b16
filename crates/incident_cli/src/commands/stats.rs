use anyhow::Result;
use async_trait::async_trait;
use clap::Args;
use core_view::Statistics;

use crate::app::AppContext;
use crate::commands::CliCommand;
use crate::support::print;

#[derive(Args, Debug, Clone, Default)]
#[command(about = "Summarise the dataset and report rejected records")]
pub struct StatsCommand {
    /// Print the statistics as JSON
    #[arg(long)]
    pub json: bool,
}

#[async_trait]
impl CliCommand for StatsCommand {
    async fn execute(&self, ctx: &AppContext) -> Result<()> {
        let dataset = ctx.load_dataset()?;
        let stats = Statistics::compute(dataset.records());
        if self.json {
            println!("{}", serde_json::to_string_pretty(&stats)?);
            return Ok(());
        }
        print::print_load_report(dataset.report());
        print::print_statistics(&stats);
        Ok(())
    }
}
