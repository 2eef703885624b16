use anyhow::Result;
use async_trait::async_trait;
use clap::Args;
use core_model::region::RegionConfig;

use crate::app::AppContext;
use crate::commands::CliCommand;
use crate::support::print;

#[derive(Args, Debug, Clone, Default)]
#[command(about = "List the values each filter facet offers")]
pub struct FacetsCommand;

#[async_trait]
impl CliCommand for FacetsCommand {
    async fn execute(&self, ctx: &AppContext) -> Result<()> {
        let dataset = ctx.load_dataset()?;
        print::print_facets(&dataset, &RegionConfig::bangladesh());
        Ok(())
    }
}
