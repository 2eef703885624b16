use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use clap::Args;
use core_model::filter::FilterSpec;
use core_model::incident::RecordId;
use core_model::time::parse_datetime_input;
use core_model::Severity;
use core_view::{DashboardSession, ViewportPolicy};

use crate::app::AppContext;
use crate::commands::CliCommand;
use crate::support::print;

#[derive(Args, Debug, Clone, Default)]
#[command(about = "Filter the dataset and print the matching incidents")]
pub struct QueryCommand {
    /// Earliest incident date (YYYY-MM-DD or RFC 3339), inclusive
    #[arg(long)]
    pub start: Option<String>,
    /// Latest incident date (YYYY-MM-DD or RFC 3339), inclusive
    #[arg(long)]
    pub end: Option<String>,
    /// Political party on either side of the incident; repeatable
    #[arg(long = "actor")]
    pub actors: Vec<String>,
    #[arg(long = "division")]
    pub divisions: Vec<String>,
    #[arg(long = "district")]
    pub districts: Vec<String>,
    /// low, medium or high; repeatable
    #[arg(long = "severity")]
    pub severities: Vec<Severity>,
    #[arg(long)]
    pub verified_only: bool,
    /// Select this incident after filtering
    #[arg(long)]
    pub select: Option<String>,
    #[arg(long)]
    pub limit: Option<usize>,
    /// Also print the map framing, resolved for a map of --width x --height pixels
    #[arg(long)]
    pub viewport: bool,
    #[arg(long, default_value_t = 1024)]
    pub width: u32,
    #[arg(long, default_value_t = 768)]
    pub height: u32,
    /// Print the view snapshot as JSON instead of text
    #[arg(long)]
    pub json: bool,
}

impl QueryCommand {
    pub fn filter_spec(&self) -> Result<FilterSpec> {
        let start = self
            .start
            .as_deref()
            .map(parse_datetime_input)
            .transpose()
            .context("invalid --start")?;
        let end = self
            .end
            .as_deref()
            .map(parse_datetime_input)
            .transpose()
            .context("invalid --end")?;
        let spec = FilterSpec::default()
            .with_date_range(start, end)
            .with_actors(self.actors.iter().cloned())
            .with_divisions(self.divisions.iter().cloned())
            .with_districts(self.districts.iter().cloned())
            .with_severities(self.severities.iter().copied())
            .with_verified_only(self.verified_only);
        spec.validate()?;
        Ok(spec)
    }
}

#[async_trait]
impl CliCommand for QueryCommand {
    async fn execute(&self, ctx: &AppContext) -> Result<()> {
        let spec = self.filter_spec()?;
        let dataset = Arc::new(ctx.load_dataset()?);
        let mut session = DashboardSession::new(dataset, ViewportPolicy::default());
        session.apply_filters(spec)?;
        if let Some(id) = &self.select {
            session.select(Some(RecordId::new(id.as_str())))?;
        }

        if self.json {
            println!("{}", serde_json::to_string_pretty(&session.snapshot())?);
            return Ok(());
        }

        print::print_query_header(&session);
        let selected = session.selection().id();
        for record in session.filtered_records().take(self.limit.unwrap_or(usize::MAX)) {
            print::print_record(record, selected == Some(&record.id));
        }
        if self.viewport {
            let viewport = session.viewport();
            let resolved = viewport.resolve(self.width, self.height, session.viewport_policy());
            print::print_viewport(&viewport, &resolved);
        }
        Ok(())
    }
}
