use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    incident_cli::app::run().await
}
