use anyhow::Result;
use tracing::*;

use super::common::services;

pub(crate) async fn command(cli: &crate::Cli) -> Result<()> {
    // connecting applies pending migrations
    services(cli).await?;
    info!("Database is up to date");
    Ok(())
}
