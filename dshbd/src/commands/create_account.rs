use anyhow::Result;
use tracing::*;

use super::common::services;

pub(crate) async fn command(cli: &crate::Cli, login: &str) -> Result<()> {
    let services = services(cli).await?;
    let account = services.user_store.create(login).await?;
    info!(login = %account.login, "Account record is present");
    Ok(())
}
