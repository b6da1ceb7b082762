use anyhow::Result;
use tracing::*;

use super::common::services;

pub(crate) async fn command(cli: &crate::Cli, login: &str) -> Result<()> {
    let services = services(cli).await?;
    services
        .lockout_guard
        .reset_failed_login_attempts(login)
        .await?;
    info!(login = %login, "Failed attempts cleared");
    Ok(())
}
