use anyhow::Result;

use super::common::services;

pub(crate) async fn command(cli: &crate::Cli, login: &str) -> Result<()> {
    let services = services(cli).await?;
    let locked = services.lockout_guard.is_account_locked(login).await?;
    println!("{}", if locked { "locked" } else { "unlocked" });
    Ok(())
}
