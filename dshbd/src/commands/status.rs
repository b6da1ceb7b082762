use anyhow::Result;
use chrono::Utc;
use dshbd_common::LockState;
use dshbd_core::UserStore;

use super::common::services;

pub(crate) async fn command(cli: &crate::Cli, login: &str) -> Result<()> {
    let services = services(cli).await?;

    let Some(account) = services.user_store.find_by_login(login).await? else {
        anyhow::bail!("No account record for {login:?}");
    };

    println!("login:           {}", account.login);
    println!("failed attempts: {}", account.failed_attempts);
    match account.lock_state(Utc::now()) {
        LockState::Unlocked { .. } => println!("state:           unlocked"),
        LockState::Locked { until } => println!("state:           locked until {until}"),
        LockState::Expired { until } => {
            println!("state:           lock expired at {until} (cleared on next check)")
        }
    }
    Ok(())
}
