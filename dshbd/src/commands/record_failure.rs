use anyhow::Result;

use super::common::services;

pub(crate) async fn command(cli: &crate::Cli, login: &str) -> Result<()> {
    let services = services(cli).await?;
    let locked = services
        .lockout_guard
        .record_failed_login_attempt(login)
        .await?;
    if locked {
        println!(
            "{login}: locked for {} minutes",
            services.lockout_guard.policy().lock_duration_minutes
        );
    } else {
        println!("{login}: not locked");
    }
    Ok(())
}
