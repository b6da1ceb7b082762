use std::path::Path;

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use dshbd_common::{DashboardConfig, DashboardConfigStore};
use tracing::*;

const ENV_PREFIX: &str = "DSHBD";

/// `DSHBD_SECURITY__ACCOUNT_LOCKOUT__MAX_FAILED_ATTEMPTS=5` overrides
/// `security.account_lockout.max_failed_attempts`
fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

pub fn load_config(path: &Path) -> Result<DashboardConfig> {
    load_config_with_environment(path, environment())
}

fn load_config_with_environment(path: &Path, environment: Environment) -> Result<DashboardConfig> {
    let store: DashboardConfigStore = Config::builder()
        .add_source(File::from(path))
        .add_source(environment)
        .build()
        .context("Could not load config")?
        .try_deserialize()
        .context("Could not parse config")?;

    let config = DashboardConfig {
        store,
        paths_relative_to: path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default(),
    };

    config.validate().context("Invalid config")?;

    let policy = config.lockout_policy();
    info!(
        "Using config: {path:?} (max failed attempts: {}, lock duration: {} min)",
        policy.max_failed_attempts, policy.lock_duration_minutes,
    );
    Ok(config)
}
