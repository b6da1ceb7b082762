use std::sync::Arc;

use anyhow::Result;
use dshbd_common::DashboardConfig;
use tokio::sync::Mutex;
use tracing::info;

use crate::db::connect_to_db;
use crate::{AccountLockoutGuard, DatabaseUserStore};

#[derive(Clone)]
pub struct Services {
    pub user_store: Arc<DatabaseUserStore>,
    pub lockout_guard: Arc<AccountLockoutGuard>,
}

impl Services {
    pub async fn new(config: DashboardConfig) -> Result<Self> {
        let db = connect_to_db(&config).await?;
        let user_store = Arc::new(DatabaseUserStore::new(Arc::new(Mutex::new(db))));

        let policy = config.lockout_policy();
        let lockout_guard = Arc::new(AccountLockoutGuard::new(policy, user_store.clone()));
        info!(
            max_failed_attempts = policy.max_failed_attempts,
            lock_duration_minutes = policy.lock_duration_minutes,
            "Account lockout enabled"
        );

        Ok(Self {
            user_store,
            lockout_guard,
        })
    }
}
