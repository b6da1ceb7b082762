use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use dshbd_common::{normalize_login, Account, DashboardError};
use tokio::sync::RwLock;

use super::UserStore;

/// Process-local store for tests and dry runs
#[derive(Default)]
pub struct InMemoryUserStore {
    accounts: RwLock<HashMap<String, Account>>,
    saves: AtomicUsize,
    unavailable: AtomicBool,
    latency: Option<Duration>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delays every lookup, widening the gap between read and write
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub async fn insert(&self, mut account: Account) {
        account.login = normalize_login(&account.login);
        self.accounts
            .write()
            .await
            .insert(account.login.clone(), account);
    }

    pub async fn get(&self, login: &str) -> Option<Account> {
        self.accounts
            .read()
            .await
            .get(&normalize_login(login))
            .cloned()
    }

    pub async fn account_count(&self) -> usize {
        self.accounts.read().await.len()
    }

    /// Number of successful `save` calls so far
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), DashboardError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DashboardError::StoreUnavailable(
                "in-memory store switched off".into(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_login(&self, login: &str) -> Result<Option<Account>, DashboardError> {
        self.check_available()?;
        let account = self.get(login).await;
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        Ok(account)
    }

    async fn save(&self, account: Account) -> Result<Account, DashboardError> {
        self.check_available()?;
        let mut accounts = self.accounts.write().await;
        let Some(stored) = accounts.get_mut(&account.login) else {
            return Err(DashboardError::UserNotFound(account.login));
        };
        *stored = account.clone();
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(account)
    }
}
