use std::sync::Arc;

use chrono::{DateTime, Utc};
use dshbd_common::helpers::locks::KeyedLocks;
use dshbd_common::{normalize_login, DashboardError, LockState, LockoutPolicy};
use tracing::{debug, info, warn};

use crate::UserStore;

/// Decides and applies failed-login lockout transitions for accounts.
///
/// Accounts that don't exist are never an error here: every operation is a
/// silent no-op for them so callers can't probe which logins exist. Store
/// errors are passed through untouched.
///
/// Operations on the same login are serialized, so concurrent failures are
/// counted exactly. Locks are never swept in the background; an expired lock
/// is cleared by the first [`Self::is_account_locked`] that sees it.
pub struct AccountLockoutGuard {
    policy: LockoutPolicy,
    store: Arc<dyn UserStore>,
    locks: KeyedLocks<String>,
}

impl AccountLockoutGuard {
    pub fn new(policy: LockoutPolicy, store: Arc<dyn UserStore>) -> Self {
        Self {
            policy,
            store,
            locks: KeyedLocks::new(),
        }
    }

    pub fn policy(&self) -> &LockoutPolicy {
        &self.policy
    }

    /// Record a failed login attempt.
    /// Returns `true` if the account is locked as a result of this call.
    pub async fn record_failed_login_attempt(&self, login: &str) -> Result<bool, DashboardError> {
        self.record_failed_login_attempt_at(login, Utc::now()).await
    }

    pub async fn record_failed_login_attempt_at(
        &self,
        login: &str,
        now: DateTime<Utc>,
    ) -> Result<bool, DashboardError> {
        let login = normalize_login(login);
        debug!(login = %login, "Recording failed login attempt");

        let _lock = self.locks.lock(&login).await;
        let Some(mut account) = self.store.find_by_login(&login).await? else {
            return Ok(false);
        };

        let locked = account.register_failure(&self.policy, now);
        if locked {
            warn!(
                login = %login,
                failed_attempts = account.failed_attempts,
                locked_until = ?account.locked_until,
                "Account locked"
            );
        }

        self.store.save(account).await?;
        Ok(locked)
    }

    /// Check whether the account is currently locked, clearing a lock that
    /// has already run out.
    pub async fn is_account_locked(&self, login: &str) -> Result<bool, DashboardError> {
        self.is_account_locked_at(login, Utc::now()).await
    }

    pub async fn is_account_locked_at(
        &self,
        login: &str,
        now: DateTime<Utc>,
    ) -> Result<bool, DashboardError> {
        let login = normalize_login(login);
        debug!(login = %login, "Checking if account is locked");

        let _lock = self.locks.lock(&login).await;
        let Some(mut account) = self.store.find_by_login(&login).await? else {
            return Ok(false);
        };

        match account.lock_state(now) {
            LockState::Locked { until } => {
                debug!(login = %login, locked_until = %until, "Account is locked");
                Ok(true)
            }
            LockState::Expired { until } => {
                account.clear_lockout();
                self.store.save(account).await?;
                info!(login = %login, expired_at = %until, "Account lock expired, unlocked");
                Ok(false)
            }
            LockState::Unlocked { .. } => Ok(false),
        }
    }

    /// Clear the failure counter and any lock, e.g. after a successful login.
    pub async fn reset_failed_login_attempts(&self, login: &str) -> Result<(), DashboardError> {
        let login = normalize_login(login);
        debug!(login = %login, "Resetting failed login attempts");

        let _lock = self.locks.lock(&login).await;
        let Some(mut account) = self.store.find_by_login(&login).await? else {
            return Ok(());
        };

        account.clear_lockout();
        self.store.save(account).await?;
        Ok(())
    }
}
