mod defaults;

use std::path::PathBuf;

use defaults::*;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{DashboardError, Secret};

/// Failed-login lockout settings, found under `security.account_lockout`.
///
/// The guard trusts these values; [`LockoutPolicy::validate`] is called by the
/// config loader before they reach it.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, JsonSchema)]
pub struct LockoutPolicy {
    /// Consecutive failed logins that lock the account
    #[serde(
        default = "_default_max_failed_attempts",
        alias = "maxFailedAttempts",
        alias = "max-failed-attempts"
    )]
    pub max_failed_attempts: u32,

    /// Minutes an account stays locked, counted from the failure that locked it
    #[serde(
        default = "_default_lock_duration_minutes",
        alias = "lockDurationMinutes",
        alias = "lock-duration-minutes"
    )]
    pub lock_duration_minutes: u32,
}

impl Default for LockoutPolicy {
    fn default() -> Self {
        Self {
            max_failed_attempts: _default_max_failed_attempts(),
            lock_duration_minutes: _default_lock_duration_minutes(),
        }
    }
}

impl LockoutPolicy {
    pub fn lock_duration(&self) -> chrono::Duration {
        chrono::Duration::minutes(i64::from(self.lock_duration_minutes))
    }

    pub fn validate(&self) -> Result<(), DashboardError> {
        if self.max_failed_attempts == 0 {
            return Err(DashboardError::InvalidConfig(
                "security.account_lockout.max_failed_attempts must be greater than 0".into(),
            ));
        }
        if self.lock_duration_minutes == 0 {
            return Err(DashboardError::InvalidConfig(
                "security.account_lockout.lock_duration_minutes must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, JsonSchema)]
pub struct SecurityConfig {
    #[serde(default, alias = "accountLockout", alias = "account-lockout")]
    pub account_lockout: LockoutPolicy,
}

#[derive(Debug, Deserialize, Serialize, Clone, JsonSchema)]
pub struct DashboardConfigStore {
    #[serde(default = "_default_database_url")]
    #[schemars(with = "String")]
    pub database_url: Secret<String>,

    #[serde(default)]
    pub security: SecurityConfig,
}

impl Default for DashboardConfigStore {
    fn default() -> Self {
        Self {
            database_url: _default_database_url(),
            security: <_>::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub store: DashboardConfigStore,
    pub paths_relative_to: PathBuf,
}

impl DashboardConfig {
    pub fn lockout_policy(&self) -> LockoutPolicy {
        self.store.security.account_lockout
    }

    pub fn validate(&self) -> Result<(), DashboardError> {
        self.store.security.account_lockout.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lockout_policy_defaults() {
        let policy = LockoutPolicy::default();
        assert_eq!(policy.max_failed_attempts, 3);
        assert_eq!(policy.lock_duration_minutes, 15);
        assert_eq!(policy.lock_duration(), chrono::Duration::minutes(15));
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let store: DashboardConfigStore = serde_yaml::from_str("{}").unwrap();
        assert_eq!(store.security.account_lockout, LockoutPolicy::default());
        assert_eq!(store.database_url.expose_secret(), "sqlite:data/db");
    }

    #[test]
    fn test_nested_lockout_section() {
        let store: DashboardConfigStore = serde_yaml::from_str(
            "security:\n  account_lockout:\n    max_failed_attempts: 5\n    lock_duration_minutes: 10\n",
        )
        .unwrap();
        assert_eq!(store.security.account_lockout.max_failed_attempts, 5);
        assert_eq!(store.security.account_lockout.lock_duration_minutes, 10);
    }

    #[test]
    fn test_camel_case_keys_are_accepted() {
        let policy: LockoutPolicy =
            serde_yaml::from_str("maxFailedAttempts: 7\nlockDurationMinutes: 1\n").unwrap();
        assert_eq!(policy.max_failed_attempts, 7);
        assert_eq!(policy.lock_duration_minutes, 1);
    }

    #[test]
    fn test_partial_section_keeps_other_default() {
        let policy: LockoutPolicy = serde_yaml::from_str("max_failed_attempts: 4\n").unwrap();
        assert_eq!(policy.max_failed_attempts, 4);
        assert_eq!(policy.lock_duration_minutes, 15);
    }

    #[test]
    fn test_validate_rejects_zero() {
        let policy = LockoutPolicy {
            max_failed_attempts: 0,
            ..Default::default()
        };
        assert!(matches!(
            policy.validate(),
            Err(DashboardError::InvalidConfig(_))
        ));

        let policy = LockoutPolicy {
            lock_duration_minutes: 0,
            ..Default::default()
        };
        assert!(policy.validate().is_err());

        assert!(LockoutPolicy::default().validate().is_ok());
    }
}
