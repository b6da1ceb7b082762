use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::LockoutPolicy;

/// Logins are matched case-insensitively and stored lower-cased
pub fn normalize_login(login: &str) -> String {
    login.to_lowercase()
}

/// The lockout-related part of a user record
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub login: String,
    #[serde(default)]
    pub failed_attempts: u32,
    #[serde(default)]
    pub locked_until: Option<DateTime<Utc>>,
}

/// Where an account stands relative to a point in time
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LockState {
    Unlocked { failed_attempts: u32 },
    Locked { until: DateTime<Utc> },
    /// `locked_until` has passed but is still stored on the record
    Expired { until: DateTime<Utc> },
}

impl Account {
    pub fn new(login: &str) -> Self {
        Self {
            login: normalize_login(login),
            failed_attempts: 0,
            locked_until: None,
        }
    }

    pub fn lock_state(&self, now: DateTime<Utc>) -> LockState {
        match self.locked_until {
            Some(until) if until > now => LockState::Locked { until },
            Some(until) => LockState::Expired { until },
            None => LockState::Unlocked {
                failed_attempts: self.failed_attempts,
            },
        }
    }

    pub fn is_locked_at(&self, now: DateTime<Utc>) -> bool {
        matches!(self.lock_state(now), LockState::Locked { .. })
    }

    /// Zeroes the counter and drops the lock. The two fields are only ever
    /// cleared together.
    pub fn clear_lockout(&mut self) {
        self.failed_attempts = 0;
        self.locked_until = None;
    }

    pub fn is_clear(&self) -> bool {
        self.failed_attempts == 0 && self.locked_until.is_none()
    }

    /// Counts one failed login. Returns `true` if this attempt reached the
    /// policy threshold and locked the account.
    ///
    /// An expired lock is cleared first, so counting restarts from zero.
    /// A failure against a still-active lock pushes the expiry out to
    /// `now + lock duration`.
    pub fn register_failure(&mut self, policy: &LockoutPolicy, now: DateTime<Utc>) -> bool {
        if let LockState::Expired { .. } = self.lock_state(now) {
            self.clear_lockout();
        }

        self.failed_attempts = self.failed_attempts.saturating_add(1);

        if self.failed_attempts >= policy.max_failed_attempts {
            self.locked_until = Some(now + policy.lock_duration());
            true
        } else {
            false
        }
    }
}
