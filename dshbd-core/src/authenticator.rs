use std::sync::Arc;

use async_trait::async_trait;
use dshbd_common::{DashboardError, Secret};
use tracing::*;

use crate::AccountLockoutGuard;

/// Checks a presented password. Hashing and storage of credentials live
/// behind this trait and are not part of this crate.
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    async fn verify(&self, login: &str, password: &Secret<String>)
        -> Result<bool, DashboardError>;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthOutcome {
    Accepted,
    /// Wrong credentials. `locked` is set when this attempt locked the account.
    Rejected { locked: bool },
    /// Refused without checking credentials
    Locked { lock_duration_minutes: u32 },
}

impl AuthOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }

    pub fn message(&self) -> String {
        match self {
            Self::Accepted => "Authenticated".to_string(),
            Self::Rejected { locked: false } => "Invalid login or password".to_string(),
            Self::Rejected { locked: true } => {
                "Invalid login or password. Your account has been locked due to too many failed login attempts.".to_string()
            }
            Self::Locked {
                lock_duration_minutes,
            } => format!(
                "Your account has been locked due to too many failed login attempts. Try again in up to {lock_duration_minutes} minutes."
            ),
        }
    }
}

/// Runs a login attempt through the lockout guard around a credential check
pub struct Authenticator {
    guard: Arc<AccountLockoutGuard>,
    verifier: Arc<dyn CredentialVerifier>,
}

impl Authenticator {
    pub fn new(guard: Arc<AccountLockoutGuard>, verifier: Arc<dyn CredentialVerifier>) -> Self {
        Self { guard, verifier }
    }

    pub async fn authenticate(
        &self,
        login: &str,
        password: &Secret<String>,
    ) -> Result<AuthOutcome, DashboardError> {
        if self.guard.is_account_locked(login).await? {
            info!(login = %login, "Refusing login to locked account");
            return Ok(AuthOutcome::Locked {
                lock_duration_minutes: self.guard.policy().lock_duration_minutes,
            });
        }

        if self.verifier.verify(login, password).await? {
            self.guard.reset_failed_login_attempts(login).await?;
            debug!(login = %login, "Login accepted");
            return Ok(AuthOutcome::Accepted);
        }

        let locked = self.guard.record_failed_login_attempt(login).await?;
        info!(login = %login, locked, "Login rejected");
        Ok(AuthOutcome::Rejected { locked })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use chrono::{Duration, Utc};
    use dshbd_common::{Account, LockoutPolicy};

    use super::*;
    use crate::InMemoryUserStore;

    const LOGIN: &str = "test-account-lockout";
    const PASSWORD: &str = "password";

    struct StaticVerifier {
        passwords: HashMap<String, String>,
    }

    #[async_trait]
    impl CredentialVerifier for StaticVerifier {
        async fn verify(
            &self,
            login: &str,
            password: &Secret<String>,
        ) -> Result<bool, DashboardError> {
            Ok(self
                .passwords
                .get(&login.to_lowercase())
                .is_some_and(|p| p == password.expose_secret()))
        }
    }

    async fn setup() -> (Authenticator, Arc<InMemoryUserStore>) {
        let store = Arc::new(InMemoryUserStore::new());
        store.insert(Account::new(LOGIN)).await;
        let guard = Arc::new(AccountLockoutGuard::new(
            LockoutPolicy::default(),
            store.clone(),
        ));
        let verifier = Arc::new(StaticVerifier {
            passwords: HashMap::from([(LOGIN.to_string(), PASSWORD.to_string())]),
        });
        (Authenticator::new(guard, verifier), store)
    }

    fn secret(s: &str) -> Secret<String> {
        Secret::new(s.to_string())
    }

    #[tokio::test]
    async fn test_lockout_after_max_failed_attempts() {
        let (auth, store) = setup().await;

        for i in 0..3u32 {
            let outcome = auth.authenticate(LOGIN, &secret("wrong")).await.unwrap();
            assert_eq!(outcome, AuthOutcome::Rejected { locked: i == 2 });
            assert_eq!(store.get(LOGIN).await.unwrap().failed_attempts, i + 1);
        }

        // correct password is refused while locked
        let outcome = auth.authenticate(LOGIN, &secret(PASSWORD)).await.unwrap();
        assert_eq!(
            outcome,
            AuthOutcome::Locked {
                lock_duration_minutes: 15
            }
        );
        assert!(outcome.message().contains("15 minutes"));
        assert_eq!(store.get(LOGIN).await.unwrap().failed_attempts, 3);
    }

    #[tokio::test]
    async fn test_successful_login_resets_failed_attempts() {
        let (auth, store) = setup().await;
        let mut account = Account::new(LOGIN);
        account.failed_attempts = 1;
        store.insert(account).await;

        let outcome = auth.authenticate(LOGIN, &secret(PASSWORD)).await.unwrap();
        assert!(outcome.is_accepted());
        assert!(store.get(LOGIN).await.unwrap().is_clear());
    }

    #[tokio::test]
    async fn test_account_unlocks_after_lock_duration() {
        let (auth, store) = setup().await;
        let mut account = Account::new(LOGIN);
        account.failed_attempts = 3;
        account.locked_until = Some(Utc::now() - Duration::seconds(60));
        store.insert(account).await;

        let outcome = auth.authenticate(LOGIN, &secret(PASSWORD)).await.unwrap();
        assert!(outcome.is_accepted());
        assert!(store.get(LOGIN).await.unwrap().is_clear());
    }

    #[tokio::test]
    async fn test_unknown_user_is_rejected_without_records() {
        let (auth, store) = setup().await;

        let outcome = auth.authenticate("wrong-user", &secret("wrong")).await.unwrap();
        assert_eq!(outcome, AuthOutcome::Rejected { locked: false });
        assert_eq!(store.account_count().await, 1);
        assert_eq!(store.save_count(), 0);
    }

    #[tokio::test]
    async fn test_store_outage_fails_closed() {
        let (auth, store) = setup().await;
        store.set_unavailable(true);

        let result = auth.authenticate(LOGIN, &secret(PASSWORD)).await;
        assert!(matches!(result, Err(DashboardError::StoreUnavailable(_))));
    }
}
