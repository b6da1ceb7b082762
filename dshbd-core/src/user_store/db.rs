use std::sync::Arc;

use async_trait::async_trait;
use dshbd_common::{normalize_login, Account, DashboardError};
use dshbd_db_entities::User;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use tokio::sync::Mutex;
use tracing::*;

use super::UserStore;

pub struct DatabaseUserStore {
    db: Arc<Mutex<DatabaseConnection>>,
}

impl DatabaseUserStore {
    pub fn new(db: Arc<Mutex<DatabaseConnection>>) -> Self {
        Self { db }
    }

    /// Inserts an unlocked record for `login` unless one already exists
    pub async fn create(&self, login: &str) -> Result<Account, DashboardError> {
        let login = normalize_login(login);
        let db = self.db.lock().await;

        if let Some(existing) = User::Entity::find()
            .filter(User::Column::Login.eq(login.as_str()))
            .one(&*db)
            .await?
        {
            return Ok(existing.into());
        }

        let model = User::ActiveModel::new_for_login(&login).insert(&*db).await?;
        info!(login = %login, "Created account record");
        Ok(model.into())
    }
}

#[async_trait]
impl UserStore for DatabaseUserStore {
    async fn find_by_login(&self, login: &str) -> Result<Option<Account>, DashboardError> {
        let db = self.db.lock().await;
        let user = User::Entity::find()
            .filter(User::Column::Login.eq(normalize_login(login)))
            .one(&*db)
            .await?;
        Ok(user.map(Into::into))
    }

    async fn save(&self, account: Account) -> Result<Account, DashboardError> {
        let db = self.db.lock().await;
        let result = User::Entity::update_many()
            .set(User::ActiveModel::lockout_fields(&account))
            .filter(User::Column::Login.eq(account.login.as_str()))
            .exec(&*db)
            .await?;

        if result.rows_affected == 0 {
            return Err(DashboardError::UserNotFound(account.login));
        }
        Ok(account)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use dshbd_common::LockoutPolicy;
    use dshbd_db_migrations::migrate_database;
    use sea_orm::{ConnectOptions, Database};

    use super::*;
    use crate::AccountLockoutGuard;

    async fn store() -> DatabaseUserStore {
        let mut opt = ConnectOptions::new("sqlite::memory:");
        opt.max_connections(1).min_connections(1);
        let db = Database::connect(opt).await.unwrap();
        migrate_database(&db).await.unwrap();
        DatabaseUserStore::new(Arc::new(Mutex::new(db)))
    }

    #[tokio::test]
    async fn test_create_and_find_case_insensitive() {
        let store = store().await;
        let created = store.create("Alice").await.unwrap();
        assert_eq!(created.login, "alice");
        assert_eq!(created.failed_attempts, 0);

        let found = store.find_by_login("ALICE").await.unwrap().unwrap();
        assert_eq!(found, created);
    }

    #[tokio::test]
    async fn test_create_is_idempotent() {
        let store = store().await;
        let mut account = store.create("alice").await.unwrap();
        account.failed_attempts = 2;
        store.save(account).await.unwrap();

        let again = store.create("alice").await.unwrap();
        assert_eq!(again.failed_attempts, 2);
    }

    #[tokio::test]
    async fn test_find_missing_returns_none() {
        let store = store().await;
        assert!(store.find_by_login("nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_round_trips_lock_fields() {
        let store = store().await;
        let mut account = store.create("alice").await.unwrap();

        // whole seconds, so the comparison does not depend on column precision
        let until = Utc::now() + Duration::minutes(15);
        let until = until - Duration::nanoseconds(i64::from(until.timestamp_subsec_nanos()));

        account.failed_attempts = 3;
        account.locked_until = Some(until);
        store.save(account).await.unwrap();

        let loaded = store.find_by_login("alice").await.unwrap().unwrap();
        assert_eq!(loaded.failed_attempts, 3);
        assert_eq!(loaded.locked_until, Some(until));

        let mut cleared = loaded;
        cleared.clear_lockout();
        store.save(cleared).await.unwrap();

        let loaded = store.find_by_login("alice").await.unwrap().unwrap();
        assert!(loaded.is_clear());
    }

    #[tokio::test]
    async fn test_save_unknown_account_fails() {
        let store = store().await;
        let result = store.save(Account::new("ghost")).await;
        assert!(matches!(result, Err(DashboardError::UserNotFound(login)) if login == "ghost"));
        assert!(store.find_by_login("ghost").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_guard_over_database_store() {
        let store = Arc::new(store().await);
        store.create("alice").await.unwrap();
        let guard = AccountLockoutGuard::new(
            LockoutPolicy {
                max_failed_attempts: 3,
                lock_duration_minutes: 15,
            },
            store.clone(),
        );
        let t0 = Utc::now();

        let mut results = vec![];
        for _ in 0..3 {
            results.push(guard.record_failed_login_attempt_at("alice", t0).await.unwrap());
        }
        assert_eq!(results, [false, false, true]);

        assert!(guard
            .is_account_locked_at("alice", t0 + Duration::minutes(1))
            .await
            .unwrap());

        assert!(!guard
            .is_account_locked_at("alice", t0 + Duration::minutes(15))
            .await
            .unwrap());
        let stored = store.find_by_login("alice").await.unwrap().unwrap();
        assert_eq!(stored.failed_attempts, 0);
        assert_eq!(stored.locked_until, None);

        assert!(!guard.record_failed_login_attempt_at("ghost", t0).await.unwrap());
        assert!(!guard.is_account_locked_at("ghost", t0).await.unwrap());
        assert!(store.find_by_login("ghost").await.unwrap().is_none());
    }
}
