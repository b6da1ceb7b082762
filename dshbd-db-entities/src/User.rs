use chrono::{DateTime, Utc};
use dshbd_common::{normalize_login, Account};
use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::Serialize;
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Lower-cased login (unique)
    #[sea_orm(unique)]
    pub login: String,

    /// Consecutive failed logins; NULL is read as zero
    pub failed_attempts: Option<i32>,

    /// Set while the account is locked
    pub account_locked_until: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        panic!("No relations defined")
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Account {
    fn from(model: Model) -> Self {
        Account {
            login: model.login,
            failed_attempts: model.failed_attempts.map_or(0, |n| n.max(0) as u32),
            locked_until: model.account_locked_until,
        }
    }
}

impl ActiveModel {
    /// A fresh, unlocked record for `login`
    pub fn new_for_login(login: &str) -> Self {
        Self {
            id: Set(Uuid::new_v4()),
            login: Set(normalize_login(login)),
            failed_attempts: Set(Some(0)),
            account_locked_until: Set(None),
        }
    }

    /// Lockout columns only, for an `update_many` keyed by login
    pub fn lockout_fields(account: &Account) -> Self {
        Self {
            failed_attempts: Set(Some(
                i32::try_from(account.failed_attempts).unwrap_or(i32::MAX),
            )),
            account_locked_until: Set(account.locked_until),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_failed_attempts_reads_as_zero() {
        let model = Model {
            id: Uuid::new_v4(),
            login: "alice".into(),
            failed_attempts: None,
            account_locked_until: None,
        };
        let account: Account = model.into();
        assert_eq!(account.failed_attempts, 0);
        assert_eq!(account.locked_until, None);
    }

    #[test]
    fn test_new_record_lowercases_login() {
        let model = ActiveModel::new_for_login("Alice");
        assert_eq!(model.login, Set("alice".to_string()));
        assert_eq!(model.failed_attempts, Set(Some(0)));
    }
}
