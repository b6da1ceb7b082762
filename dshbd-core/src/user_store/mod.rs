mod db;
mod memory;

use async_trait::async_trait;
pub use db::DatabaseUserStore;
use dshbd_common::{Account, DashboardError};
pub use memory::InMemoryUserStore;

/// Persistence for the lockout fields of user records.
///
/// Lookups are case-insensitive. `save` writes back the full lockout state of
/// an existing record; it never creates one.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_login(&self, login: &str) -> Result<Option<Account>, DashboardError>;

    async fn save(&self, account: Account) -> Result<Account, DashboardError>;
}
