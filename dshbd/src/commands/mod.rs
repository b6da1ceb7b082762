pub mod check;
mod common;
pub mod create_account;
pub mod is_locked;
pub mod migrate;
pub mod record_failure;
pub mod status;
pub mod unlock;
