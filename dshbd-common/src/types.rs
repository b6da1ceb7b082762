mod account;
mod secret;

pub use account::{normalize_login, Account, LockState};
pub use secret::Secret;
