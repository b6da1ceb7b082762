mod account_lockout;
pub use account_lockout::*;
mod authenticator;
pub use authenticator::*;
pub mod db;
mod services;
pub use services::*;
mod user_store;
pub use user_store::*;
