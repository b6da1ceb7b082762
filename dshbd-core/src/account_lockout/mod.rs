mod guard;

pub use guard::AccountLockoutGuard;
