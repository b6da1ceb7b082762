use crate::Secret;

pub(crate) const fn _default_max_failed_attempts() -> u32 {
    3
}

pub(crate) const fn _default_lock_duration_minutes() -> u32 {
    15
}

#[inline]
pub(crate) fn _default_database_url() -> Secret<String> {
    Secret::new("sqlite:data/db".to_owned())
}
