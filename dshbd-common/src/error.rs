#[derive(thiserror::Error, Debug)]
pub enum DashboardError {
    #[error("database error: {0}")]
    DatabaseError(#[from] sea_orm::DbErr),
    #[error("user store unavailable: {0}")]
    StoreUnavailable(String),
    #[error("user {0} not found")]
    UserNotFound(String),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}
