//! Application state shared across handlers

use sqlx::PgPool;

use crate::repositories::ProfileRepository;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub profile_repository: ProfileRepository,
}
