//! Connection pool setup.
//!
//! # Panics
//!
//! [`init_db_pool`] panics when `DATABASE_URL` is missing or unreachable.
//! It runs once at startup; the pool is cheap to clone and lives in the
//! application state afterwards.

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use super::env_parse_or;

pub async fn init_db_pool() -> PgPool {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    PgPoolOptions::new()
        .max_connections(env_parse_or("DATABASE_MAX_CONNECTIONS", 10))
        .connect(&url)
        .await
        .expect("Failed to connect to database")
}
