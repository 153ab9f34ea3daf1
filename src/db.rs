//! Database connection pool initialization.
//!
//! The connection string is read from the `DATABASE_URL` environment
//! variable. Migrations under `migrations/` are applied at startup.
//!
//! # Panics
//!
//! [`init_db_pool`] panics if `DATABASE_URL` is unset, the database is
//! unreachable, or a migration fails. The server cannot run without a
//! working pool, so startup aborts.

use sqlx::PgPool;
use std::env;

pub async fn init_db_pool() -> PgPool {
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    pool
}
