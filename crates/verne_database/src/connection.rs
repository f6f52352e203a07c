//! Database connection utilities.

use crate::DatabaseResult;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use verne_error::{DatabaseError, DatabaseErrorKind};

/// Resolve the database URL from the environment.
///
/// Loads `.env` if present, then reads `DATABASE_URL`.
pub fn database_url() -> DatabaseResult<String> {
    let _ = dotenvy::dotenv();

    std::env::var("DATABASE_URL").map_err(|_| {
        DatabaseError::new(DatabaseErrorKind::Connection(
            "DATABASE_URL environment variable not set".to_string(),
        ))
    })
}

/// Establish a single connection to the PostgreSQL database.
///
/// # Errors
///
/// Returns an error if:
/// - `DATABASE_URL` environment variable is not set
/// - Connection to the database fails
pub fn establish_connection() -> DatabaseResult<PgConnection> {
    establish_connection_with_url(&database_url()?)
}

/// Establish a single connection for an explicit URL.
pub fn establish_connection_with_url(database_url: &str) -> DatabaseResult<PgConnection> {
    PgConnection::establish(database_url).map_err(Into::into)
}

/// Build an r2d2 connection pool from `DATABASE_URL`.
pub fn build_pool() -> DatabaseResult<Pool<ConnectionManager<PgConnection>>> {
    build_pool_with_url(&database_url()?)
}

/// Build an r2d2 connection pool for an explicit URL.
pub fn build_pool_with_url(
    database_url: &str,
) -> DatabaseResult<Pool<ConnectionManager<PgConnection>>> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    Pool::builder()
        .build(manager)
        .map_err(|e| DatabaseError::new(DatabaseErrorKind::Pool(e.to_string())))
}

/// Run pending migrations.
pub fn run_migrations(conn: &mut PgConnection) -> DatabaseResult<()> {
    use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

    const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

    conn.run_pending_migrations(MIGRATIONS)
        .map(|_| ())
        .map_err(|e| DatabaseError::new(DatabaseErrorKind::Migration(e.to_string())))
}
