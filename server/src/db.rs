use diesel::prelude::*;
use diesel::r2d2::{self, ConnectionManager};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

pub type DbPool = r2d2::Pool<ConnectionManager<PgConnection>>;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("../migrations");

/// Builds the connection pool and brings the schema up to date. Any
/// failure here is fatal; the server cannot run without a database.
pub fn create_pool(database_url: &str) -> DbPool {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    let pool = r2d2::Pool::builder()
        .build(manager)
        .expect("Failed to build database pool");

    let mut conn = pool
        .get()
        .expect("Failed to check out a connection for migrations");
    conn.run_pending_migrations(MIGRATIONS)
        .expect("Failed to run pending migrations");

    pool
}
