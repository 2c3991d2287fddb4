pub mod quran;
pub mod quran_models;
pub mod quran_schema;

use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use anyhow::{Context, Error as AnyhowError, Result};
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool, PooledConnection};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use dotenvy::dotenv;
use parking_lot::Mutex;

use crate::db::quran::QuranDbHandle;
use crate::get_quran_db_path;
use crate::logger::info;

pub type SqlitePool = Pool<ConnectionManager<SqliteConnection>>;
pub type DbConn = PooledConnection<ConnectionManager<SqliteConnection>>;

pub const QURAN_MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Turns on SQLite foreign key enforcement for every pooled connection.
/// The ON DELETE CASCADE rules in the schema depend on this pragma.
#[derive(Debug, Clone, Copy)]
struct ForeignKeyCustomizer;

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for ForeignKeyCustomizer {
    fn on_acquire(
        &self,
        conn: &mut SqliteConnection,
    ) -> std::result::Result<(), diesel::r2d2::Error> {
        diesel::sql_query("PRAGMA foreign_keys = ON;")
            .execute(conn)
            .map_err(diesel::r2d2::Error::QueryError)?;
        Ok(())
    }
}

#[derive(Debug)]
pub struct DatabaseHandle {
    pool: SqlitePool,
    pub write_lock: Mutex<()>,
}

#[derive(Debug)]
pub struct DbManager {
    pub quran: QuranDbHandle,
}

pub static DATABASE_MANAGER: OnceLock<DbManager> = OnceLock::new();

impl DatabaseHandle {
    pub fn new(database_url: &str) -> Result<Self> {
        let manager = ConnectionManager::new(database_url);
        let pool = Pool::builder()
            .max_size(5)
            .connection_customizer(Box::new(ForeignKeyCustomizer))
            .build(manager)
            .with_context(|| format!("Failed to create pool for: {}", database_url))?;

        Ok(Self {
            pool,
            write_lock: Mutex::new(()),
        })
    }

    pub fn get_conn(&self) -> Result<DbConn> {
        self.pool.get().map_err(AnyhowError::from)
    }

    /// Performs a write operation on the database, guarded by a Mutex write_lock.
    pub fn do_write<F, T>(&self, operation: F) -> Result<T>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T, diesel::result::Error>,
    {
        let _lock = self.write_lock.lock();
        let mut db_conn = self.pool.get()
            .context("Failed to get connection from pool for write")?;
        operation(&mut db_conn).map_err(AnyhowError::from)
    }

    /// Performs a read operation on the database.
    pub fn do_read<F, T>(&self, operation: F) -> Result<T>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T, diesel::result::Error>,
    {
        let mut db_conn = self.pool.get()
            .context("Failed to get connection from pool for read")?;
        operation(&mut db_conn).map_err(AnyhowError::from)
    }
}

impl DbManager {
    pub fn new() -> Result<Self> {
        dotenv().ok();

        let db_path = get_quran_db_path();
        if !db_path.exists() {
            anyhow::bail!(
                "Quran database file not found at expected location: {:?}",
                db_path
            );
        }

        let abs_path = fs::canonicalize(&db_path).unwrap_or(db_path);
        let database_url = abs_path
            .to_str()
            .ok_or_else(|| anyhow::anyhow!("Invalid database path: {:?}", abs_path))?
            .to_string();

        Ok(Self {
            quran: DatabaseHandle::new(&database_url)?,
        })
    }
}

pub fn init_db() -> Result<()> {
    info("init_db()");
    let manager = DbManager::new()?;
    if DATABASE_MANAGER.set(manager).is_err() {
        anyhow::bail!("DbManager is already initialized");
    }
    Ok(())
}

pub fn get_dbm() -> &'static DbManager {
    DATABASE_MANAGER.get().expect("DbManager is not initialized")
}

/// Opens a direct (non-pooled) connection with foreign keys enabled.
pub fn create_database_connection(db_path: &Path) -> Result<SqliteConnection> {
    let db_url = db_path
        .to_str()
        .ok_or_else(|| anyhow::anyhow!("Invalid database path"))?;

    let mut conn = SqliteConnection::establish(db_url)?;
    diesel::sql_query("PRAGMA foreign_keys = ON;").execute(&mut conn)?;
    Ok(conn)
}

pub fn run_migrations(conn: &mut SqliteConnection) -> Result<()> {
    conn.run_pending_migrations(QURAN_MIGRATIONS)
        .map_err(|e| anyhow::anyhow!("Failed to execute pending database migrations: {}", e))?;
    Ok(())
}
