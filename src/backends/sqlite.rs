//! SQLite backend: one table, one TEXT primary key column.

use rusqlite::Connection;
use std::path::Path;

use crate::errors::{Error, Result};
use crate::store::{BulkWriter, DictReader, DictWriter, Lifecycle};

const DEFAULT_TABLE: &str = "passwords";

/// Dictionary stored in a SQLite table with the password as primary key.
///
/// `INSERT OR IGNORE` makes writes idempotent, so re-running a failed
/// import is safe. Bulk flushes run inside a single transaction.
pub struct SqliteStore {
    conn: Connection,
    insert_sql: String,
    has_sql: String,
    create_sql: String,
}

impl SqliteStore {
    /// Wrap an open connection, using the default `passwords` table.
    pub fn new(conn: Connection) -> Self {
        Self::with_table(conn, DEFAULT_TABLE)
    }

    /// Wrap an open connection with a custom table name. The table is
    /// created by [`Lifecycle::init`] if it does not exist.
    pub fn with_table(conn: Connection, table: &str) -> Self {
        SqliteStore {
            conn,
            insert_sql: format!("INSERT OR IGNORE INTO {table} (password) VALUES (?1)"),
            has_sql: format!("SELECT EXISTS(SELECT 1 FROM {table} WHERE password = ?1)"),
            create_sql: format!(
                "CREATE TABLE IF NOT EXISTS {table} (password TEXT PRIMARY KEY) WITHOUT ROWID"
            ),
        }
    }

    /// Open or create a dictionary database at `path`.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(Error::store)?;
        Ok(Self::new(conn))
    }

    /// In-memory dictionary, for tests.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(Error::store)?;
        Ok(Self::new(conn))
    }

    /// Access the underlying connection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl Lifecycle for SqliteStore {
    fn init(&mut self) -> Result<()> {
        self.conn
            .execute_batch(&self.create_sql)
            .map_err(Error::store)
    }
}

impl DictWriter for SqliteStore {
    fn add(&mut self, password: &str) -> Result<()> {
        self.conn
            .execute(&self.insert_sql, [password])
            .map(|_| ())
            .map_err(Error::store)
    }
}

impl BulkWriter for SqliteStore {
    fn add_multiple(&mut self, passwords: &[String]) -> Result<()> {
        let tx = self.conn.transaction().map_err(Error::store)?;
        {
            let mut stmt = tx.prepare_cached(&self.insert_sql).map_err(Error::store)?;
            for p in passwords {
                stmt.execute([p.as_str()]).map_err(Error::store)?;
            }
        }
        tx.commit().map_err(Error::store)
    }
}

impl DictReader for SqliteStore {
    fn has(&self, password: &str) -> Result<bool> {
        self.conn
            .query_row(&self.has_sql, [password], |row| row.get(0))
            .map_err(Error::store)
    }
}
