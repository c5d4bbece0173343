//! Generic paged master-data repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide paged search, point lookup, upsert and delete for any
//!   [`MasterRecord`] entity.
//! - Bootstrap the entity table (and demo data) on construction.
//!
//! # Invariants
//! - Every operation opens its own connection and drops it before returning.
//! - `updated_at` is assigned here, never taken from the caller.
//! - Upsert is one `INSERT ... ON CONFLICT DO UPDATE` statement.
//! - Storage errors are logged and returned unchanged; nothing is retried.

use crate::config::{SeedOptions, StoreConfig};
use crate::db::schema::{count_rows, ensure_table};
use crate::db::{open_db, StorageResult};
use crate::model::page::{Page, PageQuery};
use crate::repo::query::{
    count_query, delete_by_code_sql, page_query, select_by_code_sql, upsert_sql,
};
use crate::repo::record::MasterRecord;
use crate::repo::seed::seed_if_empty;
use chrono::Utc;
use log::{debug, error, info};
use rusqlite::{params_from_iter, Connection};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Repository interface shared by every master-data entity.
pub trait MasterRepository<E: MasterRecord> {
    /// Returns one page of rows, most recently modified first.
    ///
    /// Page number and size are normalized (>= 1, >= 10). Pages past the end
    /// are empty but still report the real `total_count`.
    fn get_page(&self, query: &PageQuery) -> StorageResult<Page<E>>;
    /// Case-insensitive lookup of the trimmed code.
    fn get_by_code(&self, code: &str) -> StorageResult<Option<E>>;
    /// Inserts or fully overwrites the row keyed by the record's code and
    /// returns what was stored (trimmed, with the assigned `updated_at`).
    fn upsert(&self, record: &E) -> StorageResult<E>;
    /// Deletes by trimmed code. Returns whether a row was removed.
    fn delete(&self, code: &str) -> StorageResult<bool>;
    /// Total number of stored rows.
    fn count(&self) -> StorageResult<u64>;
}

/// SQLite-backed repository for one master-data table.
pub struct SqliteMasterRepository<E: MasterRecord> {
    db_path: PathBuf,
    _record: PhantomData<fn() -> E>,
}

impl<E: MasterRecord> SqliteMasterRepository<E> {
    /// Creates the repository and bootstraps its table.
    ///
    /// # Side effects
    /// - Creates the database directory and file when missing.
    /// - Creates the table and indexes when missing.
    /// - Seeds demo rows in one transaction when the table is empty and
    ///   seeding is enabled.
    pub fn try_new(config: &StoreConfig) -> StorageResult<Self> {
        let repo = Self {
            db_path: config.db_path.clone(),
            _record: PhantomData,
        };
        repo.bootstrap(&config.seed)?;
        Ok(repo)
    }

    /// Database file backing this repository.
    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    fn connect(&self) -> StorageResult<Connection> {
        open_db(self.db_path())
    }

    fn bootstrap(&self, seed: &SeedOptions) -> StorageResult<()> {
        let started_at = Instant::now();
        let table = E::TABLE.table;

        match self.prepare_table(seed) {
            Ok(seeded) => {
                info!(
                    "event=repo_bootstrap module=repo status=ok table={} db_path={} seeded_rows={} duration_ms={}",
                    table,
                    self.db_path().display(),
                    seeded,
                    started_at.elapsed().as_millis()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=repo_bootstrap module=repo status=error table={} db_path={} duration_ms={} error={}",
                    table,
                    self.db_path().display(),
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }

    fn prepare_table(&self, seed: &SeedOptions) -> StorageResult<u64> {
        let mut conn = self.connect()?;
        ensure_table(&conn, &E::TABLE)?;
        if !seed.enabled {
            return Ok(0);
        }
        seed_if_empty::<E>(&mut conn, seed)
    }

    /// Runs one operation on a fresh connection and logs its outcome.
    fn with_connection<T>(
        &self,
        operation: &'static str,
        run: impl FnOnce(&Connection) -> StorageResult<T>,
    ) -> StorageResult<T> {
        let started_at = Instant::now();
        let result = self.connect().and_then(|conn| run(&conn));
        match &result {
            Ok(_) => debug!(
                "event=repo_{} module=repo status=ok table={} duration_ms={}",
                operation,
                E::TABLE.table,
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event=repo_{} module=repo status=error table={} duration_ms={} error={}",
                operation,
                E::TABLE.table,
                started_at.elapsed().as_millis(),
                err
            ),
        }
        result
    }
}

impl<E: MasterRecord> MasterRepository<E> for SqliteMasterRepository<E> {
    fn get_page(&self, query: &PageQuery) -> StorageResult<Page<E>> {
        let normalized = query.normalized();
        self.with_connection("get_page", |conn| {
            let count = count_query(&E::TABLE, normalized.search_term());
            let total: i64 =
                conn.query_row(&count.sql, params_from_iter(count.binds), |row| row.get(0))?;

            let page = page_query(&E::TABLE, &normalized);
            let mut stmt = conn.prepare(&page.sql)?;
            let mut rows = stmt.query(params_from_iter(page.binds))?;
            let mut items = Vec::new();
            while let Some(row) = rows.next()? {
                items.push(E::from_row(row)?);
            }

            Ok(Page {
                items,
                total_count: u64::try_from(total).unwrap_or(0),
                page_number: normalized.page_number,
                page_size: normalized.page_size,
            })
        })
    }

    fn get_by_code(&self, code: &str) -> StorageResult<Option<E>> {
        let code = code.trim();
        self.with_connection("get_by_code", |conn| {
            let mut stmt = conn.prepare(&select_by_code_sql(&E::TABLE))?;
            let mut rows = stmt.query([code])?;
            match rows.next()? {
                Some(row) => Ok(Some(E::from_row(row)?)),
                None => Ok(None),
            }
        })
    }

    fn upsert(&self, record: &E) -> StorageResult<E> {
        let mut stored = record.clone();
        stored.normalize();
        self.with_connection("upsert", |conn| {
            stored.stamp(Utc::now());
            conn.execute(&upsert_sql(&E::TABLE), params_from_iter(stored.to_values()))?;
            Ok(())
        })?;
        Ok(stored)
    }

    fn delete(&self, code: &str) -> StorageResult<bool> {
        let code = code.trim();
        self.with_connection("delete", |conn| {
            let changed = conn.execute(&delete_by_code_sql(&E::TABLE), [code])?;
            Ok(changed > 0)
        })
    }

    fn count(&self) -> StorageResult<u64> {
        self.with_connection("count", |conn| count_rows(conn, &E::TABLE))
    }
}
