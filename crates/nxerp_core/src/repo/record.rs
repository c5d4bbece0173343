//! Entity plug-in contract for the generic master-data repositories.
//!
//! # Responsibility
//! - Describe how one entity maps onto its table: schema, row encoding,
//!   row decoding, search fields and demo seed rows.
//!
//! # Invariants
//! - `to_values` yields one value per `TABLE.columns` entry, in that order.
//! - `search_fields` mirrors `TABLE.search_columns`, in that order.
//! - `bulk_row` consumes RNG draws independently of `anchor`, so the bulk
//!   series depends only on the seed and the row number.

use crate::db::schema::TableSpec;
use crate::db::StorageResult;
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rusqlite::types::Value;
use rusqlite::Row;

/// Master-data entity persisted by [`super::SqliteMasterRepository`] and
/// [`super::InMemoryMasterRepository`].
pub trait MasterRecord: Clone + Send {
    /// Entity label used in validation messages and log events.
    const ENTITY: &'static str;
    const TABLE: TableSpec;
    /// Bulk seed rows generated when [`crate::SeedOptions::bulk_rows`] is unset.
    const DEFAULT_BULK_ROWS: usize;

    fn code(&self) -> &str;
    fn name(&self) -> &str;
    fn updated_at(&self) -> DateTime<Utc>;

    /// Trims every free-text field.
    fn normalize(&mut self);

    /// Sets the last-modified timestamp.
    fn stamp(&mut self, updated_at: DateTime<Utc>);

    /// Field values matched by substring search.
    fn search_fields(&self) -> Vec<&str>;

    /// Encodes the record in `TABLE.columns` order.
    fn to_values(&self) -> Vec<Value>;

    /// Decodes one row selected with `TABLE.column_list()`.
    fn from_row(row: &Row<'_>) -> StorageResult<Self>;

    /// Builds bulk demo row `number` (1-based).
    fn bulk_row(number: usize, rng: &mut StdRng, anchor: DateTime<Utc>) -> Self;

    /// Hand-authored demo rows overlaid by code after the bulk series.
    fn known_rows(anchor: DateTime<Utc>) -> Vec<Self>;
}
