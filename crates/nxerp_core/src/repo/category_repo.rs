//! Category table mapping and demo data.
//!
//! Categories are searched by `code` and `name` only; `parent_category` is a
//! reference, not a contact line.

use crate::db::schema::{ColumnSpec, TableSpec};
use crate::db::StorageResult;
use crate::model::category::Category;
use crate::repo::codec::{
    bool_from_row, bool_to_db, date_from_row, date_to_db, text, timestamp_from_row,
    timestamp_to_db, trim_in_place,
};
use crate::repo::master_repo::SqliteMasterRepository;
use crate::repo::record::MasterRecord;
use crate::repo::seed::{known_date, seed_date, seed_timestamp};
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::Rng;
use rusqlite::types::Value;
use rusqlite::Row;

/// SQLite repository for categories.
pub type SqliteCategoryRepository = SqliteMasterRepository<Category>;

const TABLE: &str = "categories";

const CATEGORY_TABLE: TableSpec = TableSpec {
    table: TABLE,
    columns: &[
        ColumnSpec::text("code"),
        ColumnSpec::text("name"),
        ColumnSpec::text("type"),
        ColumnSpec::text("parent_category"),
        ColumnSpec::text("created_date"),
        ColumnSpec::integer("is_active"),
        ColumnSpec::text("updated_at"),
    ],
    search_columns: &["code", "name"],
};

const CATEGORY_KINDS: [&str; 3] = ["Medicine", "Surgical", "Cosmetic"];

/// Codes of the hand-authored top-level categories; bulk rows may hang
/// under one of them.
const KNOWN_PARENT_CODES: [&str; 4] = ["CAT-00101", "CAT-00102", "CAT-00103", "CAT-00104"];

impl MasterRecord for Category {
    const ENTITY: &'static str = "Category";
    const TABLE: TableSpec = CATEGORY_TABLE;
    const DEFAULT_BULK_ROWS: usize = 200;

    fn code(&self) -> &str {
        &self.code
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    fn normalize(&mut self) {
        trim_in_place(&mut self.code);
        trim_in_place(&mut self.name);
        trim_in_place(&mut self.kind);
        trim_in_place(&mut self.parent_category);
    }

    fn stamp(&mut self, updated_at: DateTime<Utc>) {
        self.updated_at = updated_at;
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.code.as_str(), self.name.as_str()]
    }

    fn to_values(&self) -> Vec<Value> {
        vec![
            text(&self.code),
            text(&self.name),
            text(&self.kind),
            text(&self.parent_category),
            date_to_db(self.created_date),
            bool_to_db(self.is_active),
            timestamp_to_db(self.updated_at),
        ]
    }

    fn from_row(row: &Row<'_>) -> StorageResult<Self> {
        Ok(Self {
            code: row.get("code")?,
            name: row.get("name")?,
            kind: row.get("type")?,
            parent_category: row.get("parent_category")?,
            created_date: date_from_row(row, TABLE, "created_date")?,
            is_active: bool_from_row(row, TABLE, "is_active")?,
            updated_at: timestamp_from_row(row, TABLE, "updated_at")?,
        })
    }

    fn bulk_row(number: usize, rng: &mut StdRng, anchor: DateTime<Utc>) -> Self {
        let parent_category = if rng.gen_bool(0.5) {
            KNOWN_PARENT_CODES[rng.gen_range(0..KNOWN_PARENT_CODES.len())].to_string()
        } else {
            String::new()
        };

        Self {
            code: format!("CAT-{number:05}"),
            name: format!("Category {number:05}"),
            kind: CATEGORY_KINDS[number % CATEGORY_KINDS.len()].to_string(),
            parent_category,
            created_date: seed_date(anchor, number),
            is_active: true,
            updated_at: seed_timestamp(anchor, number),
        }
    }

    fn known_rows(anchor: DateTime<Utc>) -> Vec<Self> {
        [
            ("CAT-00101", "Antibiotic"),
            ("CAT-00102", "Drip/Infusion"),
            ("CAT-00103", "Syrup"),
            ("CAT-00104", "Painkiller"),
        ]
        .into_iter()
        .map(|(code, name)| Self {
            code: code.to_string(),
            name: name.to_string(),
            kind: "Medicine".to_string(),
            parent_category: String::new(),
            created_date: known_date(anchor, 2026, 1, 1),
            is_active: true,
            updated_at: anchor,
        })
        .collect()
    }
}
