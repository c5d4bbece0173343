//! Customer table mapping and demo data.
//!
//! # Invariants
//! - Search covers `code`, `name` and `contact`.
//! - Bulk codes are `CUS-00001` upwards; known rows use the same format so
//!   they replace the generated row with that code.

use crate::db::schema::{ColumnSpec, TableSpec};
use crate::db::StorageResult;
use crate::model::customer::Customer;
use crate::repo::codec::{
    bool_from_row, bool_to_db, date_from_row, date_to_db, decimal_from_row, decimal_to_db,
    text, timestamp_from_row, timestamp_to_db, trim_in_place,
};
use crate::repo::master_repo::SqliteMasterRepository;
use crate::repo::record::MasterRecord;
use crate::repo::seed::{known_date, seed_date, seed_timestamp};
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::Rng;
use rusqlite::types::Value;
use rusqlite::Row;
use rust_decimal::Decimal;

/// SQLite repository for customers.
pub type SqliteCustomerRepository = SqliteMasterRepository<Customer>;

const TABLE: &str = "customers";

const CUSTOMER_TABLE: TableSpec = TableSpec {
    table: TABLE,
    columns: &[
        ColumnSpec::text("code"),
        ColumnSpec::text("name"),
        ColumnSpec::text("type"),
        ColumnSpec::text("contact"),
        ColumnSpec::text("opening_date"),
        ColumnSpec::text("opening_balance"),
        ColumnSpec::integer("is_active"),
        ColumnSpec::text("updated_at"),
    ],
    search_columns: &["code", "name", "contact"],
};

const CUSTOMER_KINDS: [&str; 3] = ["Retail", "Corporate", "Insurance"];

impl MasterRecord for Customer {
    const ENTITY: &'static str = "Customer";
    const TABLE: TableSpec = CUSTOMER_TABLE;
    const DEFAULT_BULK_ROWS: usize = 5000;

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
        trim_in_place(&mut self.contact);
    }

    fn stamp(&mut self, updated_at: DateTime<Utc>) {
        self.updated_at = updated_at;
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.code.as_str(), self.name.as_str(), self.contact.as_str()]
    }

    fn to_values(&self) -> Vec<Value> {
        vec![
            text(&self.code),
            text(&self.name),
            text(&self.kind),
            text(&self.contact),
            date_to_db(self.opening_date),
            decimal_to_db(self.opening_balance),
            bool_to_db(self.is_active),
            timestamp_to_db(self.updated_at),
        ]
    }

    fn from_row(row: &Row<'_>) -> StorageResult<Self> {
        Ok(Self {
            code: row.get("code")?,
            name: row.get("name")?,
            kind: row.get("type")?,
            contact: row.get("contact")?,
            opening_date: date_from_row(row, TABLE, "opening_date")?,
            opening_balance: decimal_from_row(row, TABLE, "opening_balance")?,
            is_active: bool_from_row(row, TABLE, "is_active")?,
            updated_at: timestamp_from_row(row, TABLE, "updated_at")?,
        })
    }

    fn bulk_row(number: usize, rng: &mut StdRng, anchor: DateTime<Utc>) -> Self {
        let contact = format!(
            "03{}-{}",
            rng.gen_range(10..49),
            rng.gen_range(1_000_000..9_999_999)
        );
        let balance_cents: i64 = rng.gen_range(0..1_500_000);

        Self {
            code: format!("CUS-{number:05}"),
            name: format!("Customer {number:05}"),
            kind: CUSTOMER_KINDS[number % CUSTOMER_KINDS.len()].to_string(),
            contact,
            opening_date: seed_date(anchor, number),
            opening_balance: Decimal::new(balance_cents, 2),
            is_active: true,
            updated_at: seed_timestamp(anchor, number),
        }
    }

    fn known_rows(anchor: DateTime<Utc>) -> Vec<Self> {
        vec![
            Self {
                code: "CUS-01002".to_string(),
                name: "City Clinic".to_string(),
                kind: "Corporate".to_string(),
                contact: "0300-1234567".to_string(),
                opening_date: known_date(anchor, 2026, 2, 19),
                opening_balance: Decimal::new(2150, 0),
                is_active: true,
                updated_at: anchor,
            },
            Self {
                code: "CUS-01003".to_string(),
                name: "Care Point Pharmacy".to_string(),
                kind: "Retail".to_string(),
                contact: "0321-7654321".to_string(),
                opening_date: known_date(anchor, 2026, 1, 5),
                opening_balance: Decimal::new(98_050, 2),
                is_active: true,
                updated_at: anchor,
            },
        ]
    }
}
