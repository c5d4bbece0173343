//! Supplier table mapping and demo data.

use crate::db::schema::{ColumnSpec, TableSpec};
use crate::db::StorageResult;
use crate::model::supplier::Supplier;
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

/// SQLite repository for suppliers.
pub type SqliteSupplierRepository = SqliteMasterRepository<Supplier>;

const TABLE: &str = "suppliers";

const SUPPLIER_TABLE: TableSpec = TableSpec {
    table: TABLE,
    columns: &[
        ColumnSpec::text("code"),
        ColumnSpec::text("name"),
        ColumnSpec::text("type"),
        ColumnSpec::text("contact"),
        ColumnSpec::text("onboard_date"),
        ColumnSpec::text("opening_payable"),
        ColumnSpec::integer("is_active"),
        ColumnSpec::text("updated_at"),
    ],
    search_columns: &["code", "name", "contact"],
};

const SUPPLIER_KINDS: [&str; 3] = ["Distributor", "Wholesaler", "Manufacturer"];

impl MasterRecord for Supplier {
    const ENTITY: &'static str = "Supplier";
    const TABLE: TableSpec = SUPPLIER_TABLE;
    const DEFAULT_BULK_ROWS: usize = 1000;

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
            date_to_db(self.onboard_date),
            decimal_to_db(self.opening_payable),
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
            onboard_date: date_from_row(row, TABLE, "onboard_date")?,
            opening_payable: decimal_from_row(row, TABLE, "opening_payable")?,
            is_active: bool_from_row(row, TABLE, "is_active")?,
            updated_at: timestamp_from_row(row, TABLE, "updated_at")?,
        })
    }

    fn bulk_row(number: usize, rng: &mut StdRng, anchor: DateTime<Utc>) -> Self {
        let contact = format!(
            "04{}-{}",
            rng.gen_range(10..99),
            rng.gen_range(1_000_000..9_999_999)
        );
        let payable_cents: i64 = rng.gen_range(0..2_500_000);

        Self {
            code: format!("SUP-{number:05}"),
            name: format!("Supplier {number:05}"),
            kind: SUPPLIER_KINDS[number % SUPPLIER_KINDS.len()].to_string(),
            contact,
            onboard_date: seed_date(anchor, number),
            opening_payable: Decimal::new(payable_cents, 2),
            is_active: true,
            updated_at: seed_timestamp(anchor, number),
        }
    }

    fn known_rows(anchor: DateTime<Utc>) -> Vec<Self> {
        [
            ("SUP-00301", "HealthLine Pharma", "Distributor", "0300-1111111", 4200),
            ("SUP-00302", "Global Medics", "Wholesaler", "0300-2222222", 7860),
            ("SUP-00303", "Sterile Supply Co", "Distributor", "0300-3333333", 2410),
        ]
        .into_iter()
        .map(|(code, name, kind, contact, payable)| Self {
            code: code.to_string(),
            name: name.to_string(),
            kind: kind.to_string(),
            contact: contact.to_string(),
            onboard_date: known_date(anchor, 2026, 2, 1),
            opening_payable: Decimal::new(payable, 0),
            is_active: true,
            updated_at: anchor,
        })
        .collect()
    }
}
