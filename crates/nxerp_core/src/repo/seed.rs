//! Deterministic first-run demo data.
//!
//! # Responsibility
//! - Generate a reproducible bulk series per entity from a fixed RNG seed.
//! - Overlay hand-authored sample rows by code.
//! - Insert everything into an empty table inside one transaction.
//!
//! # Invariants
//! - Generated rows are a pure function of [`SeedOptions`]: the same options
//!   give identical rows on every machine and every run.
//! - Known rows win over bulk rows sharing their code.
//! - A table that already has rows is never touched.

use crate::config::SeedOptions;
use crate::db::schema::count_rows;
use crate::db::StorageResult;
use crate::repo::query::{insert_sql, upsert_sql};
use crate::repo::record::MasterRecord;
use chrono::{DateTime, Days, Duration, NaiveDate, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rusqlite::{params_from_iter, Connection, TransactionBehavior};

/// Demo rows for one entity, in insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct SeedRows<E> {
    pub bulk: Vec<E>,
    pub known: Vec<E>,
}

/// Generates demo rows for `E` anchored at `options.anchor`.
pub fn generate_seed_rows<E: MasterRecord>(options: &SeedOptions) -> SeedRows<E> {
    let anchor = options.anchor;
    let count = options.bulk_rows.unwrap_or(E::DEFAULT_BULK_ROWS);
    let mut rng = StdRng::seed_from_u64(options.rng_seed);
    let bulk = (1..=count)
        .map(|number| E::bulk_row(number, &mut rng, anchor))
        .collect();

    SeedRows {
        bulk,
        known: E::known_rows(anchor),
    }
}

/// Seeds `E`'s table when it is empty. Returns the number of rows now present
/// because of seeding (`0` when the table already had data).
///
/// Runs inside one `IMMEDIATE` transaction: concurrent bootstraps of the same
/// file serialize on it and only the first one seeds.
pub fn seed_if_empty<E: MasterRecord>(
    conn: &mut Connection,
    options: &SeedOptions,
) -> StorageResult<u64> {
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    if count_rows(&tx, &E::TABLE)? > 0 {
        return Ok(0);
    }

    let rows = generate_seed_rows::<E>(options);
    {
        let mut insert = tx.prepare(&insert_sql(&E::TABLE))?;
        for record in &rows.bulk {
            insert.execute(params_from_iter(record.to_values()))?;
        }

        let mut overlay = tx.prepare(&upsert_sql(&E::TABLE))?;
        for record in &rows.known {
            overlay.execute(params_from_iter(record.to_values()))?;
        }
    }

    let seeded = count_rows(&tx, &E::TABLE)?;
    tx.commit()?;
    Ok(seeded)
}

/// Date of bulk row `number`: `number mod 365` days before the anchor date.
pub fn seed_date(anchor: DateTime<Utc>, number: usize) -> NaiveDate {
    let back = u64::try_from(number % 365).unwrap_or(0);
    let today = anchor.date_naive();
    today.checked_sub_days(Days::new(back)).unwrap_or(today)
}

/// Timestamp of bulk row `number`: `number` minutes before the anchor.
pub fn seed_timestamp(anchor: DateTime<Utc>, number: usize) -> DateTime<Utc> {
    let minutes = i64::try_from(number).unwrap_or(i64::MAX);
    Duration::try_minutes(minutes)
        .and_then(|back| anchor.checked_sub_signed(back))
        .unwrap_or(anchor)
}

/// Fixed calendar date for hand-authored rows, falling back to the anchor
/// date for an impossible input.
pub fn known_date(anchor: DateTime<Utc>, year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_else(|| anchor.date_naive())
}
