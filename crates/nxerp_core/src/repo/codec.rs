//! Column value encoding shared by every master-data table.
//!
//! Dates are `YYYY-MM-DD`, timestamps fixed-width RFC 3339 UTC with
//! nanoseconds (lexical order == chronological order), money the decimal
//! string of [`Decimal`], booleans `0`/`1`.

use crate::db::{StorageError, StorageResult};
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use rusqlite::types::Value;
use rusqlite::Row;
use rust_decimal::Decimal;
use std::str::FromStr;

const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn text(value: &str) -> Value {
    Value::Text(value.to_string())
}

pub fn date_to_db(value: NaiveDate) -> Value {
    Value::Text(value.format(DATE_FORMAT).to_string())
}

pub fn timestamp_to_db(value: DateTime<Utc>) -> Value {
    Value::Text(value.to_rfc3339_opts(SecondsFormat::Nanos, true))
}

pub fn decimal_to_db(value: Decimal) -> Value {
    Value::Text(value.to_string())
}

pub fn bool_to_db(value: bool) -> Value {
    Value::Integer(if value { 1 } else { 0 })
}

pub fn date_from_row(row: &Row<'_>, table: &str, column: &str) -> StorageResult<NaiveDate> {
    let raw: String = row.get(column)?;
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).map_err(|_| {
        StorageError::InvalidData(format!("invalid date `{raw}` in {table}.{column}"))
    })
}

pub fn timestamp_from_row(
    row: &Row<'_>,
    table: &str,
    column: &str,
) -> StorageResult<DateTime<Utc>> {
    let raw: String = row.get(column)?;
    DateTime::parse_from_rfc3339(raw.trim())
        .map(|value| value.with_timezone(&Utc))
        .map_err(|_| {
            StorageError::InvalidData(format!("invalid timestamp `{raw}` in {table}.{column}"))
        })
}

/// Reads a money column. Text is the canonical form; integer and real
/// values written by other tools are accepted as well.
pub fn decimal_from_row(row: &Row<'_>, table: &str, column: &str) -> StorageResult<Decimal> {
    let invalid = |shown: String| {
        StorageError::InvalidData(format!("invalid decimal `{shown}` in {table}.{column}"))
    };

    match row.get::<_, Value>(column)? {
        Value::Text(raw) => Decimal::from_str(raw.trim()).map_err(|_| invalid(raw)),
        Value::Integer(value) => Ok(Decimal::from(value)),
        Value::Real(value) => Decimal::try_from(value).map_err(|_| invalid(value.to_string())),
        Value::Null => Err(invalid("NULL".to_string())),
        Value::Blob(_) => Err(invalid("<blob>".to_string())),
    }
}

pub fn bool_from_row(row: &Row<'_>, table: &str, column: &str) -> StorageResult<bool> {
    match row.get::<_, i64>(column)? {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(StorageError::InvalidData(format!(
            "invalid boolean `{other}` in {table}.{column}"
        ))),
    }
}

/// Trims a text field in place, reusing the allocation when already trimmed.
pub fn trim_in_place(value: &mut String) {
    let trimmed = value.trim();
    if trimmed.len() != value.len() {
        *value = trimmed.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::{decimal_to_db, timestamp_to_db, trim_in_place};
    use chrono::{TimeZone, Utc};
    use rusqlite::types::Value;
    use rust_decimal::Decimal;

    #[test]
    fn timestamps_are_fixed_width_utc() {
        let early = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
        let late = early + chrono::Duration::nanoseconds(1_500);

        let (Value::Text(early), Value::Text(late)) = (timestamp_to_db(early), timestamp_to_db(late))
        else {
            panic!("timestamps must encode as text");
        };
        assert_eq!(early, "2026-01-02T03:04:05.000000000Z");
        assert_eq!(early.len(), late.len());
        assert!(early < late);
    }

    #[test]
    fn decimal_text_is_exact() {
        let value = Decimal::new(123_456_789_99, 2);
        assert_eq!(decimal_to_db(value), Value::Text("123456789.99".to_string()));
    }

    #[test]
    fn trim_in_place_strips_both_ends() {
        let mut value = "  CUS-1  ".to_string();
        trim_in_place(&mut value);
        assert_eq!(value, "CUS-1");
    }
}
