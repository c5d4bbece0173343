//! Per-entity table definitions and idempotent schema bootstrap.
//!
//! # Responsibility
//! - Describe one master-data table as static metadata ([`TableSpec`]).
//! - Create the table and its indexes when absent.
//! - Reject pre-existing tables that lack a declared column.
//!
//! # Invariants
//! - `code` is the primary key and compares case-insensitively (`NOCASE`).
//! - Every column is `NOT NULL`.
//! - Table and column names are compile-time constants, never user input.

use super::{SchemaIssue, StorageError, StorageResult};
use log::debug;
use rusqlite::{Connection, OptionalExtension};

/// Primary-key column shared by every master-data table.
pub const CODE_COLUMN: &str = "code";
/// Display-name column shared by every master-data table.
pub const NAME_COLUMN: &str = "name";
/// Last-modified timestamp column shared by every master-data table.
pub const UPDATED_AT_COLUMN: &str = "updated_at";

/// One persisted column and its SQLite storage class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    pub name: &'static str,
    pub sql_type: &'static str,
}

impl ColumnSpec {
    pub const fn text(name: &'static str) -> Self {
        Self {
            name,
            sql_type: "TEXT",
        }
    }

    pub const fn integer(name: &'static str) -> Self {
        Self {
            name,
            sql_type: "INTEGER",
        }
    }
}

/// Static description of one master-data table.
///
/// `columns` is the canonical column order used for inserts, selects and
/// row decoding. It must start with [`CODE_COLUMN`] and contain
/// [`NAME_COLUMN`] and [`UPDATED_AT_COLUMN`].
#[derive(Debug, Clone, Copy)]
pub struct TableSpec {
    pub table: &'static str,
    pub columns: &'static [ColumnSpec],
    /// Columns matched by substring search.
    pub search_columns: &'static [&'static str],
}

impl TableSpec {
    /// Comma-separated column list in canonical order.
    pub fn column_list(&self) -> String {
        self.columns
            .iter()
            .map(|column| column.name)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// `?1, ?2, ...` placeholders matching [`Self::column_list`].
    pub fn placeholders(&self) -> String {
        (1..=self.columns.len())
            .map(|idx| format!("?{idx}"))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn create_sql(&self) -> String {
        let mut sql = format!("CREATE TABLE IF NOT EXISTS {} (\n", self.table);
        let definitions = self
            .columns
            .iter()
            .map(|column| {
                if column.name == CODE_COLUMN {
                    format!(
                        "    {} {} PRIMARY KEY COLLATE NOCASE NOT NULL",
                        column.name, column.sql_type
                    )
                } else {
                    format!("    {} {} NOT NULL", column.name, column.sql_type)
                }
            })
            .collect::<Vec<_>>()
            .join(",\n");
        sql.push_str(&definitions);
        sql.push_str("\n);");
        sql
    }

    fn index_sql(&self) -> String {
        let mut sql = String::new();
        sql.push_str(&format!(
            "CREATE INDEX IF NOT EXISTS ix_{table}_{NAME_COLUMN} ON {table}({NAME_COLUMN});\n",
            table = self.table
        ));
        sql.push_str(&format!(
            "CREATE INDEX IF NOT EXISTS ix_{table}_{UPDATED_AT_COLUMN} ON {table}({UPDATED_AT_COLUMN} DESC);\n",
            table = self.table
        ));
        for column in self
            .search_columns
            .iter()
            .filter(|name| **name != CODE_COLUMN && **name != NAME_COLUMN)
        {
            sql.push_str(&format!(
                "CREATE INDEX IF NOT EXISTS ix_{table}_{column} ON {table}({column});\n",
                table = self.table
            ));
        }
        sql
    }
}

/// Creates the table when absent, verifies declared columns (and, for a
/// pre-existing table, the `NOCASE` key), then creates missing indexes.
///
/// Safe to call on every repository construction.
pub fn ensure_table(conn: &Connection, spec: &TableSpec) -> StorageResult<()> {
    let existed = table_exists(conn, spec.table)?;
    conn.execute_batch(&spec.create_sql())?;

    for column in spec.columns {
        if !table_has_column(conn, spec.table, column.name)? {
            return Err(StorageError::SchemaMismatch {
                table: spec.table,
                column: column.name,
                issue: SchemaIssue::MissingColumn,
            });
        }
    }
    if existed && !code_is_nocase(conn, spec.table)? {
        return Err(StorageError::SchemaMismatch {
            table: spec.table,
            column: CODE_COLUMN,
            issue: SchemaIssue::CaseSensitiveKey,
        });
    }

    conn.execute_batch(&spec.index_sql())?;
    debug!(
        "event=schema_ensure module=db status=ok table={} created={}",
        spec.table, !existed
    );
    Ok(())
}

/// Returns the total number of rows in `spec.table`.
pub fn count_rows(conn: &Connection, spec: &TableSpec) -> StorageResult<u64> {
    let total: i64 = conn.query_row(
        &format!("SELECT COUNT(*) FROM {};", spec.table),
        [],
        |row| row.get(0),
    )?;
    Ok(u64::try_from(total).unwrap_or(0))
}

/// Returns whether `table` exists in the connected database.
pub fn table_exists(conn: &Connection, table: &str) -> StorageResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

/// Reads the stored `CREATE TABLE` text and checks that the code column
/// definition carries `COLLATE NOCASE`.
fn code_is_nocase(conn: &Connection, table: &str) -> StorageResult<bool> {
    let sql: Option<String> = conn
        .query_row(
            "SELECT sql FROM sqlite_master WHERE type = 'table' AND name = ?1;",
            [table],
            |row| row.get(0),
        )
        .optional()?;
    Ok(sql
        .as_deref()
        .and_then(|sql| column_definition(sql, CODE_COLUMN))
        .is_some_and(|definition| {
            definition
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ")
                .to_ascii_uppercase()
                .contains("COLLATE NOCASE")
        }))
}

/// Finds the definition of `column` in a `CREATE TABLE` statement.
fn column_definition<'a>(create_sql: &'a str, column: &str) -> Option<&'a str> {
    let body = create_sql.get(create_sql.find('(')? + 1..create_sql.rfind(')')?)?;
    body.split(',').map(str::trim).find(|definition| {
        definition
            .split_whitespace()
            .next()
            .map(|name| name.trim_matches(|ch| matches!(ch, '"' | '`' | '[' | ']')))
            .is_some_and(|name| name.eq_ignore_ascii_case(column))
    })
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> StorageResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current.eq_ignore_ascii_case(column) {
            return Ok(true);
        }
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::{column_definition, ensure_table, table_exists, ColumnSpec, TableSpec};
    use crate::db::{SchemaIssue, StorageError};
    use rusqlite::Connection;

    const WIDGETS: TableSpec = TableSpec {
        table: "widgets",
        columns: &[
            ColumnSpec::text("code"),
            ColumnSpec::text("name"),
            ColumnSpec::text("contact"),
            ColumnSpec::text("updated_at"),
        ],
        search_columns: &["code", "name", "contact"],
    };

    fn index_names(conn: &Connection) -> Vec<String> {
        let mut stmt = conn
            .prepare("SELECT name FROM sqlite_master WHERE type = 'index' AND tbl_name = 'widgets' ORDER BY name;")
            .unwrap();
        let names = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .unwrap()
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        names
            .into_iter()
            .filter(|name| name.starts_with("ix_"))
            .collect()
    }

    #[test]
    fn placeholders_follow_column_order() {
        assert_eq!(WIDGETS.column_list(), "code, name, contact, updated_at");
        assert_eq!(WIDGETS.placeholders(), "?1, ?2, ?3, ?4");
    }

    #[test]
    fn ensure_table_is_idempotent_and_creates_indexes() {
        let conn = Connection::open_in_memory().unwrap();
        ensure_table(&conn, &WIDGETS).unwrap();
        ensure_table(&conn, &WIDGETS).unwrap();

        assert!(table_exists(&conn, "widgets").unwrap());
        assert_eq!(
            index_names(&conn),
            vec![
                "ix_widgets_contact".to_string(),
                "ix_widgets_name".to_string(),
                "ix_widgets_updated_at".to_string(),
            ]
        );
    }

    #[test]
    fn primary_key_is_case_insensitive() {
        let conn = Connection::open_in_memory().unwrap();
        ensure_table(&conn, &WIDGETS).unwrap();
        conn.execute(
            "INSERT INTO widgets (code, name, contact, updated_at) VALUES ('W-1', 'a', '', 'x');",
            [],
        )
        .unwrap();

        let duplicate = conn.execute(
            "INSERT INTO widgets (code, name, contact, updated_at) VALUES ('w-1', 'b', '', 'y');",
            [],
        );
        assert!(duplicate.is_err());
    }

    #[test]
    fn ensure_table_reports_missing_column_on_existing_table() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE widgets (
                code TEXT PRIMARY KEY NOT NULL,
                name TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );",
        )
        .unwrap();

        let err = ensure_table(&conn, &WIDGETS).unwrap_err();
        assert!(matches!(
            err,
            StorageError::SchemaMismatch {
                table: "widgets",
                column: "contact",
                issue: SchemaIssue::MissingColumn,
            }
        ));
    }

    #[test]
    fn ensure_table_rejects_case_sensitive_key_on_existing_table() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE widgets (
                code TEXT PRIMARY KEY NOT NULL,
                name TEXT NOT NULL,
                contact TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );",
        )
        .unwrap();

        let err = ensure_table(&conn, &WIDGETS).unwrap_err();
        assert!(matches!(
            err,
            StorageError::SchemaMismatch {
                table: "widgets",
                column: "code",
                issue: SchemaIssue::CaseSensitiveKey,
            }
        ));
        assert!(err.to_string().contains("COLLATE NOCASE"));
    }

    #[test]
    fn existing_nocase_table_is_accepted() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE widgets (
                \"code\"   TEXT  PRIMARY KEY  collate   nocase NOT NULL,
                name TEXT NOT NULL,
                contact TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );",
        )
        .unwrap();

        ensure_table(&conn, &WIDGETS).unwrap();
    }

    #[test]
    fn column_definition_matches_by_leading_name() {
        let sql = "CREATE TABLE t (codex TEXT, code TEXT COLLATE NOCASE, name TEXT)";
        assert_eq!(column_definition(sql, "code"), Some("code TEXT COLLATE NOCASE"));
        assert_eq!(column_definition(sql, "contact"), None);
    }
}
