//! SQL text builders for paged search, point lookup and upsert.
//!
//! # Invariants
//! - User text is only ever bound as a parameter, never interpolated.
//! - Search is a literal, ASCII case-insensitive substring match: `%`, `_`
//!   and `\` in the term are escaped before wrapping it in `%...%`.
//! - Page ordering is total: `updated_at DESC, code ASC`.

use crate::db::schema::{TableSpec, CODE_COLUMN, UPDATED_AT_COLUMN};
use crate::model::page::PageQuery;
use rusqlite::types::Value;

const LIKE_ESCAPE: char = '\\';

/// SQL text plus positional (`?`) bind values.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundSql {
    pub sql: String,
    pub binds: Vec<Value>,
}

/// Counts rows matching the optional search term, ignoring pagination.
pub fn count_query(spec: &TableSpec, term: Option<&str>) -> BoundSql {
    let mut sql = format!("SELECT COUNT(*) FROM {}", spec.table);
    let mut binds = Vec::new();
    push_search_filter(&mut sql, &mut binds, spec, term);
    sql.push(';');
    BoundSql { sql, binds }
}

/// Selects one normalized page of rows matching the query's search term.
pub fn page_query(spec: &TableSpec, query: &PageQuery) -> BoundSql {
    let normalized = query.normalized();
    let mut sql = format!("SELECT {} FROM {}", spec.column_list(), spec.table);
    let mut binds = Vec::new();
    push_search_filter(&mut sql, &mut binds, spec, normalized.search_term());

    sql.push_str(&format!(
        " ORDER BY {UPDATED_AT_COLUMN} DESC, {CODE_COLUMN} ASC LIMIT ? OFFSET ?;"
    ));
    binds.push(Value::Integer(i64::from(normalized.page_size)));
    binds.push(Value::Integer(
        i64::try_from(normalized.offset()).unwrap_or(i64::MAX),
    ));

    BoundSql { sql, binds }
}

/// Selects one row by case-insensitive code (`?1`).
pub fn select_by_code_sql(spec: &TableSpec) -> String {
    format!(
        "SELECT {} FROM {} WHERE {CODE_COLUMN} = ?1 LIMIT 1;",
        spec.column_list(),
        spec.table
    )
}

/// Deletes one row by case-insensitive code (`?1`).
pub fn delete_by_code_sql(spec: &TableSpec) -> String {
    format!("DELETE FROM {} WHERE {CODE_COLUMN} = ?1;", spec.table)
}

/// Plain insert of every column; fails on an existing code.
pub fn insert_sql(spec: &TableSpec) -> String {
    format!(
        "INSERT INTO {} ({}) VALUES ({});",
        spec.table,
        spec.column_list(),
        spec.placeholders()
    )
}

/// Single-statement insert-or-overwrite keyed by code.
///
/// On conflict every column is replaced, `code` included, so the stored
/// casing follows the latest write.
pub fn upsert_sql(spec: &TableSpec) -> String {
    let assignments = spec
        .columns
        .iter()
        .map(|column| format!("{name} = excluded.{name}", name = column.name))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "INSERT INTO {} ({}) VALUES ({}) ON CONFLICT({CODE_COLUMN}) DO UPDATE SET {};",
        spec.table,
        spec.column_list(),
        spec.placeholders(),
        assignments
    )
}

/// Wraps a search term as an escaped `LIKE` substring pattern.
pub fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for ch in term.chars() {
        if ch == '%' || ch == '_' || ch == LIKE_ESCAPE {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

fn push_search_filter(
    sql: &mut String,
    binds: &mut Vec<Value>,
    spec: &TableSpec,
    term: Option<&str>,
) {
    let Some(term) = term.map(str::trim).filter(|term| !term.is_empty()) else {
        return;
    };
    if spec.search_columns.is_empty() {
        return;
    }

    let pattern = like_pattern(term);
    let clauses = spec
        .search_columns
        .iter()
        .map(|column| format!("{column} LIKE ? ESCAPE '{LIKE_ESCAPE}'"))
        .collect::<Vec<_>>()
        .join(" OR ");
    sql.push_str(" WHERE ");
    sql.push_str(&clauses);
    for _ in spec.search_columns {
        binds.push(Value::Text(pattern.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::{count_query, like_pattern, page_query, upsert_sql};
    use crate::db::schema::{ColumnSpec, TableSpec};
    use crate::model::page::PageQuery;
    use rusqlite::types::Value;

    const PEOPLE: TableSpec = TableSpec {
        table: "people",
        columns: &[
            ColumnSpec::text("code"),
            ColumnSpec::text("name"),
            ColumnSpec::text("updated_at"),
        ],
        search_columns: &["code", "name"],
    };

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("acme"), "%acme%");
        assert_eq!(like_pattern("50%_off\\"), "%50\\%\\_off\\\\%");
    }

    #[test]
    fn count_without_search_has_no_filter() {
        let query = count_query(&PEOPLE, Some("   "));
        assert_eq!(query.sql, "SELECT COUNT(*) FROM people;");
        assert!(query.binds.is_empty());
    }

    #[test]
    fn page_query_binds_pattern_per_search_column_then_limit_offset() {
        let query = page_query(&PEOPLE, &PageQuery::new(3, 20).with_search(" Acm "));
        assert!(query
            .sql
            .contains("WHERE code LIKE ? ESCAPE '\\' OR name LIKE ? ESCAPE '\\'"));
        assert!(query
            .sql
            .ends_with("ORDER BY updated_at DESC, code ASC LIMIT ? OFFSET ?;"));
        assert_eq!(
            query.binds,
            vec![
                Value::Text("%Acm%".to_string()),
                Value::Text("%Acm%".to_string()),
                Value::Integer(20),
                Value::Integer(40),
            ]
        );
    }

    #[test]
    fn upsert_overwrites_every_column() {
        let sql = upsert_sql(&PEOPLE);
        assert!(sql.starts_with("INSERT INTO people (code, name, updated_at) VALUES (?1, ?2, ?3)"));
        assert!(sql.contains(
            "ON CONFLICT(code) DO UPDATE SET code = excluded.code, name = excluded.name, updated_at = excluded.updated_at"
        ));
    }
}
