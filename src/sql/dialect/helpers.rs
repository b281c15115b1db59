//! Rendering pieces the dialects share: delimiters, literals, pagination
//! fragments, join keywords and the bodies of the built-in condition operators.

use super::SqlDialect;
use crate::error::{BuildError, BuildResult};
use crate::sql::value::Value;

// =============================================================================
// Identifier Quoting
// =============================================================================

/// Identifier delimiters. The closing delimiter is escaped by doubling it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentQuote {
    /// `"x"`: Generic, SQLite, Postgres, Oracle
    Double,
    /// `` `x` ``: MySQL
    Backtick,
    /// `[x]`: SQL Server
    Bracket,
}

impl IdentQuote {
    fn delimiters(self) -> (char, char) {
        match self {
            IdentQuote::Double => ('"', '"'),
            IdentQuote::Backtick => ('`', '`'),
            IdentQuote::Bracket => ('[', ']'),
        }
    }

    pub fn quote(self, ident: &str) -> String {
        let (open, close) = self.delimiters();
        let mut out = String::with_capacity(ident.len() + 2);
        out.push(open);
        for c in ident.chars() {
            if c == close {
                out.push(close);
            }
            out.push(c);
        }
        out.push(close);
        out
    }
}

// =============================================================================
// Literals
// =============================================================================

/// `'text'` with `''` escaping, optionally behind a national-character `N` prefix.
pub fn string_literal(s: &str, national: bool) -> String {
    let escaped = s.replace('\'', "''");
    if national {
        format!("N'{}'", escaped)
    } else {
        format!("'{}'", escaped)
    }
}

/// `true`/`false` when the dialect has boolean keywords, else `1`/`0`.
pub fn bool_literal(b: bool, keywords: bool) -> &'static str {
    match (keywords, b) {
        (true, true) => "true",
        (true, false) => "false",
        (false, true) => "1",
        (false, false) => "0",
    }
}

/// Format a float with shortest round-trip digits.
///
/// NaN and infinities have no SQL literal form.
pub fn format_float(f: f64) -> BuildResult<String> {
    if !f.is_finite() {
        return Err(BuildError::ValueParse(format!(
            "Cannot serialize {} to SQL",
            f
        )));
    }
    let mut buffer = ryu::Buffer::new();
    Ok(buffer.format_finite(f).to_string())
}

// =============================================================================
// Pagination
// =============================================================================

/// `LIMIT n [OFFSET m]` (standard SQL).
/// Used by: Generic, SQLite, MySQL, Postgres
pub fn limit_offset_standard(limit: u64, offset: Option<u64>) -> String {
    match offset {
        Some(off) => format!("LIMIT {} OFFSET {}", limit, off),
        None => format!("LIMIT {}", limit),
    }
}

/// `OFFSET m ROWS FETCH NEXT n ROWS ONLY`.
/// Used by: SQL Server 2012+ when an offset is present
pub fn limit_offset_fetch(limit: u64, offset: u64) -> String {
    format!("OFFSET {} ROWS FETCH NEXT {} ROWS ONLY", offset, limit)
}

/// ROWNUM range predicate, inclusive on both ends.
/// Used by: Oracle
pub fn limit_rownum(limit: u64, offset: Option<u64>) -> String {
    match offset {
        Some(off) => format!(
            "ROWNUM >= {} AND ROWNUM <= {}",
            off,
            off.saturating_add(limit)
        ),
        None => format!("ROWNUM <= {}", limit),
    }
}

// =============================================================================
// Joins
// =============================================================================

/// Map the four join markers to their keywords.
pub fn join_keyword_standard(marker: &str) -> Option<&'static str> {
    match marker {
        ">" => Some("LEFT JOIN"),
        "<" => Some("RIGHT JOIN"),
        "<>" => Some("FULL OUTER JOIN"),
        "><" => Some("INNER JOIN"),
        _ => None,
    }
}

// =============================================================================
// Function Remapping
// =============================================================================

/// Remap functions for SQL Server.
pub fn remap_function_tsql(name: &str) -> Option<&'static str> {
    match name.to_uppercase().as_str() {
        "LENGTH" => Some("LEN"),
        "SUBSTR" => Some("SUBSTRING"),
        "NOW" => Some("GETDATE"),
        "CURRENT_TIMESTAMP" => Some("GETDATE"),
        "STRFTIME" => Some("FORMAT"),
        "TO_CHAR" => Some("FORMAT"),
        "DATE_FORMAT" => Some("FORMAT"),
        "NVL" => Some("ISNULL"),
        "IFNULL" => Some("ISNULL"),
        _ => None,
    }
}

// =============================================================================
// Operator building blocks
// =============================================================================

/// Render a term value (raw text, field, subquery) without literal quoting.
pub fn term_sql<D: SqlDialect + ?Sized>(dialect: &D, value: &Value) -> Option<String> {
    match value {
        Value::Raw(raw) => Some(raw.to_string()),
        Value::Field(field) => Some(field.to_sql(dialect)),
        Value::Query(query) => Some(query.sql()),
        _ => None,
    }
}

/// Whether an operator token quantifies a subquery (`= ANY`, `>ALL`, `<> some`).
pub fn is_quantified(token: &str) -> bool {
    let lower = token.to_lowercase();
    lower.ends_with("any") || lower.ends_with("all") || lower.ends_with("some")
}

fn list_items(value: &Value) -> Option<&[Value]> {
    match value.collapse_singleton() {
        Value::List(items) => Some(items),
        _ => None,
    }
}

fn non_empty<'a>(items: &'a [Value], field: &str) -> BuildResult<&'a [Value]> {
    if items.is_empty() {
        return Err(BuildError::WhereParse(format!(
            "Empty value list for {}",
            field
        )));
    }
    Ok(items)
}

/// Scalar comparison or list membership: `f = v`, `f IN (a,b)`, `f IN (subquery)`.
pub fn membership<D: SqlDialect + ?Sized>(
    dialect: &D,
    field: &str,
    value: &Value,
    op: &str,
    list_op: &str,
) -> BuildResult<String> {
    if let Some(items) = list_items(value) {
        let rendered = non_empty(items, field)?
            .iter()
            .map(|v| dialect.value(v))
            .collect::<BuildResult<Vec<_>>>()?;
        return Ok(format!("{} {} ({})", field, list_op, rendered.join(",")));
    }
    match value.collapse_singleton() {
        Value::Query(query) => Ok(format!("{} {} ({})", field, list_op, query.sql())),
        scalar => Ok(format!("{} {} {}", field, op, dialect.value(scalar)?)),
    }
}

/// Wrap a bare pattern in `%...%` unless it already has a boundary `%`.
pub fn wrap_pattern(value: &Value) -> Value {
    match value {
        Value::Str(s) if !s.starts_with('%') && !s.ends_with('%') => {
            Value::Str(format!("%{}%", s))
        }
        other => other.clone(),
    }
}

/// Pattern match with `%` wrapping; lists expand into a parenthesized group joined by `joiner`.
pub fn pattern<D: SqlDialect + ?Sized>(
    dialect: &D,
    field: &str,
    value: &Value,
    op: &str,
    joiner: &str,
) -> BuildResult<String> {
    let single = |v: &Value| -> BuildResult<String> {
        Ok(format!("{} {} {}", field, op, dialect.value(&wrap_pattern(v))?))
    };
    match list_items(value) {
        Some(items) => {
            let parts = non_empty(items, field)?
                .iter()
                .map(single)
                .collect::<BuildResult<Vec<_>>>()?;
            Ok(format!("({})", parts.join(joiner)))
        }
        None => single(value.collapse_singleton()),
    }
}

/// `f OP a AND b` over exactly two values.
pub fn range<D: SqlDialect + ?Sized>(
    dialect: &D,
    field: &str,
    value: &Value,
    op: &str,
) -> BuildResult<String> {
    match value {
        Value::List(items) if items.len() == 2 => Ok(format!(
            "{} {} {} AND {}",
            field,
            op,
            dialect.value(&items[0])?,
            dialect.value(&items[1])?
        )),
        _ => Err(BuildError::WhereParse(format!(
            "{} value should be a tuple or list with 2 elements",
            op
        ))),
    }
}
