//! PostgreSQL dialect.
//!
//! PostgreSQL features:
//! - ANSI identifier quoting (`"`)
//! - Native boolean type (true/false)
//! - `[~~]` / `[!~~]` for case-insensitive ILIKE / NOT ILIKE, with `%` wrapping
//! - `[regexp]` / `[!regexp]` for POSIX regex match `~` / `!~`

use std::sync::LazyLock;

use super::helpers;
use super::SqlDialect;
use crate::error::BuildResult;
use crate::sql::operator::OperatorRegistry;
use crate::sql::value::Value;

static OPERATORS: LazyLock<OperatorRegistry> = LazyLock::new(|| {
    OperatorRegistry::new()
        .with("~~", ilike)
        .with("!~~", not_ilike)
        .with("regexp", regex_match)
        .with("!regexp", regex_not_match)
});

fn ilike(dialect: &dyn SqlDialect, field: &str, value: &Value) -> BuildResult<String> {
    helpers::pattern(dialect, field, value, "ILIKE", " OR ")
}

fn not_ilike(dialect: &dyn SqlDialect, field: &str, value: &Value) -> BuildResult<String> {
    helpers::pattern(dialect, field, value, "NOT ILIKE", " AND ")
}

fn regex_match(dialect: &dyn SqlDialect, field: &str, value: &Value) -> BuildResult<String> {
    Ok(format!("{} ~ {}", field, dialect.value(value)?))
}

fn regex_not_match(dialect: &dyn SqlDialect, field: &str, value: &Value) -> BuildResult<String> {
    Ok(format!("{} !~ {}", field, dialect.value(value)?))
}

/// PostgreSQL dialect.
#[derive(Debug, Clone, Copy)]
pub struct Postgres;

impl SqlDialect for Postgres {
    fn name(&self) -> &'static str {
        "postgres"
    }

    fn quote_identifier(&self, ident: &str) -> String {
        helpers::IdentQuote::Double.quote(ident)
    }

    fn format_bool(&self, b: bool) -> &'static str {
        helpers::bool_literal(b, true)
    }

    fn operators(&self) -> &OperatorRegistry {
        &OPERATORS
    }
}
