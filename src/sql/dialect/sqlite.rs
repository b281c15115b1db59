//! SQLite dialect.
//!
//! SQLite differences from the generic rules:
//! - Booleans are stored as integers (1/0)
//! - `GLOB` for case-sensitive Unix-style pattern matching, exposed as `[glob]`

use std::sync::LazyLock;

use super::helpers;
use super::SqlDialect;
use crate::error::BuildResult;
use crate::sql::operator::OperatorRegistry;
use crate::sql::value::Value;

static OPERATORS: LazyLock<OperatorRegistry> =
    LazyLock::new(|| OperatorRegistry::new().with("glob", glob));

fn glob(dialect: &dyn SqlDialect, field: &str, value: &Value) -> BuildResult<String> {
    Ok(format!("{} GLOB {}", field, dialect.value(value)?))
}

/// SQLite dialect.
#[derive(Debug, Clone, Copy)]
pub struct Sqlite;

impl SqlDialect for Sqlite {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn quote_identifier(&self, ident: &str) -> String {
        helpers::IdentQuote::Double.quote(ident)
    }

    fn operators(&self) -> &OperatorRegistry {
        &OPERATORS
    }
}
