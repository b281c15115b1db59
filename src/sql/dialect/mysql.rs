//! MySQL dialect.
//!
//! MySQL differences from the generic rules:
//! - Backtick identifier quoting (`` `name` ``)
//! - Boolean is TINYINT(1), rendered 1/0
//! - No FULL OUTER JOIN, so `[<>]` is rejected
//! - `REGEXP` pattern matching, exposed as `[regexp]`

use std::sync::LazyLock;

use super::helpers;
use super::SqlDialect;
use crate::error::BuildResult;
use crate::sql::operator::OperatorRegistry;
use crate::sql::value::Value;

static OPERATORS: LazyLock<OperatorRegistry> =
    LazyLock::new(|| OperatorRegistry::new().with("regexp", regexp));

fn regexp(dialect: &dyn SqlDialect, field: &str, value: &Value) -> BuildResult<String> {
    Ok(format!("{} REGEXP {}", field, dialect.value(value)?))
}

/// MySQL dialect.
#[derive(Debug, Clone, Copy)]
pub struct MySql;

impl SqlDialect for MySql {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn quote_identifier(&self, ident: &str) -> String {
        helpers::IdentQuote::Backtick.quote(ident)
    }

    fn join_keyword(&self, marker: &str) -> Option<&'static str> {
        match marker {
            "<>" => None,
            other => helpers::join_keyword_standard(other),
        }
    }

    fn operators(&self) -> &OperatorRegistry {
        &OPERATORS
    }
}
