//! SQL dialect definitions and rendering rules.
//!
//! This module provides a trait-based abstraction for SQL dialect differences.
//! Each dialect implements `SqlDialect` to handle its specific syntax:
//!
//! - Identifier quoting: `"` (Generic/SQLite/PG/Oracle), `` ` `` (MySQL), `[]` (SQL Server)
//! - Pagination: trailing LIMIT/OFFSET, `TOP n` after SELECT, OFFSET FETCH, or ROWNUM in WHERE
//! - Boolean literals: true/false vs 1/0
//! - Join markers: which of `[>]`, `[<]`, `[<>]`, `[><]` the target supports
//! - Operators: LIKE wrapping, IN/NOT IN collapse, dialect-registered operators
//!
//! # Usage
//!
//! ```
//! use shorthand::{Dialect, SqlDialect};
//!
//! let dialect = Dialect::MySql;
//! assert_eq!(dialect.quote("user"), "`user`");
//! assert_eq!(dialect.quote("*"), "*");
//! ```
//!
//! # Operator dispatch
//!
//! Condition operators resolve in three steps: a handler registered in the
//! dialect's [`OperatorRegistry`], then the built-in [`Operator`] table
//! (`=`, `!`, `~`, `!~`, `<>`, `><`, `is`), then [`SqlDialect::default_operator`]
//! which renders `field TOKEN value`. SET operators resolve the same way through
//! [`SqlDialect::update_operators`].
//!
//! [`Operator`]: crate::sql::operator::Operator

mod generic;
pub mod helpers;
mod mssql;
mod mysql;
mod oracle;
mod postgres;
mod sqlite;

pub use generic::Generic;
pub use mssql::MsSql;
pub use mysql::MySql;
pub use oracle::Oracle;
pub use postgres::Postgres;
pub use sqlite::Sqlite;

use super::operator::{self, OperatorRegistry};
use super::value::Value;
use crate::error::{BuildError, BuildResult};

// =============================================================================
// Limit placement
// =============================================================================

/// Where a rendered LIMIT fragment goes in the statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Appended after the last term.
    Append,
    /// Spliced into the term list at this index (`TOP n` goes at 1, right after SELECT).
    At(usize),
    /// ANDed into the WHERE predicate, creating one if needed.
    Where,
}

/// A rendered pagination fragment and its insertion point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LimitFragment {
    pub sql: String,
    pub placement: Placement,
}

impl LimitFragment {
    pub fn append(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            placement: Placement::Append,
        }
    }

    pub fn at(sql: impl Into<String>, index: usize) -> Self {
        Self {
            sql: sql.into(),
            placement: Placement::At(index),
        }
    }

    pub fn in_where(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            placement: Placement::Where,
        }
    }
}

// =============================================================================
// SqlDialect
// =============================================================================

/// SQL dialect trait - defines how shorthand terms are rendered.
///
/// Every method has an ANSI-flavoured default except identifier quoting,
/// so a dialect only overrides what differs. Dialects are stateless; the
/// builder passes one explicitly to every render call.
pub trait SqlDialect: std::fmt::Debug + Send + Sync {
    /// Dialect name for display/logging.
    fn name(&self) -> &'static str;

    // =========================================================================
    // Identifier and Literal Quoting
    // =========================================================================

    /// Quote an identifier (table, column, alias), doubling the closing quote char.
    ///
    /// - Generic/SQLite/PostgreSQL/Oracle: `"identifier"`
    /// - MySQL: `` `identifier` ``
    /// - SQL Server: `[identifier]`
    fn quote_identifier(&self, ident: &str) -> String;

    /// Quote an identifier, passing `*` through untouched.
    fn quote(&self, ident: &str) -> String {
        if ident == "*" {
            ident.to_string()
        } else {
            self.quote_identifier(ident)
        }
    }

    /// Quote a string literal.
    ///
    /// All dialects use single quotes with `''` for escaping.
    /// Override for Unicode prefix (SQL Server N'...').
    fn quote_string(&self, s: &str) -> String {
        helpers::string_literal(s, false)
    }

    /// Format a boolean literal.
    ///
    /// - PostgreSQL: `true`/`false`
    /// - everything else: `1`/`0`
    fn format_bool(&self, b: bool) -> &'static str {
        helpers::bool_literal(b, false)
    }

    /// Format a NULL literal.
    fn format_null(&self) -> &'static str {
        "NULL"
    }

    /// Render a value for inline embedding.
    ///
    /// Nested lists and mappings have no literal form; the operator that
    /// consumes them (IN, BETWEEN, ...) expands them before calling this.
    fn value(&self, value: &Value) -> BuildResult<String> {
        match value {
            Value::Null => Ok(self.format_null().to_string()),
            Value::Bool(b) => Ok(self.format_bool(*b).to_string()),
            Value::Int(n) => Ok(n.to_string()),
            Value::Float(f) => helpers::format_float(*f),
            Value::Str(s) => Ok(self.quote_string(s)),
            Value::Raw(raw) => Ok(raw.to_string()),
            Value::Field(field) => Ok(field.to_sql(self)),
            Value::Query(query) => Ok(query.sql()),
            Value::Json(json) => Ok(self.quote_string(&json.to_string())),
            Value::List(_) | Value::Map(_) => Err(BuildError::ValueParse(format!(
                "No literal form for nested value: {:?}",
                value
            ))),
        }
    }

    // =========================================================================
    // Pagination
    // =========================================================================

    /// Render LIMIT/OFFSET or equivalent pagination.
    ///
    /// `offset` is never `Some(0)`; the LIMIT clause drops a zero offset first.
    ///
    /// - Generic/SQLite/PostgreSQL/MySQL: `LIMIT n OFFSET m` appended (default)
    /// - SQL Server: `TOP n` after SELECT, or OFFSET FETCH appended
    /// - Oracle: ROWNUM range injected into WHERE
    fn limit(&self, limit: u64, offset: Option<u64>) -> LimitFragment {
        LimitFragment::append(helpers::limit_offset_standard(limit, offset))
    }

    // =========================================================================
    // JOIN Syntax
    // =========================================================================

    /// Map a join marker (`>`, `<`, `<>`, `><`) to its keyword.
    ///
    /// `None` means the marker is unknown or unsupported by this dialect.
    fn join_keyword(&self, marker: &str) -> Option<&'static str> {
        helpers::join_keyword_standard(marker)
    }

    // =========================================================================
    // Functions
    // =========================================================================

    /// Remap a `field|func` function name to this dialect's equivalent.
    fn remap_function(&self, _name: &str) -> Option<&'static str> {
        None
    }

    // =========================================================================
    // Condition Operators
    // =========================================================================

    /// Equality (`[=]` or no operator).
    ///
    /// A one-element list collapses to its element; a list renders `IN (...)`;
    /// a subquery renders `IN (subquery)`.
    fn equals(&self, field: &str, value: &Value) -> BuildResult<String> {
        helpers::membership(self, field, value, "=", "IN")
    }

    /// Inequality (`[!]`, `[!=]`); `<>` or `NOT IN (...)`.
    fn not_equals(&self, field: &str, value: &Value) -> BuildResult<String> {
        helpers::membership(self, field, value, "<>", "NOT IN")
    }

    /// `[~]`: LIKE with `%...%` wrapping, lists ORed together.
    fn like(&self, field: &str, value: &Value) -> BuildResult<String> {
        helpers::pattern(self, field, value, "LIKE", " OR ")
    }

    /// `[!~]`: NOT LIKE with `%...%` wrapping, lists ANDed together.
    fn not_like(&self, field: &str, value: &Value) -> BuildResult<String> {
        helpers::pattern(self, field, value, "NOT LIKE", " AND ")
    }

    /// `[<>]`: BETWEEN over exactly two values.
    fn between(&self, field: &str, value: &Value) -> BuildResult<String> {
        helpers::range(self, field, value, "BETWEEN")
    }

    /// `[><]`: NOT BETWEEN over exactly two values.
    fn not_between(&self, field: &str, value: &Value) -> BuildResult<String> {
        helpers::range(self, field, value, "NOT BETWEEN")
    }

    /// `[==]`, `[is]`: only tests for NULL.
    fn is_null(&self, field: &str, value: &Value) -> BuildResult<String> {
        if !value.is_null() {
            return Err(BuildError::WhereParse(
                "IS is only used to test for NULL".into(),
            ));
        }
        Ok(format!("{} IS NULL", field))
    }

    /// Fallback for tokens with no built-in or registered handler: `field TOKEN value`.
    ///
    /// Tokens ending in ANY/ALL/SOME are uppercased and require a term (usually
    /// a subquery), which is parenthesized.
    fn default_operator(&self, token: &str, field: &str, value: &Value) -> BuildResult<String> {
        if helpers::is_quantified(token) {
            let term = helpers::term_sql(self, value).ok_or_else(|| {
                BuildError::AnyAllSomeParse(format!(
                    "Require a subquery for {} statement",
                    token.trim().to_uppercase()
                ))
            })?;
            return Ok(format!("{} {} ({})", field, token.to_uppercase(), term));
        }
        Ok(format!("{} {} {}", field, token, self.value(value)?))
    }

    /// Handlers this dialect adds on top of the built-in operator table.
    fn operators(&self) -> &OperatorRegistry {
        OperatorRegistry::empty()
    }

    // =========================================================================
    // SET Operators
    // =========================================================================

    /// Plain assignment: `field=value`.
    fn assign(&self, field: &str, value: &Value) -> BuildResult<String> {
        Ok(format!("{}={}", field, self.value(value)?))
    }

    /// Fallback for SET tokens with no registered handler: `field=field TOKEN value`.
    fn default_update(&self, token: &str, field: &str, value: &Value) -> BuildResult<String> {
        Ok(format!("{0}={0}{1}{2}", field, token, self.value(value)?))
    }

    /// Named SET handlers (`[json]` for all built-in dialects).
    fn update_operators(&self) -> &OperatorRegistry {
        operator::standard_update_operators()
    }
}

// =============================================================================
// Dialect enum
// =============================================================================

/// Supported SQL dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dialect {
    #[default]
    Generic,
    Sqlite,
    MySql,
    Postgres,
    MsSql,
    Oracle,
}

impl Dialect {
    /// Get the dialect implementation.
    pub fn dialect(&self) -> &'static dyn SqlDialect {
        match self {
            Dialect::Generic => &Generic,
            Dialect::Sqlite => &Sqlite,
            Dialect::MySql => &MySql,
            Dialect::Postgres => &Postgres,
            Dialect::MsSql => &MsSql,
            Dialect::Oracle => &Oracle,
        }
    }

    /// All built-in dialects.
    pub fn all() -> [Dialect; 6] {
        [
            Dialect::Generic,
            Dialect::Sqlite,
            Dialect::MySql,
            Dialect::Postgres,
            Dialect::MsSql,
            Dialect::Oracle,
        ]
    }

    /// Resolve a dialect by name or common alias, case-insensitively.
    pub fn from_name(name: &str) -> Option<Dialect> {
        match name.trim().to_lowercase().as_str() {
            "generic" | "ansi" => Some(Dialect::Generic),
            "sqlite" | "sqlite3" => Some(Dialect::Sqlite),
            "mysql" | "mariadb" => Some(Dialect::MySql),
            "pgsql" | "postgres" | "postgresql" => Some(Dialect::Postgres),
            "mssql" | "sqlserver" | "tsql" => Some(Dialect::MsSql),
            "oracle" => Some(Dialect::Oracle),
            _ => None,
        }
    }
}

impl std::str::FromStr for Dialect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Dialect::from_name(s).ok_or_else(|| format!("Unknown dialect: {}", s))
    }
}

// Implement SqlDialect for Dialect enum by delegating to concrete types
impl SqlDialect for Dialect {
    fn name(&self) -> &'static str {
        self.dialect().name()
    }

    fn quote_identifier(&self, ident: &str) -> String {
        self.dialect().quote_identifier(ident)
    }

    fn quote(&self, ident: &str) -> String {
        self.dialect().quote(ident)
    }

    fn quote_string(&self, s: &str) -> String {
        self.dialect().quote_string(s)
    }

    fn format_bool(&self, b: bool) -> &'static str {
        self.dialect().format_bool(b)
    }

    fn format_null(&self) -> &'static str {
        self.dialect().format_null()
    }

    fn value(&self, value: &Value) -> BuildResult<String> {
        self.dialect().value(value)
    }

    fn limit(&self, limit: u64, offset: Option<u64>) -> LimitFragment {
        self.dialect().limit(limit, offset)
    }

    fn join_keyword(&self, marker: &str) -> Option<&'static str> {
        self.dialect().join_keyword(marker)
    }

    fn remap_function(&self, name: &str) -> Option<&'static str> {
        self.dialect().remap_function(name)
    }

    fn equals(&self, field: &str, value: &Value) -> BuildResult<String> {
        self.dialect().equals(field, value)
    }

    fn not_equals(&self, field: &str, value: &Value) -> BuildResult<String> {
        self.dialect().not_equals(field, value)
    }

    fn like(&self, field: &str, value: &Value) -> BuildResult<String> {
        self.dialect().like(field, value)
    }

    fn not_like(&self, field: &str, value: &Value) -> BuildResult<String> {
        self.dialect().not_like(field, value)
    }

    fn between(&self, field: &str, value: &Value) -> BuildResult<String> {
        self.dialect().between(field, value)
    }

    fn not_between(&self, field: &str, value: &Value) -> BuildResult<String> {
        self.dialect().not_between(field, value)
    }

    fn is_null(&self, field: &str, value: &Value) -> BuildResult<String> {
        self.dialect().is_null(field, value)
    }

    fn default_operator(&self, token: &str, field: &str, value: &Value) -> BuildResult<String> {
        self.dialect().default_operator(token, field, value)
    }

    fn operators(&self) -> &OperatorRegistry {
        self.dialect().operators()
    }

    fn assign(&self, field: &str, value: &Value) -> BuildResult<String> {
        self.dialect().assign(field, value)
    }

    fn default_update(&self, token: &str, field: &str, value: &Value) -> BuildResult<String> {
        self.dialect().default_update(token, field, value)
    }

    fn update_operators(&self) -> &OperatorRegistry {
        self.dialect().update_operators()
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.dialect().name())
    }
}
