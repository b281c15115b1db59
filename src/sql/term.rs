//! Atomic renderable terms: raw text, tables and fields.
//!
//! Terms are immutable once parsed. Rendering takes the dialect explicitly,
//! so the same term renders differently under MySQL and SQL Server.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use super::dialect::SqlDialect;
use super::value::Value;
use crate::error::{BuildError, BuildResult};

/// `schema.table(alias)`
static FROM_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*((?:[\w_]+\.)?(?:[\w_]+|\*))\s*(?:\(([\w_]+)\))?\s*$").unwrap()
});

/// `schema.table.field|.func(alias)`
static SELECT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^\s*((?:[\w_]+\.)?(?:[\w_]+\.)?(?:[\w_]+|\*))\s*(?:\|\s*(\.?[\w_]+))?\s*(?:\(([\w_]+)\))?\s*$",
    )
    .unwrap()
});

// =============================================================================
// Raw
// =============================================================================

/// Verbatim SQL text. Never quoted or escaped.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Raw(String);

impl Raw {
    pub fn new(sql: impl Into<String>) -> Self {
        Raw(sql.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Raw {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Raw {
    fn from(s: &str) -> Self {
        Raw::new(s)
    }
}

impl From<String> for Raw {
    fn from(s: String) -> Self {
        Raw(s)
    }
}

// =============================================================================
// Table
// =============================================================================

/// `table` or `schema.table`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Table {
    schema: Option<String>,
    name: String,
}

impl Table {
    /// Build from a possibly dotted name plus an optional explicit schema.
    ///
    /// Giving the schema both ways, or more than two parts, is an error.
    pub fn new(table: &str, schema: Option<&str>) -> BuildResult<Self> {
        let parts: Vec<&str> = table.split('.').collect();
        match parts.as_slice() {
            [name] => Ok(Self {
                schema: schema.map(str::to_string),
                name: name.to_string(),
            }),
            [_, _] if schema.is_some() => Err(BuildError::TableParse(format!(
                "Confusing schema specified in both \"{}\" and schema argument",
                table
            ))),
            [s, name] => Ok(Self {
                schema: Some(s.to_string()),
                name: name.to_string(),
            }),
            _ => Err(BuildError::TableParse(format!(
                "Additional parts in table \"{}\"",
                table
            ))),
        }
    }

    pub fn parse(table: &str) -> BuildResult<Self> {
        Self::new(table, None)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn schema(&self) -> Option<&str> {
        self.schema.as_deref()
    }

    pub fn to_sql<D: SqlDialect + ?Sized>(&self, dialect: &D) -> String {
        match &self.schema {
            Some(schema) => format!("{}.{}", dialect.quote(schema), dialect.quote(&self.name)),
            None => dialect.quote(&self.name),
        }
    }
}

/// A table in a FROM or JOIN position, with an optional alias.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableFrom {
    table: Table,
    alias: Option<String>,
}

impl TableFrom {
    pub fn new(table: &str, alias: Option<&str>) -> BuildResult<Self> {
        Ok(Self {
            table: Table::parse(table)?,
            alias: alias.map(str::to_string),
        })
    }

    /// Parse `schema.table(alias)`.
    pub fn parse(source: &str) -> BuildResult<Self> {
        let caps = FROM_PATTERN.captures(source).ok_or_else(|| {
            BuildError::TableParse(format!("Unrecognized table string: \"{}\"", source))
        })?;
        Self::new(&caps[1], caps.get(2).map(|m| m.as_str()))
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    /// Name other clauses use to qualify this table's columns.
    pub fn reference(&self) -> &str {
        self.alias.as_deref().unwrap_or(self.table.name())
    }

    pub fn to_sql<D: SqlDialect + ?Sized>(&self, dialect: &D) -> String {
        match &self.alias {
            Some(alias) => format!("{} AS {}", self.table.to_sql(dialect), dialect.quote(alias)),
            None => self.table.to_sql(dialect),
        }
    }
}

// =============================================================================
// Field
// =============================================================================

/// Arithmetic applied to a field in a value position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arith {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
}

impl Arith {
    pub fn symbol(self) -> &'static str {
        match self {
            Arith::Add => "+",
            Arith::Sub => "-",
            Arith::Mul => "*",
            Arith::Div => "/",
            Arith::Mod => "%",
        }
    }
}

/// `field`, `table.field` or `schema.table.field`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Field {
    schema: Option<String>,
    table: Option<String>,
    name: String,
}

impl Field {
    /// Build from a possibly dotted path plus optional explicit table and schema.
    ///
    /// A qualifier may come from the path or the arguments, never both.
    pub fn new(field: &str, table: Option<&str>, schema: Option<&str>) -> BuildResult<Self> {
        let parts: Vec<&str> = field.split('.').collect();
        let owned = |s: Option<&str>| s.map(str::to_string);
        match parts.as_slice() {
            [name] => Ok(Self {
                schema: owned(schema),
                table: owned(table),
                name: name.to_string(),
            }),
            [_, _] if table.is_some() => Err(BuildError::FieldParse(format!(
                "Confusing table specified in both \"{}\" and table argument",
                field
            ))),
            [t, name] => Ok(Self {
                schema: owned(schema),
                table: Some(t.to_string()),
                name: name.to_string(),
            }),
            [_, _, _] if table.is_some() || schema.is_some() => {
                Err(BuildError::FieldParse(format!(
                    "Confusing table/schema specified in both \"{}\" and arguments",
                    field
                )))
            }
            [s, t, name] => Ok(Self {
                schema: Some(s.to_string()),
                table: Some(t.to_string()),
                name: name.to_string(),
            }),
            _ => Err(BuildError::FieldParse(format!(
                "Additional parts in field \"{}\"",
                field
            ))),
        }
    }

    pub fn parse(field: &str) -> BuildResult<Self> {
        Self::new(field, None, None)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn table(&self) -> Option<&str> {
        self.table.as_deref()
    }

    pub fn schema(&self) -> Option<&str> {
        self.schema.as_deref()
    }

    /// Qualify with a table, replacing any existing one.
    pub(crate) fn qualified(mut self, table: &str) -> Self {
        self.table = Some(table.to_string());
        self
    }

    pub fn to_sql<D: SqlDialect + ?Sized>(&self, dialect: &D) -> String {
        let mut parts = Vec::with_capacity(3);
        if let Some(schema) = &self.schema {
            parts.push(dialect.quote(schema));
        }
        if let Some(table) = &self.table {
            parts.push(dialect.quote(table));
        }
        parts.push(dialect.quote(&self.name));
        parts.join(".")
    }

    /// Arithmetic on this field as a raw term: `"f"+1`.
    pub fn compute<D: SqlDialect + ?Sized>(
        &self,
        dialect: &D,
        op: Arith,
        value: impl Into<Value>,
    ) -> BuildResult<Raw> {
        Ok(Raw(format!(
            "{}{}{}",
            self.to_sql(dialect),
            op.symbol(),
            dialect.value(&value.into())?
        )))
    }
}

/// A field in SELECT position: optional function wrapper, DISTINCT and alias.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldSelect {
    field: Field,
    func: Option<String>,
    distinct: bool,
    alias: Option<String>,
}

impl FieldSelect {
    /// `func` with a leading `.` means DISTINCT.
    pub fn new(field: &str, func: Option<&str>, alias: Option<&str>) -> BuildResult<Self> {
        let func = func.map(str::trim).filter(|f| !f.is_empty());
        let (func, distinct) = match func {
            Some(f) => match f.strip_prefix('.') {
                Some(rest) => (Some(rest.to_string()), true),
                None => (Some(f.to_string()), false),
            },
            None => (None, false),
        };
        Ok(Self {
            field: Field::parse(field.trim())?,
            func,
            distinct,
            alias: alias.map(str::to_string),
        })
    }

    /// Parse `schema.table.field|.func(alias)`.
    pub fn parse(source: &str) -> BuildResult<Self> {
        let caps = SELECT_PATTERN.captures(source).ok_or_else(|| {
            BuildError::FieldParse(format!("Unrecognized field string: \"{}\"", source))
        })?;
        Self::new(
            &caps[1],
            caps.get(2).map(|m| m.as_str()),
            caps.get(3).map(|m| m.as_str()),
        )
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn func(&self) -> Option<&str> {
        self.func.as_deref()
    }

    pub fn is_distinct(&self) -> bool {
        self.distinct
    }

    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    pub fn to_sql<D: SqlDialect + ?Sized>(&self, dialect: &D) -> String {
        let mut sql = self.field.to_sql(dialect);
        if let Some(func) = &self.func {
            let name = match dialect.remap_function(func) {
                Some(remapped) => remapped.to_uppercase(),
                None => func.to_uppercase(),
            };
            let distinct = if self.distinct { "DISTINCT " } else { "" };
            sql = format!("{}({}{})", name, distinct, sql);
        }
        if let Some(alias) = &self.alias {
            sql.push_str(" AS ");
            sql.push_str(&dialect.quote(alias));
        }
        sql
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::dialect::Dialect;

    const D: Dialect = Dialect::Generic;

    #[test]
    fn test_raw() {
        assert_eq!(Raw::new("s").to_string(), "s");
        assert_eq!(Raw::from("COUNT(*)").as_str(), "COUNT(*)");
    }

    #[test]
    fn test_table_new() {
        let t = Table::new("t", None).unwrap();
        assert_eq!((t.name(), t.schema()), ("t", None));
        let t = Table::new("s.t", None).unwrap();
        assert_eq!((t.name(), t.schema()), ("t", Some("s")));
        assert!(matches!(
            Table::new("s.t", Some("s2")),
            Err(BuildError::TableParse(_))
        ));
        assert!(matches!(
            Table::new("s.t.x", None),
            Err(BuildError::TableParse(_))
        ));
    }

    #[test]
    fn test_table_render_and_equality() {
        assert_eq!(Table::parse("s.t").unwrap().to_sql(&D), "\"s\".\"t\"");
        assert_eq!(Table::parse("t").unwrap().to_sql(&D), "\"t\"");
        assert_eq!(Table::parse("s.t").unwrap(), Table::new("t", Some("s")).unwrap());
        assert_ne!(Table::parse("s.t").unwrap(), Table::parse("t").unwrap());
    }

    #[test]
    fn test_table_from() {
        let render = |s: &str| TableFrom::parse(s).map(|t| t.to_sql(&D));
        assert_eq!(render("s.t(t1)").unwrap(), "\"s\".\"t\" AS \"t1\"");
        assert_eq!(render("t(t1)").unwrap(), "\"t\" AS \"t1\"");
        assert_eq!(render(" t ").unwrap(), "\"t\"");
        assert!(matches!(render("[]t"), Err(BuildError::TableParse(_))));
        assert_eq!(TableFrom::parse("t(t1)").unwrap().reference(), "t1");
        assert_eq!(TableFrom::parse("s.t").unwrap().reference(), "t");
    }

    #[test]
    fn test_field_new() {
        let f = Field::new("f", Some("t"), Some("s")).unwrap();
        assert_eq!((f.name(), f.table(), f.schema()), ("f", Some("t"), Some("s")));
        let f = Field::parse("s.t.f").unwrap();
        assert_eq!((f.name(), f.table(), f.schema()), ("f", Some("t"), Some("s")));
        let f = Field::new("t.f", None, Some("s")).unwrap();
        assert_eq!((f.name(), f.table(), f.schema()), ("f", Some("t"), Some("s")));
        assert!(matches!(
            Field::new("t.f", Some("t"), None),
            Err(BuildError::FieldParse(_))
        ));
        assert!(matches!(
            Field::new("s.t.f", None, Some("s")),
            Err(BuildError::FieldParse(_))
        ));
        assert!(matches!(
            Field::parse("s.t.f.f1"),
            Err(BuildError::FieldParse(_))
        ));
    }

    #[test]
    fn test_field_render() {
        assert_eq!(Field::parse("s.t.f").unwrap().to_sql(&D), "\"s\".\"t\".\"f\"");
        assert_eq!(Field::parse("t.*").unwrap().to_sql(&D), "\"t\".*");
        assert_eq!(Field::parse("t.f").unwrap().to_sql(&Dialect::MsSql), "[t].[f]");
    }

    #[test]
    fn test_field_compute() {
        let f = Field::parse("f").unwrap();
        assert_eq!(f.compute(&D, Arith::Add, 1).unwrap().as_str(), "\"f\"+1");
        assert_eq!(f.compute(&D, Arith::Sub, 1).unwrap().as_str(), "\"f\"-1");
        assert_eq!(f.compute(&D, Arith::Mul, 1).unwrap().as_str(), "\"f\"*1");
        assert_eq!(f.compute(&D, Arith::Div, 1).unwrap().as_str(), "\"f\"/1");
        assert_eq!(f.compute(&D, Arith::Mod, 1).unwrap().as_str(), "\"f\"%1");
    }

    #[test]
    fn test_field_select_parse() {
        let render = |s: &str| FieldSelect::parse(s).map(|f| f.to_sql(&D));
        assert_eq!(render("s.t.f").unwrap(), "\"s\".\"t\".\"f\"");
        assert_eq!(render("s.t.f|count(f1)").unwrap(), "COUNT(\"s\".\"t\".\"f\") AS \"f1\"");
        assert_eq!(
            render("s.t.f|.count(f1)").unwrap(),
            "COUNT(DISTINCT \"s\".\"t\".\"f\") AS \"f1\""
        );
        assert_eq!(render("f2(f2a)").unwrap(), "\"f2\" AS \"f2a\"");
        assert_eq!(render("*").unwrap(), "*");
        assert!(matches!(render("s.t.f|c.ount(f1)"), Err(BuildError::FieldParse(_))));
        assert!(matches!(render("a b"), Err(BuildError::FieldParse(_))));
    }

    #[test]
    fn test_field_select_remaps_function() {
        let f = FieldSelect::parse("name|length(len)").unwrap();
        assert_eq!(f.to_sql(&Dialect::MsSql), "LEN([name]) AS [len]");
        assert_eq!(f.to_sql(&Dialect::Postgres), "LENGTH(\"name\") AS \"len\"");
    }
}
