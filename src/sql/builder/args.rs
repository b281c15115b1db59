//! Argument types accepted by the statement and clause methods.
//!
//! Each accepts the loose forms the shorthand allows: comma-separated
//! strings, lists, raw terms and subqueries.

use super::Builder;
use crate::error::{BuildError, BuildResult};
use crate::sql::term::{Field, Raw};
use crate::sql::value::{Mapping, Value};

fn split_names(s: &str) -> Vec<String> {
    s.split(',').map(|part| part.trim().to_string()).collect()
}

// =============================================================================
// Columns
// =============================================================================

/// A column in SELECT, GROUP BY or an INSERT field list.
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    /// Shorthand such as `t.f|count(n)`.
    Name(String),
    Raw(Raw),
    Field(Field),
}

impl From<&str> for Column {
    fn from(s: &str) -> Self {
        Column::Name(s.trim().to_string())
    }
}

impl From<String> for Column {
    fn from(s: String) -> Self {
        Column::from(s.as_str())
    }
}

impl From<Raw> for Column {
    fn from(raw: Raw) -> Self {
        Column::Raw(raw)
    }
}

impl From<Field> for Column {
    fn from(field: Field) -> Self {
        Column::Field(field)
    }
}

/// An ordered column list. `"a, b"` and `["a", "b"]` are equivalent.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Columns(Vec<Column>);

impl Columns {
    pub fn new(columns: Vec<Column>) -> Self {
        Columns(columns)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Column> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Read columns out of a value: a name string, raw term, field, or a list of those.
    pub fn from_value(value: &Value) -> BuildResult<Self> {
        let one = |v: &Value| -> BuildResult<Vec<Column>> {
            match v {
                Value::Str(s) => Ok(split_names(s).into_iter().map(Column::Name).collect()),
                Value::Raw(raw) => Ok(vec![Column::Raw(raw.clone())]),
                Value::Field(field) => Ok(vec![Column::Field(field.clone())]),
                other => Err(BuildError::FieldParse(format!(
                    "Unrecognized column: {:?}",
                    other
                ))),
            }
        };
        match value {
            Value::List(items) => {
                let mut columns = Vec::with_capacity(items.len());
                for item in items {
                    columns.extend(one(item)?);
                }
                Ok(Columns(columns))
            }
            other => Ok(Columns(one(other)?)),
        }
    }
}

impl From<&str> for Columns {
    fn from(s: &str) -> Self {
        Columns(split_names(s).into_iter().map(Column::Name).collect())
    }
}

impl From<String> for Columns {
    fn from(s: String) -> Self {
        Columns::from(s.as_str())
    }
}

impl From<Vec<&str>> for Columns {
    fn from(names: Vec<&str>) -> Self {
        Columns(names.into_iter().map(Column::from).collect())
    }
}

impl From<Vec<String>> for Columns {
    fn from(names: Vec<String>) -> Self {
        Columns(names.into_iter().map(Column::from).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Columns {
    fn from(names: [&str; N]) -> Self {
        Columns(names.into_iter().map(Column::from).collect())
    }
}

impl From<Vec<Column>> for Columns {
    fn from(columns: Vec<Column>) -> Self {
        Columns(columns)
    }
}

impl From<Column> for Columns {
    fn from(column: Column) -> Self {
        Columns(vec![column])
    }
}

impl From<Raw> for Columns {
    fn from(raw: Raw) -> Self {
        Columns(vec![Column::Raw(raw)])
    }
}

impl From<Field> for Columns {
    fn from(field: Field) -> Self {
        Columns(vec![Column::Field(field)])
    }
}

// =============================================================================
// Sources
// =============================================================================

/// One FROM source.
#[derive(Debug, Clone, PartialEq)]
pub enum Source {
    /// `schema.table(alias)`
    Table(String),
    Raw(Raw),
    Query(Box<Builder>),
}

impl From<&str> for Source {
    fn from(s: &str) -> Self {
        Source::Table(s.trim().to_string())
    }
}

impl From<String> for Source {
    fn from(s: String) -> Self {
        Source::from(s.as_str())
    }
}

impl From<Raw> for Source {
    fn from(raw: Raw) -> Self {
        Source::Raw(raw)
    }
}

impl From<Builder> for Source {
    fn from(query: Builder) -> Self {
        Source::Query(Box::new(query))
    }
}

/// Ordered FROM sources; the first one is the primary table for JOINs.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Sources(Vec<Source>);

impl Sources {
    pub fn iter(&self) -> impl Iterator<Item = &Source> {
        self.0.iter()
    }

    pub fn first(&self) -> Option<&Source> {
        self.0.first()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for Sources {
    fn from(s: &str) -> Self {
        Sources(split_names(s).into_iter().map(Source::Table).collect())
    }
}

impl From<String> for Sources {
    fn from(s: String) -> Self {
        Sources::from(s.as_str())
    }
}

impl From<Vec<&str>> for Sources {
    fn from(names: Vec<&str>) -> Self {
        Sources(names.into_iter().map(Source::from).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Sources {
    fn from(names: [&str; N]) -> Self {
        Sources(names.into_iter().map(Source::from).collect())
    }
}

impl From<Vec<Source>> for Sources {
    fn from(sources: Vec<Source>) -> Self {
        Sources(sources)
    }
}

impl From<Source> for Sources {
    fn from(source: Source) -> Self {
        Sources(vec![source])
    }
}

impl From<Raw> for Sources {
    fn from(raw: Raw) -> Self {
        Sources(vec![Source::Raw(raw)])
    }
}

impl From<Builder> for Sources {
    fn from(query: Builder) -> Self {
        Sources(vec![Source::from(query)])
    }
}

// =============================================================================
// Subquery alias
// =============================================================================

/// How a builder wraps itself when rendered as a subquery.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubAlias {
    /// Rendered as is.
    #[default]
    Unset,
    /// `(...)`
    Bare,
    /// `(...) AS "alias"`
    Named(String),
}

impl SubAlias {
    pub fn is_set(&self) -> bool {
        !matches!(self, SubAlias::Unset)
    }
}

impl From<Option<&str>> for SubAlias {
    fn from(alias: Option<&str>) -> Self {
        match alias {
            Some(name) if !name.is_empty() => SubAlias::Named(name.to_string()),
            _ => SubAlias::Bare,
        }
    }
}

impl From<&str> for SubAlias {
    fn from(alias: &str) -> Self {
        SubAlias::from(Some(alias))
    }
}

// =============================================================================
// SELECT options
// =============================================================================

/// Optional parts of [`Builder::select_with`].
#[derive(Debug, Clone, Default)]
pub struct SelectOptions {
    pub join: Option<Mapping>,
    pub distinct: bool,
    /// `SELECT ... INTO table`
    pub into: Option<String>,
    pub sub: Option<SubAlias>,
}

impl SelectOptions {
    pub fn join(mut self, joins: Mapping) -> Self {
        self.join = Some(joins);
        self
    }

    pub fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    pub fn into_table(mut self, table: impl Into<String>) -> Self {
        self.into = Some(table.into());
        self
    }

    pub fn sub(mut self, alias: impl Into<SubAlias>) -> Self {
        self.sub = Some(alias.into());
        self
    }
}

// =============================================================================
// INSERT head
// =============================================================================

/// The first argument of [`Builder::insert`].
#[derive(Debug, Clone, PartialEq)]
pub enum InsertHead {
    /// Explicit field list.
    Fields(Columns),
    /// First positional row, no field list.
    Row(Vec<Value>),
    /// A record: its keys are the fields, its values the first row.
    Record(Mapping),
}

impl From<&str> for InsertHead {
    fn from(fields: &str) -> Self {
        InsertHead::Fields(Columns::from(fields))
    }
}

impl From<Vec<&str>> for InsertHead {
    fn from(fields: Vec<&str>) -> Self {
        InsertHead::Fields(Columns::from(fields))
    }
}

impl<const N: usize> From<[&str; N]> for InsertHead {
    fn from(fields: [&str; N]) -> Self {
        InsertHead::Fields(Columns::from(fields))
    }
}

impl From<Columns> for InsertHead {
    fn from(fields: Columns) -> Self {
        InsertHead::Fields(fields)
    }
}

impl From<Vec<Value>> for InsertHead {
    fn from(row: Vec<Value>) -> Self {
        InsertHead::Row(row)
    }
}

impl From<Mapping> for InsertHead {
    fn from(record: Mapping) -> Self {
        InsertHead::Record(record)
    }
}
