//! JOIN ... ON.
//!
//! Keys are `[marker]table(alias)`; values name the ON fields:
//!
//! - `"id"` or `["id", "org"]`: same-named fields on both sides, primary table on the right
//! - `{"id": "user_id"}`: join-table field on the left, primary (or fully named) field on the right

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{BuildError, BuildResult};
use crate::sql::dialect::SqlDialect;
use crate::sql::term::{Field, TableFrom};
use crate::sql::value::{Key, Mapping, Value};

/// `[marker]schema.table(alias)`
static KEY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:\[(.+?)\])?\s*((?:[\w_]+\.)?(?:[\w_]+\.)?(?:[\w_]+|\*))\s*(?:\((.+?)\))?\s*$")
        .unwrap()
});

/// The table JOIN ON fields are qualified against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Primary {
    /// A table's alias, or its bare name when unaliased.
    Named(String),
    /// A subquery in FROM without an alias; nothing to qualify with.
    UnaliasedQuery,
}

impl Primary {
    fn name(primary: Option<&Primary>) -> BuildResult<Option<&str>> {
        match primary {
            None => Ok(None),
            Some(Primary::Named(name)) => Ok(Some(name)),
            Some(Primary::UnaliasedQuery) => Err(BuildError::JoinParse(
                "Require alias for subquery to refer to its fields in JOIN ON.".into(),
            )),
        }
    }
}

/// A single `KIND JOIN table ON a=b AND ...`.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinTerm {
    marker: String,
    table: TableFrom,
    on: Vec<(Field, Field)>,
}

impl JoinTerm {
    pub fn parse(key: &str, value: &Value, primary: Option<&Primary>) -> BuildResult<Self> {
        let caps = KEY_PATTERN.captures(key).ok_or_else(|| {
            BuildError::JoinParse(format!("Unrecognized table in JOIN: \"{}\"", key))
        })?;
        let table = TableFrom::new(&caps[2], caps.get(3).map(|m| m.as_str()))?;
        let primary = Primary::name(primary)?;
        let on = on_fields(table.reference(), primary, value)?;
        Ok(Self {
            marker: caps.get(1).map_or("><", |m| m.as_str()).to_string(),
            table,
            on,
        })
    }

    pub fn table(&self) -> &TableFrom {
        &self.table
    }

    pub fn to_sql(&self, dialect: &dyn SqlDialect) -> BuildResult<String> {
        let keyword = dialect.join_keyword(&self.marker).ok_or_else(|| {
            BuildError::JoinParse(format!(
                "Unknown join type [{}] for {}",
                self.marker,
                dialect.name()
            ))
        })?;
        let on = self
            .on
            .iter()
            .map(|(left, right)| format!("{}={}", left.to_sql(dialect), right.to_sql(dialect)))
            .collect::<Vec<_>>();
        Ok(format!(
            "{} {} ON {}",
            keyword,
            self.table.to_sql(dialect),
            on.join(" AND ")
        ))
    }
}

fn on_fields(
    joined: &str,
    primary: Option<&str>,
    value: &Value,
) -> BuildResult<Vec<(Field, Field)>> {
    match value {
        Value::Str(name) => Ok(vec![same_named(joined, primary, name)?]),
        Value::List(names) => names
            .iter()
            .map(|item| match item {
                Value::Str(name) => same_named(joined, primary, name),
                other => Err(BuildError::JoinParse(format!(
                    "Expected field name in JOIN ON list: {:?}",
                    other
                ))),
            })
            .collect(),
        Value::Map(pairs) => pairs
            .iter()
            .map(|(key, right)| paired(joined, primary, key, right))
            .collect(),
        other => Err(BuildError::JoinParse(format!(
            "Unrecognized JOIN ON fields: {:?}",
            other
        ))),
    }
}

/// Short form: the same column on both sides.
fn same_named(joined: &str, primary: Option<&str>, name: &str) -> BuildResult<(Field, Field)> {
    let field = Field::parse(name)?;
    if field.table().is_some() {
        return Err(BuildError::JoinParse(format!(
            "Unexpected table specified in JOIN ON field: \"{}\"",
            name
        )));
    }
    let primary = primary.ok_or_else(|| {
        BuildError::JoinParse(
            "Short format of JOIN fields are not allowed without primary table.".into(),
        )
    })?;
    Ok((field.clone().qualified(joined), field.qualified(primary)))
}

fn paired(
    joined: &str,
    primary: Option<&str>,
    key: &Key,
    right: &Value,
) -> BuildResult<(Field, Field)> {
    let left = match key {
        Key::Name(name) => Field::parse(name)?,
        Key::Raw(raw) => {
            return Err(BuildError::JoinParse(format!(
                "Raw terms are not allowed in JOIN ON: {}",
                raw
            )))
        }
    };
    if left.table().is_some() {
        return Err(BuildError::JoinParse(format!(
            "Unexpected table on JOIN ON left field: \"{}\"",
            key
        )));
    }
    let right = match right {
        Value::Str(name) => Field::parse(name)?,
        Value::Field(field) => field.clone(),
        other => {
            return Err(BuildError::JoinParse(format!(
                "Expected field on JOIN ON right side: {:?}",
                other
            )))
        }
    };
    let right = match primary {
        Some(_) if right.table().is_some() => {
            return Err(BuildError::JoinParse(format!(
                "Unexpected table on JOIN ON right field: \"{}\"",
                right.name()
            )))
        }
        Some(primary) => right.qualified(primary),
        None => right,
    };
    Ok((left.qualified(joined), right))
}

/// Space-separated JOIN terms.
#[derive(Debug, Clone, Copy)]
pub struct Join<'a> {
    joins: &'a Mapping,
    primary: Option<&'a Primary>,
}

impl<'a> Join<'a> {
    pub fn new(joins: &'a Mapping, primary: Option<&'a Primary>) -> Self {
        Self { joins, primary }
    }

    pub fn to_sql(&self, dialect: &dyn SqlDialect) -> BuildResult<String> {
        let terms = self
            .joins
            .iter()
            .map(|(key, value)| match key {
                Key::Name(name) => JoinTerm::parse(name, value, self.primary)?.to_sql(dialect),
                Key::Raw(raw) => Err(BuildError::JoinParse(format!(
                    "Raw terms are not allowed as JOIN tables: {}",
                    raw
                ))),
            })
            .collect::<BuildResult<Vec<_>>>()?;
        Ok(terms.join(" "))
    }
}
