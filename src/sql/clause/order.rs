//! ORDER BY.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{BuildError, BuildResult};
use crate::sql::dialect::SqlDialect;
use crate::sql::term::FieldSelect;
use crate::sql::value::{Key, Mapping, Value};

/// `schema.table.field|func`
static KEY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*((?:[\w_]+\.)?(?:[\w_]+\.)?(?:[\w_]+|\*))\s*(?:\|([\w_.]+))?\s*$").unwrap()
});

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    /// `true`/null mean ASC, `false` DESC, strings are matched case-insensitively.
    pub fn from_value(value: &Value) -> BuildResult<Self> {
        match value {
            Value::Null | Value::Bool(true) => Ok(Direction::Asc),
            Value::Bool(false) => Ok(Direction::Desc),
            Value::Str(s) => match s.trim().to_uppercase().as_str() {
                "ASC" => Ok(Direction::Asc),
                "DESC" => Ok(Direction::Desc),
                _ => Err(BuildError::OrderParse(format!(
                    "Unknown sort direction: \"{}\"",
                    s
                ))),
            },
            other => Err(BuildError::OrderParse(format!(
                "Unknown sort direction: {:?}",
                other
            ))),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Asc => f.write_str("ASC"),
            Direction::Desc => f.write_str("DESC"),
        }
    }
}

/// One `field|func => direction` entry.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderTerm {
    field: FieldSelect,
    direction: Direction,
}

impl OrderTerm {
    pub fn parse(key: &str, value: &Value) -> BuildResult<Self> {
        let caps = KEY_PATTERN.captures(key).ok_or_else(|| {
            BuildError::FieldParse(format!("Unrecognized field in ORDER BY clause: \"{}\"", key))
        })?;
        Ok(Self {
            field: FieldSelect::new(&caps[1], caps.get(2).map(|m| m.as_str()), None)?,
            direction: Direction::from_value(value)?,
        })
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn to_sql(&self, dialect: &dyn SqlDialect) -> String {
        format!("{} {}", self.field.to_sql(dialect), self.direction)
    }
}

/// Comma-separated ORDER BY terms.
#[derive(Debug, Clone, Copy)]
pub struct Order<'a> {
    orders: &'a Mapping,
}

impl<'a> Order<'a> {
    pub fn new(orders: &'a Mapping) -> Self {
        Self { orders }
    }

    /// Raw keys render verbatim followed by their direction.
    pub fn to_sql(&self, dialect: &dyn SqlDialect) -> BuildResult<String> {
        let terms = self
            .orders
            .iter()
            .map(|(key, value)| match key {
                Key::Raw(raw) => Ok(format!("{} {}", raw, Direction::from_value(value)?)),
                Key::Name(name) => Ok(OrderTerm::parse(name, value)?.to_sql(dialect)),
            })
            .collect::<BuildResult<Vec<_>>>()?;
        Ok(terms.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping;
    use crate::sql::dialect::Dialect;
    use crate::sql::term::Raw;

    fn render(orders: Mapping) -> BuildResult<String> {
        Order::new(&orders).to_sql(Dialect::Generic.dialect())
    }

    #[test]
    fn test_bad_key() {
        assert!(matches!(
            render(mapping! { "@#$" => () }),
            Err(BuildError::FieldParse(_))
        ));
    }

    #[test]
    fn test_directions() {
        let orders = mapping! {
            "f1|count" => true,
            "s.t.f" => (),
            "s.t.f4" => false,
            "f2" => "asc",
            "f3" => "desc",
        };
        assert_eq!(
            render(orders).unwrap(),
            "COUNT(\"f1\") ASC,\"s\".\"t\".\"f\" ASC,\"s\".\"t\".\"f4\" DESC,\"f2\" ASC,\"f3\" DESC"
        );
    }

    #[test]
    fn test_invalid_direction() {
        assert!(matches!(
            render(mapping! { "f" => "sideways" }),
            Err(BuildError::OrderParse(_))
        ));
        assert!(matches!(
            render(mapping! { "f" => 1 }),
            Err(BuildError::OrderParse(_))
        ));
    }

    #[test]
    fn test_raw_key() {
        assert_eq!(
            render(mapping! { Raw::new("RANDOM()") => true }).unwrap(),
            "RANDOM() ASC"
        );
    }
}
