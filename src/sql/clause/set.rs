//! UPDATE ... SET.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{BuildError, BuildResult};
use crate::sql::dialect::SqlDialect;
use crate::sql::operator::render_assignment;
use crate::sql::term::Field;
use crate::sql::value::{Key, Mapping, Value};

/// `schema.table.field[op]`
static KEY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*((?:[\w_]+\.)?(?:[\w_]+\.)?(?:[\w_]+|\*))\s*(?:\[(.+?)\])?\s*$").unwrap()
});

/// One `field[op] => value` assignment.
#[derive(Debug, Clone, PartialEq)]
pub struct SetTerm {
    field: Field,
    operator: Option<String>,
}

impl SetTerm {
    pub fn parse(key: &str) -> BuildResult<Self> {
        let caps = KEY_PATTERN.captures(key).ok_or_else(|| {
            BuildError::UpdateParse(format!("Unrecognized field in UPDATE SET: \"{}\"", key))
        })?;
        Ok(Self {
            field: Field::parse(&caps[1])?,
            operator: caps.get(2).map(|m| m.as_str().to_string()),
        })
    }

    pub fn to_sql(&self, dialect: &dyn SqlDialect, value: &Value) -> BuildResult<String> {
        render_assignment(
            dialect,
            self.operator.as_deref(),
            &self.field.to_sql(dialect),
            value,
        )
    }
}

/// Comma-separated SET assignments.
#[derive(Debug, Clone, Copy)]
pub struct Set<'a> {
    sets: &'a Mapping,
}

impl<'a> Set<'a> {
    pub fn new(sets: &'a Mapping) -> Self {
        Self { sets }
    }

    pub fn to_sql(&self, dialect: &dyn SqlDialect) -> BuildResult<String> {
        let terms = self
            .sets
            .iter()
            .map(|(key, value)| match key {
                Key::Raw(raw) => Ok(format!("{}={}", raw, dialect.value(value)?)),
                Key::Name(name) => SetTerm::parse(name)?.to_sql(dialect, value),
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
    use crate::sql::term::{Arith, Raw};

    fn render(sets: Mapping) -> BuildResult<String> {
        Set::new(&sets).to_sql(Dialect::Generic.dialect())
    }

    #[test]
    fn test_plain_and_increment() {
        assert_eq!(render(mapping! { "a" => 1 }).unwrap(), "\"a\"=1");
        assert_eq!(
            render(mapping! { "a" => 1, "b[+]" => 2 }).unwrap(),
            "\"a\"=1,\"b\"=\"b\"+2"
        );
        assert_eq!(render(mapping! { "t.a[=]" => "x" }).unwrap(), "\"t\".\"a\"='x'");
    }

    #[test]
    fn test_bad_key() {
        assert!(matches!(
            render(mapping! { "@#" => () }),
            Err(BuildError::UpdateParse(_))
        ));
    }

    #[test]
    fn test_json_and_computed_values() {
        let d = Dialect::Generic;
        let bumped = Field::parse("hits").unwrap().compute(&d, Arith::Mul, 2).unwrap();
        assert_eq!(
            render(mapping! { "hits" => bumped, "meta[json]" => vec![1, 2] }).unwrap(),
            "\"hits\"=\"hits\"*2,\"meta\"='[1,2]'"
        );
    }

    #[test]
    fn test_raw_key() {
        assert_eq!(
            render(mapping! { Raw::new("counter") => 0 }).unwrap(),
            "counter=0"
        );
    }
}
