//! WHERE / HAVING conditions.
//!
//! A condition mapping is a tree: keys are raw terms, `AND`/`OR` connectives
//! (optionally tagged `#comment` so duplicate connectives survive in a
//! mapping), or field shorthand `[!]field[|func][[op]] [#comment]`.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{BuildError, BuildResult};
use crate::sql::dialect::SqlDialect;
use crate::sql::operator::render_condition;
use crate::sql::term::FieldSelect;
use crate::sql::value::{Key, Mapping, Value};

/// `!schema.table.field|func[op] # comment`
static KEY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(!)?\s*([\w\s_.]+)\s*(?:\|([\w\s_.]+))?\s*(?:\[(.*?)\])?\s*(?:#.*)?$").unwrap()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Connective {
    And,
    Or,
}

impl Connective {
    /// `AND`, `or #tag`, ...; the comment never reaches the SQL.
    fn from_key(key: &str) -> Option<Self> {
        let head = key.split('#').next().unwrap_or_default().trim();
        if head.eq_ignore_ascii_case("AND") {
            Some(Connective::And)
        } else if head.eq_ignore_ascii_case("OR") {
            Some(Connective::Or)
        } else {
            None
        }
    }

    fn separator(self) -> &'static str {
        match self {
            Connective::And => " AND ",
            Connective::Or => " OR ",
        }
    }
}

/// A tree of conditions rendered as one predicate.
#[derive(Debug, Clone, Copy)]
pub struct Where<'a> {
    conditions: &'a Mapping,
}

impl<'a> Where<'a> {
    pub fn new(conditions: &'a Mapping) -> Self {
        Self { conditions }
    }

    /// Render the predicate.
    ///
    /// Top-level entries join with AND. When the whole predicate is a single
    /// parenthesized group, its outer parentheses are dropped; this happens
    /// only at the top of the tree.
    pub fn to_sql(&self, dialect: &dyn SqlDialect) -> BuildResult<String> {
        let items = self
            .conditions
            .iter()
            .map(|(key, value)| render_entry(dialect, key, value))
            .collect::<BuildResult<Vec<_>>>()?;

        if let [only] = items.as_slice() {
            if let Some(inner) = strip_group(only) {
                return Ok(inner.to_string());
            }
        }
        Ok(items.join(" AND "))
    }
}

/// The inside of `(...)` when the opening paren closes at the very end.
///
/// Parens inside quoted literals and identifiers are not counted.
fn strip_group(sql: &str) -> Option<&str> {
    let inner = sql.strip_prefix('(')?.strip_suffix(')')?;
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    for c in inner.chars() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '\'' | '"' | '`') => quote = Some(c),
            (None, '(') => depth += 1,
            (None, ')') => depth = depth.checked_sub(1)?,
            _ => {}
        }
    }
    (depth == 0 && quote.is_none()).then_some(inner)
}

fn render_entry(dialect: &dyn SqlDialect, key: &Key, value: &Value) -> BuildResult<String> {
    let name = match key {
        // The value paired with a raw key is ignored
        Key::Raw(raw) => return Ok(raw.to_string()),
        Key::Name(name) => name,
    };
    match Connective::from_key(name) {
        Some(connective) => render_group(dialect, connective, value),
        None => WhereTerm::parse(name)?.to_sql(dialect, value),
    }
}

fn render_group(
    dialect: &dyn SqlDialect,
    connective: Connective,
    value: &Value,
) -> BuildResult<String> {
    let terms = match value {
        Value::Map(mapping) => mapping
            .iter()
            .map(|(k, v)| render_entry(dialect, k, v))
            .collect::<BuildResult<Vec<_>>>()?,
        Value::List(items) => items
            .iter()
            .map(|item| {
                let (key, value) = group_item(item)?;
                render_entry(dialect, &key, &value)
            })
            .collect::<BuildResult<Vec<_>>>()?,
        other => {
            return Err(BuildError::WhereParse(format!(
                "Expect a mapping or list of conditions to be connected by {:?}: {:?}",
                connective, other
            )))
        }
    };

    match terms.as_slice() {
        [single] => Ok(single.clone()),
        _ => Ok(format!("({})", terms.join(connective.separator()))),
    }
}

/// A list item in an AND/OR group: a `(key, value)` pair, or a bare key with no value.
fn group_item(item: &Value) -> BuildResult<(Key, Value)> {
    match item {
        Value::Raw(raw) => Ok((Key::Raw(raw.clone()), Value::Null)),
        Value::Str(name) => Ok((Key::Name(name.clone()), Value::Null)),
        Value::List(pair) if pair.len() == 2 => {
            let key = match &pair[0] {
                Value::Str(name) => Key::Name(name.clone()),
                Value::Raw(raw) => Key::Raw(raw.clone()),
                other => {
                    return Err(BuildError::WhereParse(format!(
                        "Condition key must be a string or raw term: {:?}",
                        other
                    )))
                }
            };
            Ok((key, pair[1].clone()))
        }
        other => Err(BuildError::WhereParse(format!(
            "Unrecognized item in condition list: {:?}",
            other
        ))),
    }
}

/// One leaf condition: `[!]field[|func][[op]]` plus its value.
#[derive(Debug, Clone, PartialEq)]
pub struct WhereTerm {
    negated: bool,
    field: FieldSelect,
    operator: Option<String>,
}

impl WhereTerm {
    pub fn parse(key: &str) -> BuildResult<Self> {
        let caps = KEY_PATTERN.captures(key).ok_or_else(|| {
            BuildError::WhereParse(format!("Unrecognized key in where conditions: \"{}\"", key))
        })?;
        let field = FieldSelect::new(caps[2].trim(), caps.get(3).map(|m| m.as_str()), None)?;
        Ok(Self {
            negated: caps.get(1).is_some(),
            field,
            operator: caps
                .get(4)
                .map(|m| m.as_str())
                .filter(|op| !op.trim().is_empty())
                .map(str::to_string),
        })
    }

    pub fn is_negated(&self) -> bool {
        self.negated
    }

    pub fn operator(&self) -> Option<&str> {
        self.operator.as_deref()
    }

    pub fn to_sql(&self, dialect: &dyn SqlDialect, value: &Value) -> BuildResult<String> {
        let field = self.field.to_sql(dialect);
        let condition = render_condition(dialect, self.operator.as_deref(), &field, value)?;
        if self.negated {
            Ok(format!("NOT {}", condition))
        } else {
            Ok(condition)
        }
    }
}
