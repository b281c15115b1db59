//! Values and ordered mappings - the data side of the shorthand DSL.
//!
//! A shorthand query is a set of ordered `key => value` pairs. Keys are
//! shorthand strings (`"user_id[>]"`, `"OR #tag"`, `"[>]account(a)"`) or raw
//! terms; values are literals, nested mappings, lists, raw terms, field
//! references or subqueries.

use super::builder::Builder;
use super::term::{Field, Raw};
use crate::error::{BuildError, BuildResult};

// =============================================================================
// Value
// =============================================================================

/// Right-hand side of a shorthand entry.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    /// Tuple or list of values.
    List(Vec<Value>),
    /// Nested mapping (AND/OR groups, JOIN ON pairs, INSERT records).
    Map(Mapping),
    /// Verbatim SQL, never quoted or escaped.
    Raw(Raw),
    /// Field reference used as a value (`"a.x[<]" => Field::parse("b.y")`).
    Field(Field),
    /// Subquery.
    Query(Box<Builder>),
    Json(serde_json::Value),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Whether this value is a term (raw text, field or subquery) rather than a literal.
    pub fn is_term(&self) -> bool {
        matches!(self, Value::Raw(_) | Value::Field(_) | Value::Query(_))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Truthiness of a pseudo-key value in `select`: empty and zero values are absent.
    pub(crate) fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Int(n) => *n != 0,
            Value::Float(f) => *f != 0.0,
            Value::Str(s) => !s.is_empty(),
            Value::List(items) => !items.is_empty(),
            Value::Map(m) => !m.is_empty(),
            Value::Raw(_) | Value::Field(_) | Value::Query(_) => true,
            Value::Json(j) => !j.is_null(),
        }
    }

    /// A single-element list collapses to its element.
    pub(crate) fn collapse_singleton(&self) -> &Value {
        match self {
            Value::List(items) if items.len() == 1 => &items[0],
            other => other,
        }
    }

    /// Convert to a JSON document for the `json` SET operator.
    pub fn to_json(&self) -> BuildResult<serde_json::Value> {
        use serde_json::Value as J;
        Ok(match self {
            Value::Null => J::Null,
            Value::Bool(b) => J::Bool(*b),
            Value::Int(n) => J::from(*n),
            Value::Float(f) => serde_json::Number::from_f64(*f)
                .map(J::Number)
                .ok_or_else(|| BuildError::ValueParse(format!("Cannot encode {} as JSON", f)))?,
            Value::Str(s) => J::String(s.clone()),
            Value::List(items) => J::Array(
                items
                    .iter()
                    .map(Value::to_json)
                    .collect::<BuildResult<Vec<_>>>()?,
            ),
            Value::Map(mapping) => {
                let mut object = serde_json::Map::new();
                for (key, value) in mapping.iter() {
                    object.insert(key.to_string(), value.to_json()?);
                }
                J::Object(object)
            }
            Value::Raw(raw) => J::String(raw.to_string()),
            Value::Json(json) => json.clone(),
            Value::Field(_) | Value::Query(_) => {
                return Err(BuildError::ValueParse(
                    "Fields and subqueries cannot be encoded as JSON".into(),
                ))
            }
        })
    }
}

macro_rules! value_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(n: $t) -> Self {
                    Value::Int(n as i64)
                }
            }
        )*
    };
}

value_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for Value {
    fn from(f: f32) -> Self {
        Value::Float(f as f64)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Null
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>, const N: usize> From<[T; N]> for Value {
    fn from(items: [T; N]) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl<A: Into<Value>, B: Into<Value>> From<(A, B)> for Value {
    fn from((a, b): (A, B)) -> Self {
        Value::List(vec![a.into(), b.into()])
    }
}

impl From<Raw> for Value {
    fn from(raw: Raw) -> Self {
        Value::Raw(raw)
    }
}

impl From<Field> for Value {
    fn from(field: Field) -> Self {
        Value::Field(field)
    }
}

impl From<Builder> for Value {
    fn from(builder: Builder) -> Self {
        Value::Query(Box::new(builder))
    }
}

impl From<Mapping> for Value {
    fn from(mapping: Mapping) -> Self {
        Value::Map(mapping)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        Value::Json(json)
    }
}

// =============================================================================
// Key
// =============================================================================

/// Key of a shorthand entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    /// Shorthand string, parsed by the clause that consumes it.
    Name(String),
    /// Verbatim term; the paired value is ignored in conditions.
    Raw(Raw),
}

impl Key {
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Key::Name(name) => Some(name),
            Key::Raw(_) => None,
        }
    }
}

impl std::fmt::Display for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Key::Name(name) => f.write_str(name),
            Key::Raw(raw) => write!(f, "{}", raw),
        }
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key::Name(s.to_string())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Key::Name(s)
    }
}

impl From<Raw> for Key {
    fn from(raw: Raw) -> Self {
        Key::Raw(raw)
    }
}

// =============================================================================
// Mapping
// =============================================================================

/// Insertion-ordered mapping with dictionary semantics.
///
/// Inserting a key that is already present replaces its value in place, which
/// is why duplicate `AND`/`OR` groups need a `#comment` suffix to stay distinct.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Mapping {
    entries: Vec<(Key, Value)>,
}

impl Mapping {
    pub fn new() -> Self {
        Self { entries: vec![] }
    }

    /// Insert or replace an entry.
    pub fn insert(&mut self, key: impl Into<Key>, value: impl Into<Value>) -> &mut Self {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
        self
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<Key>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(k, _)| k.as_name() == Some(name))
            .map(|(_, v)| v)
    }

    /// Remove a named entry, returning its value.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        let index = self
            .entries
            .iter()
            .position(|(k, _)| k.as_name() == Some(name))?;
        Some(self.entries.remove(index).1)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Key, &Value)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &Key> {
        self.entries.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().map(|(_, v)| v)
    }
}

impl<K: Into<Key>, V: Into<Value>> FromIterator<(K, V)> for Mapping {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut mapping = Mapping::new();
        for (k, v) in iter {
            mapping.insert(k, v);
        }
        mapping
    }
}

impl IntoIterator for Mapping {
    type Item = (Key, Value);
    type IntoIter = std::vec::IntoIter<(Key, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Build a [`Mapping`] from `key => value` pairs, preserving order.
///
/// ```
/// use shorthand::{mapping, Mapping};
///
/// let conditions: Mapping = mapping! {
///     "user_id[>]" => 200,
///     "OR #contact" => mapping! { "email" => "foo@bar.com", "phone" => "555" },
/// };
/// assert_eq!(conditions.len(), 2);
/// ```
#[macro_export]
macro_rules! mapping {
    () => {
        $crate::Mapping::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut mapping = $crate::Mapping::new();
        $( mapping.insert($key, $value); )+
        mapping
    }};
}
