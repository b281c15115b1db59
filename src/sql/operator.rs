//! Operator resolution for WHERE conditions and SET assignments.
//!
//! Shorthand keys carry a bracketed token (`age[>]`, `name[~]`, `count[+]`).
//! A token resolves through the dialect's registry first, then the closed
//! [`Operator`] table, then the dialect's default renderer.

use std::sync::LazyLock;

use super::dialect::SqlDialect;
use super::value::Value;
use crate::error::BuildResult;

/// Handler for a registered operator: `(dialect, rendered field, value) -> sql`.
pub type OperatorFn = fn(&dyn SqlDialect, &str, &Value) -> BuildResult<String>;

// =============================================================================
// Built-in condition operators
// =============================================================================

/// Condition operators every dialect understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Eq,
    Ne,
    Like,
    NotLike,
    Between,
    NotBetween,
    IsNull,
}

impl Operator {
    /// Look up a shorthand token.
    pub fn from_token(token: &str) -> Option<Operator> {
        match token {
            "=" => Some(Operator::Eq),
            "!" | "!=" => Some(Operator::Ne),
            "~" => Some(Operator::Like),
            "!~" => Some(Operator::NotLike),
            "<>" => Some(Operator::Between),
            "><" => Some(Operator::NotBetween),
            "==" => Some(Operator::IsNull),
            t if t.eq_ignore_ascii_case("is") => Some(Operator::IsNull),
            _ => None,
        }
    }

    /// Render through the dialect's method for this operator.
    pub fn render(self, dialect: &dyn SqlDialect, field: &str, value: &Value) -> BuildResult<String> {
        match self {
            Operator::Eq => dialect.equals(field, value),
            Operator::Ne => dialect.not_equals(field, value),
            Operator::Like => dialect.like(field, value),
            Operator::NotLike => dialect.not_like(field, value),
            Operator::Between => dialect.between(field, value),
            Operator::NotBetween => dialect.not_between(field, value),
            Operator::IsNull => dialect.is_null(field, value),
        }
    }
}

// =============================================================================
// Registry
// =============================================================================

/// Named operator handlers a dialect adds without touching the dispatcher.
///
/// Names match case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct OperatorRegistry {
    handlers: Vec<(String, OperatorFn)>,
}

static EMPTY: LazyLock<OperatorRegistry> = LazyLock::new(OperatorRegistry::new);

static STANDARD_UPDATES: LazyLock<OperatorRegistry> =
    LazyLock::new(|| OperatorRegistry::new().with("json", json_assign));

impl OperatorRegistry {
    pub fn new() -> Self {
        Self { handlers: vec![] }
    }

    /// Shared registry with no handlers.
    pub fn empty() -> &'static OperatorRegistry {
        &EMPTY
    }

    /// Register a handler, replacing any existing one with the same name.
    pub fn register(&mut self, name: &str, handler: OperatorFn) {
        let key = name.trim().to_lowercase();
        match self.handlers.iter_mut().find(|(n, _)| *n == key) {
            Some(entry) => entry.1 = handler,
            None => self.handlers.push((key, handler)),
        }
    }

    /// Builder-style [`register`](Self::register).
    pub fn with(mut self, name: &str, handler: OperatorFn) -> Self {
        self.register(name, handler);
        self
    }

    pub fn get(&self, name: &str) -> Option<OperatorFn> {
        let key = name.trim().to_lowercase();
        self.handlers
            .iter()
            .find(|(n, _)| *n == key)
            .map(|(_, handler)| *handler)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.handlers.iter().map(|(n, _)| n.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

/// SET handlers shared by all built-in dialects.
pub fn standard_update_operators() -> &'static OperatorRegistry {
    &STANDARD_UPDATES
}

/// `data[json] => {...}`: serialize the value and store it as a string literal.
fn json_assign(dialect: &dyn SqlDialect, field: &str, value: &Value) -> BuildResult<String> {
    let json = value.to_json()?;
    Ok(format!("{}={}", field, dialect.quote_string(&json.to_string())))
}

// =============================================================================
// Dispatch
// =============================================================================

/// Render a WHERE condition. A missing or empty token means `=`.
pub fn render_condition(
    dialect: &dyn SqlDialect,
    token: Option<&str>,
    field: &str,
    value: &Value,
) -> BuildResult<String> {
    let token = token.filter(|t| !t.trim().is_empty()).unwrap_or("=");
    if let Some(handler) = dialect.operators().get(token) {
        return handler(dialect, field, value);
    }
    match Operator::from_token(token) {
        Some(op) => op.render(dialect, field, value),
        None => dialect.default_operator(token, field, value),
    }
}

/// Render a SET assignment. A missing token or `=` is plain assignment.
pub fn render_assignment(
    dialect: &dyn SqlDialect,
    token: Option<&str>,
    field: &str,
    value: &Value,
) -> BuildResult<String> {
    match token {
        None | Some("=") => dialect.assign(field, value),
        Some(token) => match dialect.update_operators().get(token) {
            Some(handler) => handler(dialect, field, value),
            None => dialect.default_update(token, field, value),
        },
    }
}
