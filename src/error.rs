//! Error types for shorthand parsing and statement building.
//!
//! Every shorthand grammar owns one error kind. Errors are raised while a clause
//! is being added to a [`Builder`](crate::Builder), so no partial SQL is ever
//! produced for a failing call.

/// Result type for builder and dialect operations.
pub type BuildResult<T> = Result<T, BuildError>;

/// Errors raised while parsing shorthand or composing a statement.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    /// Malformed table reference (`schema.table(alias)`).
    #[error("Failed to parse table: {0}")]
    TableParse(String),

    /// Malformed field reference (`schema.table.field|func(alias)`).
    #[error("Failed to parse field: {0}")]
    FieldParse(String),

    /// Malformed WHERE/HAVING key or condition value.
    #[error("Failed to parse where clause: {0}")]
    WhereParse(String),

    /// Malformed SET key or assignment value.
    #[error("Failed to parse update clause: {0}")]
    UpdateParse(String),

    /// Malformed JOIN key, join marker or ON specification.
    #[error("Failed to parse join clause: {0}")]
    JoinParse(String),

    /// LIMIT given something other than one or two non-negative integers.
    #[error("Failed to parse limit: {0}")]
    LimitParse(String),

    /// Inconsistent or unsupported INSERT rows.
    #[error("Failed to parse insert clause: {0}")]
    InsertParse(String),

    /// `ANY`/`ALL`/`SOME` operator used without a subquery.
    #[error("Failed to parse any, all or some modifier: {0}")]
    AnyAllSomeParse(String),

    /// ORDER BY direction other than ASC/DESC.
    #[error("Failed to parse order by clause: {0}")]
    OrderParse(String),

    /// Value has no inline literal form.
    #[error("Failed to render value: {0}")]
    ValueParse(String),
}
