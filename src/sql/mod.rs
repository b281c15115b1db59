//! SQL generation module.
//!
//! Compiles shorthand mappings into dialect-correct SQL text:
//!
//! - [`value`] - values, keys and ordered mappings that make up the shorthand
//! - [`term`] - raw terms, tables and fields
//! - [`operator`] - condition and assignment operator dispatch
//! - [`clause`] - WHERE/HAVING, JOIN, ORDER BY, SET and LIMIT parsers
//! - [`builder`] - the statement builder
//! - [`dialect`] - SQL dialect implementations

pub mod builder;
pub mod clause;
pub mod dialect;
pub mod operator;
pub mod term;
pub mod value;

#[cfg(test)]
pub mod test_utils;

// Re-export commonly used types at the sql module level
pub use builder::{Builder, Column, Columns, InsertHead, SelectOptions, Source, Sources, SubAlias};
pub use dialect::{Dialect, LimitFragment, Placement, SqlDialect};
pub use operator::{Operator, OperatorFn, OperatorRegistry};
pub use term::{Arith, Field, FieldSelect, Raw, Table, TableFrom};
pub use value::{Key, Mapping, Value};
