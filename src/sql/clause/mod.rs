//! Clause parsers: shorthand mappings to SQL fragments.
//!
//! Each clause owns one small regular grammar for its keys and raises its own
//! error kind on a mismatch:
//!
//! | Clause | Key grammar | Error |
//! |--------|-------------|-------|
//! | [`Where`] | `!field\|func[op] #comment`, `AND #tag`, `OR #tag` | `WhereParse` |
//! | [`Order`] | `field\|func` | `FieldParse` / `OrderParse` |
//! | [`Set`] | `field[op]` | `UpdateParse` |
//! | [`Join`] | `[marker]table(alias)` | `JoinParse` |
//! | [`Limit`] | `n` or `(n, offset)` | `LimitParse` |
//!
//! The grammars differ (a join key has a leading marker, a where
//! key a trailing operator), so each parser keeps its own pattern.

mod condition;
mod join;
mod limit;
mod order;
mod set;

pub use condition::{Where, WhereTerm};
pub use join::{Join, JoinTerm, Primary};
pub use limit::Limit;
pub use order::{Direction, Order, OrderTerm};
pub use set::{Set, SetTerm};
