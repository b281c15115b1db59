//! Generic SQL dialect - the base rules every other dialect refines.
//!
//! ANSI double-quoted identifiers, `1`/`0` booleans and trailing
//! `LIMIT n OFFSET m`. All four join markers are supported.

use super::helpers;
use super::SqlDialect;

/// Generic SQL dialect.
#[derive(Debug, Clone, Copy)]
pub struct Generic;

impl SqlDialect for Generic {
    fn name(&self) -> &'static str {
        "generic"
    }

    fn quote_identifier(&self, ident: &str) -> String {
        helpers::IdentQuote::Double.quote(ident)
    }

    // Everything else uses the trait defaults
}
