//! Oracle dialect.
//!
//! Oracle (pre-12c) has no LIMIT clause; pagination is a ROWNUM range
//! predicate merged into WHERE.

use super::helpers;
use super::{LimitFragment, SqlDialect};

/// Oracle dialect.
#[derive(Debug, Clone, Copy)]
pub struct Oracle;

impl SqlDialect for Oracle {
    fn name(&self) -> &'static str {
        "oracle"
    }

    fn quote_identifier(&self, ident: &str) -> String {
        helpers::IdentQuote::Double.quote(ident)
    }

    fn limit(&self, limit: u64, offset: Option<u64>) -> LimitFragment {
        LimitFragment::in_where(helpers::limit_rownum(limit, offset))
    }
}
