//! SQL Server dialect.
//!
//! SQL Server has significant differences from the generic rules:
//! - Square bracket identifier quoting (`[name]`)
//! - `TOP n` right after SELECT for plain limits
//! - `OFFSET m ROWS FETCH NEXT n ROWS ONLY` when an offset is given (2012+)
//! - N'...' prefix for Unicode strings
//! - Different function names (`LEN`, `GETDATE`, `ISNULL`)

use super::helpers;
use super::{LimitFragment, SqlDialect};

/// SQL Server dialect.
#[derive(Debug, Clone, Copy)]
pub struct MsSql;

impl SqlDialect for MsSql {
    fn name(&self) -> &'static str {
        "mssql"
    }

    fn quote_identifier(&self, ident: &str) -> String {
        helpers::IdentQuote::Bracket.quote(ident)
    }

    fn quote_string(&self, s: &str) -> String {
        helpers::string_literal(s, !s.is_ascii())
    }

    fn limit(&self, limit: u64, offset: Option<u64>) -> LimitFragment {
        match offset {
            Some(off) => LimitFragment::append(helpers::limit_offset_fetch(limit, off)),
            // Index 1 is directly after SELECT / SELECT DISTINCT
            None => LimitFragment::at(format!("TOP {}", limit), 1),
        }
    }

    fn remap_function(&self, name: &str) -> Option<&'static str> {
        helpers::remap_function_tsql(name)
    }
}
