//! LIMIT / OFFSET.

use crate::error::{BuildError, BuildResult};
use crate::sql::dialect::{LimitFragment, SqlDialect};
use crate::sql::value::Value;

/// Row count plus an optional offset. A zero offset is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limit {
    limit: u64,
    offset: Option<u64>,
}

impl Limit {
    pub fn new(limit: u64, offset: Option<u64>) -> Self {
        Self {
            limit,
            offset: offset.filter(|&off| off > 0),
        }
    }

    /// Accepts `n`, `[n]` or `[n, offset]`.
    pub fn parse(value: &Value) -> BuildResult<Self> {
        match value {
            Value::Int(_) => Ok(Self::new(count(value)?, None)),
            Value::List(items) => match items.as_slice() {
                [limit] => Ok(Self::new(count(limit)?, None)),
                [limit, offset] => Ok(Self::new(count(limit)?, Some(count(offset)?))),
                _ => Err(BuildError::LimitParse(format!(
                    "Expect one or two integers for LIMIT, got {} items",
                    items.len()
                ))),
            },
            other => Err(BuildError::LimitParse(format!(
                "Unrecognized LIMIT: {:?}",
                other
            ))),
        }
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    pub fn offset(&self) -> Option<u64> {
        self.offset
    }

    pub fn fragment(&self, dialect: &dyn SqlDialect) -> LimitFragment {
        dialect.limit(self.limit, self.offset)
    }
}

fn count(value: &Value) -> BuildResult<u64> {
    match value {
        Value::Int(n) => u64::try_from(*n)
            .map_err(|_| BuildError::LimitParse(format!("Negative LIMIT value: {}", n))),
        other => Err(BuildError::LimitParse(format!(
            "LIMIT values must be integers: {:?}",
            other
        ))),
    }
}
