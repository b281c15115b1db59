//! # Shorthand
//!
//! Compiles compact query descriptions into SQL for several dialects.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │        Shorthand (ordered key => value mappings)         │
//! │   "user_id[>]" => 200, "[>]account(a)" => "id", ...      │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [clause parsers]
//! ┌─────────────────────────────────────────────────────────┐
//! │        Terms (tables, fields, conditions, joins)         │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [dialect]
//! ┌─────────────────────────────────────────────────────────┐
//! │                  Builder -> SQL text                     │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! The dialect travels with the [`Builder`] and is handed to every render
//! call; there is no process-wide dialect setting.
//!
//! ```
//! use shorthand::prelude::*;
//!
//! let mut builder = Builder::new(Dialect::MySql);
//! builder
//!     .select("account", "user_name,email", Some(mapping! { "user_id[>]" => 200 }))
//!     .unwrap();
//! assert_eq!(
//!     builder.sql(),
//!     "SELECT `user_name`,`email` FROM `account` WHERE `user_id` > 200"
//! );
//! ```

pub mod config;
pub mod error;
pub mod sql;

// Re-export SQL submodules at crate level
pub use sql::builder;
pub use sql::clause;
pub use sql::dialect;
pub use sql::operator;
pub use sql::term;
pub use sql::value;

/// Re-exports for convenient usage.
pub mod prelude {
    pub use crate::builder::{Builder, Column, Columns, InsertHead, SelectOptions, Source};
    pub use crate::dialect::{Dialect, SqlDialect};
    pub use crate::error::{BuildError, BuildResult};
    pub use crate::mapping;
    pub use crate::term::{Arith, Field, Raw};
    pub use crate::value::{Key, Mapping, Value};
}

// Also export at crate root for convenience
pub use builder::{Builder, SelectOptions};
pub use config::{Settings, SettingsError};
pub use dialect::{Dialect, SqlDialect};
pub use error::{BuildError, BuildResult};
pub use term::{Arith, Field, Raw, Table};
pub use value::{Key, Mapping, Value};
