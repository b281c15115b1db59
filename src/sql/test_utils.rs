//! Parse generated statements with sqlparser to catch malformed output.

use sqlparser::dialect::{
    GenericDialect, MsSqlDialect, MySqlDialect, PostgreSqlDialect, SQLiteDialect,
};
use sqlparser::parser::Parser;

use super::dialect::Dialect;

/// Parse `sql` with the sqlparser dialect closest to `dialect`.
pub fn validate_sql(sql: &str, dialect: Dialect) -> Result<(), String> {
    let parser_dialect: Box<dyn sqlparser::dialect::Dialect> = match dialect {
        Dialect::Generic => Box::new(GenericDialect {}),
        Dialect::Sqlite => Box::new(SQLiteDialect {}),
        Dialect::MySql => Box::new(MySqlDialect {}),
        Dialect::Postgres => Box::new(PostgreSqlDialect {}),
        Dialect::MsSql => Box::new(MsSqlDialect {}),
        Dialect::Oracle => Box::new(GenericDialect {}), // sqlparser has no Oracle dialect
    };

    Parser::parse_sql(&*parser_dialect, sql)
        .map(|_| ())
        .map_err(|e| format!("Invalid SQL for {:?}: {}\nSQL: {}", dialect, e, sql))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping;
    use crate::sql::builder::Builder;

    #[test]
    fn test_validate_invalid_sql() {
        assert!(validate_sql("SELEC * FORM users", Dialect::Postgres).is_err());
    }

    #[test]
    fn test_generated_statements_parse() {
        for dialect in [Dialect::Generic, Dialect::Sqlite, Dialect::MySql, Dialect::Postgres] {
            let mut b = Builder::new(dialect);
            b.select(
                "account(a)",
                "a.id,a.name|upper(n)",
                Some(mapping! {
                    "a.id[>]" => 1,
                    "a.name[~]" => "bob",
                    "ORDER" => mapping! { "a.id" => false },
                    "LIMIT" => (10, 20),
                }),
            )
            .unwrap();
            validate_sql(&b.sql(), dialect).unwrap();
        }
    }

    #[test]
    fn test_mssql_top_parses() {
        let mut b = Builder::new(Dialect::MsSql);
        b.select("t", "a", Some(mapping! { "LIMIT" => 5 })).unwrap();
        assert_eq!(b.sql(), "SELECT TOP 5 [a] FROM [t]");
        validate_sql(&b.sql(), Dialect::MsSql).unwrap();
    }
}
