#[cfg(test)]
mod tests {
    use shorthand::dialect::{helpers, LimitFragment, SqlDialect};
    use shorthand::operator::OperatorRegistry;
    use shorthand::{mapping, BuildError, BuildResult, Builder, Dialect, Value};
    use sqlparser::dialect::{
        GenericDialect, MsSqlDialect, MySqlDialect, PostgreSqlDialect, SQLiteDialect,
    };
    use sqlparser::parser::Parser;
    use std::sync::LazyLock;

    fn validate(sql: &str, dialect: Dialect) {
        let parser: Box<dyn sqlparser::dialect::Dialect> = match dialect {
            Dialect::Sqlite => Box::new(SQLiteDialect {}),
            Dialect::MySql => Box::new(MySqlDialect {}),
            Dialect::Postgres => Box::new(PostgreSqlDialect {}),
            Dialect::MsSql => Box::new(MsSqlDialect {}),
            Dialect::Generic | Dialect::Oracle => Box::new(GenericDialect {}),
        };
        if let Err(e) = Parser::parse_sql(&*parser, sql) {
            panic!("Invalid SQL for {}: {}\nSQL: {}", dialect, e, sql);
        }
    }

    fn select(dialect: Dialect, conditions: shorthand::Mapping) -> BuildResult<String> {
        let mut b = Builder::new(dialect);
        b.select("t", "a,b", Some(conditions))?;
        Ok(b.sql())
    }

    #[test]
    fn test_quoting_per_dialect() {
        let conditions = || mapping! { "a" => "x" };
        assert_eq!(
            select(Dialect::MySql, conditions()).unwrap(),
            "SELECT `a`,`b` FROM `t` WHERE `a` = 'x'"
        );
        assert_eq!(
            select(Dialect::MsSql, conditions()).unwrap(),
            "SELECT [a],[b] FROM [t] WHERE [a] = 'x'"
        );
        for dialect in [Dialect::Generic, Dialect::Sqlite, Dialect::Postgres, Dialect::Oracle] {
            assert_eq!(
                select(dialect, conditions()).unwrap(),
                "SELECT \"a\",\"b\" FROM \"t\" WHERE \"a\" = 'x'"
            );
        }
    }

    #[test]
    fn test_statements_parse_in_each_dialect() {
        for dialect in [
            Dialect::Generic,
            Dialect::Sqlite,
            Dialect::MySql,
            Dialect::Postgres,
            Dialect::MsSql,
        ] {
            let sql = select(
                dialect,
                mapping! {
                    "a[<>]" => (1, 10),
                    "OR" => mapping! { "b[~]" => "x", "b" => () },
                    "ORDER" => mapping! { "a" => true },
                },
            )
            .unwrap();
            validate(&sql, dialect);
        }
    }

    #[test]
    fn test_limit_per_dialect() {
        let limited = |dialect: Dialect, limit: Value| {
            select(dialect, mapping! { "LIMIT" => limit }).unwrap()
        };
        insta::assert_snapshot!(
            limited(Dialect::Generic, Value::from((10, 5))),
            @r#"SELECT "a","b" FROM "t" LIMIT 10 OFFSET 5"#
        );
        insta::assert_snapshot!(
            limited(Dialect::MsSql, Value::from(10)),
            @"SELECT TOP 10 [a],[b] FROM [t]"
        );
        insta::assert_snapshot!(
            limited(Dialect::MsSql, Value::from((10, 5))),
            @"SELECT [a],[b] FROM [t] OFFSET 5 ROWS FETCH NEXT 10 ROWS ONLY"
        );
        insta::assert_snapshot!(
            limited(Dialect::Oracle, Value::from(3)),
            @r#"SELECT "a","b" FROM "t" WHERE ROWNUM <= 3"#
        );
    }

    #[test]
    fn test_rownum_precedes_order_by() {
        let sql = select(
            Dialect::Oracle,
            mapping! { "ORDER" => mapping! { "a" => "desc" }, "LIMIT" => 3 },
        )
        .unwrap();
        assert_eq!(sql, r#"SELECT "a","b" FROM "t" WHERE ROWNUM <= 3 ORDER BY "a" DESC"#);
        validate(&sql, Dialect::Oracle);
    }

    #[test]
    fn test_top_follows_distinct() {
        let mut b = Builder::new(Dialect::MsSql);
        b.select_with(
            "t",
            "a",
            Some(mapping! { "a[>]" => 1, "LIMIT" => 2 }),
            shorthand::SelectOptions::default().distinct(),
        )
        .unwrap();
        assert_eq!(b.sql(), "SELECT DISTINCT TOP 2 [a] FROM [t] WHERE [a] > 1");
    }

    #[test]
    fn test_booleans_and_unicode() {
        assert_eq!(
            select(Dialect::Postgres, mapping! { "on" => true }).unwrap(),
            "SELECT \"a\",\"b\" FROM \"t\" WHERE \"on\" = true"
        );
        assert_eq!(
            select(Dialect::Sqlite, mapping! { "on" => true }).unwrap(),
            "SELECT \"a\",\"b\" FROM \"t\" WHERE \"on\" = 1"
        );
        assert_eq!(
            select(Dialect::MsSql, mapping! { "name" => "café" }).unwrap(),
            "SELECT [a],[b] FROM [t] WHERE [name] = N'café'"
        );
    }

    #[test]
    fn test_dialect_operators() {
        assert_eq!(
            select(Dialect::Postgres, mapping! { "a[~~]" => "x", "b[!regexp]" => "^y" }).unwrap(),
            "SELECT \"a\",\"b\" FROM \"t\" WHERE \"a\" ILIKE '%x%' AND \"b\" !~ '^y'"
        );
        assert_eq!(
            select(Dialect::MySql, mapping! { "a[REGEXP]" => "^x" }).unwrap(),
            "SELECT `a`,`b` FROM `t` WHERE `a` REGEXP '^x'"
        );
        assert_eq!(
            select(Dialect::Sqlite, mapping! { "a[glob]" => "x*" }).unwrap(),
            "SELECT \"a\",\"b\" FROM \"t\" WHERE \"a\" GLOB 'x*'"
        );
    }

    #[test]
    fn test_mysql_rejects_full_outer_join() {
        let mut b = Builder::new(Dialect::MySql);
        let err = b.select_with(
            "t",
            "",
            None,
            shorthand::SelectOptions::default().join(mapping! { "[<>]t2" => "id" }),
        );
        assert!(matches!(err, Err(BuildError::JoinParse(_))));
    }

    #[test]
    fn test_function_remap_for_mssql() {
        let mut b = Builder::new(Dialect::MsSql);
        b.select("t", "name|length(len)", None).unwrap();
        assert_eq!(b.sql(), "SELECT LEN([name]) AS [len] FROM [t]");
    }

    // A dialect defined outside the crate, plugged in through the trait.
    #[derive(Debug)]
    struct Shouting;

    fn shout(dialect: &dyn SqlDialect, field: &str, value: &Value) -> BuildResult<String> {
        Ok(format!("UPPER({}) = UPPER({})", field, dialect.value(value)?))
    }

    static SHOUTING_OPERATORS: LazyLock<OperatorRegistry> =
        LazyLock::new(|| OperatorRegistry::new().with("shout", shout));

    impl SqlDialect for Shouting {
        fn name(&self) -> &'static str {
            "shouting"
        }

        fn quote_identifier(&self, ident: &str) -> String {
            helpers::IdentQuote::Backtick.quote(ident)
        }

        fn limit(&self, limit: u64, _offset: Option<u64>) -> LimitFragment {
            LimitFragment::append(format!("FETCH FIRST {} ROWS ONLY", limit))
        }

        fn operators(&self) -> &OperatorRegistry {
            &SHOUTING_OPERATORS
        }
    }

    #[test]
    fn test_custom_dialect() {
        static DIALECT: Shouting = Shouting;
        let mut b = Builder::with_dialect(&DIALECT);
        b.select(
            "t",
            "",
            Some(mapping! { "name[SHOUT]" => "bob", "LIMIT" => 1 }),
        )
        .unwrap();
        assert_eq!(
            b.sql(),
            "SELECT * FROM `t` WHERE UPPER(`name`) = UPPER('bob') FETCH FIRST 1 ROWS ONLY"
        );
    }
}
