#[cfg(test)]
mod tests {
    use shorthand::builder::{InsertHead, SelectOptions, SubAlias};
    use shorthand::{mapping, BuildError, Builder, Dialect, Mapping, Value};
    use sqlparser::dialect::GenericDialect;
    use sqlparser::parser::Parser;

    fn parses(sql: &str) -> bool {
        Parser::parse_sql(&GenericDialect {}, sql).is_ok()
    }

    fn joined_options() -> SelectOptions {
        SelectOptions::default().join(mapping! { "[>]t2" => "f1" })
    }

    fn select(columns: &str, conditions: Option<Mapping>, options: SelectOptions) -> String {
        let mut b = Builder::new(Dialect::Generic);
        b.select_with("t", columns, conditions, options).unwrap();
        b.sql()
    }

    #[test]
    fn test_select_variants() {
        assert_eq!(select("", None, SelectOptions::default()), "SELECT * FROM \"t\"");
        assert_eq!(
            select("a,b", None, SelectOptions::default()),
            "SELECT \"a\",\"b\" FROM \"t\""
        );
        assert_eq!(
            select("a,b", None, SelectOptions::default().distinct()),
            "SELECT DISTINCT \"a\",\"b\" FROM \"t\""
        );
        assert_eq!(
            select("a,b", Some(mapping! { "f" => 1 }), SelectOptions::default()),
            "SELECT \"a\",\"b\" FROM \"t\" WHERE \"f\" = 1"
        );
        assert_eq!(
            select("a,b", Some(mapping! { "f" => 1 }), joined_options()),
            "SELECT \"a\",\"b\" FROM \"t\" LEFT JOIN \"t2\" ON \"t2\".\"f1\"=\"t\".\"f1\" WHERE \"f\" = 1"
        );
    }

    #[test]
    fn test_select_into_and_sub() {
        insta::assert_snapshot!(
            select("a,b", Some(mapping! { "f" => 1 }), joined_options().into_table("t3")),
            @r#"SELECT "a","b" INTO "t3" FROM "t" LEFT JOIN "t2" ON "t2"."f1"="t"."f1" WHERE "f" = 1"#
        );
        insta::assert_snapshot!(
            select("a,b", Some(mapping! { "f" => 1 }), joined_options().sub(None)),
            @r#"(SELECT "a","b" FROM "t" LEFT JOIN "t2" ON "t2"."f1"="t"."f1" WHERE "f" = 1)"#
        );
        insta::assert_snapshot!(
            select("a,b", Some(mapping! { "f" => 1 }), joined_options().sub("tmp")),
            @r#"(SELECT "a","b" FROM "t" LEFT JOIN "t2" ON "t2"."f1"="t"."f1" WHERE "f" = 1) AS "tmp""#
        );
    }

    #[test]
    fn test_update_and_delete() {
        let mut b = Builder::new(Dialect::Generic);
        b.update("t", &mapping! { "id" => 1 }, Some(&mapping! { "_id" => 10 }))
            .unwrap();
        assert_eq!(b.sql(), "UPDATE \"t\" SET \"id\"=1 WHERE \"_id\" = 10");
        assert!(parses(&b.sql()));

        let mut b = Builder::new(Dialect::Generic);
        b.delete("t", &mapping! { "id" => 1 }).unwrap();
        assert_eq!(b.sql(), "DELETE FROM \"t\" WHERE \"id\" = 1");
        assert!(parses(&b.sql()));
    }

    #[test]
    fn test_update_without_conditions() {
        let mut b = Builder::new(Dialect::Postgres);
        b.update("s.t", &mapping! { "flag" => true, "n[-]" => 1 }, None)
            .unwrap();
        assert_eq!(b.sql(), "UPDATE \"s\".\"t\" SET \"flag\"=true,\"n\"=\"n\"-1");
    }

    #[test]
    fn test_union() {
        let sub_t1 = || {
            let mut b = Builder::new(Dialect::Generic);
            b.select_with("t1", "", None, SelectOptions::default().sub(None))
                .unwrap();
            b
        };
        let plain_t2 = || {
            let mut b = Builder::new(Dialect::Generic);
            b.select("t2", "", None).unwrap();
            b
        };

        let mut b = Builder::new(Dialect::Generic);
        b.union(&[sub_t1(), plain_t2()]);
        assert_eq!(b.sql(), "SELECT * FROM \"t1\" UNION SELECT * FROM \"t2\"");

        let mut b = Builder::new(Dialect::Generic);
        b.select("t", "", None).unwrap().union(&[sub_t1(), plain_t2()]);
        insta::assert_snapshot!(
            b.sql(),
            @r#"SELECT * FROM "t" UNION ALL SELECT * FROM "t1" UNION SELECT * FROM "t2""#
        );
        assert!(parses(&b.sql()));
    }

    #[test]
    fn test_union_leaves_queries_untouched() {
        let mut first = Builder::new(Dialect::Generic);
        first
            .select_with("t1", "", None, SelectOptions::default().sub("x"))
            .unwrap();
        let mut b = Builder::new(Dialect::Generic);
        b.union(std::slice::from_ref(&first));
        assert_eq!(b.sql(), "SELECT * FROM \"t1\"");
        assert_eq!(first.sub_alias(), &SubAlias::Named("x".into()));
    }

    #[test]
    fn test_insert_heads() {
        let rows = || vec![Value::from((3, 4)), Value::from((5, 6))];

        let mut b = Builder::new(Dialect::Generic);
        b.insert(
            "t",
            mapping! { "a" => 1, "b" => 2 },
            vec![Value::from((3, 4)), Value::from((4, 5))],
        )
        .unwrap();
        assert_eq!(b.sql(), "INSERT INTO \"t\" (\"a\",\"b\") VALUES (1,2),(3,4),(4,5)");

        let mut b = Builder::new(Dialect::Generic);
        b.insert("t", InsertHead::Row(vec![1.into(), 2.into()]), rows())
            .unwrap();
        assert_eq!(b.sql(), "INSERT INTO \"t\" VALUES (1,2),(3,4),(5,6)");

        let mut b = Builder::new(Dialect::Generic);
        b.insert("t", "a,b", rows()).unwrap();
        assert_eq!(b.sql(), "INSERT INTO \"t\" (\"a\",\"b\") VALUES (3,4),(5,6)");

        let mut b = Builder::new(Dialect::Generic);
        b.insert("t", vec!["a", "b"], rows()).unwrap();
        assert_eq!(b.sql(), "INSERT INTO \"t\" (\"a\",\"b\") VALUES (3,4),(5,6)");
        assert!(parses(&b.sql()));
    }

    #[test]
    fn test_insert_select() {
        let from = |t: &str, sub: bool| {
            let mut b = Builder::new(Dialect::Generic);
            b.select(t, "", None).unwrap();
            if sub {
                b.sub(None);
            }
            Value::from(b)
        };
        let mut b = Builder::new(Dialect::Generic);
        b.insert_clause("t", &[from("t1", false), from("t2", true)], None)
            .unwrap();
        assert_eq!(
            b.sql(),
            "INSERT INTO \"t\" SELECT * FROM \"t1\" UNION ALL SELECT * FROM \"t2\""
        );
    }

    #[test]
    fn test_insert_inconsistent_records() {
        let mut b = Builder::new(Dialect::Generic);
        let err = b.insert(
            "t",
            mapping! { "a" => 1, "b" => 2 },
            vec![Value::from(mapping! { "a" => 3 })],
        );
        assert!(matches!(err, Err(BuildError::InsertParse(_))));
    }

    #[test]
    fn test_select_with_all_pseudo_keys() {
        let mut exists = Builder::new(Dialect::Generic);
        exists.select("t2", "", None).unwrap();
        let mut b = Builder::new(Dialect::Generic);
        b.select(
            "t",
            "a|count(n)",
            Some(mapping! {
                "b[>]" => 1,
                "ORDER" => mapping! { "n" => "DESC" },
                "GROUP" => vec!["a"],
                "HAVING" => mapping! { "a|count[>]" => 2 },
                "EXISTS" => exists,
            }),
        )
        .unwrap();
        assert_eq!(
            b.sql(),
            "SELECT COUNT(\"a\") AS \"n\" FROM \"t\" WHERE \"b\" > 1 ORDER BY \"n\" DESC \
             GROUP BY \"a\" HAVING COUNT(\"a\") > 2 EXISTS SELECT * FROM \"t2\""
        );
    }

    #[test]
    fn test_clear_and_reuse() {
        let mut b = Builder::new(Dialect::Generic);
        b.delete("t", &mapping! { "id" => 1 }).unwrap();
        b.clear();
        b.select("u", "", None).unwrap();
        assert_eq!(b.sql(), "SELECT * FROM \"u\"");
    }

    #[test]
    fn test_failed_statement_reports_error() {
        let mut b = Builder::new(Dialect::Generic);
        assert!(matches!(
            b.select("t", "", Some(mapping! { "LIMIT" => "ten" })),
            Err(BuildError::LimitParse(_))
        ));
    }
}
