#[cfg(test)]
mod tests {
    use shorthand::builder::{Column, Columns, Source};
    use shorthand::clause::Primary;
    use shorthand::{mapping, BuildError, Builder, Dialect, Raw, Value};

    fn generic() -> Builder {
        Builder::new(Dialect::Generic)
    }

    fn select_from(table: &str) -> Builder {
        let mut b = generic();
        b.select_clause("", false).unwrap().from_clause(table).unwrap();
        b
    }

    #[test]
    fn test_clauses_append_in_call_order() {
        let mut b = generic();
        b.select_clause("a|count(n)", true)
            .unwrap()
            .from_clause("s.t(x)")
            .unwrap()
            .where_clause(&mapping! { "x.a[>]" => 0 })
            .unwrap()
            .group_clause("x.a")
            .unwrap()
            .order_clause(&mapping! { "n" => "desc" })
            .unwrap();
        assert_eq!(
            b.sql(),
            "SELECT DISTINCT COUNT(\"a\") AS \"n\" FROM \"s\".\"t\" AS \"x\" \
             WHERE \"x\".\"a\" > 0 GROUP BY \"x\".\"a\" ORDER BY \"n\" DESC"
        );
        assert_eq!(b.primary(), Some(&Primary::Named("x".into())));
    }

    #[test]
    fn test_from_subquery_alias_and_join() {
        let mut sub = select_from("t");
        sub.sub(Some("t1"));
        let mut b = generic();
        b.from_clause(vec![Source::from(sub), Source::from("t2")])
            .unwrap()
            .join_clause(&mapping! { "t3" => "f" })
            .unwrap();
        insta::assert_snapshot!(
            b.sql(),
            @r#"FROM (SELECT * FROM "t") AS "t1","t2" INNER JOIN "t3" ON "t3"."f"="t1"."f""#
        );
    }

    #[test]
    fn test_errors_surface_from_the_clause_call() {
        let mut b = generic();
        assert!(matches!(
            b.where_clause(&mapping! { "aiw@#$" => 1 }),
            Err(BuildError::WhereParse(_))
        ));
        assert!(matches!(
            b.from_clause("[]t"),
            Err(BuildError::TableParse(_))
        ));
        assert!(matches!(
            b.select_clause("a b", false),
            Err(BuildError::FieldParse(_))
        ));
        assert!(matches!(
            b.limit_clause(vec![1, 2, 3]),
            Err(BuildError::LimitParse(_))
        ));
        assert!(matches!(
            b.set_clause(&mapping! { "@" => 1 }),
            Err(BuildError::UpdateParse(_))
        ));
    }

    #[test]
    fn test_join_without_primary_table() {
        let mut b = generic();
        assert!(matches!(
            b.join_clause(&mapping! { "t" => "f" }),
            Err(BuildError::JoinParse(_))
        ));
        b.join_clause(&mapping! { "[>]t" => mapping! { "f" => "mt.f2" } })
            .unwrap();
        assert_eq!(b.sql(), "LEFT JOIN \"t\" ON \"t\".\"f\"=\"mt\".\"f2\"");
    }

    #[test]
    fn test_raw_and_field_columns() {
        let mut b = generic();
        b.select_clause(
            vec![
                Column::from(Raw::new("COUNT(*) AS n")),
                Column::from(shorthand::Field::parse("t.f").unwrap()),
            ],
            false,
        )
        .unwrap();
        assert_eq!(b.sql(), "SELECT COUNT(*) AS n,\"t\".\"f\"");
    }

    #[test]
    fn test_insert_with_explicit_fields() {
        let mut b = generic();
        b.insert_clause(
            "t",
            &[Value::from((1, 2)), Value::from((3, 4)), Value::from((5, 6))],
            Some(Columns::from(["a", "b"])),
        )
        .unwrap();
        insta::assert_snapshot!(b.sql(), @r#"INSERT INTO "t" ("a","b") VALUES (1,2),(3,4),(5,6)"#);
    }

    #[test]
    fn test_subquery_as_condition_value() {
        let mut sub = generic();
        sub.select_clause("id", false)
            .unwrap()
            .from_clause("banned")
            .unwrap();
        let mut b = select_from("account");
        b.where_clause(&mapping! { "id[!]" => sub }).unwrap();
        assert_eq!(
            b.sql(),
            "SELECT * FROM \"account\" WHERE \"id\" NOT IN (SELECT \"id\" FROM \"banned\")"
        );
    }
}
