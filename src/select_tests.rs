#[cfg(test)]
mod tests {
    use crate::{
        Clauses, Dialect, Error, SqlValue, WindowFunction, clause, select, select_distinct,
        set_default_dialect_scoped,
    };
    use pretty_assertions::assert_eq;

    #[test]
    fn select_basic_where() {
        let _g = set_default_dialect_scoped(Dialect::QuestionMark);
        let mut sb = select();
        sb.field("id")
            .field("name")
            .from("users")
            .where_(Clauses::equals("status", "active"));

        let q = sb.build();
        assert_eq!(q.sql(), "SELECT id, name FROM users WHERE status = ?");
        assert_eq!(q.values(), &[SqlValue::from("active")]);
    }

    #[test]
    fn select_optional_clauses_like_heroes() {
        let mut sb = select();
        sb.field("*").from("Heroes").where_(
            Clauses::when("last_name", clause::like, Some("%Croft%"))
                .unwrap()
                .and_when("gender", clause::equals_to, "F")
                .unwrap()
                .and_when("age", clause::greater, None::<i64>)
                .unwrap(),
        );

        let q = sb.build_with_dialect(Dialect::QuestionMark);
        assert_eq!(
            q.sql(),
            "SELECT * FROM Heroes WHERE last_name LIKE ? AND gender = ?"
        );
        assert_eq!(q.values(), &[SqlValue::from("%Croft%"), SqlValue::from("F")]);
    }

    #[test]
    fn select_where_omitted_when_all_clauses_dropped() {
        let mut sb = select();
        sb.field("t.titi")
            .field("t.tata")
            .from("toto t")
            .where_(Clauses::when("t.a", clause::not_equals, None::<&str>).unwrap());

        let q = sb.build_with_dialect(Dialect::QuestionMark);
        assert_eq!(q.sql(), "SELECT t.titi, t.tata FROM toto t");
        assert!(q.values().is_empty());
    }

    #[test]
    fn select_where_with_every_maker() {
        let c = Clauses::when("t.a", clause::equals_to, "b")
            .unwrap()
            .and_when("t.a", clause::not_equals, "c")
            .unwrap()
            .and_when("t.a", clause::lesser, "d")
            .unwrap()
            .and_when("t.a", clause::lesser_equals, "e")
            .unwrap()
            .and_when("t.a", clause::greater, "f")
            .unwrap()
            .and_when("t.a", clause::greater_equals, "g")
            .unwrap()
            .and(Clauses::when_between("t.i", clause::between, 1, 10).unwrap())
            .and(Clauses::when_between("t.j", clause::not_between, 1, 10).unwrap())
            .and_when("t.k", clause::like, "%plip%")
            .unwrap()
            .and_when("t.l", clause::not_like, "%plop%")
            .unwrap();

        let mut sb = select();
        sb.field("t.titi").from("toto t").where_(c);
        let q = sb.build_with_dialect(Dialect::QuestionMark);
        assert_eq!(
            q.sql(),
            "SELECT t.titi FROM toto t WHERE t.a = ? AND t.a <> ? AND t.a < ? AND t.a <= ? \
             AND t.a > ? AND t.a >= ? AND t.i BETWEEN ? AND ? AND t.j NOT BETWEEN ? AND ? \
             AND t.k LIKE ? AND t.l NOT LIKE ?"
        );
        assert_eq!(q.values().len(), 12);
        assert_eq!(q.values()[6], SqlValue::I64(1));
        assert_eq!(q.values()[7], SqlValue::I64(10));
        assert_eq!(q.values()[11], SqlValue::from("%plop%"));
    }

    #[test]
    fn select_literal_clauses() {
        let exists = {
            let mut sb = select();
            sb.field("1")
                .from("tata a")
                .where_(Clauses::expr("a.a = t.a"));
            sb
        };
        let c = Clauses::expr("t.a = t.b")
            .and(Clauses::is_not_null("t.a"))
            .and(Clauses::is_null("t.h"))
            .and(Clauses::exists(&exists))
            .and(Clauses::expr(format!(
                "t.k LIKE {}",
                crate::format_text("%tata%")
            )))
            .and(Clauses::not(
                Clauses::expr("t.m = t.n").or(Clauses::expr("t.o = t.p")),
            ));

        let mut sb = select();
        sb.field("t.titi").from("toto t").where_(c);
        let q = sb.build_with_dialect(Dialect::QuestionMark);
        assert_eq!(
            q.sql(),
            "SELECT t.titi FROM toto t WHERE t.a = t.b AND t.a IS NOT NULL AND t.h IS NULL \
             AND EXISTS (SELECT 1 FROM tata a WHERE a.a = t.a) AND t.k LIKE '%tata%' \
             AND NOT (t.m = t.n OR t.o = t.p)"
        );
        assert!(q.values().is_empty());
    }

    #[test]
    fn select_where_called_twice_ands_trees() {
        let mut sb = select();
        sb.field("a")
            .from("t")
            .where_(Clauses::equals("x", 1).or(Clauses::equals("y", 2)))
            .where_(Clauses::equals("z", 3));
        let q = sb.build_with_dialect(Dialect::QuestionMark);
        assert_eq!(q.sql(), "SELECT a FROM t WHERE (x = ? OR y = ?) AND z = ?");
    }

    #[test]
    fn select_field_modifiers() {
        let mut sb = select_distinct();
        sb.field("titi").as_("t").field("tata").from("toto");
        assert_eq!(
            sb.build_with_dialect(Dialect::QuestionMark).sql(),
            "SELECT DISTINCT titi AS t, tata FROM toto"
        );

        let mut sb = select();
        sb.from("toto");
        assert_eq!(
            sb.build_with_dialect(Dialect::QuestionMark).sql(),
            "SELECT * FROM toto"
        );
    }

    #[test]
    fn select_group_by_having_order_by() {
        let mut sb = select();
        sb.field("dept")
            .field("COUNT(*)")
            .as_("n")
            .from("emp")
            .where_(Clauses::greater("salary", 1000))
            .group_by("dept")
            .having(Clauses::greater("COUNT(*)", 5))
            .order_by("n")
            .desc()
            .order_by_asc("dept");

        let q = sb.build_with_dialect(Dialect::DollarNumbered);
        assert_eq!(
            q.sql(),
            "SELECT dept, COUNT(*) AS n FROM emp WHERE salary > $1 GROUP BY dept \
             HAVING COUNT(*) > $2 ORDER BY n DESC, dept ASC"
        );
        assert_eq!(q.values(), &[SqlValue::I64(1000), SqlValue::I64(5)]);
    }

    #[test]
    fn select_having_without_valid_clause_is_omitted() {
        let mut sb = select();
        sb.field("a")
            .from("t")
            .group_by("a")
            .having(Clauses::when("COUNT(*)", clause::greater, None::<i64>).unwrap());
        assert_eq!(
            sb.build_with_dialect(Dialect::QuestionMark).sql(),
            "SELECT a FROM t GROUP BY a"
        );
    }

    #[test]
    fn select_offset_fetch() {
        let mut sb = select();
        sb.field("id").from("users").order_by_desc("id");
        sb.offset(20).unwrap().fetch(10).unwrap();
        assert_eq!(
            sb.build_with_dialect(Dialect::QuestionMark).sql(),
            "SELECT id FROM users ORDER BY id DESC OFFSET 20 ROWS FETCH FIRST 10 ROWS ONLY"
        );

        let mut sb = select();
        sb.field("id").from("users");
        sb.fetch(0).unwrap();
        assert_eq!(
            sb.build_with_dialect(Dialect::QuestionMark).sql(),
            "SELECT id FROM users FETCH FIRST 0 ROWS ONLY"
        );
    }

    #[test]
    fn select_negative_pagination_is_invalid_argument() {
        let mut sb = select();
        sb.field("id").from("users");
        assert!(matches!(sb.fetch(-1), Err(Error::InvalidArgument(_))));
        assert!(matches!(sb.offset(-1), Err(Error::InvalidArgument(_))));
        assert_eq!(
            sb.build_with_dialect(Dialect::QuestionMark).sql(),
            "SELECT id FROM users"
        );
    }

    #[test]
    fn select_union_appends_child_values_after_parent() {
        let mut child = select();
        child.field("id").from("archived").where_(Clauses::equals("k", 2));

        let mut sb = select();
        sb.field("id").from("live").where_(Clauses::equals("k", 1));
        sb.union(&child).union_all(&child);

        let q = sb.build_with_dialect(Dialect::DollarNumbered);
        assert_eq!(
            q.sql(),
            "SELECT id FROM live WHERE k = $1 UNION SELECT id FROM archived WHERE k = $2 \
             UNION ALL SELECT id FROM archived WHERE k = $3"
        );
        assert_eq!(
            q.values(),
            &[SqlValue::I64(1), SqlValue::I64(2), SqlValue::I64(2)]
        );
    }

    #[test]
    fn select_in_subquery_positions_values() {
        let mut sub = select();
        sub.field("user_id")
            .from("orders")
            .where_(Clauses::greater("total", 100));

        let mut sb = select();
        sb.field("name").from("users").where_(
            Clauses::equals("active", true)
                .and(Clauses::in_query("id", &sub))
                .and(Clauses::equals("region", "eu")),
        );

        let q = sb.build_with_dialect(Dialect::DollarNumbered);
        assert_eq!(
            q.sql(),
            "SELECT name FROM users WHERE active = $1 AND id IN (SELECT user_id FROM orders \
             WHERE total > $2) AND region = $3"
        );
        assert_eq!(
            q.values(),
            &[SqlValue::Bool(true), SqlValue::I64(100), SqlValue::from("eu")]
        );
    }

    #[test]
    fn select_prebuilt_query_is_renumbered() {
        let mut inner = select();
        inner.field("id").from("t").where_(Clauses::equals("a", 1));
        let prebuilt = inner.build_with_dialect(Dialect::DollarNumbered);
        assert_eq!(prebuilt.sql(), "SELECT id FROM t WHERE a = $1");

        let mut sb = select();
        sb.field("x")
            .from("u")
            .where_(Clauses::equals("b", 0).and(Clauses::in_query("id", &prebuilt)));
        let q = sb.build_with_dialect(Dialect::DollarNumbered);
        assert_eq!(
            q.sql(),
            "SELECT x FROM u WHERE b = $1 AND id IN (SELECT id FROM t WHERE a = $2)"
        );
    }

    #[test]
    fn select_field_query_as() {
        let mut sub = select();
        sub.field("MAX(score)")
            .from("scores s")
            .where_(Clauses::expr("s.user_id = u.id").and(Clauses::equals("s.season", 3)));

        let mut sb = select();
        sb.field("u.id")
            .field_query_as(&sub, "best")
            .from("users u")
            .where_(Clauses::equals("u.active", true));

        let q = sb.build_with_dialect(Dialect::QuestionMark);
        assert_eq!(
            q.sql(),
            "SELECT u.id, (SELECT MAX(score) FROM scores s WHERE s.user_id = u.id AND s.season = ?) \
             AS best FROM users u WHERE u.active = ?"
        );
        assert_eq!(q.values(), &[SqlValue::I64(3), SqlValue::Bool(true)]);
    }

    #[test]
    fn select_window_helpers() {
        let mut sb = select();
        sb.field("name");
        sb.window_by_rank("dept", "salary DESC", "rnk", i32::MIN, 0)
            .unwrap()
            .window_by_row_number("dept", "hired", "pos", -2, 2)
            .unwrap()
            .window(WindowFunction::DenseRank, "", "salary", "dr", 0, i32::MAX)
            .unwrap()
            .from("emp");

        let q = sb.build_with_dialect(Dialect::QuestionMark);
        assert_eq!(
            q.sql(),
            "SELECT name, \
             RANK() OVER (PARTITION BY dept ORDER BY salary DESC ROWS BETWEEN UNBOUNDED PRECEDING AND CURRENT ROW) AS rnk, \
             ROW_NUMBER() OVER (PARTITION BY dept ORDER BY hired ROWS BETWEEN 2 PRECEDING AND 2 FOLLOWING) AS pos, \
             DENSE_RANK() OVER (ORDER BY salary ROWS BETWEEN CURRENT ROW AND UNBOUNDED FOLLOWING) AS dr \
             FROM emp"
        );
        assert!(q.values().is_empty());

        assert!(matches!(
            sb.window_by_rank("a", "b", "c", 1, -1),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn select_build_is_idempotent() {
        let mut sb = select();
        sb.field("a")
            .from("t")
            .where_(Clauses::equals("x", 1).or(Clauses::equals("y", 2)));
        let first = sb.build_with_dialect(Dialect::DollarNumbered);
        let second = sb.build_with_dialect(Dialect::DollarNumbered);
        assert_eq!(first, second);
    }
}
