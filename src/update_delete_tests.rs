#[cfg(test)]
mod tests {
    use crate::{
        Clauses, Dialect, SqlValue, clause, delete, select, set_default_dialect_scoped, update,
    };
    use pretty_assertions::assert_eq;
    use time::macros::datetime;

    #[test]
    fn update_skips_absent_values() {
        let mut ub = update("users");
        ub.field("name", "Bob")
            .field("age", None::<i64>)
            .where_(Clauses::equals("id", 42));

        let q = ub.build_with_dialect(Dialect::QuestionMark);
        assert_eq!(q.sql(), "UPDATE users SET name = ? WHERE id = ?");
        assert_eq!(q.values(), &[SqlValue::from("Bob"), SqlValue::I64(42)]);
    }

    #[test]
    fn update_without_where() {
        let mut ub = update("toto");
        ub.field("a", "plip").field("b", Some(3_i64));

        let q = ub.build_with_dialect(Dialect::QuestionMark);
        assert_eq!(q.sql(), "UPDATE toto SET a = ?, b = ?");
        assert_eq!(q.values(), &[SqlValue::from("plip"), SqlValue::I64(3)]);
    }

    #[test]
    fn update_explicit_null_is_assigned() {
        let mut ub = update("toto");
        ub.field("deleted_at", SqlValue::Null)
            .field("touched", datetime!(2024-01-02 03:04:05 UTC));

        let q = ub.build_with_dialect(Dialect::DollarNumbered);
        assert_eq!(q.sql(), "UPDATE toto SET deleted_at = $1, touched = $2");
        assert_eq!(q.values()[0], SqlValue::Null);
        assert_eq!(
            q.values()[1],
            SqlValue::DateTime(datetime!(2024-01-02 03:04:05 UTC))
        );
    }

    #[test]
    fn update_with_checker_and_expression() {
        let non_empty = |v: &&str| !v.is_empty();
        let mut ub = update("counters");
        ub.field_with("label", "", non_empty)
            .field_with("owner", "me", non_empty)
            .field_expr("hits", "hits + 1")
            .where_(
                Clauses::when("id", clause::equals_to, 7_i64)
                    .unwrap()
                    .and_when("kind", clause::equals_to, None::<&str>)
                    .unwrap(),
            );

        let q = ub.build_with_dialect(Dialect::DollarNumbered);
        assert_eq!(
            q.sql(),
            "UPDATE counters SET owner = $1, hits = hits + 1 WHERE id = $2"
        );
        assert_eq!(q.values(), &[SqlValue::from("me"), SqlValue::I64(7)]);
    }

    #[test]
    fn update_with_no_assignments() {
        let mut ub = update("toto");
        ub.field("a", None::<String>);
        assert_eq!(ub.build_with_dialect(Dialect::QuestionMark).sql(), "UPDATE toto");
    }

    #[test]
    fn update_where_in_subquery() {
        let mut sub = select();
        sub.field("user_id")
            .from("bans")
            .where_(Clauses::equals("active", true));

        let mut ub = update("users");
        ub.field("status", "banned")
            .where_(Clauses::in_query("id", &sub));

        let q = ub.build_with_dialect(Dialect::DollarNumbered);
        assert_eq!(
            q.sql(),
            "UPDATE users SET status = $1 WHERE id IN (SELECT user_id FROM bans WHERE active = $2)"
        );
        assert_eq!(q.values(), &[SqlValue::from("banned"), SqlValue::Bool(true)]);
    }

    #[test]
    fn delete_with_where() {
        let _g = set_default_dialect_scoped(Dialect::QuestionMark);
        let mut db = delete("toto");
        db.where_(Clauses::when("b", clause::equals_to, "plop").unwrap());

        let q = db.build();
        assert_eq!(q.sql(), "DELETE FROM toto WHERE b = ?");
        assert_eq!(q.values(), &[SqlValue::from("plop")]);
    }

    #[test]
    fn delete_without_valid_where() {
        let mut db = delete("toto");
        db.where_(Clauses::when("b", clause::equals_to, "").unwrap());
        let q = db.build_with_dialect(Dialect::QuestionMark);
        assert_eq!(q.sql(), "DELETE FROM toto");
        assert!(q.values().is_empty());
    }

    #[test]
    fn delete_follows_default_dialect() {
        let _g = set_default_dialect_scoped(Dialect::DollarNumbered);
        let mut db = delete("sessions");
        db.where_(Clauses::lesser("expires_at", 100).or(Clauses::equals("revoked", true)));
        assert_eq!(
            db.build().sql(),
            "DELETE FROM sessions WHERE expires_at < $1 OR revoked = $2"
        );
    }
}
