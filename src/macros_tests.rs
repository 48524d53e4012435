#[cfg(test)]
mod tests {
    use crate::{Clauses, Dialect, select};
    use pretty_assertions::assert_eq;

    #[test]
    fn select_macro_variadic_builds_sql() {
        let mut sb = select();
        crate::select_cols!(sb, "id", ["name", "email"]);
        sb.from("users");
        crate::group_by_cols!(sb, "id", vec!["name".to_string()]);
        let ob = crate::order_by_cols!(sb, "name");
        ob.desc();

        let q = sb.build_with_dialect(Dialect::QuestionMark);
        assert_eq!(
            q.sql(),
            "SELECT id, name, email FROM users GROUP BY id, name ORDER BY name DESC"
        );
        assert!(q.values().is_empty());
    }

    #[test]
    fn all_of_and_any_of_nest_with_parentheses() {
        let c = crate::all_of!(
            Clauses::equals("a", 1),
            crate::any_of!(Clauses::equals("b", 2), Clauses::equals("c", 3)),
            Clauses::new(),
        );
        assert_eq!(
            c.build_with_dialect(Dialect::QuestionMark).sql(),
            "a = ? AND (b = ? OR c = ?)"
        );
        assert!(crate::any_of!().is_empty());
    }
}
