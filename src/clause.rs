//! 条件模板工厂：由列名生成带占位符的原子条件模板。
//!
//! 这些函数本身实现了 [`ClauseMaker`]，可直接传给 `Clauses::when` 等可选条件入口：
//!
//! ```
//! use halo_clauses::{Clauses, clause};
//!
//! let c = Clauses::when("last_name", clause::like, Some("%Croft%")).unwrap();
//! assert_eq!(c.build().sql(), "last_name LIKE ?");
//! ```

/// 由列名生成条件模板（包含一个或两个 `?` 占位符）。
///
/// 模板以列名开头时，列名按原样输出，其中的 `?` 不会被当作占位符；
/// 列名出现在其他位置（如 `LOWER(col) = ?`）时整段模板都参与解析，列名里的 `?` 需写成 `??`。
pub trait ClauseMaker {
    fn make_clause(&self, column: &str) -> String;
}

impl<F> ClauseMaker for F
where
    F: Fn(&str) -> String,
{
    fn make_clause(&self, column: &str) -> String {
        self(column)
    }
}

pub fn equals_to(column: &str) -> String {
    format!("{column} = ?")
}

pub fn not_equals(column: &str) -> String {
    format!("{column} <> ?")
}

pub fn greater(column: &str) -> String {
    format!("{column} > ?")
}

pub fn greater_equals(column: &str) -> String {
    format!("{column} >= ?")
}

pub fn lesser(column: &str) -> String {
    format!("{column} < ?")
}

pub fn lesser_equals(column: &str) -> String {
    format!("{column} <= ?")
}

pub fn like(column: &str) -> String {
    format!("{column} LIKE ?")
}

pub fn not_like(column: &str) -> String {
    format!("{column} NOT LIKE ?")
}

pub fn between(column: &str) -> String {
    format!("{column} BETWEEN ? AND ?")
}

pub fn not_between(column: &str) -> String {
    format!("{column} NOT BETWEEN ? AND ?")
}

/// `IN` 模板：唯一的占位符需要绑定一个列表参数。
pub fn in_(column: &str) -> String {
    format!("{column} IN (?)")
}

pub fn not_in(column: &str) -> String {
    format!("{column} NOT IN (?)")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn makers_render_templates() {
        let cases: Vec<(fn(&str) -> String, &str)> = vec![
            (equals_to, "a = ?"),
            (not_equals, "a <> ?"),
            (greater, "a > ?"),
            (greater_equals, "a >= ?"),
            (lesser, "a < ?"),
            (lesser_equals, "a <= ?"),
            (like, "a LIKE ?"),
            (not_like, "a NOT LIKE ?"),
            (between, "a BETWEEN ? AND ?"),
            (not_between, "a NOT BETWEEN ? AND ?"),
            (in_, "a IN (?)"),
            (not_in, "a NOT IN (?)"),
        ];
        for (maker, expected) in cases {
            assert_eq!(maker.make_clause("a"), expected);
        }
    }

    #[test]
    fn closures_are_makers() {
        let ilike = |c: &str| format!("LOWER({c}) LIKE LOWER(?)");
        assert_eq!(ilike.make_clause("name"), "LOWER(name) LIKE LOWER(?)");
    }
}
