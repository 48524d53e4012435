//! Clauses：布尔条件表达式树（WHERE / HAVING / JOIN ON）。
//!
//! 条件树是不可变的：每次 `and` / `or` / `not` 都分配新的父节点并共享已有子树，
//! 因此同一棵树可以同时挂到 WHERE 和 HAVING 上，也可以跨线程共享。
//!
//! 可选条件（`when*` / `and_when` / `or_when`）在值无效时整体省略；
//! 当左侧为空树时，组合操作直接让右侧成为根节点，不会留下悬空的 `AND`/`OR`。

use crate::builder::Builder;
use crate::checker::{DefaultChecker, IsValidValue, ValueChecker};
use crate::clause::{self, ClauseMaker};
use crate::dialect::Dialect;
use crate::error::{Error, Result};
use crate::fragment::{Fragment, count_placeholders};
use crate::modifiers::Arg;
use crate::query::SqlQuery;
use crate::value::SqlValue;
use std::cmp::Ordering;
use std::sync::Arc;

/// 创建一棵空条件树。
pub fn clauses() -> Clauses {
    Clauses::new()
}

/// 布尔组合运算符。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoolOp {
    And,
    Or,
}

impl BoolOp {
    fn as_str(self) -> &'static str {
        match self {
            Self::And => " AND ",
            Self::Or => " OR ",
        }
    }
}

#[derive(Debug, PartialEq)]
enum Node {
    /// 已实例化的原子条件（模板 + 绑定值）。
    Atomic(Fragment),
    Not(Arc<Node>),
    Binary {
        op: BoolOp,
        left: Arc<Node>,
        right: Arc<Node>,
    },
    /// 外部片段提供者（渲染时整体加括号）。
    Raw(Fragment),
}

impl Node {
    fn write(&self, parent: Option<BoolOp>, out: &mut Fragment) {
        match self {
            Self::Atomic(f) => out.append(f),
            Self::Raw(f) => out.append_parenthesized(f),
            Self::Not(child) => {
                out.push_raw("NOT ");
                if let Self::Raw(_) = child.as_ref() {
                    child.write(None, out);
                } else {
                    out.push_raw("(");
                    child.write(None, out);
                    out.push_raw(")");
                }
            }
            Self::Binary { op, left, right } => {
                // 与父节点运算符不同时才加括号；同运算符链保持扁平
                let paren = parent.is_some_and(|p| p != *op);
                if paren {
                    out.push_raw("(");
                }
                left.write(Some(*op), out);
                out.push_raw(op.as_str());
                right.write(Some(*op), out);
                if paren {
                    out.push_raw(")");
                }
            }
        }
    }
}

/// 条件表达式树。克隆只复制根指针。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Clauses {
    root: Option<Arc<Node>>,
}

/// 可以作为 `and` / `or` 右侧的值。
pub trait IntoClauses {
    fn into_clauses(self) -> Clauses;
}

impl IntoClauses for Clauses {
    fn into_clauses(self) -> Clauses {
        self
    }
}

impl IntoClauses for &Clauses {
    fn into_clauses(self) -> Clauses {
        self.clone()
    }
}

/// 由外部对象提供一棵预先构建好的条件树。
pub trait ClausesProvider {
    fn get_clauses(&self) -> Clauses;
}

impl Clauses {
    pub fn new() -> Self {
        Self::default()
    }

    /// 是否为空树（例如所有可选条件都因值无效被省略）。
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    fn leaf(node: Node) -> Self {
        Self {
            root: Some(Arc::new(node)),
        }
    }

    fn atomic_fragment(f: Fragment) -> Self {
        Self::leaf(Node::Atomic(f))
    }

    /// 不含绑定值的原子条件（如 `t.i = u.a`）；空白文本得到空树。
    pub fn expr(text: impl Into<String>) -> Self {
        let text = text.into();
        if text.trim().is_empty() {
            return Self::new();
        }
        Self::atomic_fragment(Fragment::raw(text))
    }

    /// 用模板与参数构造原子条件；模板为空或占位符数量与参数不符时返回 `InvalidArgument`。
    pub fn atomic(template: impl AsRef<str>, args: Vec<Arg>) -> Result<Self> {
        let f = Fragment::from_template(template.as_ref(), args)?;
        Ok(Self::atomic_fragment(f))
    }

    /// 模板工厂生成的模板：开头的列名原样输出，只解析其后的部分。
    fn made(column: &str, template: &str, args: Vec<Arg>) -> Result<Self> {
        let (prefix, rest) = split_column(column, template);
        let f = Fragment::raw(prefix).concat(Fragment::from_template(rest, args)?);
        Ok(Self::atomic_fragment(f))
    }

    /// 把任意片段提供者作为一个（加括号的）原子操作数拼入；空片段得到空树。
    pub fn raw(provider: &dyn Builder) -> Self {
        let f = provider.to_fragment();
        if f.is_empty() {
            return Self::new();
        }
        Self::leaf(Node::Raw(f))
    }

    /// 用内置模板工厂生成条件：列名原样输出，其后每个 `?` 依次填入一个参数。
    fn from_maker(column: &str, maker: fn(&str) -> String, args: Vec<Arg>) -> Self {
        let template = maker(column);
        let (prefix, rest) = split_column(column, &template);
        let mut f = Fragment::raw(prefix);
        let mut args = args.into_iter();
        for (i, piece) in rest.split('?').enumerate() {
            if i > 0 {
                if let Some(arg) = args.next() {
                    f.push_expanded(arg);
                }
            }
            f.push_raw(piece);
        }
        Self::atomic_fragment(f)
    }

    fn compare(column: &str, maker: fn(&str) -> String, value: impl Into<SqlValue>) -> Self {
        Self::from_maker(column, maker, vec![Arg::Value(value.into())])
    }

    pub fn equals(column: &str, value: impl Into<SqlValue>) -> Self {
        Self::compare(column, clause::equals_to, value)
    }

    pub fn not_equals(column: &str, value: impl Into<SqlValue>) -> Self {
        Self::compare(column, clause::not_equals, value)
    }

    pub fn greater(column: &str, value: impl Into<SqlValue>) -> Self {
        Self::compare(column, clause::greater, value)
    }

    pub fn greater_equals(column: &str, value: impl Into<SqlValue>) -> Self {
        Self::compare(column, clause::greater_equals, value)
    }

    pub fn lesser(column: &str, value: impl Into<SqlValue>) -> Self {
        Self::compare(column, clause::lesser, value)
    }

    pub fn lesser_equals(column: &str, value: impl Into<SqlValue>) -> Self {
        Self::compare(column, clause::lesser_equals, value)
    }

    pub fn like(column: &str, value: impl Into<SqlValue>) -> Self {
        Self::compare(column, clause::like, value)
    }

    pub fn not_like(column: &str, value: impl Into<SqlValue>) -> Self {
        Self::compare(column, clause::not_like, value)
    }

    /// `column BETWEEN ? AND ?`；两端为同类可比较值且 `lower > upper` 时返回 `InvalidArgument`。
    pub fn between(
        column: &str,
        lower: impl Into<SqlValue>,
        upper: impl Into<SqlValue>,
    ) -> Result<Self> {
        Self::range(column, clause::between, lower.into(), upper.into())
    }

    pub fn not_between(
        column: &str,
        lower: impl Into<SqlValue>,
        upper: impl Into<SqlValue>,
    ) -> Result<Self> {
        Self::range(column, clause::not_between, lower.into(), upper.into())
    }

    fn range(
        column: &str,
        maker: fn(&str) -> String,
        lower: SqlValue,
        upper: SqlValue,
    ) -> Result<Self> {
        check_range_order(column, &lower, &upper)?;
        Ok(Self::from_maker(column, maker, vec![Arg::Value(lower), Arg::Value(upper)]))
    }

    /// `column IN (?, ?, ...)`；空集合渲染为恒假的 `0 = 1`。
    pub fn in_(column: &str, values: impl IntoIterator<Item = impl Into<SqlValue>>) -> Self {
        Self::membership(column, clause::in_, values, "0 = 1")
    }

    /// `column NOT IN (?, ?, ...)`；空集合渲染为恒真的 `0 = 0`。
    pub fn not_in(column: &str, values: impl IntoIterator<Item = impl Into<SqlValue>>) -> Self {
        Self::membership(column, clause::not_in, values, "0 = 0")
    }

    fn membership(
        column: &str,
        maker: fn(&str) -> String,
        values: impl IntoIterator<Item = impl Into<SqlValue>>,
        when_empty: &str,
    ) -> Self {
        let values = crate::modifiers::list(values);
        if values.is_empty() {
            return Self::expr(when_empty);
        }
        Self::from_maker(column, maker, vec![values])
    }

    /// `column IN (<子查询>)`，子查询的绑定值按位置拼入。
    pub fn in_query(column: &str, subquery: &dyn Builder) -> Self {
        Self::membership_query(column, "IN", subquery)
    }

    pub fn not_in_query(column: &str, subquery: &dyn Builder) -> Self {
        Self::membership_query(column, "NOT IN", subquery)
    }

    fn membership_query(column: &str, op: &str, subquery: &dyn Builder) -> Self {
        let mut f = Fragment::raw(format!("{column} {op} "));
        f.append_parenthesized(&subquery.to_fragment());
        Self::atomic_fragment(f)
    }

    /// 静态字面量列表：`column IN ('a', 'b')`，字面量需事先用 `format_text` 等格式化。
    pub fn in_literals(column: &str, literals: impl IntoIterator<Item = impl AsRef<str>>) -> Self {
        Self::membership_literals(column, "IN", literals, "0 = 1")
    }

    pub fn not_in_literals(
        column: &str,
        literals: impl IntoIterator<Item = impl AsRef<str>>,
    ) -> Self {
        Self::membership_literals(column, "NOT IN", literals, "0 = 0")
    }

    fn membership_literals(
        column: &str,
        op: &str,
        literals: impl IntoIterator<Item = impl AsRef<str>>,
        when_empty: &str,
    ) -> Self {
        let items: Vec<String> = literals
            .into_iter()
            .map(|s| s.as_ref().to_string())
            .collect();
        if items.is_empty() {
            return Self::expr(when_empty);
        }
        Self::expr(format!("{column} {op} {}", crate::modifiers::to_sql_list(items)))
    }

    pub fn is_null(column: &str) -> Self {
        Self::expr(format!("{column} IS NULL"))
    }

    pub fn is_not_null(column: &str) -> Self {
        Self::expr(format!("{column} IS NOT NULL"))
    }

    pub fn exists(subquery: &dyn Builder) -> Self {
        let mut f = Fragment::raw("EXISTS ");
        f.append_parenthesized(&subquery.to_fragment());
        Self::atomic_fragment(f)
    }

    pub fn not_exists(subquery: &dyn Builder) -> Self {
        let mut f = Fragment::raw("NOT EXISTS ");
        f.append_parenthesized(&subquery.to_fragment());
        Self::atomic_fragment(f)
    }

    /// `NOT (...)`；对空树取反仍是空树。
    pub fn not(clauses: impl IntoClauses) -> Self {
        match clauses.into_clauses().root {
            Some(child) => Self::leaf(Node::Not(child)),
            None => Self::new(),
        }
    }

    /// 可选条件：值按默认策略（[`IsValidValue`]）校验，无效时返回空树。
    pub fn when<T>(column: &str, maker: impl ClauseMaker, value: T) -> Result<Self>
    where
        T: IsValidValue + Into<Arg>,
    {
        Self::when_with(column, maker, value, DefaultChecker)
    }

    /// 可选条件：值由 `checker` 校验，无效时返回空树。
    pub fn when_with<T, C>(column: &str, maker: impl ClauseMaker, value: T, checker: C) -> Result<Self>
    where
        T: Into<Arg>,
        C: ValueChecker<T>,
    {
        let template = make_template(column, &maker, 1)?;
        if !checker.is_valid(&value) {
            trace_skipped(column);
            return Ok(Self::new());
        }
        Self::made(column, &template, vec![value.into()])
    }

    /// 两个值的可选条件（BETWEEN 一类）：两端都有效才会拼入。
    pub fn when_between<T>(column: &str, maker: impl ClauseMaker, lower: T, upper: T) -> Result<Self>
    where
        T: IsValidValue + Into<Arg>,
    {
        Self::when_between_with(column, maker, lower, upper, DefaultChecker)
    }

    pub fn when_between_with<T, C>(
        column: &str,
        maker: impl ClauseMaker,
        lower: T,
        upper: T,
        checker: C,
    ) -> Result<Self>
    where
        T: Into<Arg>,
        C: ValueChecker<T>,
    {
        let template = make_template(column, &maker, 2)?;
        if !checker.is_valid(&lower) || !checker.is_valid(&upper) {
            trace_skipped(column);
            return Ok(Self::new());
        }
        let lower = lower.into();
        let upper = upper.into();
        if let (Arg::Value(l), Arg::Value(u)) = (&lower, &upper) {
            check_range_order(column, l, u)?;
        }
        Self::made(column, &template, vec![lower, upper])
    }

    fn combine(self, op: BoolOp, other: Clauses) -> Self {
        match (self.root, other.root) {
            (None, right) => Self { root: right },
            (left, None) => Self { root: left },
            (Some(left), Some(right)) => Self::leaf(Node::Binary { op, left, right }),
        }
    }

    /// `self AND other`；任一侧为空时返回另一侧。
    pub fn and(self, other: impl IntoClauses) -> Self {
        self.combine(BoolOp::And, other.into_clauses())
    }

    /// `self OR other`；任一侧为空时返回另一侧。
    pub fn or(self, other: impl IntoClauses) -> Self {
        self.combine(BoolOp::Or, other.into_clauses())
    }

    pub fn and_provider(self, provider: &dyn ClausesProvider) -> Self {
        self.and(provider.get_clauses())
    }

    pub fn or_provider(self, provider: &dyn ClausesProvider) -> Self {
        self.or(provider.get_clauses())
    }

    /// 追加一个按默认策略校验的可选 AND 条件。
    pub fn and_when<T>(self, column: &str, maker: impl ClauseMaker, value: T) -> Result<Self>
    where
        T: IsValidValue + Into<Arg>,
    {
        Ok(self.and(Self::when(column, maker, value)?))
    }

    /// 追加一个按默认策略校验的可选 OR 条件。
    pub fn or_when<T>(self, column: &str, maker: impl ClauseMaker, value: T) -> Result<Self>
    where
        T: IsValidValue + Into<Arg>,
    {
        Ok(self.or(Self::when(column, maker, value)?))
    }

    pub fn build(&self) -> SqlQuery {
        Builder::build(self)
    }

    pub fn build_with_dialect(&self, dialect: Dialect) -> SqlQuery {
        Builder::build_with_dialect(self, dialect)
    }
}

impl Builder for Clauses {
    fn write_fragment(&self, out: &mut Fragment) {
        if let Some(root) = &self.root {
            root.write(None, out);
        }
    }
}

impl std::ops::Not for Clauses {
    type Output = Clauses;

    fn not(self) -> Clauses {
        Clauses::not(self)
    }
}

impl<T: IntoClauses> std::ops::BitAnd<T> for Clauses {
    type Output = Clauses;

    fn bitand(self, rhs: T) -> Clauses {
        self.and(rhs)
    }
}

impl<T: IntoClauses> std::ops::BitOr<T> for Clauses {
    type Output = Clauses;

    fn bitor(self, rhs: T) -> Clauses {
        self.or(rhs)
    }
}

/// 生成并校验模板：模板错误属于编程错误，无论值是否有效都要报告。
fn make_template(column: &str, maker: &impl ClauseMaker, values: usize) -> Result<String> {
    if column.trim().is_empty() {
        return Err(Error::invalid("clause column is empty"));
    }
    let template = maker.make_clause(column);
    if template.trim().is_empty() {
        return Err(Error::invalid(format!(
            "clause maker produced an empty template for `{column}`"
        )));
    }
    let (_, rest) = split_column(column, &template);
    let expected = count_placeholders(rest);
    if expected != values {
        return Err(Error::invalid(format!(
            "clause template `{template}` has {expected} placeholder(s) but {values} value(s) were supplied"
        )));
    }
    Ok(template)
}

/// 模板以列名开头时拆成 `(列名, 其余部分)`；列名中的 `?` 不算占位符。
fn split_column<'a>(column: &str, template: &'a str) -> (&'a str, &'a str) {
    match template.strip_prefix(column) {
        Some(rest) => template.split_at(template.len() - rest.len()),
        None => ("", template),
    }
}

fn check_range_order(column: &str, lower: &SqlValue, upper: &SqlValue) -> Result<()> {
    if lower.compare_same_kind(upper) == Some(Ordering::Greater) {
        return Err(Error::invalid(format!(
            "range on `{column}` has lower bound {lower:?} after upper bound {upper:?}"
        )));
    }
    Ok(())
}

#[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
fn trace_skipped(column: &str) {
    #[cfg(feature = "tracing")]
    tracing::trace!(column, "optional clause skipped: value rejected by checker");
}
