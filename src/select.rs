//! SelectBuilder：构建 SELECT 语句。
//!
//! 各部分按固定的语法顺序渲染：SELECT 列表、FROM + JOIN、WHERE、GROUP BY、HAVING、
//! ORDER BY、OFFSET/FETCH，最后是 UNION。绑定值的顺序与占位符在最终文本中的出现顺序一致。

use crate::builder::Builder;
use crate::clauses::{Clauses, IntoClauses};
use crate::dialect::Dialect;
use crate::error::{Error, Result};
use crate::fields::Fields;
use crate::fragment::Fragment;
use crate::from::{JoinKind, Source, subquery_fragment};
use crate::query::SqlQuery;
use crate::window::{WindowFunction, window_expression};

/// `as_` / `asc` / `desc` 作用的字段列表。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum SelectMarker {
    #[default]
    Select,
    GroupBy,
    OrderBy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UnionKind {
    Union,
    UnionAll,
}

impl UnionKind {
    fn as_str(self) -> &'static str {
        match self {
            Self::Union => "UNION",
            Self::UnionAll => "UNION ALL",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SelectBuilder {
    distinct: bool,
    fields: Fields,
    source: Source,
    where_: Clauses,
    group_by: Fields,
    having: Clauses,
    order_by: Fields,
    offset: Option<i64>,
    fetch: Option<i64>,
    unions: Vec<(UnionKind, Fragment)>,

    marker: SelectMarker,
}

/// 创建 SELECT builder。
pub fn select() -> SelectBuilder {
    SelectBuilder::new()
}

/// 创建 SELECT DISTINCT builder。
pub fn select_distinct() -> SelectBuilder {
    let mut sb = SelectBuilder::new();
    sb.distinct();
    sb
}

impl SelectBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn distinct(&mut self) -> &mut Self {
        self.distinct = true;
        self.marker = SelectMarker::Select;
        self
    }

    /// 追加一个投影字段（列名或表达式）。
    pub fn field(&mut self, expr: impl Into<String>) -> &mut Self {
        self.fields.field(expr);
        self.marker = SelectMarker::Select;
        self
    }

    /// 追加多个投影字段。
    pub fn fields<T>(&mut self, exprs: T) -> &mut Self
    where
        T: IntoIterator,
        T::Item: Into<String>,
    {
        for expr in exprs {
            self.fields.field(expr);
        }
        self.marker = SelectMarker::Select;
        self
    }

    /// 投影一个标量子查询：`(sub)`。
    pub fn field_query(&mut self, sub: &dyn Builder) -> &mut Self {
        let mut f = Fragment::new();
        f.append_parenthesized(&sub.to_fragment());
        self.fields.push(f);
        self.marker = SelectMarker::Select;
        self
    }

    /// 投影一个带别名的标量子查询：`(sub) AS alias`。
    pub fn field_query_as(&mut self, sub: &dyn Builder, alias: impl Into<String>) -> &mut Self {
        self.field_query(sub);
        self.fields.as_(alias);
        self
    }

    /// 给最近追加的字段设置别名（投影 / GROUP BY / ORDER BY 中最后调用的那一个）。
    pub fn as_(&mut self, alias: impl Into<String>) -> &mut Self {
        self.current_fields().as_(alias);
        self
    }

    pub fn asc(&mut self) -> &mut Self {
        self.current_fields().asc();
        self
    }

    pub fn desc(&mut self) -> &mut Self {
        self.current_fields().desc();
        self
    }

    fn current_fields(&mut self) -> &mut Fields {
        match self.marker {
            SelectMarker::Select => &mut self.fields,
            SelectMarker::GroupBy => &mut self.group_by,
            SelectMarker::OrderBy => &mut self.order_by,
        }
    }

    pub fn from(&mut self, table: impl Into<String>) -> &mut Self {
        self.source.set_table(table);
        self
    }

    /// FROM 子查询（不带别名）。`SqlQuery` 也可以作为子查询传入。
    pub fn from_query(&mut self, sub: &dyn Builder) -> &mut Self {
        self.source.set_query(sub, None);
        self
    }

    pub fn from_query_as(&mut self, sub: &dyn Builder, alias: &str) -> &mut Self {
        self.source.set_query(sub, Some(alias));
        self
    }

    /// `INNER JOIN`。
    pub fn join(&mut self, table: impl Into<String>, on: Clauses) -> &mut Self {
        self.add_table_join(JoinKind::Inner, table, on)
    }

    /// 指定连接方式；CROSS / NATURAL / 逗号连接传入非空 `on` 时返回 `InvalidArgument`。
    pub fn join_with_option(
        &mut self,
        kind: JoinKind,
        table: impl Into<String>,
        on: Clauses,
    ) -> Result<&mut Self> {
        self.source.join_table(kind, table, on)?;
        Ok(self)
    }

    pub fn join_query_with_option(
        &mut self,
        kind: JoinKind,
        sub: &dyn Builder,
        alias: impl Into<String>,
        on: Clauses,
    ) -> Result<&mut Self> {
        self.source.join_query(kind, sub, alias, on)?;
        Ok(self)
    }

    // 以下便捷方法的连接方式与 `on` 总是匹配，不需要校验
    fn add_table_join(&mut self, kind: JoinKind, table: impl Into<String>, on: Clauses) -> &mut Self {
        self.source.add_join(kind, Fragment::raw(table), None, on);
        self
    }

    fn add_query_join(&mut self, kind: JoinKind, sub: &dyn Builder, alias: impl Into<String>) -> &mut Self {
        self.source
            .add_join(kind, subquery_fragment(sub), Some(alias.into()), Clauses::new());
        self
    }

    pub fn inner_join(&mut self, table: impl Into<String>, on: Clauses) -> &mut Self {
        self.add_table_join(JoinKind::Inner, table, on)
    }

    pub fn left_join(&mut self, table: impl Into<String>, on: Clauses) -> &mut Self {
        self.add_table_join(JoinKind::Left, table, on)
    }

    pub fn left_outer_join(&mut self, table: impl Into<String>, on: Clauses) -> &mut Self {
        self.add_table_join(JoinKind::LeftOuter, table, on)
    }

    pub fn right_join(&mut self, table: impl Into<String>, on: Clauses) -> &mut Self {
        self.add_table_join(JoinKind::Right, table, on)
    }

    pub fn right_outer_join(&mut self, table: impl Into<String>, on: Clauses) -> &mut Self {
        self.add_table_join(JoinKind::RightOuter, table, on)
    }

    pub fn full_join(&mut self, table: impl Into<String>, on: Clauses) -> &mut Self {
        self.add_table_join(JoinKind::Full, table, on)
    }

    pub fn full_outer_join(&mut self, table: impl Into<String>, on: Clauses) -> &mut Self {
        self.add_table_join(JoinKind::FullOuter, table, on)
    }

    pub fn natural_join(&mut self, table: impl Into<String>) -> &mut Self {
        self.add_table_join(JoinKind::Natural, table, Clauses::new())
    }

    pub fn natural_join_query(&mut self, sub: &dyn Builder, alias: impl Into<String>) -> &mut Self {
        self.add_query_join(JoinKind::Natural, sub, alias)
    }

    pub fn cross_join(&mut self, table: impl Into<String>) -> &mut Self {
        self.add_table_join(JoinKind::Cross, table, Clauses::new())
    }

    pub fn cross_join_query(&mut self, sub: &dyn Builder, alias: impl Into<String>) -> &mut Self {
        self.add_query_join(JoinKind::Cross, sub, alias)
    }

    /// 与 FROM 的基础表自身连接；`alias` 为 `None` 时自动生成别名。
    pub fn self_join(&mut self, alias: Option<&str>) -> Result<&mut Self> {
        self.source.self_join(alias)?;
        Ok(self)
    }

    /// 逗号风格的连接：`FROM a, b`。
    pub fn self_join_table(&mut self, table: impl Into<String>) -> &mut Self {
        self.add_table_join(JoinKind::SelfJoin, table, Clauses::new())
    }

    pub fn self_join_query(&mut self, sub: &dyn Builder, alias: impl Into<String>) -> &mut Self {
        self.add_query_join(JoinKind::SelfJoin, sub, alias)
    }

    /// 设置 WHERE 条件；多次调用以 AND 合并。条件树为空时不输出 WHERE。
    pub fn where_(&mut self, clauses: impl IntoClauses) -> &mut Self {
        self.where_ = std::mem::take(&mut self.where_).and(clauses);
        self
    }

    pub fn group_by(&mut self, col: impl Into<String>) -> &mut Self {
        self.group_by.field(col);
        self.marker = SelectMarker::GroupBy;
        self
    }

    /// HAVING 条件；多次调用以 AND 合并。
    pub fn having(&mut self, clauses: impl IntoClauses) -> &mut Self {
        self.having = std::mem::take(&mut self.having).and(clauses);
        self
    }

    pub fn order_by(&mut self, col: impl Into<String>) -> &mut Self {
        self.order_by.field(col);
        self.marker = SelectMarker::OrderBy;
        self
    }

    pub fn order_by_asc(&mut self, col: impl Into<String>) -> &mut Self {
        self.order_by(col).asc()
    }

    pub fn order_by_desc(&mut self, col: impl Into<String>) -> &mut Self {
        self.order_by(col).desc()
    }

    /// `FETCH FIRST n ROWS ONLY`；负数返回 `InvalidArgument`。
    pub fn fetch(&mut self, n: i64) -> Result<&mut Self> {
        if n < 0 {
            return Err(Error::invalid(format!("fetch must not be negative, got {n}")));
        }
        self.fetch = Some(n);
        Ok(self)
    }

    /// `OFFSET n ROWS`；负数返回 `InvalidArgument`。
    pub fn offset(&mut self, n: i64) -> Result<&mut Self> {
        if n < 0 {
            return Err(Error::invalid(format!("offset must not be negative, got {n}")));
        }
        self.offset = Some(n);
        Ok(self)
    }

    pub fn union(&mut self, other: &dyn Builder) -> &mut Self {
        self.unions.push((UnionKind::Union, other.to_fragment()));
        self
    }

    pub fn union_all(&mut self, other: &dyn Builder) -> &mut Self {
        self.unions.push((UnionKind::UnionAll, other.to_fragment()));
        self
    }

    /// 投影 `RANK() OVER (...) AS alias`。
    pub fn window_by_rank(
        &mut self,
        partition: &str,
        order: &str,
        alias: &str,
        start: i32,
        end: i32,
    ) -> Result<&mut Self> {
        self.window(WindowFunction::Rank, partition, order, alias, start, end)
    }

    /// 投影 `ROW_NUMBER() OVER (...) AS alias`。
    pub fn window_by_row_number(
        &mut self,
        partition: &str,
        order: &str,
        alias: &str,
        start: i32,
        end: i32,
    ) -> Result<&mut Self> {
        self.window(WindowFunction::RowNumber, partition, order, alias, start, end)
    }

    pub fn window(
        &mut self,
        func: WindowFunction,
        partition: &str,
        order: &str,
        alias: &str,
        start: i32,
        end: i32,
    ) -> Result<&mut Self> {
        let expr = window_expression(func, partition, order, start, end)?;
        self.field(expr);
        if !alias.trim().is_empty() {
            self.as_(alias);
        }
        Ok(self)
    }

    pub fn build(&self) -> SqlQuery {
        Builder::build(self)
    }

    pub fn build_with_dialect(&self, dialect: Dialect) -> SqlQuery {
        Builder::build_with_dialect(self, dialect)
    }
}

impl Builder for SelectBuilder {
    fn write_fragment(&self, out: &mut Fragment) {
        let mut buf = Fragment::new();

        buf.push_raw("SELECT ");
        if self.distinct {
            buf.push_raw("DISTINCT ");
        }
        if self.fields.is_empty() {
            buf.push_raw("*");
        } else {
            self.fields.write_fragment(&mut buf);
        }

        self.source.write_fragment(&mut buf);

        if !self.where_.is_empty() {
            buf.push_leading("WHERE ");
            self.where_.write_fragment(&mut buf);
        }

        if !self.group_by.is_empty() {
            buf.push_leading("GROUP BY ");
            self.group_by.write_fragment(&mut buf);
        }

        if !self.having.is_empty() {
            buf.push_leading("HAVING ");
            self.having.write_fragment(&mut buf);
        }

        if !self.order_by.is_empty() {
            buf.push_leading("ORDER BY ");
            self.order_by.write_fragment(&mut buf);
        }

        if let Some(off) = self.offset {
            buf.push_leading(&format!("OFFSET {off} ROWS"));
        }
        if let Some(n) = self.fetch {
            buf.push_leading(&format!("FETCH FIRST {n} ROWS ONLY"));
        }

        for (kind, child) in &self.unions {
            buf.push_leading(kind.as_str());
            buf.push_raw(" ");
            buf.append(child);
        }

        out.append(&buf);
    }
}
