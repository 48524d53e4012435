//! Source：FROM 子句与 JOIN 列表。
//!
//! 基础数据源可以是表名，也可以是子查询（渲染为 `(...) alias`，其绑定值就地拼入）。
//! 每次 join 调用追加一个 [`Join`]，按调用顺序渲染。别名冲突不做检查。
//! 需要 ON 条件的连接如果条件树为空，整个连接都不输出；没有 `from` 时连接也不输出。

use crate::builder::Builder;
use crate::clauses::Clauses;
use crate::error::{Error, Result};
use crate::fragment::Fragment;

/// JoinKind：连接方式。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    Inner,
    Left,
    LeftOuter,
    Right,
    RightOuter,
    Full,
    FullOuter,
    Cross,
    Natural,
    /// 逗号风格的笛卡尔积：`FROM a, a a_1`。
    SelfJoin,
}

impl JoinKind {
    fn keyword(self) -> &'static str {
        match self {
            Self::Inner => "INNER JOIN",
            Self::Left => "LEFT JOIN",
            Self::LeftOuter => "LEFT OUTER JOIN",
            Self::Right => "RIGHT JOIN",
            Self::RightOuter => "RIGHT OUTER JOIN",
            Self::Full => "FULL JOIN",
            Self::FullOuter => "FULL OUTER JOIN",
            Self::Cross => "CROSS JOIN",
            Self::Natural => "NATURAL JOIN",
            Self::SelfJoin => ",",
        }
    }

    /// 是否带 ON 条件。
    pub fn takes_condition(self) -> bool {
        !matches!(self, Self::Cross | Self::Natural | Self::SelfJoin)
    }
}

/// 一个 JOIN 条目。
#[derive(Debug, Clone, PartialEq)]
pub struct Join {
    kind: JoinKind,
    source: Fragment,
    alias: Option<String>,
    on: Clauses,
}

impl Join {
    pub fn kind(&self) -> JoinKind {
        self.kind
    }

    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    /// 需要条件的连接在条件树为空（可选条件全部被省略）时不输出。
    pub fn is_omitted(&self) -> bool {
        self.kind.takes_condition() && self.on.is_empty()
    }

    fn write(&self, out: &mut Fragment) {
        if self.is_omitted() {
            return;
        }
        if self.kind == JoinKind::SelfJoin {
            out.push_raw(", ");
        } else {
            out.push_leading(self.kind.keyword());
            out.push_raw(" ");
        }
        out.append(&self.source);
        if let Some(alias) = &self.alias {
            out.push_raw(" ");
            out.push_raw(alias.as_str());
        }
        if !self.on.is_empty() {
            out.push_raw(" ON ");
            self.on.write_fragment(out);
        }
    }
}

/// FROM 数据源与连接列表。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Source {
    base: Option<Fragment>,
    base_table: Option<String>,
    joins: Vec<Join>,
}

pub(crate) fn subquery_fragment(sub: &dyn Builder) -> Fragment {
    let mut f = Fragment::new();
    f.append_parenthesized(&sub.to_fragment());
    f
}

/// 纯文本数据源的最后一个单词（`"tutu u"` 得到 `u`）。
fn trailing_word(f: &Fragment) -> Option<&str> {
    f.as_raw_text()
        .and_then(|t| t.split_whitespace().last())
}

impl Source {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.base.is_none() && self.joins.is_empty()
    }

    pub fn joins(&self) -> &[Join] {
        &self.joins
    }

    /// 基础表名（`from("tutu u")` 得到 `tutu`）；子查询数据源没有表名。
    pub fn base_table(&self) -> Option<&str> {
        self.base_table.as_deref()
    }

    /// 设置基础表（可带别名，如 `"toto t"`）；再次调用会替换。
    pub fn set_table(&mut self, table: impl Into<String>) -> &mut Self {
        let table = table.into();
        self.base_table = table.split_whitespace().next().map(str::to_string);
        self.base = Some(Fragment::raw(table));
        self
    }

    /// 设置子查询数据源：`(sub) alias`。
    pub fn set_query(&mut self, sub: &dyn Builder, alias: Option<&str>) -> &mut Self {
        let mut f = subquery_fragment(sub);
        if let Some(alias) = alias {
            f.push_raw(" ");
            f.push_raw(alias);
        }
        self.base_table = None;
        self.base = Some(f);
        self
    }

    pub(crate) fn add_join(
        &mut self,
        kind: JoinKind,
        source: Fragment,
        alias: Option<String>,
        on: Clauses,
    ) -> &mut Self {
        self.joins.push(Join {
            kind,
            source,
            alias,
            on,
        });
        self
    }

    /// 追加一个连接。
    ///
    /// 不带条件的连接方式（CROSS / NATURAL / 逗号）传入非空 `on` 时返回 `InvalidArgument`。
    pub fn push_join(
        &mut self,
        kind: JoinKind,
        source: Fragment,
        alias: Option<String>,
        on: Clauses,
    ) -> Result<&mut Self> {
        if !kind.takes_condition() && !on.is_empty() {
            return Err(Error::invalid(format!(
                "{kind:?} join does not take an ON condition"
            )));
        }
        Ok(self.add_join(kind, source, alias, on))
    }

    pub fn join_table(
        &mut self,
        kind: JoinKind,
        table: impl Into<String>,
        on: Clauses,
    ) -> Result<&mut Self> {
        self.push_join(kind, Fragment::raw(table), None, on)
    }

    pub fn join_query(
        &mut self,
        kind: JoinKind,
        sub: &dyn Builder,
        alias: impl Into<String>,
        on: Clauses,
    ) -> Result<&mut Self> {
        self.push_join(kind, subquery_fragment(sub), Some(alias.into()), on)
    }

    /// 与基础表自身做笛卡尔积；`alias` 为空时自动生成未被占用的 `<table>_<n>`。
    pub fn self_join(&mut self, alias: Option<&str>) -> Result<&mut Self> {
        let Some(table) = self.base_table.clone() else {
            return Err(Error::invalid(
                "self join requires a base table set with `from`",
            ));
        };
        let alias = match alias {
            Some(a) => a.to_string(),
            None => {
                let mut n = self
                    .joins
                    .iter()
                    .filter(|j| j.kind == JoinKind::SelfJoin)
                    .count()
                    + 1;
                loop {
                    let candidate = format!("{table}_{n}");
                    if !self.alias_in_use(&candidate) {
                        break candidate;
                    }
                    n += 1;
                }
            }
        };
        Ok(self.add_join(JoinKind::SelfJoin, Fragment::raw(table), Some(alias), Clauses::new()))
    }

    /// 别名是否已被基础表或某个连接使用（包括 `"tutu u"` 这种写在表名里的别名）。
    fn alias_in_use(&self, alias: &str) -> bool {
        self.base.as_ref().and_then(trailing_word) == Some(alias)
            || self
                .joins
                .iter()
                .any(|j| j.alias.as_deref() == Some(alias) || trailing_word(&j.source) == Some(alias))
    }
}

impl Builder for Source {
    fn write_fragment(&self, out: &mut Fragment) {
        // 没有基础数据源时连接无处可挂，整个 FROM 都不输出
        let Some(base) = &self.base else {
            return;
        };
        out.push_leading("FROM ");
        out.append(base);
        for join in &self.joins {
            join.write(out);
        }
    }
}
