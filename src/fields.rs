//! 字段列表：SELECT 投影、GROUP BY、ORDER BY 共用的有序条目。

use crate::builder::Builder;
use crate::fragment::Fragment;

/// 排序方向。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// 一个字段条目：表达式 + 可选别名 + 可选排序方向。
#[derive(Debug, Clone, PartialEq)]
pub struct FieldEntry {
    expression: Fragment,
    alias: Option<String>,
    direction: Option<Direction>,
}

impl FieldEntry {
    pub fn new(expression: Fragment) -> Self {
        Self {
            expression,
            alias: None,
            direction: None,
        }
    }

    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    pub fn direction(&self) -> Option<Direction> {
        self.direction
    }

    fn write(&self, out: &mut Fragment) {
        out.append(&self.expression);
        if let Some(alias) = &self.alias {
            out.push_raw(" AS ");
            out.push_raw(alias.as_str());
        }
        if let Some(dir) = self.direction {
            out.push_raw(" ");
            out.push_raw(dir.as_str());
        }
    }
}

/// 有序字段列表。`as_` / `asc` / `desc` 只修改最后追加的条目。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fields {
    entries: Vec<FieldEntry>,
}

impl Fields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn entries(&self) -> &[FieldEntry] {
        &self.entries
    }

    /// 追加一个纯文本字段（列名或表达式）。
    pub fn field(&mut self, expr: impl Into<String>) -> &mut Self {
        self.push(Fragment::raw(expr))
    }

    /// 追加一个片段字段（可以携带绑定值，例如标量子查询）。
    pub fn push(&mut self, expression: Fragment) -> &mut Self {
        self.entries.push(FieldEntry::new(expression));
        self
    }

    /// 给最后一个条目设置别名；列表为空时忽略。
    pub fn as_(&mut self, alias: impl Into<String>) -> &mut Self {
        if let Some(last) = self.entries.last_mut() {
            last.alias = Some(alias.into());
        }
        self
    }

    pub fn asc(&mut self) -> &mut Self {
        self.set_direction(Direction::Asc)
    }

    pub fn desc(&mut self) -> &mut Self {
        self.set_direction(Direction::Desc)
    }

    fn set_direction(&mut self, dir: Direction) -> &mut Self {
        if let Some(last) = self.entries.last_mut() {
            last.direction = Some(dir);
        }
        self
    }
}

impl Builder for Fields {
    fn write_fragment(&self, out: &mut Fragment) {
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                out.push_raw(", ");
            }
            entry.write(out);
        }
    }
}
