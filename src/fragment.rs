//! SQL 片段：文本与绑定值交错排列，渲染时才生成占位符。

use crate::dialect::Dialect;
use crate::error::{Error, Result};
use crate::modifiers::Arg;
use crate::query::SqlQuery;
use crate::value::SqlValue;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Part {
    Sql(String),
    Arg(SqlValue),
    /// 模板里的 `??`：`?` 方言下保留为 `??`，否则渲染为 `?`。
    LiteralQuestion,
}

/// 一个可组合的 SQL 片段。
///
/// 片段内部不保存占位符文本，只记录绑定值所在位置；
/// 因此片段可以被拼接到任意语句中，渲染时统一编号。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fragment {
    pub(crate) parts: Vec<Part>,
}

impl Fragment {
    pub fn new() -> Self {
        Self::default()
    }

    /// 直接插入一段 SQL 文本（不会变成参数）。
    pub fn raw(sql: impl Into<String>) -> Self {
        let mut f = Self::new();
        f.push_raw(sql);
        f
    }

    /// 用模板实例化片段：`?` 为占位符，`??` 为字面量 `?`。
    ///
    /// 每个占位符依次消费一个参数；列表参数展开成逗号分隔的多个占位符。
    /// 字面量 `?` 在 [`Dialect::QuestionMark`] 下渲染为 `??`，保证文本中的 `?` 个数与绑定值个数一致。
    pub fn from_template(template: &str, args: Vec<Arg>) -> Result<Self> {
        if template.trim().is_empty() {
            return Err(Error::invalid("clause template is empty"));
        }

        let expected = count_placeholders(template);
        if expected != args.len() {
            return Err(Error::invalid(format!(
                "clause template `{template}` has {expected} placeholder(s) but {} value(s) were supplied",
                args.len()
            )));
        }
        if args.iter().any(Arg::is_empty) {
            return Err(Error::invalid(format!(
                "clause template `{template}` was given an empty value list"
            )));
        }

        let mut f = Self::new();
        let mut args = args.into_iter();
        let mut text = String::new();
        let mut chars = template.chars().peekable();
        while let Some(c) = chars.next() {
            if c != '?' {
                text.push(c);
                continue;
            }
            if chars.peek() == Some(&'?') {
                chars.next();
                f.push_raw(std::mem::take(&mut text));
                f.parts.push(Part::LiteralQuestion);
                continue;
            }

            f.push_raw(std::mem::take(&mut text));
            // 数量已在上面校验过
            if let Some(arg) = args.next() {
                f.push_expanded(arg);
            }
        }
        f.push_raw(text);
        Ok(f)
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// 只含一段纯文本时返回该文本。
    pub(crate) fn as_raw_text(&self) -> Option<&str> {
        match self.parts.as_slice() {
            [Part::Sql(s)] => Some(s.as_str()),
            _ => None,
        }
    }

    /// 追加 SQL 文本（与前一段文本合并）。
    pub fn push_raw(&mut self, sql: impl Into<String>) {
        let sql = sql.into();
        if sql.is_empty() {
            return;
        }
        if let Some(Part::Sql(last)) = self.parts.last_mut() {
            last.push_str(&sql);
            return;
        }
        self.parts.push(Part::Sql(sql));
    }

    /// 写入 `sql`；如果片段非空，会先写入一个空格。
    pub fn push_leading(&mut self, sql: &str) {
        if !self.is_empty() {
            self.push_raw(" ");
        }
        self.push_raw(sql);
    }

    /// 追加一个参数（构建时会生成占位符）。
    pub fn push_arg(&mut self, v: impl Into<SqlValue>) {
        self.parts.push(Part::Arg(v.into()));
    }

    /// 追加一个参数；列表参数展开成逗号分隔的多个绑定值。
    pub(crate) fn push_expanded(&mut self, arg: Arg) {
        match arg {
            Arg::Value(v) => self.push_arg(v),
            Arg::List(values) => {
                for (i, v) in values.into_iter().enumerate() {
                    if i > 0 {
                        self.push_raw(", ");
                    }
                    self.push_arg(v);
                }
            }
        }
    }

    /// 原样拼接另一个片段，绑定值保持在其占位符所在的位置。
    pub fn append(&mut self, other: &Fragment) {
        for part in &other.parts {
            match part {
                Part::Sql(s) => self.push_raw(s.as_str()),
                Part::Arg(v) => self.parts.push(Part::Arg(v.clone())),
                Part::LiteralQuestion => self.parts.push(Part::LiteralQuestion),
            }
        }
    }

    /// 拼接 `(other)`。
    pub fn append_parenthesized(&mut self, other: &Fragment) {
        self.push_raw("(");
        self.append(other);
        self.push_raw(")");
    }

    /// 将当前片段与另一个片段连接（不自动添加空格）。
    pub fn concat(mut self, other: Fragment) -> Self {
        self.append(&other);
        self
    }

    /// 片段中绑定值的数量（等于渲染后占位符的数量）。
    pub fn arg_count(&self) -> usize {
        self.parts
            .iter()
            .filter(|p| matches!(p, Part::Arg(_)))
            .count()
    }

    /// 按方言渲染成最终的语句文本与参数列表。
    pub fn render(&self, dialect: Dialect) -> SqlQuery {
        let mut sql = String::new();
        let mut args = Vec::new();

        for part in &self.parts {
            match part {
                Part::Sql(s) => sql.push_str(s),
                Part::Arg(v) => {
                    let idx = args.len() + 1;
                    dialect.write_placeholder(idx, &mut sql);
                    args.push(v.clone());
                }
                Part::LiteralQuestion => dialect.write_literal_question(&mut sql),
            }
        }

        SqlQuery::new(sql, args, self.clone())
    }
}

pub(crate) fn count_placeholders(template: &str) -> usize {
    let mut n = 0;
    let mut chars = template.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '?' {
            if chars.peek() == Some(&'?') {
                chars.next();
            } else {
                n += 1;
            }
        }
    }
    n
}
