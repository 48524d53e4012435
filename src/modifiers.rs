//! 参数修饰器与文本格式化辅助函数。

use crate::value::SqlValue;
use std::fmt::Display;

/// 模板占位符所消费的参数。
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    /// 单个绑定值，占用一个占位符。
    Value(SqlValue),
    /// 参数列表：模板中的一个 `?` 会展开成 `?, ?, ?`，每个元素一个绑定值。
    List(Vec<SqlValue>),
}

impl Arg {
    /// 展开后占用的绑定值数量。
    pub fn len(&self) -> usize {
        match self {
            Self::Value(_) => 1,
            Self::List(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// List：标记为参数列表，会展开成 `?, ?, ?`。
pub fn list(values: impl IntoIterator<Item = impl Into<SqlValue>>) -> Arg {
    Arg::List(values.into_iter().map(Into::into).collect())
}

/// FormatText：把值格式化成 SQL 字符串字面量（`'...'`，内部单引号加倍）。
///
/// 只用于必须内联字面量的场景（例如编译期已知常量组成的静态 `IN` 列表），
/// 运行时输入应该走绑定参数。
pub fn format_text(value: impl Display) -> String {
    let s = value.to_string();
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        if c == '\'' {
            out.push('\'');
        }
        out.push(c);
    }
    out.push('\'');
    out
}

/// FormatTexts：批量 FormatText。
pub fn format_texts(values: impl IntoIterator<Item = impl Display>) -> Vec<String> {
    values.into_iter().map(format_text).collect()
}

/// ToSqlList：生成 `(a, b, c)` 形式的列表文本（不做转义）。
pub fn to_sql_list(items: impl IntoIterator<Item = impl AsRef<str>>) -> String {
    let mut s = String::from("(");
    let mut first = true;
    for item in items {
        if !first {
            s.push_str(", ");
        }
        first = false;
        s.push_str(item.as_ref());
    }
    s.push(')');
    s
}

impl From<SqlValue> for Arg {
    fn from(v: SqlValue) -> Self {
        Self::Value(v)
    }
}

macro_rules! impl_arg_from_scalar {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Arg {
                fn from(v: $ty) -> Self {
                    Self::Value(SqlValue::from(v))
                }
            }
        )*
    };
}

impl_arg_from_scalar!(
    bool,
    i8,
    i16,
    i32,
    i64,
    u8,
    u16,
    u32,
    u64,
    f32,
    f64,
    String,
    &'static str,
    time::OffsetDateTime,
);

impl<T> From<Option<T>> for Arg
where
    T: Into<SqlValue>,
{
    fn from(v: Option<T>) -> Self {
        Self::Value(SqlValue::from_option(v))
    }
}

/// `Vec<T>` 总是被当作参数列表；需要绑定字节串时请显式使用 `SqlValue::Bytes`。
impl<T> From<Vec<T>> for Arg
where
    T: Into<SqlValue>,
{
    fn from(v: Vec<T>) -> Self {
        list(v)
    }
}

impl<T, const N: usize> From<[T; N]> for Arg
where
    T: Into<SqlValue>,
{
    fn from(v: [T; N]) -> Self {
        list(v)
    }
}
