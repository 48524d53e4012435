//! UpdateBuilder：构建 UPDATE 语句。
//!
//! 赋值按调用顺序输出；值为 `None`（或被校验器拒绝）的赋值整体跳过，
//! 表示“不修改这一列”，而不是写入 NULL。需要写 NULL 时传 `SqlValue::Null`。

use crate::builder::Builder;
use crate::checker::ValueChecker;
use crate::clauses::{Clauses, IntoClauses};
use crate::dialect::Dialect;
use crate::fragment::Fragment;
use crate::query::SqlQuery;
use crate::value::SqlValue;

/// UPDATE 赋值的值：`None` 表示跳过该赋值。
pub trait UpdateValue {
    fn into_update_value(self) -> Option<SqlValue>;
}

macro_rules! impl_update_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl UpdateValue for $ty {
                fn into_update_value(self) -> Option<SqlValue> {
                    Some(SqlValue::from(self))
                }
            }
        )*
    };
}

impl_update_value!(
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

impl UpdateValue for SqlValue {
    fn into_update_value(self) -> Option<SqlValue> {
        Some(self)
    }
}

impl<T: UpdateValue> UpdateValue for Option<T> {
    fn into_update_value(self) -> Option<SqlValue> {
        self.and_then(UpdateValue::into_update_value)
    }
}

#[derive(Debug, Clone)]
pub struct UpdateBuilder {
    table: String,
    assignments: Vec<Fragment>,
    where_: Clauses,
}

/// 创建 UPDATE builder。
pub fn update(table: impl Into<String>) -> UpdateBuilder {
    UpdateBuilder::new(table)
}

impl UpdateBuilder {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            assignments: Vec::new(),
            where_: Clauses::new(),
        }
    }

    /// `name = ?`；值为 `None` 时跳过。
    pub fn field(&mut self, name: &str, value: impl UpdateValue) -> &mut Self {
        match value.into_update_value() {
            Some(v) => self.assign(name, v),
            None => {
                trace_skipped(name);
                self
            }
        }
    }

    /// `name = ?`；值未通过 `checker` 时跳过。
    pub fn field_with<T, C>(&mut self, name: &str, value: T, checker: C) -> &mut Self
    where
        T: Into<SqlValue>,
        C: ValueChecker<T>,
    {
        if !checker.is_valid(&value) {
            trace_skipped(name);
            return self;
        }
        self.assign(name, value.into())
    }

    /// `name = expr`，表达式原样输出（例如 `n = n + 1`）。
    pub fn field_expr(&mut self, name: &str, expr: &str) -> &mut Self {
        self.assignments.push(Fragment::raw(format!("{name} = {expr}")));
        self
    }

    fn assign(&mut self, name: &str, value: SqlValue) -> &mut Self {
        let mut f = Fragment::raw(format!("{name} = "));
        f.push_arg(value);
        self.assignments.push(f);
        self
    }

    /// WHERE 条件；多次调用以 AND 合并。
    pub fn where_(&mut self, clauses: impl IntoClauses) -> &mut Self {
        self.where_ = std::mem::take(&mut self.where_).and(clauses);
        self
    }

    pub fn build(&self) -> SqlQuery {
        Builder::build(self)
    }

    pub fn build_with_dialect(&self, dialect: Dialect) -> SqlQuery {
        Builder::build_with_dialect(self, dialect)
    }
}

impl Builder for UpdateBuilder {
    fn write_fragment(&self, out: &mut Fragment) {
        let mut buf = Fragment::raw(format!("UPDATE {}", self.table));

        if !self.assignments.is_empty() {
            buf.push_raw(" SET ");
            for (i, a) in self.assignments.iter().enumerate() {
                if i > 0 {
                    buf.push_raw(", ");
                }
                buf.append(a);
            }
        }

        if !self.where_.is_empty() {
            buf.push_leading("WHERE ");
            self.where_.write_fragment(&mut buf);
        }

        out.append(&buf);
    }
}

#[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
fn trace_skipped(column: &str) {
    #[cfg(feature = "tracing")]
    tracing::trace!(column, "update assignment skipped: no value");
}
