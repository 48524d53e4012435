//! SqlQuery：build 的最终产物（语句文本 + 按位置排列的绑定值）。

use crate::builder::Builder;
use crate::fragment::Fragment;
use crate::value::SqlValue;

/// 语句文本与绑定值列表。
///
/// `values()` 的数量与顺序和 `sql()` 中的占位符一一对应。
/// 作为子查询再次拼接时，会按外层语句的方言重新编号。
#[derive(Debug, Clone, PartialEq)]
pub struct SqlQuery {
    sql: String,
    values: Vec<SqlValue>,
    fragment: Fragment,
}

impl SqlQuery {
    pub(crate) fn new(sql: String, values: Vec<SqlValue>, fragment: Fragment) -> Self {
        Self {
            sql,
            values,
            fragment,
        }
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn values(&self) -> &[SqlValue] {
        &self.values
    }

    pub fn into_parts(self) -> (String, Vec<SqlValue>) {
        (self.sql, self.values)
    }
}

impl Builder for SqlQuery {
    fn write_fragment(&self, out: &mut Fragment) {
        out.append(&self.fragment);
    }
}

impl std::fmt::Display for SqlQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.sql)
    }
}
