//! DeleteBuilder：构建 DELETE 语句。

use crate::builder::Builder;
use crate::clauses::{Clauses, IntoClauses};
use crate::dialect::Dialect;
use crate::fragment::Fragment;
use crate::query::SqlQuery;

#[derive(Debug, Clone)]
pub struct DeleteBuilder {
    table: String,
    where_: Clauses,
}

/// 创建 DELETE builder。
pub fn delete(table: impl Into<String>) -> DeleteBuilder {
    DeleteBuilder::new(table)
}

impl DeleteBuilder {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            where_: Clauses::new(),
        }
    }

    /// WHERE 条件；多次调用以 AND 合并。条件树为空时删除整表。
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

impl Builder for DeleteBuilder {
    fn write_fragment(&self, out: &mut Fragment) {
        out.push_raw(format!("DELETE FROM {}", self.table));
        if !self.where_.is_empty() {
            out.push_raw(" WHERE ");
            self.where_.write_fragment(out);
        }
    }
}
