//! Builder：任何能向外层语句贡献 SQL 片段的对象（子查询、预构建语句、条件树）。

use crate::dialect::{Dialect, default_dialect};
use crate::fragment::Fragment;
use crate::query::SqlQuery;

/// 可嵌套构建 SQL 的片段提供者。
pub trait Builder: std::fmt::Debug {
    /// 把自身的文本与绑定值按顺序写入 `out`。
    fn write_fragment(&self, out: &mut Fragment);

    fn to_fragment(&self) -> Fragment {
        let mut f = Fragment::new();
        self.write_fragment(&mut f);
        f
    }

    /// 使用全局默认方言构建。
    fn build(&self) -> SqlQuery {
        self.build_with_dialect(default_dialect())
    }

    fn build_with_dialect(&self, dialect: Dialect) -> SqlQuery {
        let query = self.to_fragment().render(dialect);
        #[cfg(feature = "tracing")]
        tracing::trace!(
            sql = %query.sql(),
            values = query.values().len(),
            %dialect,
            "built sql statement"
        );
        query
    }
}

impl<T: Builder + ?Sized> Builder for &T {
    fn write_fragment(&self, out: &mut Fragment) {
        (**self).write_fragment(out)
    }
}

impl<T: Builder + ?Sized> Builder for &mut T {
    fn write_fragment(&self, out: &mut Fragment) {
        (**self).write_fragment(out)
    }
}

impl<T: Builder + ?Sized> Builder for Box<T> {
    fn write_fragment(&self, out: &mut Fragment) {
        (**self).write_fragment(out)
    }
}
