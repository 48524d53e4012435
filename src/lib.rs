//! halo-clauses：动态 SQL 语句拼装库。
//!
//! 可选条件在值无效时整体省略，AND/OR 按优先级自动加括号，
//! 绑定值的顺序始终与最终语句中占位符的出现顺序一致。
//!
//! ```
//! use halo_clauses::{Clauses, Dialect, clause, select};
//!
//! let mut sb = select();
//! sb.field("*").from("Heroes").where_(
//!     Clauses::when("last_name", clause::like, Some("%Croft%"))
//!         .unwrap()
//!         .and_when("gender", clause::equals_to, "F")
//!         .unwrap()
//!         .and_when("age", clause::greater, None::<i64>)
//!         .unwrap(),
//! );
//!
//! let q = sb.build_with_dialect(Dialect::QuestionMark);
//! assert_eq!(q.sql(), "SELECT * FROM Heroes WHERE last_name LIKE ? AND gender = ?");
//! assert_eq!(q.values().len(), 2);
//! ```

pub mod builder;
pub mod checker;
pub mod clause;
pub mod clauses;
pub mod delete;
pub mod dialect;
pub mod error;
pub mod fields;
pub mod fragment;
pub mod from;
pub mod macros;
#[cfg(test)]
mod macros_tests;
pub mod modifiers;
pub mod query;
pub mod select;
#[cfg(test)]
mod select_tests;
pub mod update;
#[cfg(test)]
mod update_delete_tests;
pub mod value;
pub mod window;

pub use crate::builder::Builder;
pub use crate::checker::{DefaultChecker, IsValidValue, ValueChecker, is_valid_value};
pub use crate::clause::ClauseMaker;
pub use crate::clauses::{BoolOp, Clauses, ClausesProvider, IntoClauses, clauses};
pub use crate::delete::{DeleteBuilder, delete};
pub use crate::dialect::{
    DefaultDialectGuard, Dialect, default_dialect, set_default_dialect,
    set_default_dialect_scoped,
};
pub use crate::error::{Error, Result};
pub use crate::fields::{Direction, FieldEntry, Fields};
pub use crate::fragment::Fragment;
pub use crate::from::{Join, JoinKind, Source};
pub use crate::modifiers::{Arg, format_text, format_texts, list, to_sql_list};
pub use crate::query::SqlQuery;
pub use crate::select::{SelectBuilder, select, select_distinct};
pub use crate::update::{UpdateBuilder, UpdateValue, update};
pub use crate::value::SqlValue;
pub use crate::window::{WindowFunction, frame_bound, window_expression};

/// 推荐的便捷命名空间：允许 `use halo_clauses::sql::{...}` 形式导入。
pub mod sql {
    pub use crate::*;
}
