//! SQL 占位符方言，以及进程级默认方言。

use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Mutex, MutexGuard};

/// SQL 占位符风格。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Dialect {
    /// 使用 `?` 作为占位符（常见于 MySQL/SQLite/JDBC）。
    #[default]
    QuestionMark,
    /// 使用 `$1, $2, ...` 作为占位符（常见于 PostgreSQL）。
    DollarNumbered,
}

static DEFAULT_DIALECT: AtomicU8 = AtomicU8::new(Dialect::QuestionMark as u8);
static DEFAULT_DIALECT_LOCK: Mutex<()> = Mutex::new(());

impl Dialect {
    fn from_u8(v: u8) -> Self {
        match v {
            1 => Self::DollarNumbered,
            _ => Self::QuestionMark,
        }
    }

    fn to_u8(self) -> u8 {
        self as u8
    }

    pub(crate) fn write_placeholder(self, index_1_based: usize, out: &mut String) {
        match self {
            Self::QuestionMark => out.push('?'),
            Self::DollarNumbered => {
                out.push('$');
                out.push_str(&index_1_based.to_string());
            }
        }
    }
}

impl Dialect {
    /// 写入一个字面量 `?`；`?` 方言下需要写成 `??` 才不会被当作占位符。
    pub(crate) fn write_literal_question(self, out: &mut String) {
        match self {
            Self::QuestionMark => out.push_str("??"),
            Self::DollarNumbered => out.push('?'),
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::QuestionMark => "QuestionMark",
            Self::DollarNumbered => "DollarNumbered",
        };
        f.write_str(s)
    }
}

/// 获取当前全局默认方言。
pub fn default_dialect() -> Dialect {
    Dialect::from_u8(DEFAULT_DIALECT.load(Ordering::Relaxed))
}

/// 设置全局默认方言，返回旧值。
pub fn set_default_dialect(dialect: Dialect) -> Dialect {
    let old = DEFAULT_DIALECT.swap(dialect.to_u8(), Ordering::Relaxed);
    Dialect::from_u8(old)
}

/// 修改全局默认方言的 RAII guard（会持有一个全局锁，避免并行测试互相干扰）。
pub struct DefaultDialectGuard {
    _lock: MutexGuard<'static, ()>,
    old: Dialect,
}

impl Drop for DefaultDialectGuard {
    fn drop(&mut self) {
        set_default_dialect(self.old);
    }
}

/// 在一个作用域内临时设置默认方言，并保证退出作用域后自动恢复。
pub fn set_default_dialect_scoped(dialect: Dialect) -> DefaultDialectGuard {
    let lock = DEFAULT_DIALECT_LOCK
        .lock()
        .unwrap_or_else(|e| e.into_inner());
    let old = set_default_dialect(dialect);
    DefaultDialectGuard { _lock: lock, old }
}
