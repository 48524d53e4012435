//! 值有效性校验：决定可选条件（或 UPDATE 赋值）是否被拼入语句。
//!
//! 校验失败不是错误：对应片段会被整体省略，连占位符都不会留下。

use crate::modifiers::Arg;
use crate::value::SqlValue;

/// 值有效性校验器。
pub trait ValueChecker<T: ?Sized> {
    fn is_valid(&self, value: &T) -> bool;
}

impl<T: ?Sized, F> ValueChecker<T> for F
where
    F: Fn(&T) -> bool,
{
    fn is_valid(&self, value: &T) -> bool {
        self(value)
    }
}

/// 默认有效性策略：`None`/`Null`、空字符串、空集合无效，其余有效。
pub trait IsValidValue {
    fn is_valid_value(&self) -> bool;
}

/// 按默认策略校验。
pub fn is_valid_value<T: IsValidValue + ?Sized>(value: &T) -> bool {
    value.is_valid_value()
}

/// 默认策略对应的 `ValueChecker`。
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultChecker;

impl<T: IsValidValue + ?Sized> ValueChecker<T> for DefaultChecker {
    fn is_valid(&self, value: &T) -> bool {
        value.is_valid_value()
    }
}

macro_rules! impl_always_valid {
    ($($ty:ty),* $(,)?) => {
        $(
            impl IsValidValue for $ty {
                fn is_valid_value(&self) -> bool {
                    true
                }
            }
        )*
    };
}

impl_always_valid!(
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
    time::OffsetDateTime,
);

impl IsValidValue for str {
    fn is_valid_value(&self) -> bool {
        !self.is_empty()
    }
}

impl IsValidValue for String {
    fn is_valid_value(&self) -> bool {
        !self.is_empty()
    }
}

impl<T: IsValidValue> IsValidValue for Option<T> {
    fn is_valid_value(&self) -> bool {
        self.as_ref().is_some_and(IsValidValue::is_valid_value)
    }
}

impl<T> IsValidValue for Vec<T> {
    fn is_valid_value(&self) -> bool {
        !self.is_empty()
    }
}

impl<T> IsValidValue for [T] {
    fn is_valid_value(&self) -> bool {
        !self.is_empty()
    }
}

impl<T, const N: usize> IsValidValue for [T; N] {
    fn is_valid_value(&self) -> bool {
        N > 0
    }
}

impl<T: IsValidValue + ?Sized> IsValidValue for &T {
    fn is_valid_value(&self) -> bool {
        (**self).is_valid_value()
    }
}

impl IsValidValue for SqlValue {
    fn is_valid_value(&self) -> bool {
        match self {
            Self::Null => false,
            Self::String(s) => !s.is_empty(),
            Self::Bytes(b) => !b.is_empty(),
            _ => true,
        }
    }
}

impl IsValidValue for Arg {
    fn is_valid_value(&self) -> bool {
        match self {
            Self::Value(v) => v.is_valid_value(),
            Self::List(values) => !values.is_empty(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy() {
        assert!(is_valid_value(&1_i64));
        assert!(is_valid_value(&0_i64));
        assert!(is_valid_value("a"));
        assert!(!is_valid_value(""));
        assert!(!is_valid_value(&String::new()));
        assert!(!is_valid_value(&None::<i64>));
        assert!(is_valid_value(&Some(3_i64)));
        assert!(!is_valid_value(&Some(String::new())));
        assert!(!is_valid_value(&Vec::<i64>::new()));
        assert!(is_valid_value(&vec![1_i64]));
        assert!(!is_valid_value(&SqlValue::Null));
        assert!(is_valid_value(&SqlValue::Bool(false)));
    }

    #[test]
    fn closures_are_checkers() {
        let not_two = |v: &i64| *v != 2;
        assert!(not_two.is_valid(&1));
        assert!(!not_two.is_valid(&2));
        assert!(!DefaultChecker.is_valid(""));
    }
}
