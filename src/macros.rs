//! 宏集合：可变参数形式的字段列表与条件组合。
//! 通过 `select_cols!` / `all_of!` 等宏，可以直接传入不定长参数而无需手动创建 `Vec`。

#[doc(hidden)]
#[macro_export]
macro_rules! __collect_strings {
    () => {
        Vec::<String>::new()
    };
    ($($value:expr),+ $(,)?) => {{
        let mut values = Vec::<String>::new();
        $(
            $crate::macros::extend_into_strings($value, &mut values);
        )*
        values
    }};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __builder_each_string {
    ($builder:expr, $method:ident $(, $arg:expr)* $(,)?) => {{
        let builder = &mut $builder;
        for value in $crate::__collect_strings!($($arg),*) {
            builder.$method(value);
        }
        builder
    }};
}

pub trait IntoStrings {
    fn extend_into_strings(self, dst: &mut Vec<String>);
}

impl IntoStrings for String {
    fn extend_into_strings(self, dst: &mut Vec<String>) {
        dst.push(self);
    }
}

impl IntoStrings for &str {
    fn extend_into_strings(self, dst: &mut Vec<String>) {
        dst.push(self.to_string());
    }
}

impl<const N: usize, T> IntoStrings for [T; N]
where
    T: Into<String>,
{
    fn extend_into_strings(self, dst: &mut Vec<String>) {
        dst.extend(self.into_iter().map(Into::into));
    }
}

impl<T> IntoStrings for &[T]
where
    T: Into<String> + Clone,
{
    fn extend_into_strings(self, dst: &mut Vec<String>) {
        dst.extend(self.iter().cloned().map(Into::into));
    }
}

impl<T> IntoStrings for Vec<T>
where
    T: Into<String>,
{
    fn extend_into_strings(self, dst: &mut Vec<String>) {
        dst.extend(self.into_iter().map(Into::into));
    }
}

#[doc(hidden)]
pub fn extend_into_strings<T>(value: T, dst: &mut Vec<String>)
where
    T: IntoStrings,
{
    value.extend_into_strings(dst);
}

/// 为 `SelectBuilder::field` 提供可变参数调用。
#[macro_export]
macro_rules! select_cols {
    ($builder:expr $(, $col:expr)* $(,)?) => {
        $crate::__builder_each_string!($builder, field $(, $col)*)
    };
}
pub use crate::select_cols;

/// 为 `SelectBuilder::group_by` 提供可变参数调用。
#[macro_export]
macro_rules! group_by_cols {
    ($builder:expr $(, $col:expr)* $(,)?) => {
        $crate::__builder_each_string!($builder, group_by $(, $col)*)
    };
}
pub use crate::group_by_cols;

/// 为 `SelectBuilder::order_by` 提供可变参数调用。
#[macro_export]
macro_rules! order_by_cols {
    ($builder:expr $(, $col:expr)* $(,)?) => {
        $crate::__builder_each_string!($builder, order_by $(, $col)*)
    };
}
pub use crate::order_by_cols;

/// 以 AND 组合任意数量的条件树；空树会被跳过。
#[macro_export]
macro_rules! all_of {
    ($($clause:expr),* $(,)?) => {
        $crate::Clauses::new()$(.and($clause))*
    };
}
pub use crate::all_of;

/// 以 OR 组合任意数量的条件树；空树会被跳过。
#[macro_export]
macro_rules! any_of {
    ($($clause:expr),* $(,)?) => {
        $crate::Clauses::new()$(.or($clause))*
    };
}
pub use crate::any_of;
