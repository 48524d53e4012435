//! 窗口函数表达式：`FUNC() OVER (PARTITION BY p ORDER BY o ROWS BETWEEN s AND e)`。
//!
//! 只生成文本，不携带绑定值。

use crate::error::{Error, Result};

/// 支持的排名类窗口函数。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowFunction {
    Rank,
    DenseRank,
    RowNumber,
    PercentRank,
    CumeDist,
}

impl WindowFunction {
    pub fn name(self) -> &'static str {
        match self {
            Self::Rank => "RANK",
            Self::DenseRank => "DENSE_RANK",
            Self::RowNumber => "ROW_NUMBER",
            Self::PercentRank => "PERCENT_RANK",
            Self::CumeDist => "CUME_DIST",
        }
    }
}

/// 帧边界：负数为 `n PRECEDING`，0 为 `CURRENT ROW`，正数为 `n FOLLOWING`；
/// `i32::MIN` / `i32::MAX` 表示无界。
pub fn frame_bound(offset: i32) -> String {
    match offset {
        i32::MIN => "UNBOUNDED PRECEDING".to_string(),
        i32::MAX => "UNBOUNDED FOLLOWING".to_string(),
        0 => "CURRENT ROW".to_string(),
        n if n < 0 => format!("{} PRECEDING", n.unsigned_abs()),
        n => format!("{n} FOLLOWING"),
    }
}

/// 生成窗口函数表达式（不含别名）。空的 `partition` / `order` 会被省略。
pub fn window_expression(
    func: WindowFunction,
    partition: &str,
    order: &str,
    start: i32,
    end: i32,
) -> Result<String> {
    if start > end {
        return Err(Error::invalid(format!(
            "window frame start {start} is after end {end}"
        )));
    }

    let mut over = Vec::with_capacity(3);
    if !partition.trim().is_empty() {
        over.push(format!("PARTITION BY {partition}"));
    }
    if !order.trim().is_empty() {
        over.push(format!("ORDER BY {order}"));
    }
    over.push(format!(
        "ROWS BETWEEN {} AND {}",
        frame_bound(start),
        frame_bound(end)
    ));
    Ok(format!("{}() OVER ({})", func.name(), over.join(" ")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn frame_bounds() {
        assert_eq!(frame_bound(i32::MIN), "UNBOUNDED PRECEDING");
        assert_eq!(frame_bound(-3), "3 PRECEDING");
        assert_eq!(frame_bound(0), "CURRENT ROW");
        assert_eq!(frame_bound(2), "2 FOLLOWING");
        assert_eq!(frame_bound(i32::MAX), "UNBOUNDED FOLLOWING");
    }

    #[test]
    fn expression_text() {
        assert_eq!(
            window_expression(WindowFunction::Rank, "dept", "salary DESC", i32::MIN, 0).unwrap(),
            "RANK() OVER (PARTITION BY dept ORDER BY salary DESC ROWS BETWEEN UNBOUNDED PRECEDING AND CURRENT ROW)"
        );
        assert_eq!(
            window_expression(WindowFunction::RowNumber, "", "id", -1, 1).unwrap(),
            "ROW_NUMBER() OVER (ORDER BY id ROWS BETWEEN 1 PRECEDING AND 1 FOLLOWING)"
        );
    }

    #[test]
    fn reversed_frame_is_invalid() {
        assert!(window_expression(WindowFunction::Rank, "a", "b", 2, -2).is_err());
    }
}
