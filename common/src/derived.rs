//! 派生值
//!
//! 分类器从不报错，失败时回退为默认值。
//! `Derived` 同时记录值本身和回退原因，便于区分“解析得到的0”和“失败后的0”。

use serde::{Deserialize, Serialize};

/// 使用默认值的原因
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Fallback {
    /// 单元格为空
    Blank,
    /// 数值解析失败
    ParseFailure,
    /// 正则未匹配
    PatternMiss,
}

impl std::fmt::Display for Fallback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Fallback::Blank => write!(f, "空值"),
            Fallback::ParseFailure => write!(f, "解析失败"),
            Fallback::PatternMiss => write!(f, "未匹配"),
        }
    }
}

/// 派生值（值 + 回退原因）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Derived<T> {
    pub value: T,
    /// `None` 表示值来自输入本身
    pub fallback: Option<Fallback>,
}

impl<T> Derived<T> {
    pub fn parsed(value: T) -> Self {
        Self { value, fallback: None }
    }

    pub fn defaulted(value: T, reason: Fallback) -> Self {
        Self { value, fallback: Some(reason) }
    }

    pub fn is_default(&self) -> bool {
        self.fallback.is_some()
    }
}

/// 将单元格文本解析为金额
///
/// 空白 → `Blank`，无法解析或非有限值 → `ParseFailure`，两者都取0。
pub fn parse_amount(cell: &str) -> Derived<f64> {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return Derived::defaulted(0.0, Fallback::Blank);
    }

    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Derived::parsed(value),
        _ => Derived::defaulted(0.0, Fallback::ParseFailure),
    }
}
