//! 费用合计与订单状态

use crate::derived::{parse_amount, Derived};
use serde::{Deserialize, Serialize};

/// 订单状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    /// 成功订单（合计达到阈值）
    Success,
    /// 只收上门费
    VisitFeeOnly,
    /// 待服务
    Pending,
}

impl OrderStatus {
    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::Success => "成功订单",
            OrderStatus::VisitFeeOnly => "只收上门费",
            OrderStatus::Pending => "待服务",
        }
    }

    /// 合计 → 状态
    pub fn from_total(total: f64, success_threshold: f64) -> Self {
        if total >= success_threshold {
            OrderStatus::Success
        } else if total > 0.0 {
            OrderStatus::VisitFeeOnly
        } else {
            OrderStatus::Pending
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// 费用汇总
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeSummary {
    pub total: f64,
    pub status: OrderStatus,
    /// 各单元格的解析结果（顺序与输入一致）
    pub parts: Vec<Derived<f64>>,
}

impl FeeSummary {
    /// 解析失败（非空但不是数字）的单元格数
    pub fn parse_failures(&self) -> usize {
        self.parts
            .iter()
            .filter(|part| part.fallback == Some(crate::derived::Fallback::ParseFailure))
            .count()
    }
}

/// 合计费用并判定状态
///
/// 无法解析的单元格按0计入，不报错。
pub fn classify_fees<S: AsRef<str>>(cells: &[S], success_threshold: f64) -> FeeSummary {
    let parts: Vec<Derived<f64>> = cells.iter().map(|cell| parse_amount(cell.as_ref())).collect();
    let total: f64 = parts.iter().map(|part| part.value).sum();

    FeeSummary {
        total,
        status: OrderStatus::from_total(total, success_threshold),
        parts,
    }
}
