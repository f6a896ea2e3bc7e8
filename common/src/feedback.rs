//! 回访内容解析
//!
//! 从回访备注中提取线下提成金额，以及验券、好评、贴画三个标记。
//! 各标记互相独立，只做子串判断。

use crate::derived::{Derived, Fallback};
use crate::rules::ClassifierRules;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// 回访备注中的信号
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackSignals {
    /// 美团验券
    pub coupon: bool,
    /// 好评
    pub review: bool,
    /// 贴画
    pub sticker: bool,
    /// 线下交提成
    pub commission: Derived<f64>,
}

impl Default for FeedbackSignals {
    fn default() -> Self {
        Self {
            coupon: false,
            review: false,
            sticker: false,
            commission: Derived::defaulted(0.0, Fallback::PatternMiss),
        }
    }
}

/// 提取线下提成
///
/// `pattern` 的第一个捕获组被当作金额解析。
/// 未匹配 → `PatternMiss`，捕获内容无法解析 → `ParseFailure`，均返回0。
pub fn extract_commission(feedback: &str, pattern: &Regex) -> Derived<f64> {
    let Some(captured) = pattern.captures(feedback).and_then(|cap| cap.get(1)) else {
        return Derived::defaulted(0.0, Fallback::PatternMiss);
    };

    match captured.as_str().parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => Derived::parsed(value),
        _ => Derived::defaulted(0.0, Fallback::ParseFailure),
    }
}

/// 验券判定：含验券关键字，且含任一券面金额
pub fn has_coupon(feedback: &str, rules: &ClassifierRules) -> bool {
    feedback.contains(rules.coupon_keyword.as_str())
        && rules
            .coupon_amounts
            .iter()
            .any(|amount| feedback.contains(amount.as_str()))
}

/// 扫描回访备注
pub fn scan_feedback(feedback: &str, pattern: &Regex, rules: &ClassifierRules) -> FeedbackSignals {
    FeedbackSignals {
        coupon: has_coupon(feedback, rules),
        review: feedback.contains(rules.review_keyword.as_str()),
        sticker: feedback.contains(rules.sticker_keyword.as_str()),
        commission: extract_commission(feedback, pattern),
    }
}
