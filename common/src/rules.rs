//! 分类规则配置
//!
//! 阈值、关键字、派单师傅对照表等业务常量。
//! 默认值与现行表格处理规则一致，可通过JSON配置覆盖。

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 模板中的城市占位符
pub const CITY_PLACEHOLDER: &str = "{city}";

/// 派单师傅 → 状态标签模板
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DispatcherTable {
    entries: BTreeMap<String, String>,
}

impl Default for DispatcherTable {
    fn default() -> Self {
        Self::from_pairs([
            ("测试1", "{city}-未派出"),
            ("邓姐", "{city}-邓姐外派"),
        ])
    }
}

impl DispatcherTable {
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn template(&self, dispatcher: &str) -> Option<&str> {
        self.entries.get(dispatcher).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// 支付状态标签
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentLabels {
    /// 该状态下清空费用列
    pub no_payment_required: String,
    /// 该状态下费用列标红
    pub unpaid: String,
}

impl Default for PaymentLabels {
    fn default() -> Self {
        Self {
            no_payment_required: "无需支付".into(),
            unpaid: "未支付".into(),
        }
    }
}

/// 分类规则
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierRules {
    /// 提成正则（必须有且仅有一个捕获组）
    pub commission_pattern: String,
    /// 验券关键字
    pub coupon_keyword: String,
    /// 验券金额关键字（任意一个出现即可）
    pub coupon_amounts: Vec<String>,
    /// 验券成立时计入合计的券面额
    pub coupon_value: f64,
    pub review_keyword: String,
    pub sticker_keyword: String,
    /// 成功订单的合计下限
    pub success_threshold: f64,
    /// 跟单备注中需要去掉的文字
    pub follow_up_noise: String,
    pub payment: PaymentLabels,
    pub dispatchers: DispatcherTable,
}

impl Default for ClassifierRules {
    fn default() -> Self {
        Self {
            commission_pattern: "提([0-9]+)".into(),
            coupon_keyword: "验券".into(),
            coupon_amounts: vec!["20".into(), "25".into(), "30".into()],
            coupon_value: 50.0,
            review_keyword: "好评".into(),
            sticker_keyword: "贴画".into(),
            success_threshold: 70.0,
            follow_up_noise: "后台导入".into(),
            payment: PaymentLabels::default(),
            dispatchers: DispatcherTable::default(),
        }
    }
}

impl ClassifierRules {
    /// 从JSON字符串读取
    pub fn from_json(json: &str) -> Result<Self> {
        let rules: Self = serde_json::from_str(json)?;
        Ok(rules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_constants() {
        let rules = ClassifierRules::default();
        assert_eq!(rules.commission_pattern, "提([0-9]+)");
        assert_eq!(rules.success_threshold, 70.0);
        assert_eq!(rules.coupon_amounts, vec!["20", "25", "30"]);
        assert_eq!(rules.dispatchers.len(), 2);
        assert_eq!(rules.dispatchers.template("邓姐"), Some("{city}-邓姐外派"));
        assert_eq!(rules.dispatchers.template("测试1"), Some("{city}-未派出"));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let rules = ClassifierRules::from_json(r#"{"success_threshold": 100}"#).unwrap();
        assert_eq!(rules.success_threshold, 100.0);
        assert_eq!(rules.coupon_keyword, "验券");
        assert_eq!(rules.dispatchers, DispatcherTable::default());
    }

    #[test]
    fn test_dispatchers_from_json() {
        let rules = ClassifierRules::from_json(
            r#"{"dispatchers": {"王师傅": "{city}-王师傅"}}"#,
        )
        .unwrap();
        assert_eq!(rules.dispatchers.len(), 1);
        assert_eq!(rules.dispatchers.template("王师傅"), Some("{city}-王师傅"));
        assert_eq!(rules.dispatchers.template("邓姐"), None);
    }

    #[test]
    fn test_invalid_json() {
        assert!(ClassifierRules::from_json("{").is_err());
    }
}
