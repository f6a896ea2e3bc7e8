//! 行分类器
//!
//! 把一行工单的原始字段（地址、回访、支付状态、派单师傅）转换为
//! 拆分地址、提成、合计、订单状态等派生字段。
//!
//! ## 处理规则
//! 1. 地址按 市 → 省/自治区 → 区/县 拆分
//! 2. 预约时间只保留日期部分，跟单备注去掉“后台导入”
//! 3. 回访备注提取提成和三个标记
//! 4. 支付状态决定费用列清空或标红
//! 5. 维修费 + 材料费 + 券面额 → 合计 → 订单状态
//! 6. 派单师傅 + 城市 → 状态标签
//!
//! 派生值只依赖源字段，因此重复运行结果一致。任何字段失败都只回退为默认值。

use crate::address::{parse_address, ParsedAddress};
use crate::derived::Derived;
use crate::dispatcher::map_status;
use crate::error::{Error, Result};
use crate::feedback::{extract_commission, scan_feedback, FeedbackSignals};
use crate::fees::{classify_fees, FeeSummary};
use crate::row::{Row, SourceColumns};
use crate::rules::ClassifierRules;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// 支付状态对应的费用列处理
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PaymentAction {
    #[default]
    Keep,
    /// 无需支付：清空费用列
    ClearFees,
    /// 未支付：费用列标红
    HighlightFees,
}

/// 一行的派生结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowAnnotation {
    pub address: ParsedAddress,
    /// 预约日期（去掉时间部分）
    pub appointment_date: Option<String>,
    /// 清理后的跟单备注
    pub follow_up_note: Option<String>,
    /// 回访列不存在时为 `None`
    pub feedback: Option<FeedbackSignals>,
    pub payment: PaymentAction,
    /// 验券成立时的券面额
    pub coupon_amount: Option<f64>,
    pub fees: FeeSummary,
    /// 已登记派单师傅的状态标签
    pub dispatch_label: Option<String>,
}

impl RowAnnotation {
    /// 大于0时才输出的提成
    pub fn commission(&self) -> Option<f64> {
        self.feedback
            .as_ref()
            .map(|signals| signals.commission.value)
            .filter(|value| *value > 0.0)
    }
}

/// 行分类器（规则 + 列位置 + 编译好的正则）
#[derive(Debug, Clone)]
pub struct Classifier {
    rules: ClassifierRules,
    columns: SourceColumns,
    commission_re: Regex,
}

impl Classifier {
    pub fn new(rules: ClassifierRules, columns: SourceColumns) -> Result<Self> {
        let commission_re = Regex::new(&rules.commission_pattern)?;
        if commission_re.captures_len() < 2 {
            return Err(Error::Config(format!(
                "提成正则缺少捕获组: {}",
                rules.commission_pattern
            )));
        }

        Ok(Self {
            rules,
            columns,
            commission_re,
        })
    }

    pub fn rules(&self) -> &ClassifierRules {
        &self.rules
    }

    pub fn columns(&self) -> &SourceColumns {
        &self.columns
    }

    pub fn parse_address(&self, address: &str) -> ParsedAddress {
        parse_address(address)
    }

    pub fn extract_commission(&self, feedback: &str) -> Derived<f64> {
        extract_commission(feedback, &self.commission_re)
    }

    pub fn scan_feedback(&self, feedback: &str) -> FeedbackSignals {
        scan_feedback(feedback, &self.commission_re, &self.rules)
    }

    pub fn classify_fees<S: AsRef<str>>(&self, cells: &[S]) -> FeeSummary {
        classify_fees(cells, self.rules.success_threshold)
    }

    pub fn map_status(&self, dispatcher: &str, city: &str) -> Option<String> {
        map_status(dispatcher, city, &self.rules.dispatchers)
    }

    pub fn payment_action(&self, payment_status: &str) -> PaymentAction {
        let labels = &self.rules.payment;
        if payment_status == labels.no_payment_required {
            PaymentAction::ClearFees
        } else if payment_status == labels.unpaid {
            PaymentAction::HighlightFees
        } else {
            PaymentAction::Keep
        }
    }

    /// 分类一行
    ///
    /// 列数不足（不含地址列）时返回 `None`，该行原样输出。
    pub fn classify_row(&self, row: &Row) -> Option<RowAnnotation> {
        let columns = &self.columns;
        if row.len() < columns.min_cells() {
            return None;
        }

        let address = parse_address(row.get(columns.address).unwrap_or_default());

        let appointment_date = row.get(columns.appointment).map(date_part);
        let follow_up_note = row
            .get(columns.follow_up)
            .map(|note| clean_follow_up(note, &self.rules.follow_up_noise));
        let feedback = row.get(columns.feedback).map(|text| self.scan_feedback(text));

        let payment = row
            .get(columns.payment_status)
            .map(|status| self.payment_action(status))
            .unwrap_or_default();

        let coupon_amount = feedback
            .as_ref()
            .filter(|signals| signals.coupon)
            .map(|_| self.rules.coupon_value);

        let fee_cell = |index: usize| -> String {
            if payment == PaymentAction::ClearFees {
                return String::new();
            }
            row.get(index).unwrap_or_default().to_string()
        };
        let fee_cells = [
            fee_cell(columns.repair_fee),
            fee_cell(columns.material_fee),
            coupon_amount.map(|v| v.to_string()).unwrap_or_default(),
        ];
        let fees = self.classify_fees(&fee_cells);

        let dispatch_label = row
            .get(columns.dispatcher)
            .and_then(|dispatcher| self.map_status(dispatcher, address.city_str()));

        Some(RowAnnotation {
            address,
            appointment_date,
            follow_up_note,
            feedback,
            payment,
            coupon_amount,
            fees,
            dispatch_label,
        })
    }
}

/// “2024-10-02 14:30” → “2024-10-02”
pub fn date_part(date_time: &str) -> String {
    date_time.split(' ').next().unwrap_or_default().to_string()
}

/// 去掉备注中的固定噪声文字并裁剪空白
pub fn clean_follow_up(note: &str, noise: &str) -> String {
    if noise.is_empty() {
        return note.trim().to_string();
    }
    note.replace(noise, "").trim().to_string()
}
