//! 销售记录SQL生成
//!
//! 将 `-- 客户<TAB>产品<TAB>金额<TAB>员工<TAB>2024.10.02` 形式的文本
//! 转换为一个事务内的批量 INSERT 语句。
//!
//! 产品、员工名到ID的对照表由 `SalesCatalog` 显式传入。
//! 无法识别的行会被跳过并报告，不会生成空ID的记录。

use crate::error::{Error, Result};
use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const LINE_PREFIX: &str = "--";
const FIELD_COUNT: usize = 5;

/// 产品、员工、门店ID对照表
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SalesCatalog {
    /// 产品名（含别名）→ 产品ID
    pub products: BTreeMap<String, String>,
    /// 员工名 → 用户ID
    pub employees: BTreeMap<String, String>,
    pub store_id: String,
    /// 日期省略年份时使用
    pub default_year: i32,
}

impl Default for SalesCatalog {
    fn default() -> Self {
        let products = [
            ("租教室", "118597476499460096"),
            ("私教课", "118597423726727168"),
            ("120次卡", "118597349890199552"),
            ("120次", "118597349890199552"),
            ("90次卡", "118597324833427456"),
            ("90次", "118597324833427456"),
            ("60次卡", "118597300909117440"),
            ("60次", "118597300909117440"),
            ("30次卡", "118597270961786880"),
            ("30次", "118597270961786880"),
            ("年卡", "118597151357014016"),
            ("半年卡", "118597130192556032"),
            ("季卡", "118597109074235392"),
            ("月卡", "118597087125442560"),
            ("298月卡", "118597019819446272"),
        ];
        let employees = [
            ("莎莎", "118596246427537408"),
            ("雪梨", "118596190848815104"),
            ("崔崔", "118596161929089024"),
            ("前后", "118596107981950976"),
        ];

        Self {
            products: products
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            employees: employees
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            store_id: "118595381885014016".into(),
            default_year: 2024,
        }
    }
}

/// 跳过原因
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SkipReason {
    #[error("未知产品: {0}")]
    UnknownProduct(String),

    #[error("未知员工: {0}")]
    UnknownEmployee(String),

    #[error("金额不是数字: {0}")]
    InvalidAmount(String),

    #[error("日期格式错误: {0}")]
    InvalidDate(String),

    #[error("字段数量应为5，实际为{0}")]
    FieldCount(usize),
}

/// 被跳过的行
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    /// 1起始的行号
    pub line_no: usize,
    pub reason: SkipReason,
}

/// 解析后的销售记录
#[derive(Debug, Clone, PartialEq)]
pub struct SalesRecord {
    pub customer_name: String,
    pub product_id: String,
    pub user_id: String,
    /// 已校验为数字的金额原文
    pub amount: String,
    pub date: NaiveDate,
}

impl SalesRecord {
    /// 当天 00:00 (UTC) 的毫秒时间戳
    pub fn submit_ts(&self) -> i64 {
        self.date
            .and_hms_opt(0, 0, 0)
            .map(|dt| dt.and_utc().timestamp_millis())
            .unwrap_or_default()
    }
}

/// 生成结果
#[derive(Debug, Clone)]
pub struct SqlBatch {
    pub sql: String,
    pub inserted: usize,
    pub skipped: Vec<SkippedLine>,
}

/// 取出以 `--` 开头且恰好5个字段的行
///
/// 返回 (行号, 字段)。其他行视为注释或空行忽略。
pub fn sales_lines(input: &str) -> Vec<(usize, Vec<&str>)> {
    input
        .lines()
        .enumerate()
        .filter_map(|(index, line)| {
            let body = line.trim().strip_prefix(LINE_PREFIX)?.trim();
            if body.is_empty() {
                return None;
            }
            let fields: Vec<&str> = body.split('\t').map(str::trim).collect();
            (fields.len() == FIELD_COUNT).then_some((index + 1, fields))
        })
        .collect()
}

/// “2024.10.02” / “10.02” → 日期
pub fn parse_sales_date(text: &str, default_year: i32) -> Option<NaiveDate> {
    lazy_static::lazy_static! {
        static ref DATE_RE: Regex =
            Regex::new(r"^(?:(\d{4})\.)?(\d{1,2})\.(\d{1,2})$").unwrap();
    }

    let cap = DATE_RE.captures(text.trim())?;
    let year = match cap.get(1) {
        Some(year) => year.as_str().parse().ok()?,
        None => default_year,
    };
    let month = cap[2].parse().ok()?;
    let day = cap[3].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// 字段 → 销售记录
pub fn parse_record(
    fields: &[&str],
    catalog: &SalesCatalog,
) -> std::result::Result<SalesRecord, SkipReason> {
    let [customer, product, amount, employee, date] = fields else {
        return Err(SkipReason::FieldCount(fields.len()));
    };

    let product_id = catalog
        .products
        .get(*product)
        .ok_or_else(|| SkipReason::UnknownProduct(product.to_string()))?;
    let user_id = catalog
        .employees
        .get(*employee)
        .ok_or_else(|| SkipReason::UnknownEmployee(employee.to_string()))?;

    match amount.parse::<f64>() {
        Ok(value) if value.is_finite() => {}
        _ => return Err(SkipReason::InvalidAmount(amount.to_string())),
    }

    let date = parse_sales_date(date, catalog.default_year)
        .ok_or_else(|| SkipReason::InvalidDate(date.to_string()))?;

    Ok(SalesRecord {
        customer_name: customer.to_string(),
        product_id: product_id.clone(),
        user_id: user_id.clone(),
        amount: amount.to_string(),
        date,
    })
}

/// SQL字符串字面量（单引号转义）
fn quote(text: &str) -> String {
    format!("'{}'", text.replace('\'', "''"))
}

/// 生成批量 INSERT
///
/// # Arguments
/// * `input` - 销售记录文本
/// * `catalog` - ID对照表
/// * `base_millis` - 订单号前缀用的毫秒时间戳
///
/// # Returns
/// * `Err(Error::NoRecords)` - 没有任何有效行
pub fn build_sales_sql(input: &str, catalog: &SalesCatalog, base_millis: i64) -> Result<SqlBatch> {
    let mut records = Vec::new();
    let mut skipped = Vec::new();

    for (line_no, fields) in sales_lines(input) {
        match parse_record(&fields, catalog) {
            Ok(record) => records.push(record),
            Err(reason) => skipped.push(SkippedLine { line_no, reason }),
        }
    }

    if records.is_empty() {
        return Err(Error::NoRecords(format!("跳过 {} 行", skipped.len())));
    }

    let values: Vec<String> = records
        .iter()
        .enumerate()
        .map(|(seq, record)| {
            format!(
                "    ({}, {}, {}, {}, {}, {}, {}, datetime('now', '+8 hours'))",
                quote(&format!("SO{base_millis}{seq:04}")),
                quote(&record.user_id),
                quote(&catalog.store_id),
                record.amount,
                record.submit_ts(),
                quote(&record.customer_name),
                quote(&record.product_id),
            )
        })
        .collect();

    let mut sql = String::new();
    sql.push_str("BEGIN TRANSACTION;\n\n");
    sql.push_str(
        "INSERT INTO sales_records (\n    order_no,\n    user_id,\n    store_id,\n    actual_amount,\n    submit_ts,\n    customer_name,\n    product_id,\n    created_at\n) VALUES\n",
    );
    sql.push_str(&values.join(",\n"));
    sql.push_str(";\n\nCOMMIT;\n");

    Ok(SqlBatch {
        sql,
        inserted: records.len(),
        skipped,
    })
}
