//! 地址拆分
//!
//! 按“市 → 省/自治区 → 区/县”的顺序逐级切分地址文本。
//! 不做地理编码，无法识别的部分全部留在详细地址中。

use serde::{Deserialize, Serialize};

const CITY: &str = "市";
const PROVINCE: &str = "省";
const AUTONOMOUS_REGION: &str = "自治区";
const DISTRICT: &str = "区";
const COUNTY: &str = "县";

/// 拆分后的地址
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedAddress {
    pub province: Option<String>,
    pub city: Option<String>,
    /// 县/区
    pub district: Option<String>,
    /// 详细地址
    pub detail: String,
}

impl ParsedAddress {
    pub fn province_str(&self) -> &str {
        self.province.as_deref().unwrap_or_default()
    }

    pub fn city_str(&self) -> &str {
        self.city.as_deref().unwrap_or_default()
    }

    pub fn district_str(&self) -> &str {
        self.district.as_deref().unwrap_or_default()
    }
}

/// 拆分地址
///
/// # Examples
/// ```
/// use order_sheet_common::parse_address;
///
/// let parsed = parse_address("广东省广州市天河区某某路1号");
/// assert_eq!(parsed.province.as_deref(), Some("广东省"));
/// assert_eq!(parsed.detail, "某某路1号");
/// ```
pub fn parse_address(address: &str) -> ParsedAddress {
    let Some((head, tail)) = address.split_once(CITY) else {
        return ParsedAddress {
            detail: address.to_string(),
            ..Default::default()
        };
    };

    let (province, city) = if let Some((province, city)) = head.split_once(PROVINCE) {
        (Some(format!("{province}{PROVINCE}")), format!("{city}{CITY}"))
    } else if let Some((region, city)) = head.split_once(AUTONOMOUS_REGION) {
        (Some(format!("{region}{AUTONOMOUS_REGION}")), format!("{city}{CITY}"))
    } else {
        (None, format!("{head}{CITY}"))
    };

    let (district, detail) = [DISTRICT, COUNTY]
        .iter()
        .find_map(|sep| {
            tail.split_once(sep)
                .map(|(district, rest)| (Some(format!("{district}{sep}")), rest))
        })
        .unwrap_or((None, tail));

    ParsedAddress {
        province,
        city: Some(city),
        district,
        detail: detail.to_string(),
    }
}
