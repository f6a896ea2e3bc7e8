//! 派单师傅 → 城市状态标签

use crate::rules::{DispatcherTable, CITY_PLACEHOLDER};

/// 根据派单师傅生成状态标签
///
/// 只处理对照表中已登记的师傅，未登记时返回 `None`（保持原值）。
pub fn map_status(dispatcher: &str, city: &str, table: &DispatcherTable) -> Option<String> {
    table
        .template(dispatcher.trim())
        .map(|template| template.replace(CITY_PLACEHOLDER, city))
}
