//! 工单行与列位置定义

use serde::{Deserialize, Serialize};

/// 一行工单（按列顺序的文本单元格）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    cells: Vec<String>,
}

impl Row {
    pub fn new(cells: Vec<String>) -> Self {
        Self { cells }
    }

    /// 指定列的值（越界时为 `None`）
    pub fn get(&self, index: usize) -> Option<&str> {
        self.cells.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[String] {
        &self.cells
    }
}

impl<S: Into<String>> FromIterator<S> for Row {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}

/// 源表各业务字段所在列（0起始）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceColumns {
    pub address: usize,
    pub order_status: usize,
    pub repair_fee: usize,
    pub material_fee: usize,
    pub payment_status: usize,
    pub dispatcher: usize,
    pub appointment: usize,
    pub follow_up: usize,
    pub feedback: usize,
    /// 不输出的列
    pub dropped: Vec<usize>,
}

impl Default for SourceColumns {
    fn default() -> Self {
        Self {
            address: 3,
            order_status: 6,
            repair_fee: 8,
            material_fee: 9,
            payment_status: 10,
            dispatcher: 11,
            appointment: 14,
            follow_up: 15,
            feedback: 16,
            dropped: vec![7, 12, 13],
        }
    }
}

impl SourceColumns {
    /// 少于等于此列数的行不做分类
    pub fn min_cells(&self) -> usize {
        self.address + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_access() {
        let row: Row = ["a", "b"].into_iter().collect();
        assert_eq!(row.len(), 2);
        assert_eq!(row.get(1), Some("b"));
        assert_eq!(row.get(2), None);
        assert!(!row.is_empty());
    }

    #[test]
    fn test_default_columns() {
        let columns = SourceColumns::default();
        assert_eq!(columns.address, 3);
        assert_eq!(columns.feedback, 16);
        assert_eq!(columns.min_cells(), 4);
    }
}
