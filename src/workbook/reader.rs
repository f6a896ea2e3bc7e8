//! 表格读取（calamine）

use super::{CellValue, SheetData};
use crate::error::{OrderSheetError, Result};
use calamine::{open_workbook_auto, Data, Reader};
use std::path::Path;

/// 读取第一个工作表
///
/// 行列位置从A1起算（工作表的使用范围不从A1开始时补空单元格），
/// 每行末尾的空单元格会被去掉。
pub fn read_first_sheet(path: &Path) -> Result<SheetData> {
    if !path.exists() {
        return Err(OrderSheetError::FileNotFound(path.display().to_string()));
    }

    let mut workbook = open_workbook_auto(path)
        .map_err(|e| OrderSheetError::WorkbookOpen(format!("{}: {}", path.display(), e)))?;

    let name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| OrderSheetError::NoSheet(path.display().to_string()))?;

    let range = workbook
        .worksheet_range(&name)
        .map_err(|e| OrderSheetError::SheetRead(format!("{}: {}", name, e)))?;

    let (start_row, start_col) = range.start().unwrap_or((0, 0));
    let mut rows: Vec<Vec<CellValue>> = vec![Vec::new(); start_row as usize];

    for source_row in range.rows() {
        let mut cells = vec![CellValue::Empty; start_col as usize];
        cells.extend(source_row.iter().map(convert_cell));
        while cells.last() == Some(&CellValue::Empty) {
            cells.pop();
        }
        rows.push(cells);
    }

    Ok(SheetData { name, rows })
}

fn convert_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(text) if text.is_empty() => CellValue::Empty,
        Data::String(text) => CellValue::Text(text.clone()),
        Data::Float(value) => CellValue::Number(*value),
        Data::Int(value) => CellValue::Number(*value as f64),
        Data::Bool(value) => CellValue::Bool(*value),
        Data::DateTime(date_time) => match date_time.as_datetime() {
            Some(dt) => CellValue::Text(dt.format("%Y-%m-%d %H:%M:%S").to_string()),
            None => CellValue::Number(date_time.as_f64()),
        },
        Data::DateTimeIso(text) | Data::DurationIso(text) => CellValue::Text(text.clone()),
        Data::Error(e) => CellValue::Text(e.to_string()),
    }
}
