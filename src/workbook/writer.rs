//! 表格写入（rust_xlsxwriter）

use super::CellValue;
use crate::error::{OrderSheetError, Result};
use order_sheet_common::{OutputCell, OutputValue};
use rust_xlsxwriter::{Color, ColNum, Format, RowNum, Workbook, Worksheet, XlsxError};
use std::path::Path;

fn write_error(e: XlsxError) -> OrderSheetError {
    OrderSheetError::WorkbookWrite(e.to_string())
}

/// 输出单元格 → 实际写入的值（`Source` 从源行取值）
pub fn resolve<'a>(cell: &'a OutputCell, source_row: &'a [CellValue]) -> CellRef<'a> {
    match &cell.value {
        OutputValue::Source(index) => match source_row.get(*index) {
            Some(CellValue::Text(text)) => CellRef::Text(text),
            Some(CellValue::Number(value)) => CellRef::Number(*value),
            Some(CellValue::Bool(value)) => CellRef::Bool(*value),
            Some(CellValue::Empty) | None => CellRef::Blank,
        },
        OutputValue::Text(text) => CellRef::Text(text),
        OutputValue::Number(value) => CellRef::Number(*value),
        OutputValue::Blank => CellRef::Blank,
    }
}

/// 写入用的单元格值
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CellRef<'a> {
    Text(&'a str),
    Number(f64),
    Bool(bool),
    Blank,
}

fn write_cell(
    worksheet: &mut Worksheet,
    row: RowNum,
    col: ColNum,
    value: CellRef<'_>,
    format: Option<&Format>,
) -> std::result::Result<(), XlsxError> {
    match (value, format) {
        (CellRef::Text(text), Some(format)) => worksheet.write_string_with_format(row, col, text, format)?,
        (CellRef::Text(text), None) => worksheet.write_string(row, col, text)?,
        (CellRef::Number(value), Some(format)) => worksheet.write_number_with_format(row, col, value, format)?,
        (CellRef::Number(value), None) => worksheet.write_number(row, col, value)?,
        (CellRef::Bool(value), Some(format)) => worksheet.write_boolean_with_format(row, col, value, format)?,
        (CellRef::Bool(value), None) => worksheet.write_boolean(row, col, value)?,
        (CellRef::Blank, Some(format)) => worksheet.write_blank(row, col, format)?,
        (CellRef::Blank, None) => return Ok(()),
    };
    Ok(())
}

/// 未支付费用列的格式
pub fn highlight_format() -> Format {
    Format::new().set_font_color(Color::Red)
}

fn cell_format<'a>(cell: &OutputCell, highlight: &'a Format) -> Option<&'a Format> {
    cell.highlight.then_some(highlight)
}

/// 写出工作簿
///
/// # Arguments
/// * `path` - 输出文件
/// * `sheet_name` - 工作表名（沿用源表）
/// * `rows` - (源行, 布局后的输出行)
pub fn write_sheet(
    path: &Path,
    sheet_name: &str,
    rows: &[(&[CellValue], Vec<OutputCell>)],
) -> Result<()> {
    let mut workbook = Workbook::new();
    let highlight = highlight_format();

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name).map_err(write_error)?;

    for (row_idx, (source_row, cells)) in rows.iter().enumerate() {
        let row = RowNum::try_from(row_idx)
            .map_err(|_| OrderSheetError::WorkbookWrite(format!("行数超出上限: {}", row_idx)))?;

        for (col_idx, cell) in cells.iter().enumerate() {
            let col = ColNum::try_from(col_idx)
                .map_err(|_| OrderSheetError::WorkbookWrite(format!("列数超出上限: {}", col_idx)))?;
            let format = cell_format(cell, &highlight);
            write_cell(worksheet, row, col, resolve(cell, source_row), format).map_err(write_error)?;
        }
    }

    workbook.save(path).map_err(write_error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_source_and_derived() {
        let source = vec![
            CellValue::Text("张三".into()),
            CellValue::Number(30.0),
            CellValue::Empty,
        ];
        let cell = |value| OutputCell { value, highlight: false };

        assert_eq!(resolve(&cell(OutputValue::Source(0)), &source), CellRef::Text("张三"));
        assert_eq!(resolve(&cell(OutputValue::Source(1)), &source), CellRef::Number(30.0));
        assert_eq!(resolve(&cell(OutputValue::Source(2)), &source), CellRef::Blank);
        assert_eq!(resolve(&cell(OutputValue::Source(9)), &source), CellRef::Blank);
        assert_eq!(resolve(&cell(OutputValue::Number(1.0)), &source), CellRef::Number(1.0));
        assert_eq!(resolve(&cell(OutputValue::Text("省".into())), &source), CellRef::Text("省"));
    }

    #[test]
    fn test_highlighted_cells_use_red_font() {
        let highlight = highlight_format();
        let red = OutputCell { value: OutputValue::Source(8), highlight: true };
        let plain = OutputCell { value: OutputValue::Source(9), highlight: false };

        assert_eq!(cell_format(&red, &highlight), Some(&Format::new().set_font_color(Color::Red)));
        assert_eq!(cell_format(&plain, &highlight), None);
    }

    #[test]
    fn test_write_sheet_with_highlight() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("output.xlsx");
        let source = vec![CellValue::Text("未支付".into()), CellValue::Number(60.0)];
        let cells = vec![
            OutputCell { value: OutputValue::Source(0), highlight: true },
            OutputCell { value: OutputValue::Source(1), highlight: true },
            OutputCell { value: OutputValue::Blank, highlight: true },
            OutputCell { value: OutputValue::Blank, highlight: false },
        ];

        write_sheet(&path, "工单", &[(source.as_slice(), cells)]).unwrap();
        assert!(path.exists());
    }
}
