pub mod reader;
pub mod writer;

use crate::error::Result;
use indicatif::{ProgressBar, ProgressStyle};
use order_sheet_common::{Classifier, Fallback, OrderStatus, OutputLayout, Row, RowAnnotation};
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::path::Path;

/// 源表单元格
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

impl CellValue {
    /// 分类器看到的文本
    pub fn as_text(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(text) => text.clone(),
            CellValue::Number(value) => value.to_string(),
            CellValue::Bool(value) => (if *value { "TRUE" } else { "FALSE" }).to_string(),
        }
    }
}

/// 读取的工作表
#[derive(Debug, Clone, Default)]
pub struct SheetData {
    pub name: String,
    pub rows: Vec<Vec<CellValue>>,
}

impl SheetData {
    /// 最宽一行的列数
    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn text_row(&self, index: usize) -> Row {
        self.rows
            .get(index)
            .map(|cells| cells.iter().map(CellValue::as_text).collect())
            .unwrap_or_default()
    }
}

/// 处理结果统计
#[derive(Debug, Clone, Default)]
pub struct ProcessSummary {
    pub sheet_name: String,
    /// 数据行数（不含表头）
    pub data_rows: usize,
    pub annotated: usize,
    /// 列数不足而原样输出的行
    pub skipped: usize,
    pub status_counts: BTreeMap<&'static str, usize>,
    pub fee_parse_failures: usize,
    pub commission_parse_failures: usize,
}

impl ProcessSummary {
    fn record(&mut self, excel_row: usize, annotation: Option<&RowAnnotation>) {
        let Some(annotation) = annotation else {
            self.skipped += 1;
            return;
        };

        self.annotated += 1;
        *self
            .status_counts
            .entry(annotation.fees.status.label())
            .or_insert(0) += 1;

        let fee_failures = annotation.fees.parse_failures();
        if fee_failures > 0 {
            self.fee_parse_failures += fee_failures;
            tracing::warn!(row = excel_row, count = fee_failures, "费用无法解析，按0计入合计");
        }

        let commission_failed = annotation
            .feedback
            .as_ref()
            .is_some_and(|signals| signals.commission.fallback == Some(Fallback::ParseFailure));
        if commission_failed {
            self.commission_parse_failures += 1;
            tracing::warn!(row = excel_row, "提成金额无法解析，按0处理");
        }

        if annotation.dispatch_label.is_none() {
            tracing::debug!(row = excel_row, "派单师傅未登记，保持原值");
        }
    }

    pub fn count(&self, status: OrderStatus) -> usize {
        self.status_counts.get(status.label()).copied().unwrap_or(0)
    }
}

fn progress_bar(len: usize) -> ProgressBar {
    if len == 0 {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(len as u64);
    if let Ok(style) = ProgressStyle::with_template("  {bar:40.cyan/blue} {pos}/{len} 行") {
        pb.set_style(style);
    }
    pb
}

/// 分类全部数据行（第1行为表头，不分类）
///
/// 行之间互不依赖，并行处理；结果顺序与输入一致。
pub fn classify_sheet(sheet: &SheetData, classifier: &Classifier) -> Vec<Option<RowAnnotation>> {
    let pb = progress_bar(sheet.rows.len().saturating_sub(1));

    let annotations: Vec<Option<RowAnnotation>> = (1..sheet.rows.len())
        .into_par_iter()
        .map(|index| {
            let annotation = classifier.classify_row(&sheet.text_row(index));
            pb.inc(1);
            annotation
        })
        .collect();

    pb.finish_and_clear();
    annotations
}

/// 读取 → 分类 → 按布局写出
pub fn process_workbook(
    input: &Path,
    output: &Path,
    classifier: &Classifier,
    verbose: bool,
) -> Result<ProcessSummary> {
    let sheet = reader::read_first_sheet(input)?;
    tracing::info!(
        input = %input.display(),
        sheet = %sheet.name,
        rows = sheet.rows.len(),
        "开始处理"
    );
    if verbose {
        println!("  工作表: {} ({}行)", sheet.name, sheet.rows.len());
    }

    let annotations = classify_sheet(&sheet, classifier);

    let mut summary = ProcessSummary {
        sheet_name: sheet.name.clone(),
        data_rows: annotations.len(),
        ..Default::default()
    };

    let layout = OutputLayout::new(classifier.columns().clone(), sheet.width());
    let mut rows = Vec::with_capacity(sheet.rows.len());
    if let Some(header) = sheet.rows.first() {
        rows.push((header.as_slice(), layout.header()));
    }
    for (offset, annotation) in annotations.iter().enumerate() {
        let index = offset + 1;
        summary.record(index + 1, annotation.as_ref());
        rows.push((sheet.rows[index].as_slice(), layout.render(annotation.as_ref())));
    }

    writer::write_sheet(output, &sheet.name, &rows)?;
    tracing::info!(
        output = %output.display(),
        annotated = summary.annotated,
        skipped = summary.skipped,
        "处理完成"
    );

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_as_text() {
        assert_eq!(CellValue::Number(30.0).as_text(), "30");
        assert_eq!(CellValue::Number(12.5).as_text(), "12.5");
        assert_eq!(CellValue::Text("邓姐".into()).as_text(), "邓姐");
        assert_eq!(CellValue::Empty.as_text(), "");
        assert_eq!(CellValue::Bool(true).as_text(), "TRUE");
    }

    #[test]
    fn test_sheet_width_and_text_row() {
        let sheet = SheetData {
            name: "Sheet1".into(),
            rows: vec![
                vec![CellValue::Text("a".into())],
                vec![CellValue::Empty, CellValue::Number(3.0), CellValue::Text("x".into())],
            ],
        };
        assert_eq!(sheet.width(), 3);
        assert_eq!(sheet.text_row(1).cells(), &["", "3", "x"]);
        assert!(sheet.text_row(5).is_empty());
    }
}
