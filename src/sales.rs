//! 销售记录SQL文件生成

use crate::error::{OrderSheetError, Result};
use order_sheet_common::{build_sales_sql, SalesCatalog, SqlBatch};
use std::path::Path;

/// 读取销售记录文本，生成SQL文件
pub fn generate_sql_file(input: &Path, output: &Path, catalog: &SalesCatalog) -> Result<SqlBatch> {
    if !input.exists() {
        return Err(OrderSheetError::FileNotFound(input.display().to_string()));
    }

    let content = std::fs::read_to_string(input)?;
    let base_millis = chrono::Utc::now().timestamp_millis();
    let batch = build_sales_sql(&content, catalog, base_millis)?;

    for skipped in &batch.skipped {
        tracing::warn!(line = skipped.line_no, reason = %skipped.reason, "跳过销售记录");
    }

    std::fs::write(output, &batch.sql)?;
    tracing::info!(
        output = %output.display(),
        inserted = batch.inserted,
        skipped = batch.skipped.len(),
        "SQL生成完成"
    );

    Ok(batch)
}
