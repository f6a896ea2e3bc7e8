//! 错误日志
//!
//! 控制台只显示进度，行级回退和错误写入日志文件（默认 error.log，追加写入）。
//! 级别可用 `RUST_LOG` 覆盖。

use crate::error::{OrderSheetError, Result};
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// 初始化日志
///
/// 返回的 guard 在程序结束前必须保持存活，否则缓冲中的日志会丢失。
pub fn init(log_file: &Path, verbose: bool) -> Result<WorkerGuard> {
    let directory = log_file
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = log_file
        .file_name()
        .ok_or_else(|| OrderSheetError::Config(format!("日志文件名无效: {}", log_file.display())))?;

    let appender = tracing_appender::rolling::never(directory, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|e| OrderSheetError::Config(format!("日志初始化失败: {}", e)))?;

    Ok(guard)
}
