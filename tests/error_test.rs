//! 错误处理测试
//!
//! 各种错误条件下的错误类型与消息

use order_sheet_common::{ClassifierRules, SourceColumns};
use order_sheet_rust::config::Config;
use order_sheet_rust::error::OrderSheetError;
use order_sheet_rust::workbook::reader::read_first_sheet;
use tempfile::tempdir;

/// 不存在的文件
#[test]
fn test_read_nonexistent_file() {
    let result = read_first_sheet(std::path::Path::new("/nonexistent/path/12345.xlsx"));
    assert!(matches!(result, Err(OrderSheetError::FileNotFound(_))));
}

/// 不是表格的文件
#[test]
fn test_read_not_a_workbook() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("broken.xlsx");
    std::fs::write(&path, "这不是表格").unwrap();

    let result = read_first_sheet(&path);
    assert!(matches!(result, Err(OrderSheetError::WorkbookOpen(_))));
}

/// 显式指定的配置文件不存在
#[test]
fn test_explicit_config_missing() {
    let dir = tempdir().expect("Failed to create temp dir");
    let result = Config::load(Some(dir.path().join("none.json").as_path()));
    assert!(matches!(result, Err(OrderSheetError::FileNotFound(_))));
}

/// 配置文件内容不是JSON
#[test]
fn test_broken_config() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ broken").unwrap();

    let result = Config::load(Some(path.as_path()));
    assert!(matches!(result, Err(OrderSheetError::JsonParse(_))));
}

/// 提成规则写错时在分类前报错
#[test]
fn test_invalid_commission_pattern() {
    let config = Config {
        rules: ClassifierRules {
            commission_pattern: "提([0-9]+".into(),
            ..Default::default()
        },
        columns: SourceColumns::default(),
        ..Default::default()
    };

    let err = config.classifier().unwrap_err();
    assert!(matches!(
        err,
        OrderSheetError::Common(order_sheet_common::Error::Pattern(_))
    ));
}

/// OrderSheetError 的 Display 实现
#[test]
fn test_error_display() {
    let errors = vec![
        OrderSheetError::Config("测试配置错误".to_string()),
        OrderSheetError::FileNotFound("data.xlsx".to_string()),
        OrderSheetError::WorkbookOpen("data.xlsx".to_string()),
        OrderSheetError::NoSheet("data.xlsx".to_string()),
        OrderSheetError::SheetRead("Sheet1".to_string()),
        OrderSheetError::WorkbookWrite("output.xlsx".to_string()),
        OrderSheetError::Prompt("中断".to_string()),
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "错误消息为空: {:?}", err);
    }

    let err = OrderSheetError::FileNotFound("data.xlsx".to_string());
    assert_eq!(err.to_string(), "文件不存在: data.xlsx");
}

/// IO错误的转换
#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: OrderSheetError = io_err.into();

    assert!(matches!(err, OrderSheetError::Io(_)));
    assert!(err.to_string().contains("IO"));
}

/// JSON错误的转换
#[test]
fn test_json_error_conversion() {
    let json_err = serde_json::from_str::<serde_json::Value>("{ invalid }").unwrap_err();
    let err: OrderSheetError = json_err.into();

    assert!(matches!(err, OrderSheetError::JsonParse(_)));
}

/// common::Error 透明转换，消息保持原样
#[test]
fn test_common_error_transparent() {
    let common_err = order_sheet_common::Error::NoRecords("跳过 3 行".to_string());
    let err: OrderSheetError = common_err.into();

    assert!(matches!(err, OrderSheetError::Common(_)));
    assert_eq!(err.to_string(), "No valid records: 跳过 3 行");
}
