//! 错误类型定义

use thiserror::Error;

/// 公共错误类型
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),

    #[error("No valid records: {0}")]
    NoRecords(String),
}

/// Result类型别名
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_io() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error = Error::Io(io_error);
        let display = format!("{}", error);
        assert!(display.contains("IO error"));
        assert!(display.contains("file not found"));
    }

    #[test]
    fn test_error_display_config() {
        let error = Error::Config("找不到配置文件".to_string());
        let display = format!("{}", error);
        assert_eq!(display, "Config error: 找不到配置文件");
    }

    #[test]
    fn test_error_from_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: Error = json_error.into();
        assert!(matches!(error, Error::Json(_)));
    }

    #[test]
    fn test_error_from_regex() {
        let regex_error = regex::Regex::new("提(").unwrap_err();
        let error: Error = regex_error.into();
        assert!(matches!(error, Error::Pattern(_)));
        assert!(format!("{}", error).contains("Pattern error"));
    }
}
