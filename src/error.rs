use thiserror::Error;

#[derive(Error, Debug)]
pub enum OrderSheetError {
    #[error("配置错误: {0}")]
    Config(String),

    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("无法打开文件，请确认文件存在且未被其他程序占用: {0}")]
    WorkbookOpen(String),

    #[error("文件中没有工作表: {0}")]
    NoSheet(String),

    #[error("无法读取工作表: {0}")]
    SheetRead(String),

    #[error("无法保存文件: {0}")]
    WorkbookWrite(String),

    #[error("输入错误: {0}")]
    Prompt(String),

    #[error("JSON解析错误: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO错误: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] order_sheet_common::Error),
}

pub type Result<T> = std::result::Result<T, OrderSheetError>;
