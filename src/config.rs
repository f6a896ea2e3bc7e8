use crate::error::{OrderSheetError, Result};
use order_sheet_common::{Classifier, ClassifierRules, SalesCatalog, SourceColumns};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub rules: ClassifierRules,
    pub columns: SourceColumns,
    pub sales: SalesCatalog,
    /// 默认输出文件名
    pub output_file: String,
    pub sql_output_file: String,
    /// 错误日志文件
    pub log_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rules: ClassifierRules::default(),
            columns: SourceColumns::default(),
            sales: SalesCatalog::default(),
            output_file: "output.xlsx".into(),
            sql_output_file: "output.sql".into(),
            log_file: "error.log".into(),
        }
    }
}

impl Config {
    /// 读取配置（`path` 未指定时使用默认位置，文件不存在时使用默认值）
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(path) => {
                if !path.exists() {
                    return Err(OrderSheetError::FileNotFound(path.display().to_string()));
                }
                path.to_path_buf()
            }
            None => Self::config_path()?,
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self, path: Option<&Path>) -> Result<PathBuf> {
        let config_path = match path {
            Some(path) => path.to_path_buf(),
            None => Self::config_path()?,
        };

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(config_path)
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| OrderSheetError::Config("找不到用户主目录".into()))?;
        Ok(home.join(".config").join("order-sheet").join("config.json"))
    }

    /// 规则和列位置 → 分类器（正则在此编译）
    pub fn classifier(&self) -> Result<Classifier> {
        Ok(Classifier::new(self.rules.clone(), self.columns.clone())?)
    }
}
