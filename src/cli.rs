use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "order-sheet")]
#[command(about = "售后工单表格整理、销售记录SQL生成工具", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 输出详细信息
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// 配置文件（默认: ~/.config/order-sheet/config.json）
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 整理工单表格（拆分地址、解析回访、计算合计）
    Process {
        /// 输入文件（省略时交互输入）
        input: Option<PathBuf>,

        /// 输出文件（默认: output.xlsx）
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 由销售记录文本生成 INSERT 语句
    Sql {
        /// 销售记录文本文件
        #[arg(required = true)]
        input: PathBuf,

        /// 输出SQL文件（默认: output.sql）
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 显示/初始化配置
    Config {
        /// 显示当前配置
        #[arg(long)]
        show: bool,

        /// 将默认配置写入配置文件
        #[arg(long)]
        init: bool,
    },
}
