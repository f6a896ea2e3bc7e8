use anyhow::Context;
use clap::Parser;
use dialoguer::Input;
use order_sheet_common::OrderStatus;
use order_sheet_rust::{cli, config, error, logging, sales, workbook};
use cli::{Cli, Commands};
use config::Config;
use error::{OrderSheetError, Result};
use std::path::{Path, PathBuf};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref()).context("无法读取配置")?;

    // 只有处理文件的命令才写日志
    let log_guard = match cli.command {
        Commands::Process { .. } | Commands::Sql { .. } => Some(
            logging::init(Path::new(&config.log_file), cli.verbose).context("无法创建日志文件")?,
        ),
        Commands::Config { .. } => None,
    };

    let log_file = config.log_file.clone();
    if let Err(e) = run(cli, config) {
        tracing::error!("{}", e);
        eprintln!("❌ {}", e);
        if log_guard.is_some() {
            eprintln!("   详情请查看 {}", log_file);
        }
        // 退出前刷新日志缓冲
        drop(log_guard);
        std::process::exit(1);
    }

    Ok(())
}

fn run(cli: Cli, config: Config) -> Result<()> {
    match cli.command {
        Commands::Process { input, output } => {
            println!("📊 order-sheet - 工单整理\n");

            let input = match input {
                Some(path) => path,
                None => prompt_input_path()?,
            };
            let output = output.unwrap_or_else(|| PathBuf::from(&config.output_file));
            let classifier = config.classifier()?;

            println!("- 读取并分类: {}", input.display());
            let summary = workbook::process_workbook(&input, &output, &classifier, cli.verbose)?;
            println!(
                "✔ {}行已分类，{}行列数不足原样输出\n",
                summary.annotated, summary.skipped
            );

            for status in [OrderStatus::Success, OrderStatus::VisitFeeOnly, OrderStatus::Pending] {
                println!("  {}: {}", status, summary.count(status));
            }
            if summary.fee_parse_failures > 0 || summary.commission_parse_failures > 0 {
                println!(
                    "⚠ 无法解析的费用 {}个、提成 {}个（按0处理），详情请查看 {}",
                    summary.fee_parse_failures, summary.commission_parse_failures, config.log_file
                );
            }

            println!("\n✅ 处理完成，结果已保存到 {}", output.display());
        }

        Commands::Sql { input, output } => {
            println!("🧾 order-sheet - 销售记录SQL生成\n");

            let output = output.unwrap_or_else(|| PathBuf::from(&config.sql_output_file));
            let batch = sales::generate_sql_file(&input, &output, &config.sales)?;

            println!("✔ {}条记录", batch.inserted);
            for skipped in &batch.skipped {
                println!("⚠ 第{}行已跳过: {}", skipped.line_no, skipped.reason);
            }

            println!("\n✅ SQL已保存到 {}", output.display());
        }

        Commands::Config { show, init } => {
            if init {
                let path = config.save(cli.config.as_deref())?;
                println!("✔ 已写入配置: {}", path.display());
            }

            if show || !init {
                let path = match &cli.config {
                    Some(path) => path.clone(),
                    None => Config::config_path()?,
                };
                println!("配置文件: {}{}", path.display(), if path.exists() { "" } else { "（不存在，使用默认值）" });
                println!("{}", serde_json::to_string_pretty(&config)?);
            }
        }
    }

    Ok(())
}

fn prompt_input_path() -> Result<PathBuf> {
    let input: String = Input::new()
        .with_prompt("请输入文件名（包含文件后缀，如：data.xlsx）")
        .interact_text()
        .map_err(|e| OrderSheetError::Prompt(e.to_string()))?;
    Ok(PathBuf::from(input.trim()))
}
