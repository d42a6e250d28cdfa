/// 日志工具模块
///
/// 提供日志初始化、格式化和输出的辅助函数
use std::fs;

use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::error::AppResult;
use crate::orchestrator::BatchResult;

/// 初始化 tracing 日志
///
/// `RUST_LOG` 优先；否则 `verbose` 为真时使用 debug 级别。
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    if let Err(e) = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
    {
        // 测试里多次调用时沿用已有的 subscriber
        debug!("日志已初始化，跳过: {}", e);
    }
}

/// 初始化日志文件
///
/// # 参数
/// - `log_file_path`: 日志文件路径
pub fn init_log_file(log_file_path: &str) -> AppResult<()> {
    let log_header = format!(
        "{}\n投递处理日志 - {}\n{}\n\n",
        "=".repeat(60),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(60)
    );
    fs::write(log_file_path, log_header)?;
    Ok(())
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 批量投递模式");
    info!("📊 最大并发数: {}", config.max_concurrent_applications);
    info!(
        "⏱️ 限流: 每 {} 秒最多 {} 次投递",
        config.rate_limit_window_secs, config.rate_limit_max_submissions
    );
    info!("{}", "=".repeat(60));
}

/// 记录批次开始信息
///
/// # 参数
/// - `resume_id`: 简历ID
/// - `total`: 入队岗位数
/// - `workers`: 并发数
pub fn log_batch_start(resume_id: &str, total: usize, workers: usize) {
    info!("\n{}", "=".repeat(60));
    info!("📦 开始处理简历 {} 的候选岗位", resume_id);
    info!("📄 本批岗位: {} 个, 并发数: {}", total, workers);
    info!("{}", "=".repeat(60));
}

/// 记录批次完成信息
pub fn log_batch_complete(result: &BatchResult) {
    info!("\n{}", "─".repeat(60));
    info!(
        "✓ 批次完成: 投递 {}/{}",
        result.applied_count(),
        result.len()
    );
    if result.is_cancelled() {
        info!("⛔ 批次被取消, 未处理岗位: {}", result.unprocessed().len());
    }
    info!("{}", "─".repeat(60));
}

/// 打印最终统计信息
///
/// # 参数
/// - `result`: 批次结果
/// - `log_file_path`: 日志文件路径
pub fn print_final_stats(result: &BatchResult, log_file_path: &str) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 投递: {}/{}", result.applied_count(), result.len());
    info!("⏭️ 跳过: {}", result.skipped_count());
    info!("❌ 失败: {}", result.failed_count());
    if result.is_cancelled() {
        info!("⛔ 已取消, 未处理: {}", result.unprocessed().len());
    }
    info!("{}", "=".repeat(60));
    info!("\n日志已保存至: {}", log_file_path);
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度（按字符计）
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
