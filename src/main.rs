use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};

use hh_auto_apply::services::{LlmCoverLetterGenerator, OutcomeWriter};
use hh_auto_apply::utils::logging;
use hh_auto_apply::{
    AccessToken, ApplicationOrchestrator, BatchResult, CancelHandle, Config, LlmClient,
    PortalClient,
};

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置：APP_CONFIG 指向的 TOML 文件 + 环境变量覆盖
    let config = match std::env::var("APP_CONFIG") {
        Ok(path) => Config::from_toml_file(&path)
            .with_context(|| format!("无法加载配置文件 {}", path))?,
        Err(_) => Config::default(),
    }
    .merge_env();

    // 初始化日志
    logging::init(config.verbose_logging);

    config.validate().context("配置校验失败")?;

    logging::init_log_file(&config.output_log_file)?;
    logging::log_startup(&config);

    let portal = Arc::new(PortalClient::new(&config)?);
    let letters = Arc::new(LlmCoverLetterGenerator::new(
        LlmClient::new(&config),
        config.cover_letter_max_tokens,
    ));
    let orchestrator = ApplicationOrchestrator::from_config(portal, letters, &config);
    let token = AccessToken::new(config.hh_access_token.clone());
    let writer = OutcomeWriter::with_path(config.output_log_file.clone());

    if let Some(vacancy_id) = &config.vacancy_id {
        info!("🎯 单岗位模式: {}", vacancy_id);
        let outcome = orchestrator
            .run_single(&token, &config.resume_id, vacancy_id)
            .await?;
        writer.write(&config.resume_id, &outcome)?;
        info!("结果: {} - {}", outcome.vacancy_id, outcome.kind.label());
        return Ok(());
    }

    // Ctrl-C 只停止出队，进行中的投递会完成
    let cancel = CancelHandle::new();
    let signal = cancel.signal();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("⛔ 收到 Ctrl-C，正在停止...");
            cancel.cancel();
        }
    });

    let result: BatchResult = orchestrator
        .run_batch_with_cancel(&token, &config.resume_id, config.apply_limit, signal)
        .await?;

    writer.write_batch(&config.resume_id, &result)?;
    logging::print_final_stats(&result, &config.output_log_file);

    Ok(())
}
