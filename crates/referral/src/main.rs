use anyhow::{Context, Result};
use clap::Parser;
use server::app::ApplicationServer;
use std::sync::Arc;
use tracing::info;
use utils::{AppConfig, EnvLoader, Logger};

#[tokio::main]
async fn main() -> Result<()> {
    // 根据 CARGO_ENV 加载对应的环境配置文件
    EnvLoader::load_env_file().ok();
    let config = Arc::new(AppConfig::parse());

    let _guard = Logger::new(config.cargo_env, &config.rust_log);
    info!("🔧 starting referral service ({:?})", config.cargo_env);

    ApplicationServer::serve(config)
        .await
        .context("🔴 Failed to start server")?;

    Ok(())
}
