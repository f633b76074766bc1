use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::CargoEnv;

/// 日志初始化：开发环境输出到控制台，生产环境按天滚动写入文件
pub struct Logger;

impl Logger {
    /// 返回的 guard 必须在进程存活期间持有，否则缓冲中的日志会丢失
    pub fn new(cargo_env: CargoEnv, filter: &str) -> WorkerGuard {
        Self::new_with_log_dir(cargo_env, filter, None)
    }

    pub fn new_with_log_dir(cargo_env: CargoEnv, filter: &str, log_dir: Option<PathBuf>) -> WorkerGuard {
        let (non_blocking, guard) = match cargo_env {
            CargoEnv::Development => tracing_appender::non_blocking(std::io::stdout()),
            CargoEnv::Production => {
                let log_directory = Self::log_directory(log_dir);
                if let Err(e) = std::fs::create_dir_all(&log_directory) {
                    eprintln!("⚠️ cannot create log directory {:?}: {}", log_directory, e);
                }
                let file_logger = tracing_appender::rolling::daily(&log_directory, "referral.log");
                tracing_appender::non_blocking(file_logger)
            }
        };

        // filter comes from `RUST_LOG` / `--rust-log`
        let env_filter = tracing_subscriber::EnvFilter::try_new(filter)
            .unwrap_or_else(|_| "referral=debug,server=debug,database=debug,tower_http=debug".into());

        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(non_blocking)
                    .with_file(true)
                    .with_line_number(true)
                    .with_target(false),
            )
            .init();

        guard
    }

    fn log_directory(log_dir: Option<PathBuf>) -> PathBuf {
        if let Some(dir) = log_dir {
            return dir;
        }

        if let Ok(dir) = std::env::var("LOG_DIR") {
            return PathBuf::from(dir);
        }

        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join("logs")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_log_dir_wins() {
        let dir = Logger::log_directory(Some(PathBuf::from("/tmp/referral-logs")));
        assert_eq!(dir, PathBuf::from("/tmp/referral-logs"));
    }
}
