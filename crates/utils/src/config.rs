#[derive(clap::ValueEnum, Clone, Debug, Copy, PartialEq, Eq)]
#[clap(rename_all = "lowercase")]
pub enum CargoEnv {
    Development,
    Production,
}

/// 环境配置加载器
pub struct EnvLoader;

impl EnvLoader {
    /// 根据 CARGO_ENV 选择要加载的 .env 文件
    pub fn env_file_for(cargo_env: &str) -> &'static str {
        match cargo_env {
            "production" | "Production" | "prod" => ".env.production",
            "development" | "Development" | "dev" => ".env.development",
            "test" | "Test" => ".env.test",
            _ => ".env.development",
        }
    }

    /// 根据 CARGO_ENV 加载对应的环境配置文件，找不到时回退到 .env
    pub fn load_env_file() -> Result<(), dotenvy::Error> {
        let cargo_env = std::env::var("CARGO_ENV").unwrap_or_else(|_| "development".to_string());
        let env_file = Self::env_file_for(&cargo_env);

        if !std::path::Path::new(env_file).exists() {
            // logger is not up yet at this point
            eprintln!("⚠️  config file {} not found, trying .env", env_file);
            if std::path::Path::new(".env").exists() {
                dotenvy::from_filename(".env")?;
            }
            return Ok(());
        }

        dotenvy::from_filename(env_file)?;
        Ok(())
    }
}

#[derive(clap::Parser, Clone, Debug)]
#[command(name = "referral", about = "Referral CRUD service")]
pub struct AppConfig {
    #[clap(long, env, value_enum, default_value = "development")]
    pub cargo_env: CargoEnv,

    #[clap(long, env, default_value = "0.0.0.0")]
    pub app_host: String,

    #[clap(long, env, default_value = "3500")]
    pub app_port: u16,

    #[clap(long, env, default_value = "mongodb://localhost:27017")]
    pub mongo_uri: String,

    #[clap(long, env, default_value = "referrals")]
    pub mongo_db: String,

    #[clap(long, env, default_value = "info")]
    pub rust_log: String,
}

impl AppConfig {
    /// 手动创建配置实例（用于测试）
    pub fn new_for_test() -> Self {
        Self {
            cargo_env: CargoEnv::Development,
            app_host: "127.0.0.1".to_string(),
            app_port: 3501,
            mongo_uri: std::env::var("MONGO_URI").unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            mongo_db: std::env::var("MONGO_DB").unwrap_or_else(|_| "referrals_test".to_string()),
            rust_log: "debug".to_string(),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.app_host, self.app_port)
    }
}
