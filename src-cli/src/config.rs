//! 配置文件

use std::path::Path;

use designator_core::ReconcileConfig;
use designator_core::designator_provider::CloudCredentials;
use serde::Deserialize;

use crate::error::AppError;

/// 未在配置文件中写密码时读取的环境变量
pub const PASSWORD_ENV: &str = "OS_PASSWORD";

/// 应用配置
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Keystone 认证与 endpoint
    pub cloud: CloudCredentials,
    #[serde(default)]
    pub reconcile: ReconcileConfig,
    #[serde(default)]
    pub log: LogConfig,
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 未设置 `RUST_LOG` 时的过滤规则，例如 `info` 或 `designator_core=debug,info`
    #[serde(default = "default_log_level")]
    pub level: String,
    /// 输出 JSON 格式日志
    #[serde(default)]
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl AppConfig {
    /// 从文件加载配置，密码可由 `OS_PASSWORD` 提供
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let text = std::fs::read_to_string(path).map_err(|source| AppError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: Self = toml::from_str(&text).map_err(|source| AppError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        config.resolve(std::env::var(PASSWORD_ENV).ok())?;
        Ok(config)
    }

    /// 补齐密码并校验
    fn resolve(&mut self, env_password: Option<String>) -> Result<(), AppError> {
        if self.cloud.password.is_empty() {
            self.cloud.password = env_password.unwrap_or_default();
        }
        self.validate()
    }

    fn validate(&self) -> Result<(), AppError> {
        let cloud = &self.cloud;
        for (field, value) in [
            ("cloud.auth_url", &cloud.auth_url),
            ("cloud.username", &cloud.username),
            ("cloud.project_name", &cloud.project_name),
        ] {
            if value.trim().is_empty() {
                return Err(AppError::Config(format!("{field} 不能为空")));
            }
        }
        if cloud.password.is_empty() {
            return Err(AppError::Config(format!(
                "未配置 cloud.password，也没有设置环境变量 {PASSWORD_ENV}"
            )));
        }
        if cloud.timeout_secs == 0 {
            return Err(AppError::Config("cloud.timeout_secs 必须大于 0".to_string()));
        }
        self.reconcile.validate()?;
        Ok(())
    }
}
