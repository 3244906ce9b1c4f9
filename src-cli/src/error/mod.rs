//! 错误处理模块

use std::path::PathBuf;

use designator_core::CoreError;

/// 命令行错误类型
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("读取配置文件 {} 失败: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("解析配置文件 {} 失败: {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("配置错误: {0}")]
    Config(String),

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl AppError {
    /// 是否为拉取失败（本周期没有任何写操作）
    pub fn is_fetch_failure(&self) -> bool {
        matches!(self, Self::Core(e) if e.is_fetch_failure())
    }
}
