//! 核心错误类型

use std::fmt;

use designator_provider::ProviderError;
use thiserror::Error;

/// 核心层 Result 别名
pub type CoreResult<T> = Result<T, CoreError>;

/// 拉取阶段（用于标明哪一步失败）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStep {
    /// 认证
    Authenticate,
    /// 实例（端口）列表
    Instances,
    /// 受管记录列表
    Records,
}

impl fmt::Display for FetchStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Authenticate => "authenticate",
            Self::Instances => "list_instances",
            Self::Records => "list_managed_records",
        })
    }
}

/// 核心错误
#[derive(Debug, Error)]
pub enum CoreError {
    /// 拉取失败：整个同步周期中止，不做任何写操作
    #[error("{step} 失败: {source}")]
    FetchFailed {
        step: FetchStep,
        #[source]
        source: Box<CoreError>,
    },

    #[error("Provider 错误: {0}")]
    Provider(#[from] ProviderError),

    /// Neutron 响应缺少 dns 字段，说明 ml2 的 dns extension driver 未启用
    #[error("{0} 缺少 {1} 字段，请在 ml2_conf.ini 中启用 dns extension driver")]
    DnsExtensionDisabled(String, &'static str),

    #[error("Zone 不存在: {0}")]
    ZoneNotFound(String),

    #[error("配置错误: {0}")]
    ValidationError(String),
}

impl CoreError {
    /// 把任意错误包装成指定阶段的拉取失败
    pub fn fetch(step: FetchStep, source: impl Into<CoreError>) -> Self {
        Self::FetchFailed {
            step,
            source: Box::new(source.into()),
        }
    }

    /// 是否为拉取失败（对应非零退出码）
    pub fn is_fetch_failure(&self) -> bool {
        matches!(self, Self::FetchFailed { .. })
    }
}
