//! Provider 统一错误类型
//!
//! 各服务（Keystone / Neutron / Designate）的原始错误响应都通过
//! [`ProviderErrorMapper`](crate::traits::ProviderErrorMapper) 映射到这里。

use thiserror::Error;

/// Provider 层 Result 别名
pub type Result<T> = std::result::Result<T, ProviderError>;

/// Provider 错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// 网络错误（连接失败、超时、读取响应失败）
    #[error("[{provider}] 网络错误: {detail}")]
    NetworkError { provider: String, detail: String },

    /// 凭证无效或 token 已失效
    #[error("[{provider}] 认证失败: {}", .raw_message.as_deref().unwrap_or("unauthorized"))]
    InvalidCredentials {
        provider: String,
        raw_message: Option<String>,
    },

    /// 记录已存在
    #[error("[{provider}] 记录已存在: {record_name}")]
    RecordExists {
        provider: String,
        record_name: String,
        raw_message: Option<String>,
    },

    /// 记录不存在
    #[error("[{provider}] 记录不存在: {record_id}")]
    RecordNotFound {
        provider: String,
        record_id: String,
        raw_message: Option<String>,
    },

    /// Zone 不存在
    #[error("[{provider}] Zone 不存在: {zone}")]
    ZoneNotFound {
        provider: String,
        zone: String,
        raw_message: Option<String>,
    },

    /// 服务目录中找不到所需的 endpoint
    #[error("服务目录中没有 {service_type} endpoint (interface={interface}, region={})", .region.as_deref().unwrap_or("*"))]
    EndpointNotFound {
        service_type: String,
        interface: String,
        region: Option<String>,
    },

    /// 响应解析失败
    #[error("[{provider}] 响应解析失败: {detail}")]
    ParseError { provider: String, detail: String },

    /// 请求序列化失败
    #[error("[{provider}] 请求序列化失败: {detail}")]
    SerializationError { provider: String, detail: String },

    /// 未归类的 API 错误
    #[error("[{provider}] API 错误 ({}): {raw_message}", .raw_code.as_deref().unwrap_or("-"))]
    Unknown {
        provider: String,
        raw_code: Option<String>,
        raw_message: String,
    },
}

impl ProviderError {
    /// 是否为认证类错误
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Self::InvalidCredentials { .. })
    }
}
