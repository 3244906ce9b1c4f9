//! Provider 抽象 Trait

use std::fmt::Display;

use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::types::{CreateRecordSetRequest, Network, Port, RecordSet, RecordSetQuery, Zone};

/// 原始 API 错误（映射前）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawApiError {
    pub code: Option<String>,
    pub message: String,
}

impl RawApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
        }
    }

    pub fn with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            message: message.into(),
        }
    }
}

/// 错误映射时的请求上下文
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    pub record_name: Option<String>,
    pub record_id: Option<String>,
    pub zone: Option<String>,
}

/// 错误映射 Trait
///
/// 每个服务把自己的错误码翻译成 [`ProviderError`]。
pub trait ProviderErrorMapper {
    /// 服务名称（用于日志和错误消息）
    fn provider_name(&self) -> &'static str;

    /// 映射已知错误码，未知错误码交给 [`Self::unknown_error`]
    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError;

    fn unknown_error(&self, raw: RawApiError) -> ProviderError {
        ProviderError::Unknown {
            provider: self.provider_name().to_string(),
            raw_code: raw.code,
            raw_message: raw.message,
        }
    }

    fn network_error(&self, detail: impl Display) -> ProviderError {
        ProviderError::NetworkError {
            provider: self.provider_name().to_string(),
            detail: detail.to_string(),
        }
    }

    fn parse_error(&self, detail: impl Display) -> ProviderError {
        ProviderError::ParseError {
            provider: self.provider_name().to_string(),
            detail: detail.to_string(),
        }
    }
}

/// 计算/网络服务（Neutron）
#[async_trait]
pub trait ComputeProvider: Send + Sync {
    /// 列出项目内所有网络
    async fn list_networks(&self) -> Result<Vec<Network>>;

    /// 列出项目内所有端口
    async fn list_ports(&self) -> Result<Vec<Port>>;
}

/// DNS 服务（Designate）
#[async_trait]
pub trait DnsProvider: Send + Sync {
    /// 列出项目内所有 Zone（自动翻页）
    async fn list_zones(&self) -> Result<Vec<Zone>>;

    /// 列出 Zone 下的记录集（自动翻页）
    async fn list_recordsets(&self, zone_id: &str, query: &RecordSetQuery)
    -> Result<Vec<RecordSet>>;

    /// 创建记录集
    async fn create_recordset(
        &self,
        zone_id: &str,
        request: &CreateRecordSetRequest,
    ) -> Result<RecordSet>;

    /// 删除记录集
    async fn delete_recordset(&self, zone_id: &str, recordset_id: &str) -> Result<()>;
}
