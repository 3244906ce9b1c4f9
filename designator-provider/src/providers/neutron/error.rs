//! Neutron 错误映射

use crate::error::ProviderError;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::NeutronProvider;

/// Neutron 错误类型映射
/// 参考: <https://docs.openstack.org/api-ref/network/v2/>
impl ProviderErrorMapper for NeutronProvider {
    fn provider_name(&self) -> &'static str {
        "neutron"
    }

    fn map_error(&self, raw: RawApiError, _context: ErrorContext) -> ProviderError {
        match raw.code.as_deref() {
            // token 失效（由 keystonemiddleware 返回，没有 NeutronError 包装）
            Some("401" | "403") => ProviderError::InvalidCredentials {
                provider: self.provider_name().to_string(),
                raw_message: Some(raw.message),
            },
            _ => self.unknown_error(raw),
        }
    }
}
