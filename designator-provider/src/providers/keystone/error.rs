//! Keystone 错误映射

use crate::error::ProviderError;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::KeystoneProvider;

/// Keystone 以 HTTP 状态码作为错误码
/// 参考: <https://docs.openstack.org/api-ref/identity/v3/>
impl ProviderErrorMapper for KeystoneProvider {
    fn provider_name(&self) -> &'static str {
        "keystone"
    }

    fn map_error(&self, raw: RawApiError, _context: ErrorContext) -> ProviderError {
        match raw.code.as_deref() {
            // 用户名/密码错误，或项目不可访问
            Some("401" | "403") => ProviderError::InvalidCredentials {
                provider: self.provider_name().to_string(),
                raw_message: Some(raw.message),
            },
            _ => self.unknown_error(raw),
        }
    }
}
