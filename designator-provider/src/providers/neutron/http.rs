//! Neutron HTTP 请求方法

use serde::de::DeserializeOwned;

use crate::error::{ProviderError, Result};
use crate::http_client::HttpUtils;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::types::ErrorResponse;
use super::NeutronProvider;

impl NeutronProvider {
    /// 执行 GET 请求（完整 URL，翻页时直接使用 `rel=next` 链接）
    pub(crate) async fn get_url<T: DeserializeOwned>(
        &self,
        url: &str,
        ctx: ErrorContext,
    ) -> Result<T> {
        let request = self
            .session
            .client
            .get(url)
            .header("X-Auth-Token", &self.session.token)
            .header("Accept", "application/json");
        let response =
            HttpUtils::execute_request(request, self.provider_name(), "GET", url).await?;

        if !response.is_success() {
            if response.status == 401 || response.status == 403 {
                return Err(self.map_error(
                    RawApiError::with_code(response.status.to_string(), response.body),
                    ctx,
                ));
            }
            if let Ok(error) = serde_json::from_str::<ErrorResponse>(&response.body) {
                return Err(self.map_error(
                    RawApiError::with_code(error.error.error_type, error.error.message),
                    ctx,
                ));
            }
            return Err(self.unknown_error(RawApiError::new(format!(
                "HTTP {}: {}",
                response.status, response.body
            ))));
        }

        HttpUtils::parse_json(&response.body, self.provider_name())
    }

    pub(crate) fn too_many_pages(&self, url: &str) -> ProviderError {
        self.parse_error(format!("翻页次数超过上限，最后一页: {url}"))
    }
}
