//! Designate HTTP 请求方法

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{ProviderError, Result};
use crate::http_client::{HttpResponse, HttpUtils};
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::DesignateProvider;
use super::types::ErrorResponse;

impl DesignateProvider {
    /// 执行 GET 请求（完整 URL，翻页时直接使用 `links.next`）
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

        self.check_status(response, ctx)
            .and_then(|body| HttpUtils::parse_json(&body, self.provider_name()))
    }

    /// 执行 POST 请求
    pub(crate) async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
        ctx: ErrorContext,
    ) -> Result<T> {
        let payload = HttpUtils::to_json_body(body, self.provider_name())?;
        let url = self.url(path);
        log::debug!("POST {url} Body: {payload}");

        let request = self
            .session
            .client
            .post(&url)
            .header("X-Auth-Token", &self.session.token)
            .header("Content-Type", "application/json")
            .body(payload);
        let response =
            HttpUtils::execute_request(request, self.provider_name(), "POST", &url).await?;

        self.check_status(response, ctx)
            .and_then(|body| HttpUtils::parse_json(&body, self.provider_name()))
    }

    /// 执行 DELETE 请求
    pub(crate) async fn delete(&self, path: &str, ctx: ErrorContext) -> Result<()> {
        let url = self.url(path);
        let request = self
            .session
            .client
            .delete(&url)
            .header("X-Auth-Token", &self.session.token);
        let response =
            HttpUtils::execute_request(request, self.provider_name(), "DELETE", &url).await?;

        self.check_status(response, ctx).map(|_| ())
    }

    /// 非 2xx 响应映射为 [`ProviderError`]，成功时返回响应体
    fn check_status(&self, response: HttpResponse, ctx: ErrorContext) -> Result<String> {
        if response.is_success() {
            return Ok(response.body);
        }

        let status = response.status;
        if status == 401 || status == 403 {
            return Err(self.map_error(
                RawApiError::with_code(status.to_string(), response.body),
                ctx,
            ));
        }

        match serde_json::from_str::<ErrorResponse>(&response.body) {
            Ok(ErrorResponse {
                error_type: Some(error_type),
                message,
            }) => {
                log::error!("API 错误: {error_type} - {}", message.as_deref().unwrap_or(""));
                Err(self.map_error(
                    RawApiError::with_code(error_type, message.unwrap_or_default()),
                    ctx,
                ))
            }
            _ => Err(self.unknown_error(RawApiError::new(format!(
                "HTTP {status}: {}",
                response.body
            )))),
        }
    }

    pub(crate) fn too_many_pages(&self, url: &str) -> ProviderError {
        self.parse_error(format!("翻页次数超过上限，最后一页: {url}"))
    }
}
