//! 通用 HTTP 客户端工具
//!
//! 提供可复用的 HTTP 请求处理逻辑，减少各服务客户端的重复代码。
//! 各服务自己构造 `RequestBuilder`（token、headers、body），
//! 这里只负责发送、日志记录、读取响应和 JSON 解析。

use reqwest::RequestBuilder;
use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;

use crate::error::ProviderError;

/// 一次 HTTP 调用的结果
#[derive(Debug)]
pub(crate) struct HttpResponse {
    pub status: u16,
    pub headers: HeaderMap,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// HTTP 工具函数集
pub(crate) struct HttpUtils;

impl HttpUtils {
    /// 执行 HTTP 请求并返回状态码、响应头和响应文本
    ///
    /// # Arguments
    /// * `request_builder` - 已配置好的请求构造器
    /// * `provider_name` - 服务名称（用于日志）
    /// * `method_name` - 请求方法名（用于日志）
    /// * `url` - 请求地址（用于日志）
    pub async fn execute_request(
        request_builder: RequestBuilder,
        provider_name: &str,
        method_name: &str,
        url: &str,
    ) -> Result<HttpResponse, ProviderError> {
        log::debug!("[{provider_name}] {method_name} {url}");

        let response = request_builder
            .send()
            .await
            .map_err(|e| ProviderError::NetworkError {
                provider: provider_name.to_string(),
                detail: e.to_string(),
            })?;

        let status = response.status().as_u16();
        let headers = response.headers().clone();
        log::debug!("[{provider_name}] Response Status: {status}");

        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::NetworkError {
                provider: provider_name.to_string(),
                detail: format!("读取响应失败: {e}"),
            })?;

        log::trace!("[{provider_name}] Response Body: {body}");

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }

    /// 解析 JSON 响应
    pub fn parse_json<T>(response_text: &str, provider_name: &str) -> Result<T, ProviderError>
    where
        T: DeserializeOwned,
    {
        serde_json::from_str(response_text).map_err(|e| {
            log::error!("[{provider_name}] JSON 解析失败: {e}");
            log::debug!("[{provider_name}] 原始响应: {response_text}");
            ProviderError::ParseError {
                provider: provider_name.to_string(),
                detail: e.to_string(),
            }
        })
    }

    /// 序列化请求体
    pub fn to_json_body<B>(body: &B, provider_name: &str) -> Result<String, ProviderError>
    where
        B: serde::Serialize,
    {
        serde_json::to_string(body).map_err(|e| ProviderError::SerializationError {
            provider: provider_name.to_string(),
            detail: e.to_string(),
        })
    }
}
