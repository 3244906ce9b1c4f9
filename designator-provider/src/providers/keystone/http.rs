//! Keystone 认证请求

use crate::error::{ProviderError, Result};
use crate::http_client::HttpUtils;
use crate::session::{Session, normalize_endpoint};
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::types::{
    Auth, AuthRequest, ErrorResponse, Identity, NameRef, PasswordMethod, ProjectRef, Scope,
    TokenResponse, UserRef,
};
use super::{DNS_SERVICE_TYPE, KEYSTONE_TOKENS_PATH, KeystoneProvider, NETWORK_SERVICE_TYPE};

impl KeystoneProvider {
    /// 密码认证并解析服务目录
    ///
    /// 流程: POST /v3/auth/tokens -> 取 X-Subject-Token -> 查找 network / dns endpoint
    pub async fn authenticate(&self) -> Result<Session> {
        let credentials = &self.credentials;
        let body = AuthRequest {
            auth: Auth {
                identity: Identity {
                    methods: ["password"],
                    password: PasswordMethod {
                        user: UserRef {
                            name: &credentials.username,
                            domain: NameRef {
                                name: &credentials.user_domain_name,
                            },
                            password: &credentials.password,
                        },
                    },
                },
                scope: Scope {
                    project: ProjectRef {
                        name: &credentials.project_name,
                        domain: NameRef {
                            name: &credentials.project_domain_name,
                        },
                    },
                },
            },
        };
        let payload = HttpUtils::to_json_body(&body, self.provider_name())?;

        let url = format!(
            "{}{KEYSTONE_TOKENS_PATH}",
            credentials.auth_url.trim_end_matches('/').trim_end_matches("/v3")
        );

        let request = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .body(payload);
        let response =
            HttpUtils::execute_request(request, self.provider_name(), "POST", &url).await?;

        if !response.is_success() {
            let message = serde_json::from_str::<ErrorResponse>(&response.body)
                .map(|e| e.error.message)
                .unwrap_or(response.body);
            return Err(self.map_error(
                RawApiError::with_code(response.status.to_string(), message),
                ErrorContext::default(),
            ));
        }

        let token = response
            .headers
            .get("X-Subject-Token")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .ok_or_else(|| self.parse_error("响应中缺少 X-Subject-Token"))?;

        let parsed: TokenResponse = HttpUtils::parse_json(&response.body, self.provider_name())?;

        let network_endpoint = self.resolve_endpoint(
            credentials.network_endpoint.as_deref(),
            &parsed,
            NETWORK_SERVICE_TYPE,
        )?;
        let dns_endpoint =
            self.resolve_endpoint(credentials.dns_endpoint.as_deref(), &parsed, DNS_SERVICE_TYPE)?;

        log::info!(
            "Authenticated as {}@{} (token expires at {})",
            credentials.username,
            credentials.project_name,
            parsed
                .token
                .expires_at
                .map_or_else(|| "unknown".to_string(), |t| t.to_rfc3339())
        );
        log::debug!("network endpoint: {network_endpoint}, dns endpoint: {dns_endpoint}");

        Ok(Session {
            client: self.client.clone(),
            token,
            expires_at: parsed.token.expires_at,
            network_endpoint: normalize_endpoint(&network_endpoint, "/v2.0"),
            dns_endpoint: normalize_endpoint(&dns_endpoint, "/v2"),
        })
    }

    /// 配置中的 endpoint 优先，否则查服务目录
    fn resolve_endpoint(
        &self,
        configured: Option<&str>,
        response: &TokenResponse,
        service_type: &str,
    ) -> Result<String> {
        if let Some(url) = configured {
            return Ok(url.to_string());
        }

        response
            .token
            .find_endpoint(
                service_type,
                &self.credentials.interface,
                self.credentials.region_name.as_deref(),
            )
            .map(str::to_string)
            .ok_or_else(|| ProviderError::EndpointNotFound {
                service_type: service_type.to_string(),
                interface: self.credentials.interface.clone(),
                region: self.credentials.region_name.clone(),
            })
    }
}
