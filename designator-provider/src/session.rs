//! 已认证的云会话

use std::fmt;

use chrono::{DateTime, Utc};
use reqwest::Client;

/// Keystone 认证后得到的会话：token + 各服务 endpoint
///
/// 每次同步重新认证，不跨周期复用。
#[derive(Clone)]
pub struct Session {
    pub(crate) client: Client,
    pub(crate) token: String,
    pub(crate) expires_at: Option<DateTime<Utc>>,
    pub(crate) network_endpoint: String,
    pub(crate) dns_endpoint: String,
}

impl Session {
    /// 直接用已有 token 构造会话（跳过 Keystone）
    pub fn from_token(
        client: Client,
        token: impl Into<String>,
        network_endpoint: &str,
        dns_endpoint: &str,
    ) -> Self {
        Self {
            client,
            token: token.into(),
            expires_at: None,
            network_endpoint: normalize_endpoint(network_endpoint, "/v2.0"),
            dns_endpoint: normalize_endpoint(dns_endpoint, "/v2"),
        }
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    pub fn network_endpoint(&self) -> &str {
        &self.network_endpoint
    }

    pub fn dns_endpoint(&self) -> &str {
        &self.dns_endpoint
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &"***")
            .field("expires_at", &self.expires_at)
            .field("network_endpoint", &self.network_endpoint)
            .field("dns_endpoint", &self.dns_endpoint)
            .finish_non_exhaustive()
    }
}

/// 去掉末尾的 `/` 和 API 版本后缀，统一由各客户端自己拼接版本路径
pub(crate) fn normalize_endpoint(url: &str, version_suffix: &str) -> String {
    let trimmed = url.trim_end_matches('/');
    trimmed
        .strip_suffix(version_suffix)
        .unwrap_or(trimmed)
        .to_string()
}
