//! Keystone API 类型定义

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============ 请求 ============

#[derive(Debug, Serialize)]
pub struct AuthRequest<'a> {
    pub auth: Auth<'a>,
}

#[derive(Debug, Serialize)]
pub struct Auth<'a> {
    pub identity: Identity<'a>,
    pub scope: Scope<'a>,
}

#[derive(Debug, Serialize)]
pub struct Identity<'a> {
    pub methods: [&'a str; 1],
    pub password: PasswordMethod<'a>,
}

#[derive(Debug, Serialize)]
pub struct PasswordMethod<'a> {
    pub user: UserRef<'a>,
}

#[derive(Debug, Serialize)]
pub struct UserRef<'a> {
    pub name: &'a str,
    pub domain: NameRef<'a>,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub struct NameRef<'a> {
    pub name: &'a str,
}

#[derive(Debug, Serialize)]
pub struct Scope<'a> {
    pub project: ProjectRef<'a>,
}

#[derive(Debug, Serialize)]
pub struct ProjectRef<'a> {
    pub name: &'a str,
    pub domain: NameRef<'a>,
}

// ============ 响应 ============

#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub token: Token,
}

#[derive(Debug, Deserialize)]
pub struct Token {
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub catalog: Vec<CatalogEntry>,
}

#[derive(Debug, Deserialize)]
pub struct CatalogEntry {
    #[serde(rename = "type")]
    pub service_type: String,
    #[serde(default)]
    pub endpoints: Vec<CatalogEndpoint>,
}

#[derive(Debug, Deserialize)]
pub struct CatalogEndpoint {
    pub interface: String,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub region_id: Option<String>,
    pub url: String,
}

impl Token {
    /// 在服务目录中查找 endpoint，`region` 为空时取第一个匹配项
    pub fn find_endpoint(
        &self,
        service_type: &str,
        interface: &str,
        region: Option<&str>,
    ) -> Option<&str> {
        self.catalog
            .iter()
            .filter(|entry| entry.service_type == service_type)
            .flat_map(|entry| entry.endpoints.iter())
            .filter(|endpoint| endpoint.interface == interface)
            .find(|endpoint| {
                region.is_none_or(|r| {
                    endpoint.region.as_deref() == Some(r)
                        || endpoint.region_id.as_deref() == Some(r)
                })
            })
            .map(|endpoint| endpoint.url.as_str())
    }
}

#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: String,
}
