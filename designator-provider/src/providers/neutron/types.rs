//! Neutron API 类型定义

use serde::Deserialize;

use crate::types::{Network, Port};

/// 分页链接（`networks_links` / `ports_links`）
#[derive(Debug, Deserialize)]
pub struct Link {
    pub rel: String,
    pub href: String,
}

/// 取出 `rel == "next"` 的链接
pub fn next_link(links: Vec<Link>) -> Option<String> {
    links
        .into_iter()
        .find(|link| link.rel == "next")
        .map(|link| link.href)
}

#[derive(Debug, Deserialize)]
pub struct NetworksResponse {
    pub networks: Vec<Network>,
    #[serde(default)]
    pub networks_links: Vec<Link>,
}

#[derive(Debug, Deserialize)]
pub struct PortsResponse {
    pub ports: Vec<Port>,
    #[serde(default)]
    pub ports_links: Vec<Link>,
}

/// Neutron 错误响应
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    #[serde(rename = "NeutronError")]
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(rename = "type", default)]
    pub error_type: String,
    #[serde(default)]
    pub message: String,
}
