//! Designate API 类型定义

use serde::Deserialize;

use crate::types::{RecordSet, Zone};

/// 分页链接
#[derive(Debug, Default, Deserialize)]
pub struct Links {
    #[serde(default)]
    pub next: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ZonesResponse {
    pub zones: Vec<Zone>,
    #[serde(default)]
    pub links: Links,
}

#[derive(Debug, Deserialize)]
pub struct RecordSetsResponse {
    pub recordsets: Vec<RecordSet>,
    #[serde(default)]
    pub links: Links,
}

/// Designate 错误响应
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    #[serde(rename = "type", default)]
    pub error_type: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}
