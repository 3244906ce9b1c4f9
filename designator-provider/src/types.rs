//! 公共类型定义

use std::fmt;
use std::net::IpAddr;

use serde::{Deserialize, Deserializer, Serialize};

// ============ 凭证 ============

/// Keystone v3 密码认证所需的凭证
#[derive(Clone, Serialize, Deserialize)]
pub struct CloudCredentials {
    /// Keystone 地址，例如 `https://keystone.example.com:5000`
    pub auth_url: String,
    pub username: String,
    /// 未配置时由调用方从 `OS_PASSWORD` 补齐
    #[serde(default)]
    pub password: String,
    pub project_name: String,
    #[serde(default = "default_domain")]
    pub user_domain_name: String,
    #[serde(default = "default_domain")]
    pub project_domain_name: String,
    #[serde(default)]
    pub region_name: Option<String>,
    /// 服务目录中使用的 endpoint 类型
    #[serde(default = "default_interface")]
    pub interface: String,
    /// 覆盖服务目录中的 Neutron endpoint
    #[serde(default)]
    pub network_endpoint: Option<String>,
    /// 覆盖服务目录中的 Designate endpoint
    #[serde(default)]
    pub dns_endpoint: Option<String>,
    /// 单个 HTTP 请求超时（秒）
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl fmt::Debug for CloudCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CloudCredentials")
            .field("auth_url", &self.auth_url)
            .field("username", &self.username)
            .field("password", &"***")
            .field("project_name", &self.project_name)
            .field("user_domain_name", &self.user_domain_name)
            .field("project_domain_name", &self.project_domain_name)
            .field("region_name", &self.region_name)
            .field("interface", &self.interface)
            .field("network_endpoint", &self.network_endpoint)
            .field("dns_endpoint", &self.dns_endpoint)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

fn default_domain() -> String {
    "Default".to_string()
}

fn default_interface() -> String {
    "public".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

// ============ Neutron ============

/// Neutron 网络
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Network {
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// 外层 `None` 表示响应里没有 `dns_domain` 字段（dns 扩展未启用），
    /// 内层 `None` 表示字段为 null
    #[serde(default, deserialize_with = "deserialize_present")]
    pub dns_domain: Option<Option<String>>,
}

/// Neutron 端口
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Port {
    pub id: String,
    pub network_id: String,
    #[serde(default)]
    pub device_id: String,
    #[serde(default)]
    pub device_owner: String,
    /// 语义同 [`Network::dns_domain`]
    #[serde(default, deserialize_with = "deserialize_present")]
    pub dns_name: Option<Option<String>>,
    #[serde(default)]
    pub fixed_ips: Vec<FixedIp>,
}

/// 端口上的固定 IP
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedIp {
    pub subnet_id: String,
    pub ip_address: IpAddr,
}

/// 区分“字段缺失”和“字段为 null”
fn deserialize_present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

// ============ Designate ============

/// Designate Zone
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub status: String,
}

/// 记录类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordType {
    A,
    Ptr,
}

impl RecordType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::Ptr => "PTR",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Designate 记录集
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordSet {
    pub id: String,
    pub zone_id: String,
    #[serde(default)]
    pub zone_name: Option<String>,
    pub name: String,
    #[serde(rename = "type")]
    pub record_type: String,
    #[serde(default)]
    pub records: Vec<String>,
    #[serde(default)]
    pub ttl: Option<u32>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    /// 异步操作中的动作（NONE / CREATE / UPDATE / DELETE）
    #[serde(default)]
    pub action: Option<String>,
}

impl RecordSet {
    /// 是否正在被删除
    pub fn is_pending_delete(&self) -> bool {
        self.action.as_deref() == Some("DELETE")
    }
}

/// 记录集列表过滤条件
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordSetQuery {
    /// `None` 时列出所有类型
    pub record_type: Option<RecordType>,
    pub name: Option<String>,
}

impl RecordSetQuery {
    /// 不过滤，列出 Zone 内所有记录集
    pub fn all() -> Self {
        Self::default()
    }

    pub fn by_type(record_type: RecordType) -> Self {
        Self {
            record_type: Some(record_type),
            name: None,
        }
    }

    pub fn by_name(record_type: RecordType, name: impl Into<String>) -> Self {
        Self {
            record_type: Some(record_type),
            name: Some(name.into()),
        }
    }

    /// 生成 query string
    pub fn to_query_string(&self) -> String {
        let mut params = Vec::new();
        if let Some(record_type) = self.record_type {
            params.push(format!("type={record_type}"));
        }
        if let Some(name) = &self.name {
            params.push(format!("name={}", urlencoding::encode(name)));
        }
        params.join("&")
    }
}

/// 创建记录集请求
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateRecordSetRequest {
    pub name: String,
    #[serde(rename = "type")]
    pub record_type: RecordType,
    pub records: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
