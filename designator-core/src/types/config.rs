//! 同步配置

use designator_provider::Network;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::utils::dns_name;

/// 受管记录的默认标记（写在 Designate 记录集的 description 中）
pub const DEFAULT_MANAGED_MARKER: &str = "managed-by: designator";

/// 同步配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcileConfig {
    /// 受管记录标记：description 与之完全相等的记录集才会被修改或删除
    #[serde(default = "default_managed_marker")]
    pub managed_marker: String,

    /// 新建记录的 TTL，`None` 时使用 Zone 默认值
    #[serde(default)]
    pub ttl: Option<u32>,

    /// 是否同时维护 PTR 记录
    #[serde(default = "default_reverse_dns")]
    pub reverse_dns: bool,

    /// 网络白名单（ID 或名称），为空表示所有设置了 `dns_domain` 的网络
    #[serde(default)]
    pub networks: Vec<String>,

    /// Zone 白名单，为空表示项目下所有正向 Zone
    #[serde(default)]
    pub zones: Vec<String>,
}

fn default_managed_marker() -> String {
    DEFAULT_MANAGED_MARKER.to_string()
}

fn default_reverse_dns() -> bool {
    true
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            managed_marker: default_managed_marker(),
            ttl: None,
            reverse_dns: default_reverse_dns(),
            networks: Vec::new(),
            zones: Vec::new(),
        }
    }
}

impl ReconcileConfig {
    /// 校验配置
    pub fn validate(&self) -> CoreResult<()> {
        if self.managed_marker.trim().is_empty() {
            return Err(CoreError::ValidationError(
                "managed_marker 不能为空，否则无法区分受管记录".to_string(),
            ));
        }
        if self.ttl == Some(0) {
            return Err(CoreError::ValidationError("ttl 必须大于 0".to_string()));
        }
        Ok(())
    }

    /// 网络是否在白名单内
    pub fn network_allowed(&self, network: &Network) -> bool {
        self.networks.is_empty()
            || self
                .networks
                .iter()
                .any(|n| n == &network.id || n == &network.name)
    }

    /// Zone 是否在白名单内
    pub fn zone_allowed(&self, zone: &str) -> bool {
        if self.zones.is_empty() {
            return true;
        }
        let zone = dns_name::normalize_fqdn(zone);
        self.zones
            .iter()
            .any(|z| dns_name::normalize_fqdn(z) == zone)
    }

    /// description 是否带有受管标记
    pub fn is_managed(&self, description: Option<&str>) -> bool {
        description.is_some_and(|d| d.trim() == self.managed_marker.trim())
    }
}
