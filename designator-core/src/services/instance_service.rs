//! 实例发现服务
//!
//! 从 Neutron 的网络和端口推导实例：
//! 网络的 `dns_domain` 决定 Zone，端口的 `dns_name` 决定主机名。

use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::Arc;

use async_trait::async_trait;
use designator_provider::{ComputeProvider, Network, Port};

use crate::error::{CoreError, CoreResult};
use crate::traits::InstanceSource;
use crate::types::{Instance, ReconcileConfig};
use crate::utils::dns_name;

/// 实例发现服务（Neutron）
pub struct InstanceService {
    compute: Arc<dyn ComputeProvider>,
    config: Arc<ReconcileConfig>,
}

impl InstanceService {
    /// 创建实例发现服务
    #[must_use]
    pub fn new(compute: Arc<dyn ComputeProvider>, config: Arc<ReconcileConfig>) -> Self {
        Self { compute, config }
    }

    /// 网络 ID -> Zone
    ///
    /// 只保留设置了 `dns_domain` 且在白名单内的网络
    fn zone_lookup(&self, networks: &[Network]) -> CoreResult<HashMap<String, String>> {
        let mut zones = HashMap::new();
        for network in networks {
            let Some(dns_domain) = &network.dns_domain else {
                return Err(CoreError::DnsExtensionDisabled(
                    format!("network {}", network.id),
                    "dns_domain",
                ));
            };
            let Some(domain) = dns_domain.as_deref().filter(|d| !d.trim().is_empty()) else {
                continue;
            };
            if !self.config.network_allowed(network) {
                log::debug!("Network {} ({}) is not in the allowlist", network.id, network.name);
                continue;
            }

            let zone = dns_name::normalize_fqdn(domain);
            if !self.config.zone_allowed(&zone) {
                log::debug!("Zone {zone} of network {} is not in the allowlist", network.id);
                continue;
            }
            zones.insert(network.id.clone(), zone);
        }
        Ok(zones)
    }

    /// 端口 -> 实例，端口不需要 DNS 时返回 `None`
    fn port_to_instance(
        port: &Port,
        zones: &HashMap<String, String>,
    ) -> CoreResult<Option<Instance>> {
        let Some(dns_name) = &port.dns_name else {
            return Err(CoreError::DnsExtensionDisabled(
                format!("port {}", port.id),
                "dns_name",
            ));
        };
        let Some(name) = dns_name.as_deref().filter(|n| !n.trim().is_empty()) else {
            return Ok(None);
        };
        let Some(zone) = zones.get(&port.network_id) else {
            log::info!(
                "Not setting DNS info for port {} because dns_domain is not set for network {}",
                port.id,
                port.network_id
            );
            return Ok(None);
        };

        let address = port.fixed_ips.iter().find_map(|ip| match ip.ip_address {
            IpAddr::V4(v4) => Some(v4),
            IpAddr::V6(_) => None,
        });

        Ok(Some(Instance {
            id: port.id.clone(),
            name: name.trim().to_string(),
            zone: zone.clone(),
            address,
        }))
    }
}

#[async_trait]
impl InstanceSource for InstanceService {
    async fn list_instances(&self) -> CoreResult<Vec<Instance>> {
        // 1. 网络的 dns_domain
        let networks = self.compute.list_networks().await?;
        let zones = self.zone_lookup(&networks)?;

        // 2. 设置了 dns_name 的端口
        let ports = self.compute.list_ports().await?;
        let mut instances = Vec::new();
        for port in &ports {
            if let Some(instance) = Self::port_to_instance(port, &zones)? {
                instances.push(instance);
            }
        }
        instances.sort_by(|a, b| a.id.cmp(&b.id));

        log::debug!(
            "Found {} DNS-enabled instances on {} networks ({} ports total)",
            instances.len(),
            zones.len(),
            ports.len()
        );
        Ok(instances)
    }
}
