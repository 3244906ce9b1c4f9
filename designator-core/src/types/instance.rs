//! 实例类型

use std::net::Ipv4Addr;

use serde::{Deserialize, Serialize};

use crate::utils::dns_name;

/// 需要 DNS 记录的虚拟机实例（对应一个设置了 `dns_name` 的 Neutron 端口）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instance {
    /// 端口 ID
    pub id: String,
    /// 主机名（端口的 `dns_name`）
    pub name: String,
    /// 所属 Zone（网络的 `dns_domain`，已规范化）
    pub zone: String,
    /// 可用于 A 记录的地址；尚未分配时为 `None`
    pub address: Option<Ipv4Addr>,
}

impl Instance {
    /// 推导出的记录名 `<name>.<zone>`
    pub fn record_name(&self) -> String {
        dns_name::record_name(&self.name, &self.zone)
    }
}
