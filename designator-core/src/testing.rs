//! 测试用的内存实现

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;
use designator_provider::{
    ComputeProvider, CreateRecordSetRequest, DnsProvider, Network, Port, ProviderError, RecordSet,
    RecordSetQuery, Result, Zone,
};

use crate::utils::dns_name;

fn network_error(detail: &str) -> ProviderError {
    ProviderError::NetworkError {
        provider: "fake".to_string(),
        detail: detail.to_string(),
    }
}

/// 内存 Neutron
#[derive(Default)]
pub struct FakeCompute {
    networks: Mutex<Vec<Network>>,
    ports: Mutex<Vec<Port>>,
    fail: Mutex<bool>,
}

impl FakeCompute {
    pub fn new(networks: Vec<Network>, ports: Vec<Port>) -> Self {
        Self {
            networks: Mutex::new(networks),
            ports: Mutex::new(ports),
            fail: Mutex::new(false),
        }
    }

    pub fn set_ports(&self, ports: Vec<Port>) {
        *self.ports.lock().unwrap() = ports;
    }

    pub fn fail_listing(&self) {
        *self.fail.lock().unwrap() = true;
    }
}

#[async_trait]
impl ComputeProvider for FakeCompute {
    async fn list_networks(&self) -> Result<Vec<Network>> {
        if *self.fail.lock().unwrap() {
            return Err(network_error("neutron unavailable"));
        }
        Ok(self.networks.lock().unwrap().clone())
    }

    async fn list_ports(&self) -> Result<Vec<Port>> {
        if *self.fail.lock().unwrap() {
            return Err(network_error("neutron unavailable"));
        }
        Ok(self.ports.lock().unwrap().clone())
    }
}

#[derive(Default)]
struct DnsState {
    zones: Vec<Zone>,
    recordsets: Vec<RecordSet>,
    next_id: usize,
    fail_list: bool,
    fail_create: HashSet<String>,
    fail_delete: HashSet<String>,
    writes: usize,
}

/// 内存 Designate
#[derive(Default)]
pub struct FakeDns {
    state: Mutex<DnsState>,
}

impl FakeDns {
    pub fn new(zones: &[(&str, &str)]) -> Self {
        let zones = zones
            .iter()
            .map(|(id, name)| Zone {
                id: (*id).to_string(),
                name: (*name).to_string(),
                status: "ACTIVE".to_string(),
            })
            .collect();
        Self {
            state: Mutex::new(DnsState {
                zones,
                ..Default::default()
            }),
        }
    }

    /// 预置一个记录集
    pub fn insert(
        &self,
        zone_id: &str,
        name: &str,
        record_type: &str,
        records: &[&str],
        description: Option<&str>,
    ) {
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let id = format!("rs-{}", state.next_id);
        state.recordsets.push(RecordSet {
            id,
            zone_id: zone_id.to_string(),
            zone_name: None,
            name: dns_name::normalize_fqdn(name),
            record_type: record_type.to_string(),
            records: records.iter().map(|r| (*r).to_string()).collect(),
            ttl: None,
            description: description.map(str::to_string),
            status: Some("ACTIVE".to_string()),
            action: Some("NONE".to_string()),
        });
    }

    pub fn fail_listing(&self) {
        self.state.lock().unwrap().fail_list = true;
    }

    pub fn fail_create(&self, name: &str) {
        self.state
            .lock()
            .unwrap()
            .fail_create
            .insert(dns_name::normalize_fqdn(name));
    }

    pub fn fail_delete(&self, name: &str) {
        self.state
            .lock()
            .unwrap()
            .fail_delete
            .insert(dns_name::normalize_fqdn(name));
    }

    /// 当前所有记录集
    pub fn recordsets(&self) -> Vec<RecordSet> {
        self.state.lock().unwrap().recordsets.clone()
    }

    /// 某类型记录的 (名称, 值) 列表，按名称排序
    pub fn records_of(&self, record_type: &str) -> Vec<(String, Vec<String>)> {
        let mut records: Vec<_> = self
            .recordsets()
            .into_iter()
            .filter(|rs| rs.record_type == record_type)
            .map(|rs| (rs.name, rs.records))
            .collect();
        records.sort();
        records
    }

    /// 成功执行的创建 + 删除次数
    pub fn writes(&self) -> usize {
        self.state.lock().unwrap().writes
    }
}

#[async_trait]
impl DnsProvider for FakeDns {
    async fn list_zones(&self) -> Result<Vec<Zone>> {
        let state = self.state.lock().unwrap();
        if state.fail_list {
            return Err(network_error("designate unavailable"));
        }
        Ok(state.zones.clone())
    }

    async fn list_recordsets(
        &self,
        zone_id: &str,
        query: &RecordSetQuery,
    ) -> Result<Vec<RecordSet>> {
        let state = self.state.lock().unwrap();
        if state.fail_list {
            return Err(network_error("designate unavailable"));
        }
        Ok(state
            .recordsets
            .iter()
            .filter(|rs| rs.zone_id == zone_id)
            .filter(|rs| {
                query
                    .record_type
                    .is_none_or(|record_type| rs.record_type == record_type.as_str())
            })
            .filter(|rs| {
                query
                    .name
                    .as_deref()
                    .is_none_or(|name| dns_name::normalize_fqdn(name) == rs.name)
            })
            .cloned()
            .collect())
    }

    async fn create_recordset(
        &self,
        zone_id: &str,
        request: &CreateRecordSetRequest,
    ) -> Result<RecordSet> {
        let name = dns_name::normalize_fqdn(&request.name);
        let mut state = self.state.lock().unwrap();
        if state.fail_create.contains(&name) {
            return Err(ProviderError::Unknown {
                provider: "fake".to_string(),
                raw_code: Some("500".to_string()),
                raw_message: "internal error".to_string(),
            });
        }
        if state
            .recordsets
            .iter()
            .any(|rs| {
                rs.name == name
                    && (rs.record_type == request.record_type.as_str() || rs.record_type == "CNAME")
            })
        {
            return Err(ProviderError::RecordExists {
                provider: "fake".to_string(),
                record_name: name,
                raw_message: None,
            });
        }

        state.next_id += 1;
        state.writes += 1;
        let recordset = RecordSet {
            id: format!("rs-{}", state.next_id),
            zone_id: zone_id.to_string(),
            zone_name: None,
            name,
            record_type: request.record_type.as_str().to_string(),
            records: request.records.clone(),
            ttl: request.ttl,
            description: request.description.clone(),
            status: Some("PENDING".to_string()),
            action: Some("CREATE".to_string()),
        };
        state.recordsets.push(recordset.clone());
        Ok(recordset)
    }

    async fn delete_recordset(&self, zone_id: &str, recordset_id: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        let Some(index) = state
            .recordsets
            .iter()
            .position(|rs| rs.zone_id == zone_id && rs.id == recordset_id)
        else {
            return Err(ProviderError::RecordNotFound {
                provider: "fake".to_string(),
                record_id: recordset_id.to_string(),
                raw_message: None,
            });
        };
        if state.fail_delete.contains(&state.recordsets[index].name) {
            return Err(network_error("connection reset"));
        }
        state.recordsets.remove(index);
        state.writes += 1;
        Ok(())
    }
}
