//! 记录存储服务（Designate）
//!
//! A 记录写入实例所在的正向 Zone；开启 `reverse_dns` 时，
//! 同时在最长匹配的 `in-addr.arpa.` Zone 中维护 PTR 记录。
//! PTR 失败只记录警告，不影响 A 记录的结果。

use std::net::Ipv4Addr;
use std::sync::Arc;

use async_trait::async_trait;
use designator_provider::{
    CreateRecordSetRequest, DnsProvider, ProviderError, RecordSet, RecordSetQuery, RecordType,
    Zone,
};
use tokio::sync::RwLock;

use crate::error::{CoreError, CoreResult};
use crate::traits::RecordStore;
use crate::types::{DesiredRecord, Record, ReconcileConfig, ZoneRecords};
use crate::utils::dns_name;

/// 记录存储服务
pub struct RecordService {
    dns: Arc<dyn DnsProvider>,
    config: Arc<ReconcileConfig>,
    /// 本周期内的 Zone 列表缓存
    zones: RwLock<Option<Arc<Vec<Zone>>>>,
}

impl RecordService {
    #[must_use]
    pub fn new(dns: Arc<dyn DnsProvider>, config: Arc<ReconcileConfig>) -> Self {
        Self {
            dns,
            config,
            zones: RwLock::new(None),
        }
    }

    /// 获取 Zone 列表（首次调用时从 Designate 拉取）
    async fn zones(&self) -> CoreResult<Arc<Vec<Zone>>> {
        if let Some(zones) = self.zones.read().await.as_ref() {
            return Ok(Arc::clone(zones));
        }
        self.refresh_zones().await
    }

    async fn refresh_zones(&self) -> CoreResult<Arc<Vec<Zone>>> {
        let zones = Arc::new(self.dns.list_zones().await?);
        *self.zones.write().await = Some(Arc::clone(&zones));
        Ok(zones)
    }

    /// 参与同步的正向 Zone
    fn forward_zones<'a>(&self, zones: &'a [Zone]) -> Vec<&'a Zone> {
        zones
            .iter()
            .filter(|z| !dns_name::is_reverse_zone(&z.name) && self.config.zone_allowed(&z.name))
            .collect()
    }

    /// 按名称查找 Zone
    async fn find_zone(&self, name: &str) -> CoreResult<Zone> {
        let wanted = dns_name::normalize_fqdn(name);
        self.zones()
            .await?
            .iter()
            .find(|z| dns_name::normalize_fqdn(&z.name) == wanted)
            .cloned()
            .ok_or(CoreError::ZoneNotFound(wanted))
    }

    /// 包含 PTR 名称的最长反向 Zone
    async fn find_reverse_zone(&self, ptr_name: &str) -> CoreResult<Option<Zone>> {
        Ok(self
            .zones()
            .await?
            .iter()
            .filter(|z| {
                dns_name::is_reverse_zone(&z.name) && dns_name::zone_contains(&z.name, ptr_name)
            })
            .max_by_key(|z| dns_name::normalize_fqdn(&z.name).len())
            .cloned())
    }

    fn to_record(&self, zone: &Zone, recordset: &RecordSet) -> Record {
        let address = match recordset.records.as_slice() {
            [single] => single.parse::<Ipv4Addr>().ok(),
            _ => None,
        };
        Record {
            id: recordset.id.clone(),
            zone_id: zone.id.clone(),
            zone: dns_name::normalize_fqdn(&zone.name),
            name: dns_name::normalize_fqdn(&recordset.name),
            address,
            managed: self.config.is_managed(recordset.description.as_deref()),
        }
    }

    fn managed_request(
        &self,
        name: String,
        record_type: RecordType,
        value: String,
    ) -> CreateRecordSetRequest {
        CreateRecordSetRequest {
            name,
            record_type,
            records: vec![value],
            ttl: self.config.ttl,
            description: Some(self.config.managed_marker.clone()),
        }
    }

    /// 创建 PTR 记录
    ///
    /// 已有同名的受管 PTR 指向其他名称时先删除；非受管 PTR 保持不动。
    async fn create_ptr(&self, address: Ipv4Addr, target: &str) -> CoreResult<()> {
        let ptr_name = dns_name::reverse_pointer(address);
        let Some(zone) = self.find_reverse_zone(&ptr_name).await? else {
            log::debug!("No reverse zone for {ptr_name}, skipping PTR");
            return Ok(());
        };

        let existing = self
            .dns
            .list_recordsets(&zone.id, &RecordSetQuery::by_name(RecordType::Ptr, &ptr_name))
            .await?;
        for recordset in existing.iter().filter(|rs| !rs.is_pending_delete()) {
            if !self.config.is_managed(recordset.description.as_deref()) {
                log::warn!("PTR {ptr_name} exists and is not managed, leaving it alone");
                return Ok(());
            }
            if points_at(recordset, target) {
                log::debug!("PTR {ptr_name} already points at {target}");
                return Ok(());
            }
            log::info!("Replacing stale PTR {ptr_name} -> {:?}", recordset.records);
            self.dns.delete_recordset(&zone.id, &recordset.id).await?;
        }

        let request = self.managed_request(ptr_name.clone(), RecordType::Ptr, target.to_string());
        self.dns.create_recordset(&zone.id, &request).await?;
        log::info!("Created PTR {ptr_name} -> {target}");
        Ok(())
    }

    /// 删除指向 `target` 的受管 PTR 记录
    async fn delete_ptr(&self, address: Ipv4Addr, target: &str) -> CoreResult<()> {
        let ptr_name = dns_name::reverse_pointer(address);
        let Some(zone) = self.find_reverse_zone(&ptr_name).await? else {
            return Ok(());
        };

        let existing = self
            .dns
            .list_recordsets(&zone.id, &RecordSetQuery::by_name(RecordType::Ptr, &ptr_name))
            .await?;
        for recordset in existing.iter().filter(|rs| {
            !rs.is_pending_delete()
                && self.config.is_managed(rs.description.as_deref())
                && points_at(rs, target)
        }) {
            match self.dns.delete_recordset(&zone.id, &recordset.id).await {
                Ok(()) | Err(ProviderError::RecordNotFound { .. }) => {
                    log::info!("Deleted PTR {ptr_name} -> {target}");
                }
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }
}

/// PTR 记录集是否指向 `target`
fn points_at(recordset: &RecordSet, target: &str) -> bool {
    let target = dns_name::normalize_fqdn(target);
    recordset
        .records
        .iter()
        .any(|r| dns_name::normalize_fqdn(r) == target)
}

#[async_trait]
impl RecordStore for RecordService {
    async fn list_managed_records(&self) -> CoreResult<ZoneRecords> {
        let zones = self.refresh_zones().await?;
        let query = RecordSetQuery::all();

        let mut records = ZoneRecords::default();
        for zone in self.forward_zones(&zones) {
            let recordsets = self.dns.list_recordsets(&zone.id, &query).await?;
            for recordset in recordsets.iter().filter(|rs| !rs.is_pending_delete()) {
                match recordset.record_type.as_str() {
                    "A" => records.insert(self.to_record(zone, recordset)),
                    // CNAME 与同名 A 记录互斥
                    "CNAME" => {
                        records.foreign.insert(dns_name::normalize_fqdn(&recordset.name));
                    }
                    _ => {}
                }
            }
        }

        log::debug!(
            "Found {} managed A records and {} unmanaged names",
            records.managed.len(),
            records.foreign.len()
        );
        Ok(records)
    }

    async fn create_record(&self, record: &DesiredRecord) -> CoreResult<Record> {
        let zone = self.find_zone(&record.zone).await?;
        let request =
            self.managed_request(record.name.clone(), RecordType::A, record.address.to_string());
        let created = self.dns.create_recordset(&zone.id, &request).await?;

        if self.config.reverse_dns {
            if let Err(e) = self.create_ptr(record.address, &record.name).await {
                log::warn!("Failed to create PTR for {} ({}): {e}", record.name, record.address);
            }
        }

        Ok(self.to_record(&zone, &created))
    }

    async fn delete_record(&self, record: &Record) -> CoreResult<()> {
        match self.dns.delete_recordset(&record.zone_id, &record.id).await {
            Ok(()) => {}
            Err(ProviderError::RecordNotFound { .. }) => {
                log::debug!("Record {} ({}) was already gone", record.name, record.id);
            }
            Err(e) => return Err(e.into()),
        }

        if let (true, Some(address)) = (self.config.reverse_dns, record.address) {
            if let Err(e) = self.delete_ptr(address, &record.name).await {
                log::warn!("Failed to delete PTR for {} ({address}): {e}", record.name);
            }
        }
        Ok(())
    }
}
