//! 同步服务
//!
//! 一个同步周期: 列出实例 -> 列出受管记录 -> 计算计划 -> 先删除后创建。
//! 任一列表失败则整个周期中止，不做任何写操作；
//! 单条记录的写入失败只记录在结果中，其余记录继续处理。

use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;

use crate::error::{CoreError, CoreResult, FetchStep};
use crate::plan::{self, ReconcilePlan};
use crate::services::ServiceContext;
use crate::types::{ReconcileResult, RecordChange, WriteFailure, WriteOperation};

/// 同步服务
pub struct ReconcileService {
    ctx: Arc<ServiceContext>,
}

impl ReconcileService {
    /// 创建同步服务实例
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// 拉取两份列表并计算计划，不做任何写操作
    pub async fn plan(&self) -> CoreResult<ReconcilePlan> {
        // 1. 当前实例
        let instances = self
            .ctx
            .instance_source
            .list_instances()
            .await
            .map_err(|e| CoreError::fetch(FetchStep::Instances, e))?;

        // 2. 现有记录
        let existing = self
            .ctx
            .record_store
            .list_managed_records()
            .await
            .map_err(|e| CoreError::fetch(FetchStep::Records, e))?;

        // 3. 差异
        let plan = plan::plan(&instances, &existing);
        if plan.is_empty() {
            log::debug!("All {} managed records are in sync", existing.managed.len());
            return Ok(plan);
        }
        log::debug!(
            "Plan: {} instances, {} managed records, {} to delete, {} to create",
            instances.len(),
            existing.managed.len(),
            plan.to_delete.len(),
            plan.to_create.len()
        );
        Ok(plan)
    }

    /// 执行一个同步周期
    pub async fn reconcile(&self) -> CoreResult<ReconcileResult> {
        let started_at = Utc::now();
        let plan = self.plan().await?;
        let mut result = ReconcileResult::new(started_at, false);
        report_plan_notes(&plan, &mut result);

        // 删除在前，被替换的名称先腾出来；删除失败的名称不再创建
        let mut blocked = HashSet::new();
        for record in &plan.to_delete {
            match self.ctx.record_store.delete_record(record).await {
                Ok(()) => {
                    log::info!("Deleted {} -> {:?}", record.name, record.address);
                    result.deleted.push(RecordChange {
                        name: record.name.clone(),
                        address: record.address,
                    });
                }
                Err(e) => {
                    log::error!("Failed to delete {}: {e}", record.name);
                    blocked.insert(record.name.as_str());
                    result.failures.push(WriteFailure {
                        name: record.name.clone(),
                        operation: WriteOperation::Delete,
                        error: e.to_string(),
                    });
                }
            }
        }

        for desired in &plan.to_create {
            if blocked.contains(desired.name.as_str()) {
                log::warn!(
                    "Not creating {} because its old record could not be deleted",
                    desired.name
                );
                continue;
            }
            match self.ctx.record_store.create_record(desired).await {
                Ok(record) => {
                    log::info!("Created {} -> {}", record.name, desired.address);
                    result.created.push(RecordChange {
                        name: desired.name.clone(),
                        address: Some(desired.address),
                    });
                }
                Err(e) => {
                    log::error!("Failed to create {} -> {}: {e}", desired.name, desired.address);
                    result.failures.push(WriteFailure {
                        name: desired.name.clone(),
                        operation: WriteOperation::Create,
                        error: e.to_string(),
                    });
                }
            }
        }

        result.finished_at = Utc::now();
        Ok(result)
    }

    /// 只计算计划，结果中的创建 / 删除不会执行
    pub async fn dry_run(&self) -> CoreResult<ReconcileResult> {
        let started_at = Utc::now();
        let plan = self.plan().await?;
        let mut result = ReconcileResult::new(started_at, true);
        report_plan_notes(&plan, &mut result);

        for record in &plan.to_delete {
            log::info!("[dry-run] Would delete {} -> {:?}", record.name, record.address);
            result.deleted.push(RecordChange {
                name: record.name.clone(),
                address: record.address,
            });
        }
        for desired in &plan.to_create {
            log::info!("[dry-run] Would create {} -> {}", desired.name, desired.address);
            result.created.push(RecordChange {
                name: desired.name.clone(),
                address: Some(desired.address),
            });
        }

        result.finished_at = Utc::now();
        Ok(result)
    }
}

/// 冲突和跳过的实例：记录日志并写入结果
fn report_plan_notes(plan: &ReconcilePlan, result: &mut ReconcileResult) {
    for conflict in &plan.conflicts {
        log::warn!(
            "Name conflict on {} (instance {}): {:?}",
            conflict.name,
            conflict.instance_id,
            conflict.reason
        );
    }
    for skipped in &plan.skipped {
        log::info!(
            "Instance {} ({}) has no IPv4 address yet, skipping",
            skipped.instance_id,
            skipped.name
        );
    }
    result.conflicts.clone_from(&plan.conflicts);
    result.skipped.clone_from(&plan.skipped);
}

#[cfg(test)]
mod tests {
    use designator_provider::{ComputeProvider, DnsProvider, FixedIp, Network, Port};

    use super::*;
    use crate::testing::{FakeCompute, FakeDns};
    use crate::types::{ConflictReason, ReconcileConfig};

    const MARKER: &str = "managed-by: designator";

    fn networks() -> Vec<Network> {
        vec![Network {
            id: "n1".to_string(),
            name: "private".to_string(),
            dns_domain: Some(Some("example.com.".to_string())),
        }]
    }

    fn port(id: &str, name: &str, ip: Option<&str>) -> Port {
        Port {
            id: id.to_string(),
            network_id: "n1".to_string(),
            device_id: format!("vm-{id}"),
            device_owner: "compute:nova".to_string(),
            dns_name: Some(Some(name.to_string())),
            fixed_ips: ip
                .into_iter()
                .map(|ip| FixedIp {
                    subnet_id: "s1".to_string(),
                    ip_address: ip.parse().unwrap(),
                })
                .collect(),
        }
    }

    struct Fixture {
        compute: Arc<FakeCompute>,
        dns: Arc<FakeDns>,
        service: ReconcileService,
    }

    fn fixture(ports: Vec<Port>) -> Fixture {
        let compute = Arc::new(FakeCompute::new(networks(), ports));
        let dns = Arc::new(FakeDns::new(&[("z1", "example.com.")]));
        let ctx = ServiceContext::from_providers(
            Arc::clone(&compute) as Arc<dyn ComputeProvider>,
            Arc::clone(&dns) as Arc<dyn DnsProvider>,
            Arc::new(ReconcileConfig::default()),
        );
        Fixture {
            compute,
            dns,
            service: ReconcileService::new(Arc::new(ctx)),
        }
    }

    fn a_records(dns: &FakeDns) -> Vec<(String, Vec<String>)> {
        dns.records_of("A")
    }

    fn names(changes: &[RecordChange]) -> Vec<&str> {
        changes.iter().map(|c| c.name.as_str()).collect()
    }

    #[tokio::test]
    async fn test_scenario_one_new_instance() {
        let f = fixture(vec![
            port("p1", "a", Some("10.0.0.1")),
            port("p2", "b", Some("10.0.0.2")),
        ]);
        f.dns.insert("z1", "a.example.com.", "A", &["10.0.0.1"], Some(MARKER));

        let result = f.service.reconcile().await.unwrap();
        assert_eq!(names(&result.created), vec!["b.example.com."]);
        assert!(result.deleted.is_empty());
        assert!(!result.has_failures());
    }

    #[tokio::test]
    async fn test_scenario_one_stale_record() {
        let f = fixture(vec![port("p1", "a", Some("10.0.0.1"))]);
        f.dns.insert("z1", "a.example.com.", "A", &["10.0.0.1"], Some(MARKER));
        f.dns.insert("z1", "c.example.com.", "A", &["10.0.0.9"], Some(MARKER));

        let result = f.service.reconcile().await.unwrap();
        assert!(result.created.is_empty());
        assert_eq!(names(&result.deleted), vec!["c.example.com."]);
        assert_eq!(
            a_records(&f.dns),
            vec![("a.example.com.".to_string(), vec!["10.0.0.1".to_string()])]
        );
    }

    #[tokio::test]
    async fn test_idempotence() {
        let f = fixture(vec![
            port("p1", "a", Some("10.0.0.1")),
            port("p2", "b", Some("10.0.0.2")),
        ]);

        let first = f.service.reconcile().await.unwrap();
        assert_eq!(first.mutation_count(), 2);

        let second = f.service.reconcile().await.unwrap();
        assert_eq!(second.mutation_count(), 0);
    }

    #[tokio::test]
    async fn test_convergence() {
        let f = fixture(vec![
            port("p1", "a", Some("10.0.0.1")),
            port("p2", "b", Some("10.0.0.2")),
            port("p3", "pending", None),
        ]);
        f.dns.insert("z1", "old.example.com.", "A", &["10.0.0.7"], Some(MARKER));
        f.dns.insert("z1", "a.example.com.", "A", &["10.0.0.99"], Some(MARKER));

        let result = f.service.reconcile().await.unwrap();
        assert_eq!(result.skipped.len(), 1);

        let managed: Vec<_> = a_records(&f.dns).into_iter().map(|(name, _)| name).collect();
        assert_eq!(managed, vec!["a.example.com.", "b.example.com."]);
        assert!(f.dns.records_of("A").contains(&(
            "a.example.com.".to_string(),
            vec!["10.0.0.1".to_string()]
        )));
    }

    #[tokio::test]
    async fn test_removed_instance_deletes_only_its_record() {
        let f = fixture(vec![
            port("p1", "a", Some("10.0.0.1")),
            port("p2", "b", Some("10.0.0.2")),
        ]);
        f.service.reconcile().await.unwrap();

        f.compute.set_ports(vec![port("p1", "a", Some("10.0.0.1"))]);
        let result = f.service.reconcile().await.unwrap();

        assert_eq!(names(&result.deleted), vec!["b.example.com."]);
        assert!(result.created.is_empty());
        assert_eq!(a_records(&f.dns).len(), 1);
    }

    #[tokio::test]
    async fn test_partial_create_failure() {
        let f = fixture(vec![
            port("p1", "a", Some("10.0.0.1")),
            port("p2", "b", Some("10.0.0.2")),
            port("p3", "c", Some("10.0.0.3")),
        ]);
        f.dns.fail_create("b.example.com.");

        let result = f.service.reconcile().await.unwrap();
        assert_eq!(names(&result.created), vec!["a.example.com.", "c.example.com."]);
        assert_eq!(result.failures.len(), 1);
        assert_eq!(result.failures[0].name, "b.example.com.");
        assert_eq!(result.failures[0].operation, WriteOperation::Create);
    }

    #[tokio::test]
    async fn test_failed_delete_blocks_replacement() {
        let f = fixture(vec![port("p1", "a", Some("10.0.0.5"))]);
        f.dns.insert("z1", "a.example.com.", "A", &["10.0.0.1"], Some(MARKER));
        f.dns.fail_delete("a.example.com.");

        let result = f.service.reconcile().await.unwrap();
        assert!(result.created.is_empty());
        assert_eq!(result.failures.len(), 1);
        assert_eq!(result.failures[0].operation, WriteOperation::Delete);
        assert_eq!(
            a_records(&f.dns),
            vec![("a.example.com.".to_string(), vec!["10.0.0.1".to_string()])]
        );
    }

    #[tokio::test]
    async fn test_foreign_record_is_never_touched() {
        let f = fixture(vec![port("p1", "mail", Some("10.0.0.3"))]);
        f.dns.insert("z1", "mail.example.com.", "A", &["192.0.2.25"], None);
        f.dns.insert("z1", "www.example.com.", "A", &["192.0.2.80"], Some("hand-made"));

        let result = f.service.reconcile().await.unwrap();
        assert_eq!(result.mutation_count(), 0);
        assert_eq!(result.conflicts.len(), 1);
        assert_eq!(result.conflicts[0].reason, ConflictReason::ForeignRecord);
        assert_eq!(f.dns.writes(), 0);
        assert_eq!(a_records(&f.dns).len(), 2);
    }

    #[tokio::test]
    async fn test_foreign_cname_blocks_address_record() {
        let f = fixture(vec![port("p1", "mail", Some("10.0.0.3"))]);
        f.dns.insert("z1", "mail.example.com.", "CNAME", &["mx.other.org."], None);

        let result = f.service.reconcile().await.unwrap();
        assert_eq!(result.conflicts.len(), 1);
        assert_eq!(result.conflicts[0].name, "mail.example.com.");
        assert_eq!(result.conflicts[0].reason, ConflictReason::ForeignRecord);
        assert!(result.created.is_empty());
        assert!(result.failures.is_empty());
        assert_eq!(f.dns.writes(), 0);
    }

    #[tokio::test]
    async fn test_instance_fetch_failure_aborts_without_writes() {
        let f = fixture(vec![port("p1", "a", Some("10.0.0.1"))]);
        f.dns.insert("z1", "c.example.com.", "A", &["10.0.0.9"], Some(MARKER));
        f.compute.fail_listing();

        let err = f.service.reconcile().await.unwrap_err();
        assert!(matches!(
            err,
            CoreError::FetchFailed {
                step: FetchStep::Instances,
                ..
            }
        ));
        assert_eq!(f.dns.writes(), 0);
    }

    #[tokio::test]
    async fn test_record_fetch_failure_aborts_without_writes() {
        let f = fixture(vec![port("p1", "a", Some("10.0.0.1"))]);
        f.dns.fail_listing();

        let err = f.service.reconcile().await.unwrap_err();
        assert!(err.is_fetch_failure());
        assert!(matches!(
            err,
            CoreError::FetchFailed {
                step: FetchStep::Records,
                ..
            }
        ));
        assert_eq!(f.dns.writes(), 0);
    }

    #[tokio::test]
    async fn test_dry_run_does_not_write() {
        let f = fixture(vec![port("p1", "b", Some("10.0.0.2"))]);
        f.dns.insert("z1", "c.example.com.", "A", &["10.0.0.9"], Some(MARKER));

        let result = f.service.dry_run().await.unwrap();
        assert!(result.dry_run);
        assert_eq!(names(&result.created), vec!["b.example.com."]);
        assert_eq!(names(&result.deleted), vec!["c.example.com."]);
        assert_eq!(f.dns.writes(), 0);
    }
}
