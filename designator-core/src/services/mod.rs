//! 业务服务层

mod instance_service;
mod reconcile_service;
mod record_service;

use std::sync::Arc;

use designator_provider::{ComputeProvider, DnsProvider};

pub use instance_service::InstanceService;
pub use reconcile_service::ReconcileService;
pub use record_service::RecordService;

use crate::traits::{InstanceSource, RecordStore};
use crate::types::ReconcileConfig;

/// 服务上下文：同步逻辑依赖的两个能力
pub struct ServiceContext {
    pub instance_source: Arc<dyn InstanceSource>,
    pub record_store: Arc<dyn RecordStore>,
}

impl ServiceContext {
    #[must_use]
    pub fn new(
        instance_source: Arc<dyn InstanceSource>,
        record_store: Arc<dyn RecordStore>,
    ) -> Self {
        Self {
            instance_source,
            record_store,
        }
    }

    /// 由 Neutron / Designate 客户端组装
    #[must_use]
    pub fn from_providers(
        compute: Arc<dyn ComputeProvider>,
        dns: Arc<dyn DnsProvider>,
        config: Arc<ReconcileConfig>,
    ) -> Self {
        Self::new(
            Arc::new(InstanceService::new(compute, Arc::clone(&config))),
            Arc::new(RecordService::new(dns, config)),
        )
    }
}
