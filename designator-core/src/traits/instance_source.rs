//! 实例来源抽象 Trait

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::types::Instance;

/// 实例来源
///
/// 实现:
/// - `InstanceService` (Neutron 端口)
#[async_trait]
pub trait InstanceSource: Send + Sync {
    /// 列出当前需要 DNS 记录的实例（包括尚未分配地址的实例）
    async fn list_instances(&self) -> CoreResult<Vec<Instance>>;
}
