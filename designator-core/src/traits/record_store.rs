//! 记录存储抽象 Trait

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::types::{DesiredRecord, Record, ZoneRecords};

/// DNS 记录存储
///
/// 实现:
/// - `RecordService` (Designate)
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// 列出受管记录，以及用于冲突检测的非受管记录名
    async fn list_managed_records(&self) -> CoreResult<ZoneRecords>;

    /// 创建记录
    ///
    /// # Arguments
    /// * `record` - 期望记录（名称、Zone、地址）
    async fn create_record(&self, record: &DesiredRecord) -> CoreResult<Record>;

    /// 删除受管记录
    ///
    /// # Arguments
    /// * `record` - 由 `list_managed_records` 返回的记录
    async fn delete_record(&self, record: &Record) -> CoreResult<()>;
}
