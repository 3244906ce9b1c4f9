//! 同步结果

use std::net::Ipv4Addr;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// 一条已创建 / 已删除的记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordChange {
    pub name: String,
    pub address: Option<Ipv4Addr>,
}

/// 写操作类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteOperation {
    Create,
    Delete,
}

/// 单条记录写入失败（不影响其余记录）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WriteFailure {
    pub name: String,
    pub operation: WriteOperation,
    pub error: String,
}

/// 冲突原因
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum ConflictReason {
    /// 同名记录已存在且不归本工具管理
    ForeignRecord,
    /// 另一个实例推导出了相同的名称
    DuplicateName { winner: String },
}

/// 名称冲突：跳过，不做任何修改
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NameConflict {
    pub name: String,
    pub instance_id: String,
    #[serde(flatten)]
    pub reason: ConflictReason,
}

/// 尚无可用地址的实例，留待后续周期处理
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedInstance {
    pub instance_id: String,
    pub name: String,
}

/// 一次同步周期的汇总
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconcileResult {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// 为 true 时 `created` / `deleted` 只是计划，并未执行
    pub dry_run: bool,
    pub created: Vec<RecordChange>,
    pub deleted: Vec<RecordChange>,
    pub conflicts: Vec<NameConflict>,
    pub failures: Vec<WriteFailure>,
    pub skipped: Vec<SkippedInstance>,
}

impl ReconcileResult {
    pub fn new(started_at: DateTime<Utc>, dry_run: bool) -> Self {
        Self {
            started_at,
            finished_at: started_at,
            dry_run,
            created: Vec::new(),
            deleted: Vec::new(),
            conflicts: Vec::new(),
            failures: Vec::new(),
            skipped: Vec::new(),
        }
    }

    /// 创建 + 删除的记录数
    pub fn mutation_count(&self) -> usize {
        self.created.len() + self.deleted.len()
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}
