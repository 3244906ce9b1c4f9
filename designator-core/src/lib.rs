//! 同步核心逻辑
//!
//! 把 Neutron 端口（`dns_name` + 网络 `dns_domain`）同步为 Designate A / PTR 记录。
//!
//! - [`plan`]: 纯函数的差异计算
//! - [`services::ReconcileService`]: 执行一个同步周期
//! - [`traits`]: 同步逻辑依赖的 `InstanceSource` / `RecordStore` 能力

pub mod error;
pub mod plan;
pub mod services;
pub mod traits;
pub mod types;
pub mod utils;

#[cfg(test)]
mod testing;

pub use error::{CoreError, CoreResult, FetchStep};
pub use plan::ReconcilePlan;
pub use services::{InstanceService, ReconcileService, RecordService, ServiceContext};
pub use traits::{InstanceSource, RecordStore};
pub use types::{
    ConflictReason, DesiredRecord, Instance, NameConflict, ReconcileConfig, ReconcileResult,
    Record, RecordChange, SkippedInstance, WriteFailure, WriteOperation, ZoneRecords,
};

// 重新导出 provider 库
pub use designator_provider;
