//! 核心类型定义

mod config;
mod instance;
mod record;
mod summary;

pub use config::ReconcileConfig;
pub use instance::Instance;
pub use record::{DesiredRecord, Record, ZoneRecords};
pub use summary::{
    ConflictReason, NameConflict, ReconcileResult, RecordChange, SkippedInstance, WriteFailure,
    WriteOperation,
};
