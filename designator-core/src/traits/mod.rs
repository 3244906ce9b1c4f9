//! 能力抽象 Trait
//!
//! 同步逻辑只依赖这两个窄接口，具体的云 API 由 `services` 中的适配器实现。

mod instance_source;
mod record_store;

pub use instance_source::InstanceSource;
pub use record_store::RecordStore;
