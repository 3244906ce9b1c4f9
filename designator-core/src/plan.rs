//! 纯函数的差异计算
//!
//! 输入是当前实例和现有记录，输出是需要执行的删除 / 创建，
//! 以及冲突和被跳过的实例。不做任何 I/O。

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use crate::types::{
    ConflictReason, DesiredRecord, Instance, NameConflict, Record, SkippedInstance, ZoneRecords,
};

/// 同步计划
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcilePlan {
    /// 需要删除的受管记录（包括地址变化后要重建的记录）
    pub to_delete: Vec<Record>,
    /// 需要创建的记录
    pub to_create: Vec<DesiredRecord>,
    pub conflicts: Vec<NameConflict>,
    pub skipped: Vec<SkippedInstance>,
}

impl ReconcilePlan {
    /// 没有任何写操作
    pub fn is_empty(&self) -> bool {
        self.to_delete.is_empty() && self.to_create.is_empty()
    }
}

/// 期望记录集合
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DesiredSet {
    pub records: BTreeMap<String, DesiredRecord>,
    pub conflicts: Vec<NameConflict>,
    pub skipped: Vec<SkippedInstance>,
}

/// 实例对应的记录名
pub fn derive_record_name(instance: &Instance) -> String {
    instance.record_name()
}

/// 由实例推导期望记录
///
/// 没有地址的实例被跳过；多个实例推导出同一名称时，ID 最小的实例保留。
pub fn desired_records(instances: &[Instance]) -> DesiredSet {
    let mut sorted: Vec<&Instance> = instances.iter().collect();
    sorted.sort_by(|a, b| a.id.cmp(&b.id));

    let mut desired = DesiredSet::default();
    for instance in sorted {
        let Some(address) = instance.address else {
            desired.skipped.push(SkippedInstance {
                instance_id: instance.id.clone(),
                name: instance.name.clone(),
            });
            continue;
        };

        let name = derive_record_name(instance);
        match desired.records.entry(name) {
            Entry::Occupied(existing) => desired.conflicts.push(NameConflict {
                name: existing.key().clone(),
                instance_id: instance.id.clone(),
                reason: ConflictReason::DuplicateName {
                    winner: existing.get().instance_id.clone(),
                },
            }),
            Entry::Vacant(slot) => {
                let record = DesiredRecord {
                    name: slot.key().clone(),
                    zone: instance.zone.clone(),
                    address,
                    instance_id: instance.id.clone(),
                };
                slot.insert(record);
            }
        }
    }
    desired
}

/// 计算同步计划
pub fn plan(instances: &[Instance], existing: &ZoneRecords) -> ReconcilePlan {
    let DesiredSet {
        records: desired,
        mut conflicts,
        skipped,
    } = desired_records(instances);

    let in_sync = |record: &Record, wanted: &DesiredRecord| record.address == Some(wanted.address);

    let to_delete = existing
        .managed
        .iter()
        .filter(|&(name, record)| {
            !matches!(desired.get(name), Some(wanted) if in_sync(record, wanted))
        })
        .map(|(_, record)| record.clone())
        .collect();

    let mut to_create = Vec::new();
    for (name, wanted) in &desired {
        match existing.managed.get(name) {
            Some(record) if in_sync(record, wanted) => {}
            Some(_) => to_create.push(wanted.clone()),
            None if existing.foreign.contains(name) => conflicts.push(NameConflict {
                name: name.clone(),
                instance_id: wanted.instance_id.clone(),
                reason: ConflictReason::ForeignRecord,
            }),
            None => to_create.push(wanted.clone()),
        }
    }

    ReconcilePlan {
        to_delete,
        to_create,
        conflicts,
        skipped,
    }
}
