//! DNS 记录类型

use std::collections::{BTreeMap, BTreeSet};
use std::net::Ipv4Addr;

use serde::{Deserialize, Serialize};

/// 现有 A 记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: String,
    pub zone_id: String,
    pub zone: String,
    /// 完整域名（规范化）
    pub name: String,
    /// 记录值；值不是单个 IPv4 地址时为 `None`
    pub address: Option<Ipv4Addr>,
    /// 是否由本工具创建
    pub managed: bool,
}

/// 期望存在的 A 记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesiredRecord {
    pub name: String,
    pub zone: String,
    pub address: Ipv4Addr,
    /// 来源实例（端口 ID）
    pub instance_id: String,
}

/// 一次列表得到的记录：受管记录按名称索引，非受管记录只保留名称用于冲突检测
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ZoneRecords {
    pub managed: BTreeMap<String, Record>,
    pub foreign: BTreeSet<String>,
}

impl ZoneRecords {
    pub fn insert(&mut self, record: Record) {
        if record.managed {
            self.managed.insert(record.name.clone(), record);
        } else {
            self.foreign.insert(record.name);
        }
    }
}

impl FromIterator<Record> for ZoneRecords {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        let mut records = Self::default();
        for record in iter {
            records.insert(record);
        }
        records
    }
}
