//! 具体事件（SerializedEvent）
//!
//! 抽象事件经事件工厂物化后的标准形态，用于持久化与发布。
//!
use bon::Builder;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Builder, Serialize, Deserialize)]
pub struct SerializedEvent {
    /// 事件唯一标识符
    event_id: String,
    /// 事件种类标识
    event_type: String,
    /// 事件载荷版本
    event_version: usize,
    /// 所属聚合 ID（普通事件为空）
    aggregate_id: Option<String>,
    /// 聚合版本（普通事件为空）
    aggregate_version: Option<usize>,
    /// 物化时间
    occurred_at: DateTime<Utc>,
    /// 事件负载
    payload: Value,
}

impl SerializedEvent {
    pub fn event_id(&self) -> &str {
        &self.event_id
    }

    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    pub fn event_version(&self) -> usize {
        self.event_version
    }

    pub fn aggregate_id(&self) -> Option<&str> {
        self.aggregate_id.as_deref()
    }

    pub fn aggregate_version(&self) -> Option<usize> {
        self.aggregate_version
    }

    pub fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }

    pub fn payload(&self) -> &Value {
        &self.payload
    }
}
