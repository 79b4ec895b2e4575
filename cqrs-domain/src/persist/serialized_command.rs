use bon::Builder;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// 命令的持久化形态
#[derive(Debug, Clone, PartialEq, Builder, Serialize, Deserialize)]
pub struct SerializedCommand {
    /// 命令记录标识（保存时生成）
    #[builder(default = Uuid::new_v4())]
    command_id: Uuid,
    /// 命令的稳定名称
    command_type: String,
    /// 命令所针对的聚合类型
    aggregate_type: String,
    #[builder(default = Utc::now())]
    occurred_at: DateTime<Utc>,
    /// 命令负载
    payload: Value,
}

impl SerializedCommand {
    pub fn command_id(&self) -> Uuid {
        self.command_id
    }

    pub fn command_type(&self) -> &str {
        &self.command_type
    }

    pub fn aggregate_type(&self) -> &str {
        &self.aggregate_type
    }

    pub fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }

    pub fn payload(&self) -> &Value {
        &self.payload
    }
}
