use crate::{error::DomainResult as Result, persist::SerializedEvent};
use async_trait::async_trait;
use bon::Builder;
use std::sync::Arc;

/// 已持久化事件（附带存储层分配的位点与聚合类型标签）
#[derive(Debug, Clone, PartialEq, Builder)]
pub struct StoredEvent {
    /// 全局事件位点，从 1 开始单调递增
    pub sequence_number: u64,
    pub aggregate_type: String,
    pub event: SerializedEvent,
}

/// 事件存储：按聚合类型持久化单个具体事件
#[async_trait]
pub trait EventStore: Send + Sync {
    /// 保存事件
    ///
    /// - `aggregate_type`：事件所属聚合的类型标签
    /// - `expected_version`：若提供，则要求该聚合当前已持久化的最后版本与之相等
    async fn save_event(
        &self,
        aggregate_type: &str,
        event: &SerializedEvent,
        expected_version: Option<usize>,
    ) -> Result<()>;

    /// 按持久化顺序读取某聚合的全部事件
    async fn get_events(&self, aggregate_id: &str) -> Result<Vec<StoredEvent>>;
}

#[async_trait]
impl<T> EventStore for Arc<T>
where
    T: EventStore + ?Sized,
{
    async fn save_event(
        &self,
        aggregate_type: &str,
        event: &SerializedEvent,
        expected_version: Option<usize>,
    ) -> Result<()> {
        (**self)
            .save_event(aggregate_type, event, expected_version)
            .await
    }

    async fn get_events(&self, aggregate_id: &str) -> Result<Vec<StoredEvent>> {
        (**self).get_events(aggregate_id).await
    }
}
