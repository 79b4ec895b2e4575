//! 内存版事件存储（InMemoryEventStore）
//!
//! - 为每个事件分配全局单调递增的位点；
//! - 提供期望版本时执行乐观并发校验；
//! - 保存事件前在聚合登记存储中按需登记所属聚合。
//!
use crate::error::{DomainError, DomainResult as Result};
use crate::persist::{
    AggregateStore, EventStore, InMemoryAggregateStore, SerializedEvent, StoredEvent,
};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

pub struct InMemoryEventStore {
    events: RwLock<Vec<StoredEvent>>,
    aggregate_store: Arc<dyn AggregateStore>,
}

impl Default for InMemoryEventStore {
    fn default() -> Self {
        Self::new(Arc::new(InMemoryAggregateStore::new()))
    }
}

impl InMemoryEventStore {
    pub fn new(aggregate_store: Arc<dyn AggregateStore>) -> Self {
        Self {
            events: RwLock::new(Vec::new()),
            aggregate_store,
        }
    }

    /// 按持久化顺序返回全部事件
    pub async fn all_events(&self) -> Vec<StoredEvent> {
        self.events.read().await.clone()
    }

    fn last_version(events: &[StoredEvent], aggregate_id: &str) -> usize {
        events
            .iter()
            .filter(|s| s.event.aggregate_id() == Some(aggregate_id))
            .filter_map(|s| s.event.aggregate_version())
            .max()
            .unwrap_or(0)
    }
}

#[async_trait]
impl EventStore for InMemoryEventStore {
    async fn save_event(
        &self,
        aggregate_type: &str,
        event: &SerializedEvent,
        expected_version: Option<usize>,
    ) -> Result<()> {
        let Some(aggregate_id) = event.aggregate_id() else {
            return Err(DomainError::EventStore {
                reason: format!("event {} has no aggregate id", event.event_id()),
            });
        };

        let mut events = self.events.write().await;

        if let Some(expected) = expected_version {
            let actual = Self::last_version(&events, aggregate_id);
            if actual != expected {
                return Err(DomainError::VersionConflict {
                    aggregate_id: aggregate_id.to_string(),
                    expected,
                    actual,
                });
            }
        }

        self.aggregate_store
            .save_aggregate(aggregate_type, aggregate_id)
            .await?;

        let sequence_number = events.len() as u64 + 1;
        events.push(
            StoredEvent::builder()
                .sequence_number(sequence_number)
                .aggregate_type(aggregate_type.to_string())
                .event(event.clone())
                .build(),
        );
        Ok(())
    }

    async fn get_events(&self, aggregate_id: &str) -> Result<Vec<StoredEvent>> {
        let events = self.events.read().await;
        Ok(events
            .iter()
            .filter(|s| s.event.aggregate_id() == Some(aggregate_id))
            .cloned()
            .collect())
    }
}
