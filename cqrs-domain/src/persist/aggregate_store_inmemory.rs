use crate::error::DomainResult as Result;
use crate::persist::{AggregateRecord, AggregateStore};
use async_trait::async_trait;
use tokio::sync::RwLock;

/// 内存版聚合登记存储
#[derive(Default)]
pub struct InMemoryAggregateStore {
    records: RwLock<Vec<AggregateRecord>>,
}

impl InMemoryAggregateStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AggregateStore for InMemoryAggregateStore {
    async fn save_aggregate(&self, aggregate_type: &str, aggregate_id: &str) -> Result<()> {
        let mut records = self.records.write().await;
        if records.iter().any(|r| r.id == aggregate_id) {
            return Ok(());
        }

        records.push(AggregateRecord {
            id: aggregate_id.to_string(),
            aggregate_type: aggregate_type.to_string(),
        });
        Ok(())
    }

    async fn get_aggregates(&self) -> Result<Vec<AggregateRecord>> {
        Ok(self.records.read().await.clone())
    }
}
