use crate::error::DomainResult as Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// 聚合登记记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateRecord {
    pub id: String,
    pub aggregate_type: String,
}

/// 聚合登记存储
#[async_trait]
pub trait AggregateStore: Send + Sync {
    /// 若不存在则登记聚合；已存在时不做任何修改
    async fn save_aggregate(&self, aggregate_type: &str, aggregate_id: &str) -> Result<()>;

    /// 按登记顺序列出全部聚合
    async fn get_aggregates(&self) -> Result<Vec<AggregateRecord>>;
}

#[async_trait]
impl<T> AggregateStore for Arc<T>
where
    T: AggregateStore + ?Sized,
{
    async fn save_aggregate(&self, aggregate_type: &str, aggregate_id: &str) -> Result<()> {
        (**self).save_aggregate(aggregate_type, aggregate_id).await
    }

    async fn get_aggregates(&self) -> Result<Vec<AggregateRecord>> {
        (**self).get_aggregates().await
    }
}
