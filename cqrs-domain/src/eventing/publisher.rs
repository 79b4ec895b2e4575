//! 事件发布器（EventPublisher）协议
//!
//! 将物化后的具体事件分发给感兴趣的订阅者。
//!
use crate::{error::DomainResult as Result, persist::SerializedEvent};
use async_trait::async_trait;
use std::sync::Arc;

/// 事件发布器：负责分发具体事件
#[async_trait]
pub trait EventPublisher: Send + Sync {
    async fn publish(&self, event: &SerializedEvent) -> Result<()>;
}

#[async_trait]
impl<T> EventPublisher for Arc<T>
where
    T: EventPublisher + ?Sized,
{
    async fn publish(&self, event: &SerializedEvent) -> Result<()> {
        (**self).publish(event).await
    }
}
