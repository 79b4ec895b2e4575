//! 内存版事件发布器（InMemoryEventPublisher）
//!
//! 基于 `tokio::sync::broadcast` 实现的轻量发布器：
//! - `publish`：克隆并广播事件；
//! - `subscribe`：返回 `'static` 生命周期事件流，便于在 `tokio::spawn` 中使用；
//! - 典型用途：测试环境、示例与本地开发。
//!
//! 注意：无订阅者时发送将被忽略；订阅者落后超过缓冲容量时会收到 `EventPublisher` 错误。

use crate::error::{DomainError, DomainResult as Result};
use crate::eventing::EventPublisher;
use crate::persist::SerializedEvent;
use async_trait::async_trait;
use futures_core::stream::BoxStream;
use futures_util::StreamExt;
use tokio::sync::broadcast;
use tokio_stream::wrappers::BroadcastStream;

#[derive(Clone)]
pub struct InMemoryEventPublisher {
    tx: broadcast::Sender<SerializedEvent>,
}

impl InMemoryEventPublisher {
    /// 创建一个内存发布器，`capacity` 为广播缓冲区容量
    pub fn new(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel(capacity);
        Self { tx }
    }

    /// 订阅之后发布的事件
    pub fn subscribe(&self) -> BoxStream<'static, Result<SerializedEvent>> {
        Box::pin(BroadcastStream::new(self.tx.subscribe()).map(|r| {
            r.map_err(|e| DomainError::EventPublisher {
                reason: e.to_string(),
            })
        }))
    }

    /// 当前订阅者数量
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

#[async_trait]
impl EventPublisher for InMemoryEventPublisher {
    async fn publish(&self, event: &SerializedEvent) -> Result<()> {
        // 没有订阅者时 send 返回错误，这里视为非致命
        let _ = self.tx.send(event.clone());
        Ok(())
    }
}
