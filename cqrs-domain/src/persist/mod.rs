//! 持久化（persist）
//!
//! 定义具体事件/命令的持久化形态与存储协议：
//! - 具体事件 `SerializedEvent` 与命令记录 `SerializedCommand`；
//! - 事件存储（`EventStore`）、命令存储（`CommandStore`）与聚合登记（`AggregateStore`）；
//! - 基于内存的实现（特性 `inmemory`），用于测试与本地开发。
//!
//! 具体存储后端（如关系型数据库）由上层提供实现并注入。
//!
mod aggregate_store;
mod command_store;
mod event_store;
mod serialized_command;
mod serialized_event;

#[cfg(feature = "inmemory")]
mod aggregate_store_inmemory;
#[cfg(feature = "inmemory")]
mod command_store_inmemory;
#[cfg(feature = "inmemory")]
mod event_store_inmemory;

pub use aggregate_store::{AggregateRecord, AggregateStore};
pub use command_store::CommandStore;
pub use event_store::{EventStore, StoredEvent};
pub use serialized_command::SerializedCommand;
pub use serialized_event::SerializedEvent;

#[cfg(feature = "inmemory")]
pub use aggregate_store_inmemory::InMemoryAggregateStore;
#[cfg(feature = "inmemory")]
pub use command_store_inmemory::InMemoryCommandStore;
#[cfg(feature = "inmemory")]
pub use event_store_inmemory::InMemoryEventStore;
