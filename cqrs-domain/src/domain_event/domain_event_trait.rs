use super::Event;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// 领域事件：由聚合产生并按产生顺序持久化
///
/// 实现方需保证 `aggregate_id()` 与 `aggregate_version()` 返回 `Some`。
pub trait DomainEvent: Event + Clone + Serialize + DeserializeOwned {}
