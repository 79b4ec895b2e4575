//! 事件工厂（EventFactory）
//!
//! 将处理器返回的抽象事件物化为具体事件 `SerializedEvent`。
//! `EventRegistry` 以事件种类标识为键登记物化函数，
//! 物化时通过 `AsAny` 还原事件的具体类型后序列化载荷。
//!
use crate::error::{AppError, AppResult};
use chrono::Utc;
use cqrs_domain::domain_event::{Event, EventTypes};
use cqrs_domain::persist::SerializedEvent;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use serde::Serialize;
use std::any::type_name;
use std::sync::Arc;

/// 事件工厂：抽象事件 -> 具体事件
pub trait EventFactory: Send + Sync {
    fn create_concrete_event(&self, event: &dyn Event) -> AppResult<SerializedEvent>;
}

impl<T> EventFactory for Arc<T>
where
    T: EventFactory + ?Sized,
{
    fn create_concrete_event(&self, event: &dyn Event) -> AppResult<SerializedEvent> {
        (**self).create_concrete_event(event)
    }
}

type Materializer = Arc<dyn Fn(&dyn Event) -> AppResult<SerializedEvent> + Send + Sync>;

/// 基于注册表的事件工厂
#[derive(Default)]
pub struct EventRegistry {
    materializers: DashMap<String, Materializer>,
}

impl EventRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 登记事件类型 `E` 可能上报的全部事件种类
    ///
    /// 任一种类已被登记时整体失败，不做部分登记。
    pub fn register<E>(&self) -> AppResult<()>
    where
        E: Event + EventTypes + Serialize,
    {
        let f: Materializer = Arc::new(|event: &dyn Event| {
            let Some(concrete) = event.as_any().downcast_ref::<E>() else {
                return Err(AppError::TypeMismatch {
                    expected: type_name::<E>(),
                    found: event.event_type().to_string(),
                });
            };
            materialize(concrete)
        });

        // 逐个种类在分片锁内占位，冲突时撤销本次已占用的种类
        let mut claimed: Vec<&'static str> = Vec::with_capacity(E::EVENT_TYPES.len());
        for kind in E::EVENT_TYPES {
            let taken = match self.materializers.entry(kind.to_string()) {
                Entry::Vacant(slot) => {
                    slot.insert(f.clone());
                    false
                }
                Entry::Occupied(_) => true,
            };

            if taken {
                for k in &claimed {
                    self.materializers.remove(*k);
                }
                return Err(AppError::AlreadyRegisteredEvent {
                    event_type: kind.to_string(),
                });
            }
            claimed.push(*kind);
        }
        Ok(())
    }

    /// 已登记的事件种类（无序）
    pub fn registered_event_types(&self) -> Vec<String> {
        self.materializers.iter().map(|e| e.key().clone()).collect()
    }
}

impl EventFactory for EventRegistry {
    fn create_concrete_event(&self, event: &dyn Event) -> AppResult<SerializedEvent> {
        let Some(f) = self
            .materializers
            .get(event.event_type())
            .map(|f| f.clone())
        else {
            return Err(AppError::EventNotRegistered(event.event_type().to_string()));
        };

        (f)(event)
    }
}

fn materialize<E>(event: &E) -> AppResult<SerializedEvent>
where
    E: Event + Serialize,
{
    Ok(SerializedEvent::builder()
        .event_id(event.event_id().to_string())
        .event_type(event.event_type().to_string())
        .event_version(event.event_version())
        .maybe_aggregate_id(event.aggregate_id().map(str::to_string))
        .maybe_aggregate_version(event.aggregate_version())
        .occurred_at(Utc::now())
        .payload(serde_json::to_value(event)?)
        .build())
}
