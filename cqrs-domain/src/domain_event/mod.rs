//! 事件（Event）与领域事件（Domain Event）
//!
//! - `Event`：处理器产出的抽象事件引用，对象安全，可装箱为 `Box<dyn Event>`；
//! - `EventTypes`：某个事件类型可能上报的全部事件种类标识，供事件工厂注册；
//! - `DomainEvent`：归属于聚合、需要持久化的事件。

mod domain_event_trait;
mod event_trait;

pub use domain_event_trait::DomainEvent;
pub use event_trait::{AsAny, Event, EventTypes};
