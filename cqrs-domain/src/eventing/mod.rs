//! 事件发布（eventing）
//!
//! - `EventPublisher`：统一发布接口；
//! - `InMemoryEventPublisher`：基于广播通道的内存实现（特性 `inmemory`）。
//!
pub mod publisher;
#[cfg(feature = "inmemory")]
pub mod publisher_inmemory;

pub use publisher::EventPublisher;
#[cfg(feature = "inmemory")]
pub use publisher_inmemory::InMemoryEventPublisher;
