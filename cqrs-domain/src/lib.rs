//! CQRS 领域层基础库（cqrs-domain）
//!
//! 提供命令分发管道所依赖的领域侧抽象与协作者契约：
//! - 事件（`domain_event`）：抽象事件 `Event` 与领域事件 `DomainEvent`
//! - 聚合（`aggregate`）与实体（`entity`）建模，聚合按产生顺序记录事件
//! - 持久化（`persist`）：具体事件/命令形态，事件、命令与聚合登记存储
//! - 事件发布（`eventing`）：`EventPublisher` 与内存广播实现
//!
//! 本 crate 仅定义接口与最小必要的错误类型，并附带内存实现（特性 `inmemory`），
//! 以便在不同基础设施（例如关系型数据库、消息中间件等）上进行适配实现。
//!
pub mod aggregate;
pub mod domain_event;
pub mod entity;
pub mod error;
pub mod eventing;
pub mod persist;

// 允许在本 crate 内部通过 ::cqrs_domain 进行自引用，
// 以便过程宏在本 crate 的单元测试中也能解析到 ::cqrs_domain 路径。
extern crate self as cqrs_domain;
