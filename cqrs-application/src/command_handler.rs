//! 命令处理器契约
//!
//! 两种处理模式，分别对应不同的分发流程：
//! - `CommandHandlerWithEvents`：返回普通事件，仅发布，不持久化；
//! - `CommandHandlerWithDomainEvents`：针对某聚合类型，返回聚合产生的领域事件，
//!   持久化后按策略发布。
//!
//! 处理器为同步调用，I/O 只发生在持久化与发布环节。
use crate::{command::Command, error::AppResult};
use cqrs_domain::aggregate::Aggregate;
use cqrs_domain::domain_event::Event;

pub trait CommandHandlerWithEvents<C>: Send + Sync
where
    C: Command,
{
    fn handle(&self, cmd: &C) -> AppResult<Vec<Box<dyn Event>>>;
}

pub trait CommandHandlerWithDomainEvents<C, A>: Send + Sync
where
    C: Command,
    A: Aggregate,
{
    /// 返回聚合产生的事件，顺序即聚合产生的顺序
    fn handle(&self, cmd: &C) -> AppResult<Vec<A::Event>>;
}
