//! 处理器解析（HandlerResolver）
//!
//! 按“处理器契约”定位唯一注册的处理器：
//! - 契约为封闭集合：普通事件处理器 / 领域事件处理器；
//! - 未注册或注册了多个处理器时，解析失败。
//!
use crate::{
    command::Command,
    command_handler::{CommandHandlerWithDomainEvents, CommandHandlerWithEvents},
    error::AppResult,
};
use cqrs_domain::aggregate::Aggregate;
use std::any::TypeId;
use std::fmt;
use std::sync::Arc;

/// 处理器契约标识
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandlerContract {
    /// 处理命令 `command`，返回普通事件
    Events { command: TypeId },
    /// 针对聚合 `aggregate` 处理命令 `command`，返回领域事件
    DomainEvents { command: TypeId, aggregate: TypeId },
}

impl HandlerContract {
    pub fn events<C: Command>() -> Self {
        Self::Events {
            command: TypeId::of::<C>(),
        }
    }

    pub fn domain_events<C: Command, A: Aggregate>() -> Self {
        Self::DomainEvents {
            command: TypeId::of::<C>(),
            aggregate: TypeId::of::<A>(),
        }
    }
}

/// 契约的可读名称，用于错误信息与日志
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractName(String);

impl ContractName {
    pub fn events<C: Command>() -> Self {
        Self(format!("CommandHandlerWithEvents<{}>", C::NAME))
    }

    pub fn domain_events<C: Command, A: Aggregate>() -> Self {
        Self(format!(
            "CommandHandlerWithDomainEvents<{}, {}>",
            C::NAME,
            A::TYPE
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContractName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<ContractName> for String {
    fn from(name: ContractName) -> Self {
        name.0
    }
}

/// 处理器解析器
///
/// 带有泛型方法，通常以具体实现类型注入 `CommandSender`。
pub trait HandlerResolver: Send + Sync {
    fn resolve_events_handler<C>(&self) -> AppResult<Arc<dyn CommandHandlerWithEvents<C>>>
    where
        C: Command;

    fn resolve_domain_events_handler<C, A>(
        &self,
    ) -> AppResult<Arc<dyn CommandHandlerWithDomainEvents<C, A>>>
    where
        C: Command,
        A: Aggregate;
}

impl<T> HandlerResolver for Arc<T>
where
    T: HandlerResolver,
{
    fn resolve_events_handler<C>(&self) -> AppResult<Arc<dyn CommandHandlerWithEvents<C>>>
    where
        C: Command,
    {
        (**self).resolve_events_handler::<C>()
    }

    fn resolve_domain_events_handler<C, A>(
        &self,
    ) -> AppResult<Arc<dyn CommandHandlerWithDomainEvents<C, A>>>
    where
        C: Command,
        A: Aggregate,
    {
        (**self).resolve_domain_events_handler::<C, A>()
    }
}
