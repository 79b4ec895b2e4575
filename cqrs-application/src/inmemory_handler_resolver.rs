use crate::{
    command::Command,
    command_handler::{CommandHandlerWithDomainEvents, CommandHandlerWithEvents},
    error::{AppError, AppResult},
    handler_resolver::{ContractName, HandlerContract, HandlerResolver},
};
use cqrs_domain::aggregate::Aggregate;
use dashmap::DashMap;
use std::any::{Any, type_name};
use std::sync::Arc;

type ErasedHandler = Arc<dyn Any + Send + Sync>;

/// 基于内存的处理器解析器
/// - 以 `HandlerContract` 为键登记处理器
/// - 处理器以类型擦除（Any）方式保存，解析时还原为契约 trait 对象
/// - 同一契约允许登记多个处理器，但解析时会报告歧义
pub struct InMemoryHandlerResolver {
    handlers: DashMap<HandlerContract, (ContractName, Vec<ErasedHandler>)>,
}

impl Default for InMemoryHandlerResolver {
    fn default() -> Self {
        Self {
            handlers: DashMap::new(),
        }
    }
}

impl InMemoryHandlerResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// 登记普通事件处理器
    pub fn register_events_handler<C, H>(&self, handler: Arc<H>)
    where
        C: Command,
        H: CommandHandlerWithEvents<C> + 'static,
    {
        let handler: Arc<dyn CommandHandlerWithEvents<C>> = handler;
        self.insert(
            HandlerContract::events::<C>(),
            ContractName::events::<C>(),
            Arc::new(handler),
        );
    }

    /// 登记领域事件处理器
    pub fn register_domain_events_handler<C, A, H>(&self, handler: Arc<H>)
    where
        C: Command,
        A: Aggregate,
        H: CommandHandlerWithDomainEvents<C, A> + 'static,
    {
        let handler: Arc<dyn CommandHandlerWithDomainEvents<C, A>> = handler;
        self.insert(
            HandlerContract::domain_events::<C, A>(),
            ContractName::domain_events::<C, A>(),
            Arc::new(handler),
        );
    }

    /// 获取已登记的契约名列表（只读视图）
    pub fn registered_contracts(&self) -> Vec<String> {
        self.handlers
            .iter()
            .map(|e| e.value().0.as_str().to_string())
            .collect()
    }

    fn insert(&self, key: HandlerContract, name: ContractName, handler: ErasedHandler) {
        self.handlers
            .entry(key)
            .or_insert_with(|| (name, Vec::new()))
            .1
            .push(handler);
    }

    fn resolve<T>(&self, key: HandlerContract, name: ContractName) -> AppResult<T>
    where
        T: Clone + 'static,
    {
        let Some(entry) = self.handlers.get(&key) else {
            return Err(AppError::HandlerNotFound(name.into()));
        };

        match entry.1.as_slice() {
            [] => Err(AppError::HandlerNotFound(name.into())),
            [only] => only
                .downcast_ref::<T>()
                .cloned()
                .ok_or_else(|| AppError::TypeMismatch {
                    expected: type_name::<T>(),
                    found: name.into(),
                }),
            many => Err(AppError::AmbiguousHandler {
                contract: name.into(),
                count: many.len(),
            }),
        }
    }
}

impl HandlerResolver for InMemoryHandlerResolver {
    fn resolve_events_handler<C>(&self) -> AppResult<Arc<dyn CommandHandlerWithEvents<C>>>
    where
        C: Command,
    {
        self.resolve(HandlerContract::events::<C>(), ContractName::events::<C>())
    }

    fn resolve_domain_events_handler<C, A>(
        &self,
    ) -> AppResult<Arc<dyn CommandHandlerWithDomainEvents<C, A>>>
    where
        C: Command,
        A: Aggregate,
    {
        self.resolve(
            HandlerContract::domain_events::<C, A>(),
            ContractName::domain_events::<C, A>(),
        )
    }
}
