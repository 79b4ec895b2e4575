//! 命令分发管道（CommandSender）
//!
//! 接收命令，按处理模式解析唯一处理器并执行，随后严格按顺序编排副作用：
//!
//! 普通事件模式（`send`）：
//! 1. 解析 `CommandHandlerWithEvents<C>` 并处理命令；
//! 2. 按产生顺序逐个物化并发布事件，不做任何持久化。
//!
//! 领域事件模式（`send_with_domain_events`）：
//! 1. 计算本次发送生效的策略（命令级 `false` 优先，否则取全局配置）；
//! 2. 解析 `CommandHandlerWithDomainEvents<C, A>` 并处理命令；
//! 3. 策略允许时按聚合类型保存命令；
//! 4. 按产生顺序逐个物化并保存事件，策略允许时随即发布。
//!
//! 管道本身无状态、不重试、不补偿：任一步骤失败即原样返回错误，
//! 之后的步骤不再执行，已完成的持久化保持不变。
//!
use crate::{
    command::Command,
    error::{AppError, AppResult},
    event_factory::EventFactory,
    handler_resolver::HandlerResolver,
    options::Options,
    policy::EffectivePolicy,
};
use bon::Builder;
use cqrs_domain::aggregate::Aggregate;
use cqrs_domain::eventing::EventPublisher;
use cqrs_domain::persist::{CommandStore, EventStore, SerializedCommand};
use std::sync::Arc;
use tracing::{Instrument, debug, info_span, warn};

#[derive(Builder)]
pub struct CommandSender<R>
where
    R: HandlerResolver,
{
    handler_resolver: R,
    event_publisher: Arc<dyn EventPublisher>,
    event_factory: Arc<dyn EventFactory>,
    event_store: Arc<dyn EventStore>,
    command_store: Arc<dyn CommandStore>,
    #[builder(default)]
    options: Options,
}

impl<R> CommandSender<R>
where
    R: HandlerResolver,
{
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// 发送返回普通事件的命令
    pub async fn send<C>(&self, command: C) -> AppResult<()>
    where
        C: Command,
    {
        self.send_optional(Some(command)).await
    }

    /// 同 [`send`](Self::send)，命令缺失时在触及任何协作者之前返回 `CommandMissing`
    pub async fn send_optional<C>(&self, command: Option<C>) -> AppResult<()>
    where
        C: Command,
    {
        let command = command.ok_or(AppError::CommandMissing(C::NAME))?;

        let span = info_span!("command.send", command = C::NAME);
        self.dispatch_events(command)
            .instrument(span)
            .await
            .inspect_err(|e| warn!(command = C::NAME, error = %e, "command send failed"))
    }

    /// 发送针对聚合 `A`、返回领域事件的命令
    pub async fn send_with_domain_events<C, A>(&self, command: C) -> AppResult<()>
    where
        C: Command,
        A: Aggregate,
    {
        self.send_with_domain_events_optional::<C, A>(Some(command))
            .await
    }

    /// 同 [`send_with_domain_events`](Self::send_with_domain_events)，命令缺失时在触及任何协作者之前返回 `CommandMissing`
    pub async fn send_with_domain_events_optional<C, A>(&self, command: Option<C>) -> AppResult<()>
    where
        C: Command,
        A: Aggregate,
    {
        let command = command.ok_or(AppError::CommandMissing(C::NAME))?;

        let span = info_span!(
            "command.send",
            command = C::NAME,
            aggregate_type = A::TYPE
        );
        self.dispatch_domain_events::<C, A>(command)
            .instrument(span)
            .await
            .inspect_err(|e| {
                warn!(
                    command = C::NAME,
                    aggregate_type = A::TYPE,
                    error = %e,
                    "command send failed"
                )
            })
    }

    /// [`send`](Self::send) 的阻塞版本
    ///
    /// 在当前线程上驱动同一条异步管道直至完成，不应在异步运行时的工作线程中调用。
    pub fn send_blocking<C>(&self, command: C) -> AppResult<()>
    where
        C: Command,
    {
        futures::executor::block_on(self.send(command))
    }

    /// [`send_with_domain_events`](Self::send_with_domain_events) 的阻塞版本
    pub fn send_with_domain_events_blocking<C, A>(&self, command: C) -> AppResult<()>
    where
        C: Command,
        A: Aggregate,
    {
        futures::executor::block_on(self.send_with_domain_events::<C, A>(command))
    }

    async fn dispatch_events<C>(&self, command: C) -> AppResult<()>
    where
        C: Command,
    {
        let handler = self.handler_resolver.resolve_events_handler::<C>()?;
        let events = handler.handle(&command)?;
        debug!(events = events.len(), "command handled");

        for event in &events {
            let concrete = self.event_factory.create_concrete_event(event.as_ref())?;
            self.event_publisher.publish(&concrete).await?;
            debug!(event_type = concrete.event_type(), "event published");
        }

        Ok(())
    }

    async fn dispatch_domain_events<C, A>(&self, command: C) -> AppResult<()>
    where
        C: Command,
        A: Aggregate,
    {
        let policy = EffectivePolicy::for_command(&self.options, &command);

        let handler = self
            .handler_resolver
            .resolve_domain_events_handler::<C, A>()?;
        let events = handler.handle(&command)?;
        debug!(events = events.len(), ?policy, "command handled");

        if policy.save_command {
            let record = SerializedCommand::builder()
                .command_type(C::NAME.to_string())
                .aggregate_type(A::TYPE.to_string())
                .payload(serde_json::to_value(&command)?)
                .build();
            self.command_store.save_command(A::TYPE, &record).await?;
            debug!(command_id = %record.command_id(), "command saved");
        }

        for event in &events {
            let concrete = self.event_factory.create_concrete_event(event)?;

            // 期望版本交由存储自行处理
            self.event_store.save_event(A::TYPE, &concrete, None).await?;
            debug!(event_type = concrete.event_type(), "event saved");

            if policy.publish_events {
                self.event_publisher.publish(&concrete).await?;
                debug!(event_type = concrete.event_type(), "event published");
            }
        }

        Ok(())
    }
}
