use crate::{error::DomainResult as Result, persist::SerializedCommand};
use async_trait::async_trait;
use std::sync::Arc;

/// 命令存储：保存已发送的命令（审计/重放用途）
#[async_trait]
pub trait CommandStore: Send + Sync {
    async fn save_command(&self, aggregate_type: &str, command: &SerializedCommand) -> Result<()>;

    /// 按保存顺序列出全部命令
    async fn get_commands(&self) -> Result<Vec<SerializedCommand>>;
}

#[async_trait]
impl<T> CommandStore for Arc<T>
where
    T: CommandStore + ?Sized,
{
    async fn save_command(&self, aggregate_type: &str, command: &SerializedCommand) -> Result<()> {
        (**self).save_command(aggregate_type, command).await
    }

    async fn get_commands(&self) -> Result<Vec<SerializedCommand>> {
        (**self).get_commands().await
    }
}
