use crate::error::DomainResult as Result;
use crate::persist::{CommandStore, SerializedCommand};
use async_trait::async_trait;
use tokio::sync::RwLock;

/// 内存版命令存储
#[derive(Default)]
pub struct InMemoryCommandStore {
    commands: RwLock<Vec<SerializedCommand>>,
}

impl InMemoryCommandStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CommandStore for InMemoryCommandStore {
    async fn save_command(&self, _aggregate_type: &str, command: &SerializedCommand) -> Result<()> {
        // 聚合类型已随记录一并保存
        self.commands.write().await.push(command.clone());
        Ok(())
    }

    async fn get_commands(&self) -> Result<Vec<SerializedCommand>> {
        Ok(self.commands.read().await.clone())
    }
}
