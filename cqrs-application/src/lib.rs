//! CQRS 应用层（cqrs-application）
//!
//! - 命令（`command`）与两类处理器契约（`command_handler`）
//! - 处理器解析（`handler_resolver`）及其内存实现
//! - 抽象事件到具体事件的物化（`event_factory`）
//! - 全局策略配置（`options`）与命令级覆写判定（`policy`）
//! - 命令分发管道（`command_sender`）
//!
pub mod command;
pub mod command_handler;
pub mod command_sender;
pub mod error;
pub mod event_factory;
pub mod handler_resolver;
pub mod inmemory_handler_resolver;
pub mod options;
pub mod policy;

pub use command_sender::CommandSender;
pub use inmemory_handler_resolver::InMemoryHandlerResolver;
