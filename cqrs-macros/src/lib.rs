//! CQRS 过程宏
//!
//! - `#[command]`：为命令结构体实现 `Command`，并接入实例级策略覆写字段
//! - `#[event]`：为普通事件结构体实现 `Event` 与 `EventTypes`
//! - `#[domain_event]`：为领域事件枚举补齐元数据字段并实现 `Event`/`EventTypes`/`DomainEvent`
//! - `#[entity]`：为聚合/实体结构体补齐 `id`/`version` 字段并实现 `Entity`
//!
use proc_macro::TokenStream;

mod command;
mod domain_event;
mod entity;
mod event;
mod utils;

/// 命令宏
/// - 支持参数：`#[command(name = "...")]`，默认使用结构体名
/// - 若结构体含 `save_command: Option<bool>` / `publish_events: Option<bool>` 字段，
///   则作为实例级覆写接入，并生成 `with_save_command` / `with_publish_events`
#[proc_macro_attribute]
pub fn command(attr: TokenStream, item: TokenStream) -> TokenStream {
    command::expand(attr, item)
}

/// 普通事件宏
/// - 确保字段 `id: String`
/// - 支持参数：`#[event(event_type = "...", version = N)]`
#[proc_macro_attribute]
pub fn event(attr: TokenStream, item: TokenStream) -> TokenStream {
    event::expand(attr, item)
}

/// 领域事件宏
/// - 每个变体确保字段：`id: String`, `aggregate_id: String`, `aggregate_version: usize`
/// - 支持枚举级参数：`#[domain_event(version = N)]`
/// - 变体可覆写：`#[event(event_type = "...", event_version = N)]`
#[proc_macro_attribute]
pub fn domain_event(attr: TokenStream, item: TokenStream) -> TokenStream {
    domain_event::expand(attr, item)
}

/// 实体宏
/// - 追加字段：`id: IdType`, `version: usize`（若缺失）并置于字段最前
/// - 支持参数：`#[entity(id = IdType, debug = true|false)]`，`id` 默认 `String`
#[proc_macro_attribute]
pub fn entity(attr: TokenStream, item: TokenStream) -> TokenStream {
    entity::expand(attr, item)
}
