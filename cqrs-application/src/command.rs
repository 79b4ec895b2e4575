use serde::Serialize;

/// 应用层命令（Command）
///
/// 表达“意图”的写操作请求，由唯一的处理器处理，可能产生事件。
/// - 不返回业务数据，仅表达执行结果（成功/失败）。
/// - 建议保持语义化的“动宾结构”命名，如 `CreateUser`、`CloseOrder`。
///
/// 关联常量：
/// - `NAME`：命令的稳定名称，用于日志、持久化与路由。避免依赖 `type_name::<T>()`。
///
/// 单个命令实例可覆写全局策略：返回 `Some(false)` 即关闭对应副作用，
/// 返回 `None` 则沿用全局配置。通常由 `#[command]` 宏生成。
pub trait Command: Serialize + Send + Sync + 'static {
    /// 命令的稳定名称（建议常量字符串，不随重构变化）
    const NAME: &'static str;

    /// 是否持久化本命令（`None` 表示沿用全局配置）
    fn save_command(&self) -> Option<bool> {
        None
    }

    /// 是否发布本命令产生的事件（`None` 表示沿用全局配置）
    fn publish_events(&self) -> Option<bool> {
        None
    }
}
