use bon::Builder;
use serde::Deserialize;

/// 命令分发的全局策略配置
///
/// 在构造 `CommandSender` 时传入，生命周期内不可变。
/// 可由宿主从任意配置源反序列化，缺省字段均为 `true`：
///
/// ```rust
/// use cqrs_application::options::Options;
///
/// let options: Options = serde_json::from_str(r#"{ "save_commands": false }"#).unwrap();
/// assert!(!options.save_commands);
/// assert!(options.publish_events);
/// ```
#[derive(Builder, Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Options {
    /// 是否持久化聚合模式下发送的命令
    #[builder(default = true)]
    #[serde(default = "enabled")]
    pub save_commands: bool,
    /// 是否发布聚合模式下产生的事件
    #[builder(default = true)]
    #[serde(default = "enabled")]
    pub publish_events: bool,
}

fn enabled() -> bool {
    true
}

impl Default for Options {
    fn default() -> Self {
        Self {
            save_commands: true,
            publish_events: true,
        }
    }
}
