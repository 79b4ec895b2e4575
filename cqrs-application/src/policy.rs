//! 副作用策略判定
//!
//! 命令实例上显式的 `false` 总是优先；否则采用全局配置。

use crate::{command::Command, options::Options};

/// 合并命令级覆写与全局配置
pub fn effective(command_override: Option<bool>, global: bool) -> bool {
    match command_override {
        Some(false) => false,
        _ => global,
    }
}

/// 单次发送生效的策略（每次发送计算一次）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectivePolicy {
    pub save_command: bool,
    pub publish_events: bool,
}

impl EffectivePolicy {
    pub fn for_command<C: Command>(options: &Options, command: &C) -> Self {
        Self {
            save_command: effective(command.save_command(), options.save_commands),
            publish_events: effective(command.publish_events(), options.publish_events),
        }
    }
}
