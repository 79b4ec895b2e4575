use std::any::Any;
use std::fmt;

/// 将具体类型视作 `&dyn Any`，用于在注册表中还原事件的具体类型
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// 抽象事件：描述“发生了某事”，尚未物化为可持久化/发布的具体形态
///
/// 该 trait 保持对象安全，处理器可返回异构的 `Vec<Box<dyn Event>>`。
pub trait Event: AsAny + fmt::Debug + Send + Sync {
    /// 事件唯一标识
    fn event_id(&self) -> &str;

    /// 事件种类标识（形如 `OrderEvent.Created` 或自定义类型名）
    fn event_type(&self) -> &str;

    /// 事件载荷版本
    fn event_version(&self) -> usize {
        1
    }

    /// 所属聚合 ID；普通事件为 `None`
    fn aggregate_id(&self) -> Option<&str> {
        None
    }

    /// 事件对应的聚合版本；普通事件为 `None`
    fn aggregate_version(&self) -> Option<usize> {
        None
    }
}

/// 某事件类型可能上报的全部事件种类标识
pub trait EventTypes {
    const EVENT_TYPES: &'static [&'static str];
}
