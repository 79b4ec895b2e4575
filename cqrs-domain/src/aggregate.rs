//! 聚合（Aggregate）抽象
//!
//! 聚合是一致性边界，其行为产生领域事件：
//! - `raise` 应用事件并按产生顺序记录为未提交事件；
//! - `events` 只读访问未提交事件，命令分发管道只读取该序列；
//! - `take_events` 取走未提交事件（例如在持久化之后清空）。
//!
use crate::domain_event::DomainEvent;
use crate::entity::Entity;

/// 聚合根接口
pub trait Aggregate: Entity + 'static {
    /// 聚合类型标签，持久化事件与命令时使用
    const TYPE: &'static str;

    /// 该聚合产生的领域事件类型
    type Event: DomainEvent;

    /// 应用事件，更新聚合状态
    fn apply(&mut self, event: &Self::Event);

    /// 已产生但尚未提交的事件（按产生顺序）
    fn events(&self) -> &[Self::Event];

    fn events_mut(&mut self) -> &mut Vec<Self::Event>;

    /// 应用并记录一个新事件
    fn raise(&mut self, event: Self::Event) {
        self.apply(&event);
        self.events_mut().push(event);
    }

    /// 取走全部未提交事件，保持产生顺序
    fn take_events(&mut self) -> Vec<Self::Event> {
        std::mem::take(self.events_mut())
    }
}

#[cfg(test)]
mod tests {
    use super::Aggregate;
    use crate::domain_event::{DomainEvent, Event};
    use crate::entity::Entity;
    use crate::error::DomainError;
    use cqrs_macros::{domain_event, entity};
    use serde::{Deserialize, Serialize};

    #[entity]
    #[derive(Debug, Clone, Default, Serialize, Deserialize)]
    struct Counter {
        value: i32,
        #[serde(skip)]
        pending: Vec<CounterEvent>,
    }

    #[domain_event(version = 1)]
    enum CounterEvent {
        Added { amount: i32 },
        #[event(event_type = "counter.subtracted", event_version = 2)]
        Subtracted { amount: i32 },
    }

    impl Counter {
        fn add(&mut self, amount: i32) -> Result<(), DomainError> {
            if amount <= 0 {
                return Err(DomainError::InvalidCommand {
                    reason: "amount must be > 0".into(),
                });
            }
            self.raise(CounterEvent::Added {
                id: ulid::Ulid::new().to_string(),
                aggregate_id: self.id.clone(),
                aggregate_version: self.version + 1,
                amount,
            });
            Ok(())
        }

        fn sub(&mut self, amount: i32) -> Result<(), DomainError> {
            if self.value < amount {
                return Err(DomainError::InvalidState {
                    reason: "insufficient".into(),
                });
            }
            self.raise(CounterEvent::Subtracted {
                id: ulid::Ulid::new().to_string(),
                aggregate_id: self.id.clone(),
                aggregate_version: self.version + 1,
                amount,
            });
            Ok(())
        }
    }

    impl Aggregate for Counter {
        const TYPE: &'static str = "counter";
        type Event = CounterEvent;

        fn apply(&mut self, event: &Self::Event) {
            match event {
                CounterEvent::Added {
                    aggregate_version,
                    amount,
                    ..
                } => {
                    self.value += *amount;
                    self.version = *aggregate_version;
                }
                CounterEvent::Subtracted {
                    aggregate_version,
                    amount,
                    ..
                } => {
                    self.value -= *amount;
                    self.version = *aggregate_version;
                }
            }
        }

        fn events(&self) -> &[Self::Event] {
            &self.pending
        }

        fn events_mut(&mut self) -> &mut Vec<Self::Event> {
            &mut self.pending
        }
    }

    fn assert_domain_event<E: DomainEvent>(_: &E) {}

    #[test]
    fn raise_applies_and_records_in_order() {
        let mut counter = Counter::new("c-1".to_string());
        assert_eq!(counter.version(), 0);

        counter.add(3).unwrap();
        counter.add(2).unwrap();
        counter.sub(1).unwrap();

        assert_eq!(counter.value, 4);
        assert_eq!(counter.version(), 3);

        let versions: Vec<_> = counter
            .events()
            .iter()
            .map(|e| e.aggregate_version())
            .collect();
        assert_eq!(versions, vec![Some(1), Some(2), Some(3)]);
        assert_domain_event(&counter.events()[0]);
    }

    #[test]
    fn event_metadata_comes_from_macro() {
        let mut counter = Counter::new("c-2".to_string());
        counter.add(5).unwrap();
        counter.sub(5).unwrap();

        let events = counter.events();
        assert_eq!(events[0].event_type(), "CounterEvent.Added");
        assert_eq!(events[0].event_version(), 1);
        assert_eq!(events[1].event_type(), "counter.subtracted");
        assert_eq!(events[1].event_version(), 2);
        assert_eq!(events[1].aggregate_id(), Some("c-2"));
    }

    #[test]
    fn take_events_drains_pending() {
        let mut counter = Counter::new("c-3".to_string());
        counter.add(1).unwrap();
        let taken = counter.take_events();
        assert_eq!(taken.len(), 1);
        assert!(counter.events().is_empty());
        assert_eq!(counter.version(), 1);
    }

    #[test]
    fn invalid_commands_should_error() {
        let mut counter = Counter::new("c-4".to_string());
        let err = counter.sub(1).unwrap_err();
        assert!(matches!(err, DomainError::InvalidState { .. }));

        let err = counter.add(0).unwrap_err();
        assert!(matches!(err, DomainError::InvalidCommand { .. }));
        assert!(counter.events().is_empty());
    }
}
