use cqrs_domain::domain_event::{DomainEvent, Event, EventTypes};
use cqrs_macros::domain_event;

#[domain_event(version = 1)]
enum BankEvent {
    #[event(event_type = "bank.opened")]
    Opened { name: String },
    #[event(event_type = "bank.renamed", event_version = 2)]
    Renamed { to: String },
    Closed {
        id: String,
        aggregate_id: String,
        aggregate_version: usize,
    },
}

fn assert_domain_event<E: DomainEvent>(_: &E) {}

fn main() {
    let opened = BankEvent::Opened {
        id: "e-1".to_string(),
        aggregate_id: "b-1".to_string(),
        aggregate_version: 1,
        name: "main".to_string(),
    };
    assert_eq!(opened.event_id(), "e-1");
    assert_eq!(opened.event_type(), "bank.opened");
    assert_eq!(opened.event_version(), 1);
    assert_eq!(opened.aggregate_id(), Some("b-1"));
    assert_eq!(opened.aggregate_version(), Some(1));
    assert_domain_event(&opened);

    let renamed = BankEvent::Renamed {
        id: "e-2".to_string(),
        aggregate_id: "b-1".to_string(),
        aggregate_version: 2,
        to: "savings".to_string(),
    };
    assert_eq!(renamed.event_version(), 2);

    let closed = BankEvent::Closed {
        id: "e-3".to_string(),
        aggregate_id: "b-1".to_string(),
        aggregate_version: 3,
    };
    assert_eq!(closed.event_type(), "BankEvent.Closed");
    assert_eq!(
        BankEvent::EVENT_TYPES,
        &["bank.opened", "bank.renamed", "BankEvent.Closed"]
    );
}
