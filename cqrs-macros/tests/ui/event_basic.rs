use cqrs_domain::domain_event::{Event, EventTypes};
use cqrs_macros::event;

#[event]
struct UserNotified {
    message: String,
}

#[event(event_type = "mail.sent", version = 3)]
struct MailSent {
    id: String,
    to: String,
}

fn main() {
    let notified = UserNotified {
        id: "e-1".to_string(),
        message: "hi".to_string(),
    };
    assert_eq!(notified.event_id(), "e-1");
    assert_eq!(notified.event_type(), "UserNotified");
    assert_eq!(notified.event_version(), 1);
    assert_eq!(notified.aggregate_id(), None);
    assert_eq!(UserNotified::EVENT_TYPES, &["UserNotified"]);

    let sent = MailSent {
        id: "e-2".to_string(),
        to: "bob".to_string(),
    };
    assert_eq!(sent.event_type(), "mail.sent");
    assert_eq!(sent.event_version(), 3);
    assert_eq!(MailSent::EVENT_TYPES, &["mail.sent"]);
}
