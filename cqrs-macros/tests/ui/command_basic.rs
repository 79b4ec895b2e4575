use cqrs_application::command::Command;
use cqrs_macros::command;

#[command]
struct OpenAccount {
    owner: String,
    save_command: Option<bool>,
    publish_events: Option<bool>,
}

#[command(name = "bank.close_account")]
struct CloseAccount {
    account_id: String,
}

fn main() {
    let open = OpenAccount {
        owner: "alice".to_string(),
        save_command: None,
        publish_events: None,
    };
    assert_eq!(OpenAccount::NAME, "OpenAccount");
    assert_eq!(open.save_command(), None);

    let open = open.with_save_command(false).with_publish_events(true);
    assert_eq!(open.save_command(), Some(false));
    assert_eq!(open.publish_events(), Some(true));

    let close = CloseAccount {
        account_id: "a-1".to_string(),
    };
    assert_eq!(CloseAccount::NAME, "bank.close_account");
    assert_eq!(close.save_command(), None);
    assert_eq!(close.publish_events(), None);
}
