use cqrs_domain::entity::Entity;
use cqrs_macros::entity;

#[entity]
#[derive(Clone)]
struct Account {
    name: String,
}

#[entity(id = u64, debug = false)]
struct Ledger {
    entries: Vec<i64>,
}

impl std::fmt::Debug for Ledger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Ledger({})", self.id)
    }
}

fn main() {
    let account = Account::new("a-1".to_string());
    assert_eq!(account.id(), "a-1");
    assert_eq!(account.version(), 0);
    assert!(account.name.is_empty());

    let ledger = Ledger::new(7);
    assert_eq!(*ledger.id(), 7);
    assert!(ledger.entries.is_empty());
    assert_eq!(format!("{ledger:?}"), "Ledger(7)");
}
