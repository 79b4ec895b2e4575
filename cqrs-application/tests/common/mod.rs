#![allow(dead_code)]

use cqrs_application::command_handler::{CommandHandlerWithDomainEvents, CommandHandlerWithEvents};
use cqrs_application::error::{AppError, AppResult};
use cqrs_domain::aggregate::Aggregate;
use cqrs_domain::domain_event::Event;
use cqrs_domain::entity::Entity;
use cqrs_domain::error::{DomainError, DomainResult};
use cqrs_macros::{command, domain_event, entity, event};
use std::sync::{Arc, Mutex};

#[entity]
#[derive(Clone)]
pub struct Account {
    pub owner: String,
    pub balance: i64,
    #[serde(skip)]
    pending: Vec<AccountEvent>,
}

#[domain_event(version = 1)]
pub enum AccountEvent {
    #[event(event_type = "account.opened")]
    Opened { owner: String },
    #[event(event_type = "account.deposited")]
    Deposited { amount: i64 },
}

impl Account {
    pub fn open(&mut self, owner: &str, initial: i64) -> DomainResult<()> {
        if owner.is_empty() {
            return Err(DomainError::InvalidCommand {
                reason: "owner must not be empty".into(),
            });
        }
        self.raise(AccountEvent::Opened {
            id: format!("{}-opened", self.id),
            aggregate_id: self.id.clone(),
            aggregate_version: self.version + 1,
            owner: owner.to_string(),
        });
        if initial > 0 {
            self.raise(AccountEvent::Deposited {
                id: format!("{}-deposited", self.id),
                aggregate_id: self.id.clone(),
                aggregate_version: self.version + 1,
                amount: initial,
            });
        }
        Ok(())
    }
}

impl Aggregate for Account {
    const TYPE: &'static str = "account";
    type Event = AccountEvent;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            AccountEvent::Opened {
                owner,
                aggregate_version,
                ..
            } => {
                self.owner = owner.clone();
                self.version = *aggregate_version;
            }
            AccountEvent::Deposited {
                amount,
                aggregate_version,
                ..
            } => {
                self.balance += amount;
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

#[command]
pub struct OpenAccount {
    pub account_id: String,
    pub owner: String,
    pub initial: i64,
    pub save_command: Option<bool>,
    pub publish_events: Option<bool>,
}

impl OpenAccount {
    pub fn new(account_id: &str, owner: &str, initial: i64) -> Self {
        Self {
            account_id: account_id.to_string(),
            owner: owner.to_string(),
            initial,
            save_command: None,
            publish_events: None,
        }
    }
}

#[command(name = "greeting.greet")]
pub struct Greet {
    pub names: Vec<String>,
}

#[event(event_type = "greeting.greeted")]
pub struct Greeted {
    pub name: String,
}

/// 处理器与各协作者共享的调用日志
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Resolve(String),
    Handle(&'static str),
    Materialize(String),
    SaveCommand {
        aggregate_type: String,
        command_type: String,
    },
    SaveEvent {
        aggregate_type: String,
        event_id: String,
        expected_version: Option<usize>,
    },
    Publish(String),
}

pub type Journal = Arc<Mutex<Vec<Call>>>;

pub fn record(journal: &Journal, call: Call) {
    journal.lock().unwrap().push(call);
}

pub struct OpenAccountHandler {
    pub journal: Journal,
}

impl CommandHandlerWithDomainEvents<OpenAccount, Account> for OpenAccountHandler {
    fn handle(&self, cmd: &OpenAccount) -> AppResult<Vec<AccountEvent>> {
        record(&self.journal, Call::Handle("OpenAccount"));
        let mut account = Account::new(cmd.account_id.clone());
        account.open(&cmd.owner, cmd.initial)?;
        Ok(account.take_events())
    }
}

pub struct GreetHandler {
    pub journal: Journal,
}

impl CommandHandlerWithEvents<Greet> for GreetHandler {
    fn handle(&self, cmd: &Greet) -> AppResult<Vec<Box<dyn Event>>> {
        record(&self.journal, Call::Handle("Greet"));
        if cmd.names.iter().any(|name| name.is_empty()) {
            return Err(AppError::Validation("names must not be empty".into()));
        }
        Ok(cmd
            .names
            .iter()
            .map(|name| {
                Box::new(Greeted {
                    id: format!("greeted-{name}"),
                    name: name.clone(),
                }) as Box<dyn Event>
            })
            .collect())
    }
}
