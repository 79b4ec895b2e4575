use cqrs_application::command::Command;
use cqrs_application::command_handler::CommandHandlerWithDomainEvents;
use cqrs_application::error::AppResult;
use cqrs_application::event_factory::EventRegistry;
use cqrs_application::options::Options;
use cqrs_application::{CommandSender, InMemoryHandlerResolver};
use cqrs_domain::aggregate::Aggregate;
use cqrs_domain::entity::Entity;
use cqrs_domain::error::{DomainError, DomainResult};
use cqrs_domain::eventing::InMemoryEventPublisher;
use cqrs_domain::persist::{EventStore, InMemoryCommandStore, InMemoryEventStore};
use cqrs_macros::{command, domain_event, entity};
use futures::StreamExt;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[entity]
#[derive(Clone)]
struct BankAccount {
    balance: i64,
    #[serde(skip)]
    pending: Vec<BankAccountEvent>,
}

#[domain_event(version = 1)]
enum BankAccountEvent {
    #[event(event_type = "bank_account.deposited")]
    Deposited { amount: i64 },
}

impl BankAccount {
    fn deposit(&mut self, amount: i64) -> DomainResult<()> {
        if amount <= 0 {
            return Err(DomainError::InvalidCommand {
                reason: "amount must be positive".into(),
            });
        }
        self.raise(BankAccountEvent::Deposited {
            id: ulid::Ulid::new().to_string(),
            aggregate_id: self.id.clone(),
            aggregate_version: self.version + 1,
            amount,
        });
        Ok(())
    }
}

impl Aggregate for BankAccount {
    const TYPE: &'static str = "bank_account";
    type Event = BankAccountEvent;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            BankAccountEvent::Deposited {
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
struct Deposit {
    account_id: String,
    amount: i64,
    publish_events: Option<bool>,
}

struct DepositHandler;

impl CommandHandlerWithDomainEvents<Deposit, BankAccount> for DepositHandler {
    fn handle(&self, cmd: &Deposit) -> AppResult<Vec<BankAccountEvent>> {
        let mut account = BankAccount::new(cmd.account_id.clone());
        account.deposit(cmd.amount)?;
        Ok(account.take_events())
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .init();

    // 全局策略通常来自宿主配置，缺省字段为 true
    let options: Options = serde_json::from_str(r#"{ "save_commands": true }"#)?;

    let resolver = InMemoryHandlerResolver::new();
    resolver.register_domain_events_handler::<Deposit, BankAccount, _>(Arc::new(DepositHandler));

    let registry = Arc::new(EventRegistry::new());
    registry.register::<BankAccountEvent>()?;

    let publisher = Arc::new(InMemoryEventPublisher::new(64));
    let event_store = Arc::new(InMemoryEventStore::default());

    let mut events = publisher.subscribe();
    let listener = tokio::spawn(async move {
        while let Some(Ok(event)) = events.next().await {
            println!(
                "published: {} {}",
                event.event_type(),
                event.payload()
            );
        }
    });

    let sender = CommandSender::builder()
        .handler_resolver(resolver)
        .event_publisher(publisher.clone())
        .event_factory(registry)
        .event_store(event_store.clone())
        .command_store(Arc::new(InMemoryCommandStore::new()))
        .options(options)
        .build();

    println!("sending {}", Deposit::NAME);
    sender
        .send_with_domain_events::<_, BankAccount>(Deposit {
            account_id: "acc-1".into(),
            amount: 100,
            publish_events: None,
        })
        .await?;

    // 事件照常保存，但不发布
    let quiet = Deposit {
        account_id: "acc-1".into(),
        amount: 5,
        publish_events: None,
    }
    .with_publish_events(false);
    sender
        .send_with_domain_events::<_, BankAccount>(quiet)
        .await?;

    if let Err(err) = sender
        .send_with_domain_events::<_, BankAccount>(Deposit {
            account_id: "acc-1".into(),
            amount: 0,
            publish_events: None,
        })
        .await
    {
        println!("rejected: {err}");
    }

    println!(
        "stored events for acc-1: {}",
        event_store.get_events("acc-1").await?.len()
    );

    drop(sender);
    drop(publisher);
    listener.await?;

    Ok(())
}
