#![cfg(feature = "inmemory")]
//! 内存存储与发布器的协同行为

use chrono::Utc;
use cqrs_domain::error::DomainError;
use cqrs_domain::eventing::{EventPublisher, InMemoryEventPublisher};
use cqrs_domain::persist::{
    AggregateStore, CommandStore, EventStore, InMemoryAggregateStore, InMemoryCommandStore,
    InMemoryEventStore, SerializedCommand, SerializedEvent,
};
use futures_util::StreamExt;
use std::sync::Arc;
use std::time::Duration;

fn account_event(id: &str, aggregate_id: &str, version: usize) -> SerializedEvent {
    SerializedEvent::builder()
        .event_id(id.to_string())
        .event_type("account.deposited".to_string())
        .event_version(1)
        .aggregate_id(aggregate_id.to_string())
        .aggregate_version(version)
        .occurred_at(Utc::now())
        .payload(serde_json::json!({ "amount": version * 10 }))
        .build()
}

#[tokio::test]
async fn racing_writers_with_the_same_expectation_conflict() -> anyhow::Result<()> {
    let aggregates = Arc::new(InMemoryAggregateStore::new());
    let store = Arc::new(InMemoryEventStore::new(aggregates.clone()));
    store
        .save_event("account", &account_event("e-1", "acc-1", 1), Some(0))
        .await?;

    let left = {
        let store = store.clone();
        tokio::spawn(async move {
            store
                .save_event("account", &account_event("e-2a", "acc-1", 2), Some(1))
                .await
        })
    };
    let right = {
        let store = store.clone();
        tokio::spawn(async move {
            store
                .save_event("account", &account_event("e-2b", "acc-1", 2), Some(1))
                .await
        })
    };

    let outcomes = [left.await?, right.await?];
    let won = outcomes.iter().filter(|r| r.is_ok()).count();
    assert_eq!(won, 1);
    assert!(outcomes.iter().any(|r| matches!(
        r,
        Err(DomainError::VersionConflict {
            expected: 1,
            actual: 2,
            ..
        })
    )));

    assert_eq!(store.get_events("acc-1").await?.len(), 2);
    assert_eq!(aggregates.get_aggregates().await?.len(), 1);
    Ok(())
}

#[tokio::test]
async fn saved_events_reach_subscribers_in_sequence_order() -> anyhow::Result<()> {
    let store = InMemoryEventStore::default();
    let publisher = InMemoryEventPublisher::new(8);
    let mut stream = publisher.subscribe();

    for (id, version) in [("e-1", 1), ("e-2", 2), ("e-3", 3)] {
        let event = account_event(id, "acc-1", version);
        store.save_event("account", &event, None).await?;
        publisher.publish(&event).await?;
    }

    let persisted: Vec<_> = store
        .all_events()
        .await
        .into_iter()
        .map(|s| (s.sequence_number, s.event.event_id().to_string()))
        .collect();
    assert_eq!(
        persisted,
        vec![(1, "e-1".into()), (2, "e-2".into()), (3, "e-3".into())]
    );

    let mut received = Vec::new();
    for _ in 0..3 {
        let next = tokio::time::timeout(Duration::from_secs(1), stream.next()).await?;
        let event = next.ok_or_else(|| anyhow::anyhow!("stream closed"))??;
        received.push(event.event_id().to_string());
    }
    assert_eq!(received, vec!["e-1", "e-2", "e-3"]);
    Ok(())
}

#[tokio::test]
async fn command_store_keeps_insertion_order() -> anyhow::Result<()> {
    let store = InMemoryCommandStore::new();
    for kind in ["OpenAccount", "Deposit"] {
        let command = SerializedCommand::builder()
            .command_type(kind.to_string())
            .aggregate_type("account".to_string())
            .payload(serde_json::json!({}))
            .build();
        store.save_command("account", &command).await?;
    }

    let kinds: Vec<_> = store
        .get_commands()
        .await?
        .iter()
        .map(|c| c.command_type().to_string())
        .collect();
    assert_eq!(kinds, vec!["OpenAccount", "Deposit"]);
    Ok(())
}
