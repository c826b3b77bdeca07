mod common;

use std::collections::HashSet;
use std::sync::Arc;

use parley_store::{Message, MessageStore};
use uuid::Uuid;

use common::SpyAgent;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_adds_are_not_lost() {
    let agent = Arc::new(SpyAgent::default());
    let store = Arc::new(MessageStore::new(agent.clone()));
    let conversations: Vec<Uuid> = (0..4).map(|_| Uuid::new_v4()).collect();

    let mut handles = Vec::new();
    for worker in 0..8 {
        let store = Arc::clone(&store);
        let conv = conversations[worker % conversations.len()];
        handles.push(tokio::spawn(async move {
            for i in 0..50 {
                let message = Message::new(conv, Uuid::new_v4(), format!("{}-{}", worker, i));
                store.add_message(message).await.unwrap();
            }
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(store.count_total_messages().await, 400);
    assert_eq!(agent.written().len(), 400);

    let mut seen = HashSet::new();
    let mut per_conversation_total = 0;
    for conv in &conversations {
        let messages = store.get_messages_in_conversation(*conv).await;
        assert_eq!(messages.len(), 100);
        assert!(messages.iter().all(|m| m.conversation_id == *conv));
        for m in &messages {
            assert!(seen.insert(m.id), "message indexed twice");
        }
        per_conversation_total += messages.len();
    }
    assert_eq!(per_conversation_total, 400);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_durable_order_matches_index_order() {
    let agent = Arc::new(SpyAgent::default());
    let store = Arc::new(MessageStore::new(agent.clone()));
    let conv = Uuid::new_v4();

    let mut handles = Vec::new();
    for worker in 0..6 {
        let store = Arc::clone(&store);
        handles.push(tokio::spawn(async move {
            for i in 0..20 {
                let message = Message::new(conv, Uuid::new_v4(), format!("{}-{}", worker, i));
                store.add_message(message).await.unwrap();
            }
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let indexed: Vec<Uuid> = store
        .get_messages_in_conversation(conv)
        .await
        .into_iter()
        .map(|m| m.id)
        .collect();
    let durable: Vec<Uuid> = agent.written().into_iter().map(|m| m.id).collect();

    assert_eq!(indexed, durable);
    assert_eq!(store.get_last_message_index().await.map(|m| m.id), durable.last().copied());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_add_and_delete_keep_index_consistent() {
    let agent = Arc::new(SpyAgent::default());
    let store = Arc::new(MessageStore::new(agent.clone()));
    let conv = Uuid::new_v4();

    let seeded: Vec<Message> = (0..100)
        .map(|i| Message::new(conv, Uuid::new_v4(), format!("seed {}", i)))
        .collect();
    store.set_messages(seeded.clone()).await;

    let deleter = {
        let store = Arc::clone(&store);
        let doomed: Vec<Message> = seeded.iter().step_by(2).cloned().collect();
        tokio::spawn(async move {
            for m in &doomed {
                store.delete_message(m).await.unwrap();
            }
        })
    };
    let adder = {
        let store = Arc::clone(&store);
        tokio::spawn(async move {
            for i in 0..50 {
                let m = Message::new(conv, Uuid::new_v4(), format!("new {}", i));
                store.add_message(m).await.unwrap();
            }
        })
    };
    deleter.await.unwrap();
    adder.await.unwrap();

    let messages = store.get_messages_in_conversation(conv).await;
    assert_eq!(store.count_total_messages().await, 100);
    assert_eq!(messages.len(), 100);
    assert_eq!(agent.deleted().len(), 50);
    for m in seeded.iter().skip(1).step_by(2) {
        assert_eq!(store.get_message_by_id(m.id).await.as_ref(), Some(m));
    }
}
