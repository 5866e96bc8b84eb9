#![allow(clippy::unwrap_used)]

use futures_util::StreamExt;
use woo_storage::{
    ExecutionContext, OrderStatsRecord, StorageError, StorageManager, SystemPluginRecord,
};

async fn insert_plugin(storage: &StorageManager, name: &'static str) {
    storage
        .perform(ExecutionContext::Background, move |ctx| {
            ctx.insert(SystemPluginRecord::new(1, name));
            Ok::<_, StorageError>(())
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn changed_yields_each_commit() {
    let storage = StorageManager::in_memory();
    let mut stream = storage.subscribe();
    assert_eq!(stream.current().count::<SystemPluginRecord>(), 0);

    insert_plugin(&storage, "A").await;
    let view = stream.changed().await.unwrap();
    assert_eq!(view.count::<SystemPluginRecord>(), 1);
    assert_eq!(stream.current().count::<SystemPluginRecord>(), 1);
}

#[tokio::test]
async fn held_view_is_not_affected_by_later_writes() {
    let storage = StorageManager::in_memory();
    insert_plugin(&storage, "A").await;

    let before = storage.view_storage();
    insert_plugin(&storage, "B").await;

    assert_eq!(before.system_plugins(1).len(), 1);
    assert_eq!(storage.view_storage().system_plugins(1).len(), 2);
}

#[tokio::test]
async fn into_stream_starts_with_current_view() {
    let storage = StorageManager::in_memory();
    insert_plugin(&storage, "A").await;

    let mut stream = storage.subscribe().into_stream();
    let first = stream.next().await.unwrap();
    assert_eq!(first.count::<SystemPluginRecord>(), 1);

    insert_plugin(&storage, "B").await;
    let second = stream.next().await.unwrap();
    assert_eq!(second.count::<SystemPluginRecord>(), 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn concurrent_writers_do_not_lose_updates() {
    let storage = StorageManager::in_memory();

    let mut handles = Vec::new();
    for site_id in 0..16_i64 {
        let storage = storage.clone();
        handles.push(tokio::spawn(async move {
            storage
                .perform(ExecutionContext::Background, move |ctx| {
                    ctx.insert(OrderStatsRecord::new(site_id, "today"));
                    Ok::<_, StorageError>(())
                })
                .await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(storage.view_storage().count::<OrderStatsRecord>(), 16);
}
