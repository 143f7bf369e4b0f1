// SPDX-License-Identifier: MIT

use super::*;
use agentflow_core::test_support::sample_task;

#[tokio::test]
async fn load_returns_none_before_any_save() {
    let store = InMemoryTaskStore::new();
    let id = TaskId::new();
    assert!(store.load(&id).await.is_none());
}

#[tokio::test]
async fn save_then_load_is_read_your_write() {
    let store = InMemoryTaskStore::new();
    let task = sample_task("t1", "c1");
    store.save(task.clone()).await;

    let loaded = store.load(&task.id).await.expect("task should be present");
    assert_eq!(loaded, task);
}

#[tokio::test]
async fn save_overwrites_by_task_id() {
    let store = InMemoryTaskStore::new();
    let mut task = sample_task("t1", "c1");
    store.save(task.clone()).await;

    task.is_final = true;
    store.save(task.clone()).await;

    assert_eq!(store.len(), 1);
    let loaded = store.load(&task.id).await.expect("task should be present");
    assert!(loaded.is_final);
}
