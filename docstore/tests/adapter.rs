//! Contract tests for the `UserStore` adapter against the in-memory backend
//! and the shared test doubles.

use std::error::Error as _;
use std::sync::Arc;

use docstore::{StoreError, StoreResult, UserStore};
use docstore_memory::MemoryStore;
use serde_json::json;
use tests_common::{record, CountingStore, FailingStore};

#[tokio::test(flavor = "multi_thread")]
async fn upsert_then_fetch_returns_at_least_the_written_fields() -> StoreResult<()> {
    let users = UserStore::new(Arc::new(MemoryStore::new()));

    users
        .upsert(&record(json!({"email": "a@example.com", "city": "Oslo"})))
        .await?;
    let written = record(json!({"email": "a@example.com", "name": "X"}));
    users.upsert(&written).await?;

    let found = users.fetch("a@example.com").await?.expect("record");
    for (field, value) in &written {
        assert_eq!(found.get(field), Some(value), "missing field {field}");
    }
    // Pre-existing fields absent from the upsert stay untouched.
    assert_eq!(found.get("city"), Some(&json!("Oslo")));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn disjoint_upserts_merge_into_the_union() -> StoreResult<()> {
    let users = UserStore::new(Arc::new(MemoryStore::new()));

    users
        .upsert(&record(json!({"email": "a@example.com", "name": "X"})))
        .await?;
    users
        .upsert(&record(json!({"email": "a@example.com", "age": 30})))
        .await?;

    let found = users.fetch("a@example.com").await?;
    assert_eq!(
        found,
        Some(record(
            json!({"email": "a@example.com", "name": "X", "age": 30})
        ))
    );
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn overlapping_fields_are_overwritten_not_duplicated() -> StoreResult<()> {
    let users = UserStore::new(Arc::new(MemoryStore::new()));

    users
        .upsert(&record(json!({"email": "a@example.com", "name": "X"})))
        .await?;
    users
        .upsert(&record(json!({"email": "a@example.com", "name": "Y", "age": 30})))
        .await?;

    let found = users.fetch("a@example.com").await?;
    assert_eq!(
        found,
        Some(record(
            json!({"email": "a@example.com", "name": "Y", "age": 30})
        ))
    );
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn upsert_without_usable_email_rejects_before_any_io() {
    let store = Arc::new(CountingStore::new(MemoryStore::new()));
    let users = UserStore::new(Arc::clone(&store));

    let cases = [
        json!({}),
        json!({"name": "X"}),
        json!({"email": ""}),
        json!({"email": null}),
        json!({"email": 42}),
    ];
    for value in cases {
        let err = users.upsert(&record(value.clone())).await.unwrap_err();
        assert!(
            matches!(err, StoreError::EmailRequired),
            "case {value}: {err:?}"
        );
        assert_eq!(format!("{}", err), "Email is required");
    }
    assert_eq!(store.total_calls(), 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn valid_upsert_issues_exactly_one_write() -> StoreResult<()> {
    let store = Arc::new(CountingStore::new(MemoryStore::new()));
    let users = UserStore::new(Arc::clone(&store));

    users
        .upsert(&record(json!({"email": "a@example.com"})))
        .await?;
    assert_eq!(store.set_calls(), 1);
    assert_eq!(store.get_calls(), 0);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn fetch_of_unknown_email_is_absent_not_an_error() -> StoreResult<()> {
    let users = UserStore::new(Arc::new(MemoryStore::new()));
    assert!(users.fetch("nobody@example.com").await?.is_none());
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn client_failure_on_fetch_propagates_with_identity_intact() {
    let users = UserStore::new(Arc::new(FailingStore::default()));

    let err = users.fetch("a@example.com").await.unwrap_err();
    let io = err
        .source()
        .and_then(|s| s.downcast_ref::<std::io::Error>())
        .expect("original io::Error");
    assert_eq!(io.kind(), std::io::ErrorKind::ConnectionRefused);
    assert_eq!(format!("{}", io), "simulated connectivity failure");
}

#[tokio::test(flavor = "multi_thread")]
async fn client_failure_on_upsert_propagates_with_identity_intact() {
    let users = UserStore::new(Arc::new(FailingStore::new(
        std::io::ErrorKind::PermissionDenied,
        "missing write permission",
    )));

    let err = users
        .upsert(&record(json!({"email": "a@example.com"})))
        .await
        .unwrap_err();
    let io = err
        .source()
        .and_then(|s| s.downcast_ref::<std::io::Error>())
        .expect("original io::Error");
    assert_eq!(io.kind(), std::io::ErrorKind::PermissionDenied);
    assert_eq!(format!("{}", io), "missing write permission");
}
