use super::*;
use crate::session::{Identity, Plan, Profile, Role};
use uuid::Uuid;

fn signed_in() -> SessionSnapshot {
    SessionSnapshot::signed_in(Identity::new(Uuid::nil()), Profile { role: Role::User, plan: Plan::Free })
}

#[test]
fn new_store_starts_loading() {
    let store = SessionStore::new();
    assert!(store.snapshot().loading);
}

#[test]
fn publish_identical_snapshot_does_not_notify() {
    let store = SessionStore::new();
    assert!(!store.publish(SessionSnapshot::loading()));
    assert!(store.publish(SessionSnapshot::signed_out()));
    assert!(!store.publish(SessionSnapshot::signed_out()));
}

#[test]
fn update_reports_whether_anything_changed() {
    let store = SessionStore::with_snapshot(signed_in());
    assert!(!store.update(|s| s.loading = false));
    assert!(store.update(|s| s.identity = None));
    assert!(store.snapshot().identity.is_none());
}

#[tokio::test]
async fn subscriber_sees_each_transition() {
    let store = SessionStore::new();
    let mut sub = store.subscribe();
    assert!(sub.current().loading);

    store.publish(signed_in());
    assert!(sub.changed().await);
    assert_eq!(sub.current(), signed_in());

    store.publish(SessionSnapshot::signed_out());
    assert!(sub.changed().await);
    assert!(sub.with_current(|s| s.identity.is_none()));
}

#[tokio::test]
async fn changed_returns_false_after_store_dropped() {
    let store = SessionStore::new();
    let mut sub = store.subscribe();
    drop(store);
    assert!(!sub.changed().await);
}
