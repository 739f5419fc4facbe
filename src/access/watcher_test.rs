use std::time::Duration;

use super::*;
use crate::access::{RedirectReason, RouteRequirement};
use crate::session::{Identity, Plan, Profile, ProfileState, Role, SessionSnapshot, SessionStore};
use uuid::Uuid;

fn pro_user() -> SessionSnapshot {
    SessionSnapshot::signed_in(Identity::new(Uuid::new_v4()), Profile { role: Role::User, plan: Plan::Pro })
}

#[test]
fn current_reflects_latest_snapshot() {
    let store = SessionStore::new();
    let watcher = GateWatcher::new(store.subscribe(), Guard::Protected(RouteRequirement::signed_in()));
    assert_eq!(watcher.current(), Verdict::Wait);

    store.publish(SessionSnapshot::signed_out());
    assert_eq!(watcher.current(), Verdict::Redirect(RedirectReason::Unauthenticated));
}

#[tokio::test]
async fn loading_tick_never_redirects_before_real_verdict() {
    let store = SessionStore::new();
    let mut watcher = GateWatcher::new(store.subscribe(), Guard::Protected(RouteRequirement::plan(Plan::Pro)));

    let identity = Identity::new(Uuid::new_v4());
    // Identity arrives first, profile still loading.
    store.publish(SessionSnapshot { loading: true, identity: Some(identity.clone()), profile: ProfileState::Absent });
    assert_eq!(watcher.changed().await, Some(Verdict::Wait));

    store.publish(SessionSnapshot::signed_in(
        identity,
        Profile { role: Role::User, plan: Plan::Pro },
    ));
    assert_eq!(watcher.changed().await, Some(Verdict::Allow));
}

#[tokio::test]
async fn settle_skips_wait() {
    let store = SessionStore::new();
    let mut watcher = GateWatcher::new(store.subscribe(), Guard::Public);

    let handle = tokio::spawn(async move { watcher.settle().await });
    tokio::time::sleep(Duration::from_millis(10)).await;
    store.publish(SessionSnapshot { loading: true, identity: None, profile: ProfileState::Absent });
    store.publish(pro_user());

    let verdict = tokio::time::timeout(Duration::from_secs(1), handle)
        .await
        .expect("settle timed out")
        .unwrap();
    assert_eq!(verdict, Some(Verdict::Redirect(RedirectReason::Authenticated)));
    drop(store);
}

#[tokio::test]
async fn settle_returns_immediately_when_already_loaded() {
    let store = SessionStore::with_snapshot(SessionSnapshot::signed_out());
    let mut watcher = GateWatcher::new(store.subscribe(), Guard::Public);
    assert_eq!(watcher.settle().await, Some(Verdict::Allow));
}

#[tokio::test]
async fn settle_returns_none_when_store_dropped_while_loading() {
    let store = SessionStore::new();
    let mut watcher = GateWatcher::new(store.subscribe(), Guard::Public);
    drop(store);
    assert_eq!(watcher.settle().await, None);
}

#[tokio::test]
async fn sign_out_after_allow_redirects() {
    let store = SessionStore::with_snapshot(pro_user());
    let mut watcher = GateWatcher::new(store.subscribe(), Guard::Protected(RouteRequirement::signed_in()));
    assert_eq!(watcher.settle().await, Some(Verdict::Allow));

    store.publish(SessionSnapshot::signed_out());
    assert_eq!(watcher.changed().await, Some(Verdict::Redirect(RedirectReason::Unauthenticated)));
}
