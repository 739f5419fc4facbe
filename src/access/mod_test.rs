use super::*;
use crate::session::{Identity, Profile, ProfileState};
use uuid::Uuid;

// =============================================================================
// HELPERS
// =============================================================================

fn identity() -> Identity {
    Identity::new(Uuid::new_v4())
}

fn with_profile(role: Role, plan: Plan) -> SessionSnapshot {
    SessionSnapshot::signed_in(identity(), Profile { role, plan })
}

fn all_requirements() -> Vec<RouteRequirement> {
    let mut out = vec![RouteRequirement::signed_in(), RouteRequirement::admin()];
    for plan in [Plan::Free, Plan::Pro, Plan::Enterprise] {
        out.push(RouteRequirement::plan(plan));
        out.push(RouteRequirement { required_plan: Some(plan), required_admin: true });
    }
    out
}

fn all_snapshots() -> Vec<SessionSnapshot> {
    let mut out = vec![
        SessionSnapshot::loading(),
        SessionSnapshot::signed_out(),
        SessionSnapshot::signed_in(identity(), ProfileState::Absent),
    ];
    for role in [Role::User, Role::Admin, Role::Unknown] {
        for plan in [Plan::Free, Plan::Pro, Plan::Enterprise] {
            out.push(with_profile(role, plan));
        }
    }
    out
}

// =============================================================================
// LOADING
// =============================================================================

#[test]
fn loading_always_waits() {
    for mut snap in all_snapshots() {
        snap.loading = true;
        assert_eq!(evaluate_public(&snap), Verdict::Wait, "{snap:?}");
        for req in all_requirements() {
            assert_eq!(evaluate_protected(&snap, &req), Verdict::Wait, "{snap:?} {req:?}");
        }
    }
}

// =============================================================================
// PROTECTED
// =============================================================================

#[test]
fn signed_out_protected_redirects_unauthenticated() {
    let snap = SessionSnapshot::signed_out();
    for req in all_requirements() {
        assert_eq!(
            evaluate_protected(&snap, &req),
            Verdict::Redirect(RedirectReason::Unauthenticated)
        );
    }
}

#[test]
fn admin_required_user_role_redirects_regardless_of_plan() {
    for plan in [Plan::Free, Plan::Pro, Plan::Enterprise] {
        let snap = with_profile(Role::User, plan);
        for required_plan in [None, Some(Plan::Free), Some(Plan::Pro), Some(Plan::Enterprise)] {
            let req = RouteRequirement { required_plan, required_admin: true };
            assert_eq!(
                evaluate_protected(&snap, &req),
                Verdict::Redirect(RedirectReason::InsufficientRole)
            );
        }
    }
}

#[test]
fn unknown_role_is_not_admin() {
    let snap = with_profile(Role::Unknown, Plan::Enterprise);
    assert_eq!(
        evaluate_protected(&snap, &RouteRequirement::admin()),
        Verdict::Redirect(RedirectReason::InsufficientRole)
    );
}

#[test]
fn admin_role_passes_admin_requirement() {
    let snap = with_profile(Role::Admin, Plan::Free);
    assert_eq!(evaluate_protected(&snap, &RouteRequirement::admin()), Verdict::Allow);
}

#[test]
fn plan_check_is_exact_match() {
    let req = RouteRequirement::plan(Plan::Pro);
    assert_eq!(evaluate_protected(&with_profile(Role::User, Plan::Pro), &req), Verdict::Allow);
    assert_eq!(
        evaluate_protected(&with_profile(Role::User, Plan::Enterprise), &req),
        Verdict::Redirect(RedirectReason::InsufficientPlan)
    );
    assert_eq!(
        evaluate_protected(&with_profile(Role::User, Plan::Free), &req),
        Verdict::Redirect(RedirectReason::InsufficientPlan)
    );
}

#[test]
fn role_checked_before_plan() {
    let snap = with_profile(Role::User, Plan::Free);
    let req = RouteRequirement { required_plan: Some(Plan::Pro), required_admin: true };
    assert_eq!(
        evaluate_protected(&snap, &req),
        Verdict::Redirect(RedirectReason::InsufficientRole)
    );
}

#[test]
fn absent_profile_fails_closed() {
    let snap = SessionSnapshot::signed_in(identity(), ProfileState::Absent);
    assert_eq!(evaluate_protected(&snap, &RouteRequirement::signed_in()), Verdict::Allow);
    assert_eq!(
        evaluate_protected(&snap, &RouteRequirement::admin()),
        Verdict::Redirect(RedirectReason::InsufficientRole)
    );
    assert_eq!(
        evaluate_protected(&snap, &RouteRequirement::plan(Plan::Free)),
        Verdict::Redirect(RedirectReason::InsufficientPlan)
    );
}

// =============================================================================
// PUBLIC
// =============================================================================

#[test]
fn public_allows_signed_out() {
    assert_eq!(evaluate_public(&SessionSnapshot::signed_out()), Verdict::Allow);
}

#[test]
fn public_redirects_any_signed_in_user() {
    for snap in all_snapshots().into_iter().filter(|s| !s.loading && s.identity.is_some()) {
        assert_eq!(evaluate_public(&snap), Verdict::Redirect(RedirectReason::Authenticated));
    }
}

// =============================================================================
// DETERMINISM
// =============================================================================

#[test]
fn evaluation_is_idempotent() {
    for snap in all_snapshots() {
        assert_eq!(evaluate_public(&snap), evaluate_public(&snap));
        for req in all_requirements() {
            assert_eq!(evaluate_protected(&snap, &req), evaluate_protected(&snap, &req));
        }
    }
}

#[test]
fn verdict_helpers() {
    assert!(Verdict::Wait.is_wait());
    assert!(Verdict::Allow.is_allow());
    assert_eq!(
        Verdict::Redirect(RedirectReason::InsufficientPlan).redirect_reason(),
        Some(RedirectReason::InsufficientPlan)
    );
    assert_eq!(Verdict::Allow.redirect_reason(), None);
}

// =============================================================================
// ACCESS GATE
// =============================================================================

#[test]
fn default_destinations() {
    let d = Destinations::default();
    assert_eq!(d.path_for(RedirectReason::Unauthenticated), "/login");
    assert_eq!(d.path_for(RedirectReason::InsufficientPlan), "/pricing");
}

#[test]
fn gate_checks_by_path() {
    let routes = RouteTable::new(vec![
        RouteRule::new("/admin", Guard::Protected(RouteRequirement::admin())),
        RouteRule::new("/login", Guard::Public),
    ])
    .unwrap();
    let gate = AccessGate::new(routes, Destinations::default());
    let snap = with_profile(Role::User, Plan::Pro);

    assert_eq!(
        gate.check("/admin/users", &snap),
        Some(Verdict::Redirect(RedirectReason::InsufficientRole))
    );
    assert_eq!(gate.check("/login", &snap), Some(Verdict::Redirect(RedirectReason::Authenticated)));
    assert_eq!(gate.check("/about", &snap), None);
    assert_eq!(gate.destination(RedirectReason::Authenticated), "/dashboard");
}

#[test]
fn redirect_reason_names() {
    assert_eq!(RedirectReason::Unauthenticated.as_str(), "unauthenticated");
    assert_eq!(RedirectReason::InsufficientPlan.as_str(), "insufficient_plan");
}
