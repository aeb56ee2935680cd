use client::{MemoryStore, SessionProvider, SessionStore};
use pretty_assertions::assert_eq;
use shared_types::{
    navigation_items, DefaultAccess, Guard, GuardDecision, Permission, RedirectTarget, Role,
    RouteAccess, ADMIN_PATH, CHAT_PATH, CONVERSATIONAL_CHAT_PATH, DASHBOARD_PATH, HISTORY_PATH,
    LOGIN_PATH, PSYCHOLOGIST_REPORTS_PATH, REGISTER_PATH, ROLE_MANAGEMENT_PATH, ROUTE_TABLE,
    STATUS_PATH,
};
use std::sync::Arc;

use crate::common;

const RENDER: GuardDecision = GuardDecision::Render;
const TO_LOGIN: GuardDecision = GuardDecision::Redirect(RedirectTarget::Login);
const TO_CHAT: GuardDecision = GuardDecision::Redirect(RedirectTarget::Chat);

/// Session as the app would read it back from storage.
fn stored_session(role: Option<Role>) -> shared_types::Session {
    let store = Arc::new(MemoryStore::new());
    if let Some(role) = role {
        common::seed_session(&store, "acc", "ref", "tester", role);
    }
    SessionStore::new(store).session()
}

fn expected(role: Option<Role>, path: &str) -> GuardDecision {
    use Role::*;
    match (role, path) {
        (_, LOGIN_PATH | REGISTER_PATH | CHAT_PATH | CONVERSATIONAL_CHAT_PATH) => RENDER,
        (None, _) => TO_LOGIN,
        (Some(Admin), _) => RENDER,
        (Some(User), HISTORY_PATH) => RENDER,
        (Some(Psychologist), PSYCHOLOGIST_REPORTS_PATH | DASHBOARD_PATH) => RENDER,
        _ => TO_CHAT,
    }
}

#[test]
fn test_full_route_matrix_under_both_policies() {
    let sessions = [
        None,
        Some(Role::User),
        Some(Role::Psychologist),
        Some(Role::Admin),
    ];
    for policy in [DefaultAccess::Public, DefaultAccess::Authenticated] {
        let guard = Guard::new(policy);
        for role in sessions {
            let session = stored_session(role);
            for spec in ROUTE_TABLE {
                assert_eq!(
                    guard.evaluate_path(&session, spec.path),
                    expected(role, spec.path),
                    "policy={} role={role:?} path={}",
                    policy.as_str(),
                    spec.path
                );
            }
        }
    }
}

#[test]
fn test_signed_in_guest_role_is_treated_like_anonymous_permissions() {
    // A stored user whose role is unknown deserializes as Guest, but the
    // session is still authenticated: guarded routes bounce to chat.
    let store = Arc::new(MemoryStore::new());
    client::KeyValueStore::set(
        &store,
        "user_info",
        r#"{"id":"5","username":"raro","role":"superuser"}"#,
    );
    let session = SessionStore::new(store).session();
    assert!(session.is_authenticated());
    assert_eq!(session.role(), Role::Guest);

    let guard = Guard::default();
    assert_eq!(guard.evaluate_path(&session, ADMIN_PATH), TO_CHAT);
    assert_eq!(guard.evaluate_path(&session, HISTORY_PATH), TO_CHAT);
    assert_eq!(guard.evaluate_path(&session, CHAT_PATH), RENDER);
}

#[test]
fn test_roleless_guarded_route_depends_on_policy() {
    let access = RouteAccess::Guarded {
        roles: &[],
        permission: None,
    };
    let anonymous = stored_session(None);
    let user = stored_session(Some(Role::User));

    let public = Guard::new(DefaultAccess::Public);
    assert_eq!(public.evaluate(&anonymous, &access), RENDER);
    assert_eq!(public.evaluate(&user, &access), RENDER);

    let strict = Guard::new(DefaultAccess::Authenticated);
    assert_eq!(strict.evaluate(&anonymous, &access), TO_LOGIN);
    assert_eq!(strict.evaluate(&user, &access), RENDER);
}

#[test]
fn test_permission_without_roles_still_checked() {
    let access = RouteAccess::Guarded {
        roles: &[],
        permission: Some(Permission::ViewAllHistory),
    };
    let guard = Guard::new(DefaultAccess::Public);
    assert_eq!(guard.evaluate(&stored_session(None), &access), TO_CHAT);
    assert_eq!(guard.evaluate(&stored_session(Some(Role::Psychologist)), &access), TO_CHAT);
    assert_eq!(guard.evaluate(&stored_session(Some(Role::Admin)), &access), RENDER);
}

#[test]
fn test_decisions_are_stable_across_repeated_navigation() {
    let guard = Guard::default();
    let session = stored_session(Some(Role::Psychologist));
    for spec in ROUTE_TABLE {
        let first = guard.evaluate_path(&session, spec.path);
        for _ in 0..3 {
            assert_eq!(guard.evaluate_path(&session, spec.path), first, "{}", spec.path);
        }
    }
}

#[test]
fn test_trailing_slash_and_unknown_paths() {
    let guard = Guard::default();
    let anonymous = stored_session(None);
    assert_eq!(guard.evaluate_path(&anonymous, "/admin/"), TO_LOGIN);
    assert_eq!(guard.evaluate_path(&anonymous, "/no-such-page"), RENDER);
}

#[test]
fn test_every_navigation_link_renders_for_its_role() {
    let guard = Guard::default();
    for role in Role::ALL {
        let session = stored_session(Some(role));
        for item in navigation_items(Some(role)) {
            assert_eq!(
                guard.evaluate_path(&session, item.path),
                RENDER,
                "{} should open {}",
                role.as_str(),
                item.path
            );
        }
    }
}

#[test]
fn test_logout_downgrades_guard_decisions() {
    let store = Arc::new(MemoryStore::new());
    common::seed_session(&store, "acc", "ref", "root", Role::Admin);
    let sessions = SessionStore::new(store.clone());
    let guard = Guard::default();

    assert_eq!(guard.evaluate_path(&sessions.session(), STATUS_PATH), RENDER);
    sessions.clear();
    assert_eq!(guard.evaluate_path(&sessions.session(), STATUS_PATH), TO_LOGIN);
    assert_eq!(guard.evaluate_path(&sessions.session(), ROLE_MANAGEMENT_PATH), TO_LOGIN);
}
