use portal_shell::auth::{AuthSession, MockAuthBackend};
use portal_shell::guard;
use portal_shell::models::{AccessMeta, NavigationDecision, Role};
use std::sync::Arc;

// --- Helpers ---

fn anonymous_session(backend: Arc<MockAuthBackend>) -> AuthSession {
    AuthSession::new(backend)
}

fn logged_in_session(backend: Arc<MockAuthBackend>, role: &str) -> AuthSession {
    let session = AuthSession::new(backend);
    session.login("test-token", role);
    session
}

// --- Open routes ---

#[tokio::test]
async fn public_route_allows_anonymous_without_consulting_backend() {
    let backend = Arc::new(MockAuthBackend::rejecting());
    let session = anonymous_session(backend.clone());

    let decision = guard::evaluate(&AccessMeta::public(), &session).await;

    assert_eq!(decision, NavigationDecision::Allow);
    // No auth requirement means no snapshot-dependent branch at all.
    assert_eq!(backend.calls(), 0);
}

#[tokio::test]
async fn public_route_allows_regardless_of_session_state() {
    let backend = Arc::new(MockAuthBackend::rejecting());
    let session = logged_in_session(backend, "admin");

    let decision = guard::evaluate(&AccessMeta::public(), &session).await;

    assert_eq!(decision, NavigationDecision::Allow);
}

// --- Authenticated snapshots ---

#[tokio::test]
async fn authenticated_role_in_set_allows() {
    let backend = Arc::new(MockAuthBackend::rejecting());
    let session = logged_in_session(backend.clone(), "user");

    let meta = AccessMeta::for_roles(["admin", "user"]);
    let decision = guard::evaluate(&meta, &session).await;

    assert_eq!(decision, NavigationDecision::Allow);
    // Already authenticated: no re-validation round trip.
    assert_eq!(backend.calls(), 0);
}

#[tokio::test]
async fn authenticated_role_outside_set_is_forbidden() {
    let backend = Arc::new(MockAuthBackend::rejecting());
    let session = logged_in_session(backend, "user");

    let meta = AccessMeta::for_roles(["admin"]);
    let decision = guard::evaluate(&meta, &session).await;

    assert_eq!(decision, NavigationDecision::RedirectForbidden);
}

#[tokio::test]
async fn empty_role_set_allows_any_authenticated_role() {
    let backend = Arc::new(MockAuthBackend::rejecting());
    let session = logged_in_session(backend, "vip_alpha");

    let decision = guard::evaluate(&AccessMeta::authenticated(), &session).await;

    assert_eq!(decision, NavigationDecision::Allow);
}

// --- The requiresAuth/roles tie-break ---

#[tokio::test]
async fn role_restriction_without_requires_auth_still_gates_anonymous() {
    // requires_auth left unset but roles declared: identity must still be
    // known, so the anonymous caller goes to login before any role test.
    let meta = AccessMeta {
        requires_auth: false,
        roles: vec![Role::from("user")],
        extended_only: false,
    };

    let backend = Arc::new(MockAuthBackend::rejecting());
    let session = anonymous_session(backend);

    let decision = guard::evaluate(&meta, &session).await;

    assert_eq!(decision, NavigationDecision::RedirectLogin);
}

// --- Re-validation paths ---

#[tokio::test]
async fn revalidation_success_with_matching_role_allows() {
    let backend = Arc::new(MockAuthBackend::accepting("user"));
    let session = anonymous_session(backend.clone());

    let meta = AccessMeta::for_roles(["user"]);
    let decision = guard::evaluate(&meta, &session).await;

    assert_eq!(decision, NavigationDecision::Allow);
    assert_eq!(backend.calls(), 1);
    // The verified identity was installed into the session.
    assert!(session.is_authenticated());
    assert_eq!(session.role(), Some(Role::from("user")));
}

#[tokio::test]
async fn revalidation_failure_redirects_to_login() {
    let backend = Arc::new(MockAuthBackend::rejecting());
    let session = anonymous_session(backend.clone());

    let meta = AccessMeta::for_roles(["user"]);
    let decision = guard::evaluate(&meta, &session).await;

    assert_eq!(decision, NavigationDecision::RedirectLogin);
    // Exactly one attempt; no retry at this layer.
    assert_eq!(backend.calls(), 1);
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn revalidation_success_with_wrong_role_is_forbidden() {
    let backend = Arc::new(MockAuthBackend::accepting("user"));
    let session = anonymous_session(backend);

    let meta = AccessMeta::for_roles(["admin"]);
    let decision = guard::evaluate(&meta, &session).await;

    assert_eq!(decision, NavigationDecision::RedirectForbidden);
}

// --- Idempotence ---

#[tokio::test]
async fn same_inputs_yield_same_decision_twice() {
    let backend = Arc::new(MockAuthBackend::rejecting());
    let session = logged_in_session(backend, "user");
    let meta = AccessMeta::for_roles(["admin"]);

    let first = guard::evaluate(&meta, &session).await;
    let second = guard::evaluate(&meta, &session).await;

    assert_eq!(first, second);
}

#[tokio::test]
async fn failed_revalidation_is_repeatable() {
    let backend = Arc::new(MockAuthBackend::rejecting());
    let session = anonymous_session(backend);
    let meta = AccessMeta::authenticated();

    let first = guard::evaluate(&meta, &session).await;
    let second = guard::evaluate(&meta, &session).await;

    assert_eq!(first, NavigationDecision::RedirectLogin);
    assert_eq!(second, NavigationDecision::RedirectLogin);
}
