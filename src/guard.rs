use crate::auth::AuthSession;
use crate::models::{AccessMeta, NavigationDecision};

/// evaluate
///
/// The Navigation Guard: decides one transition against the target route's
/// metadata and the current session. Runs before every transition completes;
/// this layer is advisory/UX-only and is never the sole trust boundary —
/// the server authorizes every API call independently.
///
/// Decision sequence:
/// 1. No effective auth requirement (no `requires_auth`, no roles) — Allow,
///    regardless of session state.
/// 2. Authenticated and the role test passes — Allow.
/// 3. Unauthenticated — await the session's single re-validation attempt.
///    Failure is RedirectLogin. Success re-reads the snapshot and retries
///    the role test: pass is Allow, mismatch is RedirectForbidden.
/// 4. Authenticated but role mismatch (first read or post-re-validation) —
///    RedirectForbidden.
///
/// `check_auth` is the single suspension point of the subsystem, and it
/// never faults: every evaluation terminates in one of the three decisions.
///
/// Edition never appears here. A base build's table simply does not contain
/// extension nodes (builder-enforced), so the decision stays a pure function
/// of {metadata, snapshot}.
pub async fn evaluate(meta: &AccessMeta, session: &AuthSession) -> NavigationDecision {
    // 1. Open route: anonymous callers welcome.
    if !meta.requires_identity() {
        return NavigationDecision::Allow;
    }

    // 2. Read one snapshot for this decision.
    let mut snapshot = session.snapshot();

    // 3. Unknown identity: one re-validation attempt, then re-read. The
    //    session itself converts every backend failure into `false`.
    if !snapshot.authenticated {
        if !session.check_auth().await {
            return NavigationDecision::RedirectLogin;
        }
        snapshot = session.snapshot();
    }

    // 4. Identity known: the role test settles it.
    if meta.permits_role(snapshot.role.as_ref()) {
        NavigationDecision::Allow
    } else {
        NavigationDecision::RedirectForbidden
    }
}
