use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;

use crate::auth::AuthSession;
use crate::guard;
use crate::models::NavigationDecision;
use crate::resolver::{ModuleResolver, ResolveError, ViewRef};
use crate::routes::{FORBIDDEN_ROUTE, LOGIN_ROUTE};
use crate::table::RouteTable;

/// NavError
///
/// Failures of one transition attempt that are not navigation decisions.
#[derive(Debug, Error)]
pub enum NavError {
    /// The requested name does not exist in this build's route tree. This is
    /// how an extension destination presents in a base build: absence, not a
    /// forbidden decision.
    #[error("no route named '{0}' exists in this build")]
    UnknownRoute(String),
    /// A non-gated module failed to mount — a packaging defect, surfaced.
    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

/// NavigationOutcome
///
/// What one completed transition attempt produced.
pub enum NavigationOutcome {
    /// The guard allowed the transition and the resolver supplied the view.
    Entered { route: String, view: ViewRef },
    /// The guard redirected; `to` names the entry route to show instead.
    Redirected {
        decision: NavigationDecision,
        to: &'static str,
    },
}

impl fmt::Debug for NavigationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavigationOutcome::Entered { route, view } => f
                .debug_struct("Entered")
                .field("route", route)
                .field("view", &view.id())
                .finish(),
            NavigationOutcome::Redirected { decision, to } => f
                .debug_struct("Redirected")
                .field("decision", decision)
                .field("to", to)
                .finish(),
        }
    }
}

/// Navigator
///
/// The transition pipeline: name lookup, guard evaluation, module
/// resolution, in that order. Resolution is reachable only through an Allow
/// decision, so it can never bypass the guard.
///
/// Transitions on one navigator are serialized by an internal lock: a slow
/// re-validation inside one evaluation cannot race a second rapid attempt's
/// decision. Each call owns its decision value for its own target; there is
/// no state through which a stale decision could be applied to a newer one.
pub struct Navigator {
    table: Arc<RouteTable>,
    session: Arc<AuthSession>,
    resolver: ModuleResolver,
    stream: Mutex<()>,
}

impl Navigator {
    pub fn new(table: Arc<RouteTable>, session: Arc<AuthSession>, resolver: ModuleResolver) -> Self {
        Self {
            table,
            session,
            resolver,
            stream: Mutex::new(()),
        }
    }

    /// The route tree this navigator serves.
    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// The session this navigator consults. Exposed for the shell's login
    /// and logout commands; the navigator itself only reads it.
    pub fn session(&self) -> &Arc<AuthSession> {
        &self.session
    }

    /// navigate
    ///
    /// Attempts one transition to the named destination.
    ///
    /// * Unknown name — `NavError::UnknownRoute` (lookup failure, before the
    ///   guard is consulted).
    /// * Guard redirect — `NavigationOutcome::Redirected` naming the login
    ///   or forbidden entry route.
    /// * Allow — the resolved view in `NavigationOutcome::Entered`; a hard
    ///   resolver failure propagates as `NavError::Resolve`.
    pub async fn navigate(&self, name: &str) -> Result<NavigationOutcome, NavError> {
        // One transition at a time per navigation stream.
        let _transition = self.stream.lock().await;

        let node = self
            .table
            .find(name)
            .ok_or_else(|| NavError::UnknownRoute(name.to_string()))?;

        match guard::evaluate(&node.meta, &self.session).await {
            NavigationDecision::Allow => {
                let view = self.resolver.resolve(node).await?;
                tracing::info!(route = %name, view = %view.id(), "navigation allowed");
                Ok(NavigationOutcome::Entered {
                    route: name.to_string(),
                    view,
                })
            }
            decision @ NavigationDecision::RedirectLogin => {
                tracing::info!(route = %name, "navigation redirected to login");
                Ok(NavigationOutcome::Redirected {
                    decision,
                    to: LOGIN_ROUTE,
                })
            }
            decision @ NavigationDecision::RedirectForbidden => {
                tracing::info!(route = %name, "navigation redirected to forbidden");
                Ok(NavigationOutcome::Redirected {
                    decision,
                    to: FORBIDDEN_ROUTE,
                })
            }
        }
    }
}
