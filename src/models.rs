use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// --- Build & Identity Primitives ---

/// Edition
///
/// The product edition this binary was assembled as. Resolved exactly once at
/// process start (see `AppConfig::load`) and threaded explicitly into the
/// components that care — there is no ambient global to consult.
///
/// `Base` ships only the fixed base route set; `Extended` additionally ships
/// the gated extension modules and their routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Edition {
    Base,
    Extended,
}

impl Edition {
    /// Parses the raw build flag. Only the exact value "extended" selects the
    /// extended edition; every other value (including absence) is `Base`.
    pub fn from_flag(raw: &str) -> Self {
        match raw {
            "extended" => Edition::Extended,
            _ => Edition::Base,
        }
    }

    pub fn is_extended(self) -> bool {
        self == Edition::Extended
    }
}

impl fmt::Display for Edition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Edition::Base => write!(f, "base"),
            Edition::Extended => write!(f, "extended"),
        }
    }
}

/// Role
///
/// Opaque identifier for a user's permission class. The shell never interprets
/// the value; it only compares it against the role sets declared on routes.
/// Known values in this deployment: "admin", "user", "vip_alpha".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Role(String);

impl Role {
    pub fn new(id: impl Into<String>) -> Self {
        Role(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Role {
    fn from(id: &str) -> Self {
        Role(id.to_string())
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// --- Route Declarations ---

/// AccessMeta
///
/// The access requirements attached to a single route node. Each node's
/// metadata is authoritative for that node only — requirements are NOT
/// inherited from ancestors, so a child may be declared weaker than its
/// parent (see DESIGN.md for the recorded decision on this behavior).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccessMeta {
    /// The transition requires an authenticated session.
    #[serde(default)]
    pub requires_auth: bool,
    /// Roles permitted to enter. Empty means no role restriction.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub roles: Vec<Role>,
    /// The node exists only in `Edition::Extended` builds. Enforced at table
    /// build time; the guard never needs to look at this flag.
    #[serde(default)]
    pub extended_only: bool,
}

impl AccessMeta {
    /// Metadata for a route open to anonymous visitors.
    pub fn public() -> Self {
        AccessMeta::default()
    }

    /// Metadata for a route requiring any authenticated session.
    pub fn authenticated() -> Self {
        AccessMeta {
            requires_auth: true,
            ..AccessMeta::default()
        }
    }

    /// Metadata for a route restricted to the given roles.
    /// Implies `requires_auth` (see `requires_identity`).
    pub fn for_roles<I, R>(roles: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<Role>,
    {
        AccessMeta {
            requires_auth: true,
            roles: roles.into_iter().map(Into::into).collect(),
            ..AccessMeta::default()
        }
    }

    /// Marks the node as present only in extended-edition builds.
    pub fn extended(mut self) -> Self {
        self.extended_only = true;
        self
    }

    /// Effective authentication requirement.
    ///
    /// A non-empty role set gates the route even when `requires_auth` was left
    /// unset: a role restriction cannot be checked without a known identity,
    /// so an anonymous caller must be sent to login before any role test.
    pub fn requires_identity(&self) -> bool {
        self.requires_auth || !self.roles.is_empty()
    }

    /// Role test: passes when no restriction is declared, or when the
    /// caller's role is a member of the declared set.
    pub fn permits_role(&self, role: Option<&Role>) -> bool {
        self.roles.is_empty() || role.is_some_and(|r| self.roles.contains(r))
    }
}

/// RouteDescriptor
///
/// Declaration-side input to the Route Table Builder: one navigable
/// destination with its path segment, globally unique name, access metadata,
/// ordered children (insertion order = menu order) and the id of the view
/// module mounted when the route is entered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteDescriptor {
    pub path: String,
    pub name: String,
    #[serde(default)]
    pub meta: AccessMeta,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<RouteDescriptor>,
    pub module: String,
}

impl RouteDescriptor {
    pub fn new(path: impl Into<String>, name: impl Into<String>, module: impl Into<String>) -> Self {
        RouteDescriptor {
            path: path.into(),
            name: name.into(),
            meta: AccessMeta::default(),
            children: Vec::new(),
            module: module.into(),
        }
    }

    pub fn with_meta(mut self, meta: AccessMeta) -> Self {
        self.meta = meta;
        self
    }

    pub fn with_children(mut self, children: Vec<RouteDescriptor>) -> Self {
        self.children = children;
        self
    }
}

// --- Session State ---

/// AuthSnapshot
///
/// A point-in-time copy of the session state owned by the Auth State
/// Provider. The Navigation Guard reads one snapshot per decision and never
/// writes back; only `AuthSession` itself (login / logout / re-validation)
/// mutates the underlying state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthSnapshot {
    pub authenticated: bool,
    pub role: Option<Role>,
    /// Opaque bearer credential attached to outgoing API requests.
    pub token: Option<String>,
    /// Instant of the last successful re-validation. Diagnostic only; the
    /// guard does not consult it.
    pub verified_at: Option<DateTime<Utc>>,
}

/// VerifiedIdentity
///
/// What the auth backend reports after a successful credential check. The
/// session installs this wholesale; a `None` token means "keep the credential
/// you already hold".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifiedIdentity {
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

// --- Guard Output ---

/// NavigationDecision
///
/// Terminal output of one guard evaluation. Computed fresh for every
/// transition attempt and discarded after use; there is no fourth
/// "undecided" outcome reachable by a caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NavigationDecision {
    /// The transition may complete; the resolver supplies the view.
    Allow,
    /// Identity unknown (or re-validation failed): send to the login entry.
    RedirectLogin,
    /// Identity known but role not permitted: send to the forbidden entry.
    RedirectForbidden,
}

impl fmt::Display for NavigationDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavigationDecision::Allow => write!(f, "allow"),
            NavigationDecision::RedirectLogin => write!(f, "redirect-login"),
            NavigationDecision::RedirectForbidden => write!(f, "redirect-forbidden"),
        }
    }
}
