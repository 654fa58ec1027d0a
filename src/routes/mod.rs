/// Route Declaration Index
///
/// Organizes the application's navigable destinations into the two sets the
/// Route Table Builder consumes: the base set every build ships, and the
/// extension set that exists only in extended-edition builds. Access control
/// is declared per node here and enforced by the Navigation Guard on every
/// transition.
use crate::models::Edition;
use crate::table::{RouteTable, TableError};

/// Routes shipped by every build, unconditionally.
pub mod base;

/// Routes shipped only by extended-edition builds.
pub mod extension;

/// Name of the login entry route, the target of every RedirectLogin.
pub const LOGIN_ROUTE: &str = "login";

/// Name of the forbidden entry route, the target of every RedirectForbidden.
pub const FORBIDDEN_ROUTE: &str = "forbidden";

/// declared_table
///
/// Builds the effective route table for this application's declared route
/// sets and the resolved edition. This is the production wiring of the
/// builder; tests exercise `RouteTable::build` with synthetic sets directly.
pub fn declared_table(edition: Edition) -> Result<RouteTable, TableError> {
    RouteTable::build(edition, base::base_routes(), extension::extension_routes)
}
