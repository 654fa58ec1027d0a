use crate::models::{AccessMeta, RouteDescriptor};
use crate::table::ExtensionError;

/// Extension Route Set
///
/// The enterprise workspace, shipped only by extended-edition builds. Every
/// node is marked `extended_only`, so a base build never places any of them
/// in the route tree — a base-edition user fails at name lookup, not at the
/// guard.
///
/// The signature is fallible on purpose: the builder treats this set as the
/// one route source allowed to fail, degrading to the base-only tree instead
/// of blocking startup.
pub fn extension_routes() -> Result<Vec<RouteDescriptor>, ExtensionError> {
    Ok(vec![
        // /enterprise
        // Enterprise dashboard hub, open to both roles of the extended
        // deployment.
        RouteDescriptor::new("/enterprise", "enterprise", "views/enterprise/dashboard")
            .with_meta(AccessMeta::for_roles(["admin", "user"]).extended())
            .with_children(vec![
                // /enterprise/analytics
                // Usage analytics; operators only.
                RouteDescriptor::new(
                    "analytics",
                    "enterpriseAnalytics",
                    "views/enterprise/analytics",
                )
                .with_meta(AccessMeta::for_roles(["admin"]).extended()),
                // /enterprise/reports
                RouteDescriptor::new("reports", "enterpriseReports", "views/enterprise/reports")
                    .with_meta(AccessMeta::for_roles(["admin", "user"]).extended()),
            ]),
    ])
}
