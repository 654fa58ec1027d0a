use std::sync::Arc;

// --- Module Structure ---

// Core navigation services and components.
pub mod auth;
pub mod config;
pub mod guard;
pub mod models;
pub mod navigator;
pub mod resolver;
pub mod table;
pub mod transport;

// Module for the declared route sets (base, extension).
pub mod routes;

// --- Public Re-exports ---

// Makes the core types easily accessible to the application entry point
// (main.rs) and to embedding hosts.
pub use config::{AppConfig, Env};
pub use models::{
    AccessMeta, AuthSnapshot, Edition, NavigationDecision, Role, RouteDescriptor, VerifiedIdentity,
};
pub use navigator::{NavError, NavigationOutcome, Navigator};
pub use table::{RouteNode, RouteTable, TableError};

use auth::{AuthSession, HttpAuthBackend};
use resolver::{ModuleResolver, StaticModuleLoader};

/// build_shell
///
/// Assembles the navigation core from a loaded configuration: the
/// edition-filtered route table, the HTTP-backed auth session, the module
/// registry for exactly the destinations this build declares, and the
/// navigator tying them together.
///
/// The edition is read from the config here, once; everything downstream
/// receives it as plain data. A failing extension route set does not fail
/// assembly (the builder degrades to base-only); a defective BASE route set
/// does, because that table is this application's reason to exist.
pub fn build_shell(config: &AppConfig) -> Result<Navigator, TableError> {
    let table = routes::declared_table(config.edition)?;

    let backend = Arc::new(HttpAuthBackend::new(config.api_base_url.as_str()));
    let session = Arc::new(AuthSession::new(backend));

    // The shipped modules are exactly the declared destinations: a base
    // build registers no extended view because its table names none.
    let loader = Arc::new(StaticModuleLoader::from_table(&table));
    let resolver = ModuleResolver::new(loader);

    Ok(Navigator::new(Arc::new(table), session, resolver))
}
