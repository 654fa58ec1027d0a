use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

use crate::table::{RouteNode, RouteTable};

/// LoadError
///
/// Why a view module could not be produced by the loader.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("module '{0}' is not present in this build")]
    NotFound(String),
    #[error("module '{0}' failed to initialize: {1}")]
    Init(String, String),
}

/// ResolveError
///
/// A non-edition-gated module failed to resolve. This is a packaging defect
/// — the route table promises a destination the build cannot mount — and it
/// is the ONLY error class of this subsystem that may reach a generic error
/// reporter.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("module '{module}' for route '{route}' is unavailable: {source}")]
    ModuleUnavailable {
        route: String,
        module: String,
        #[source]
        source: LoadError,
    },
}

// 1. View Contract
/// View
///
/// A mountable screen. Rendering is out of scope for this crate; the shell
/// only needs a stable id and a human-readable title to hand the view to
/// the host application.
pub trait View: Send + Sync {
    fn id(&self) -> &str;
    fn title(&self) -> &str;
}

/// Shared handle to a resolved view.
pub type ViewRef = Arc<dyn View>;

impl std::fmt::Debug for dyn View {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("View")
            .field("id", &self.id())
            .field("title", &self.title())
            .finish()
    }
}

/// StaticView
///
/// The plain view implementation backing every registered module.
pub struct StaticView {
    id: String,
    title: String,
}

impl StaticView {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }
}

impl View for StaticView {
    fn id(&self) -> &str {
        &self.id
    }

    fn title(&self) -> &str {
        &self.title
    }
}

/// PlaceholderView
///
/// The fixed fallback mounted when an edition-gated module is absent from
/// the build. Presents as the forbidden screen; never an error.
pub struct PlaceholderView;

impl View for PlaceholderView {
    fn id(&self) -> &str {
        "views/forbidden"
    }

    fn title(&self) -> &str {
        "Not available in this edition"
    }
}

// 2. ModuleLoader Contract
/// ModuleLoader
///
/// Abstract contract for producing the view implementation behind a module
/// id. The production implementation is the static registry of modules
/// compiled into this build; tests swap in loaders with entries removed to
/// simulate edition-stripped or mispackaged builds.
#[async_trait]
pub trait ModuleLoader: Send + Sync {
    async fn load(&self, module: &str) -> Result<ViewRef, LoadError>;
}

/// Shared handle to the configured module loader.
pub type LoaderRef = Arc<dyn ModuleLoader>;

// 3. The Static Registry Implementation
/// StaticModuleLoader
///
/// Registry of the view modules shipped by this build. A base build simply
/// never registers the extended views, which is what makes an
/// `extended_only` route resolvable to the placeholder instead of a fault.
#[derive(Default)]
pub struct StaticModuleLoader {
    registry: HashMap<String, ViewRef>,
}

impl StaticModuleLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a view under its module id.
    pub fn register(&mut self, view: ViewRef) {
        self.registry.insert(view.id().to_string(), view);
    }

    /// from_table
    ///
    /// Registers one view per module referenced by the given route table —
    /// the production wiring, where the set of shipped modules is exactly
    /// the set of declared destinations. Titles default to the route name.
    pub fn from_table(table: &RouteTable) -> Self {
        let mut loader = Self::new();
        for node in table.flatten() {
            loader.register(Arc::new(StaticView::new(
                node.module.as_str(),
                node.name.as_str(),
            )));
        }
        loader
    }
}

#[async_trait]
impl ModuleLoader for StaticModuleLoader {
    async fn load(&self, module: &str) -> Result<ViewRef, LoadError> {
        self.registry
            .get(module)
            .cloned()
            .ok_or_else(|| LoadError::NotFound(module.to_string()))
    }
}

// 4. The Resolver
/// ModuleResolver
///
/// Produces the view to mount for an allowed transition. Resolution is a
/// rendering concern gated behind authorization: the Navigator only calls
/// this after the guard has decided Allow, so a failing module can never
/// become an authorization bypass.
pub struct ModuleResolver {
    loader: LoaderRef,
    fallback: ViewRef,
}

impl ModuleResolver {
    /// Resolver with the standard forbidden-placeholder fallback.
    pub fn new(loader: LoaderRef) -> Self {
        Self {
            loader,
            fallback: Arc::new(PlaceholderView),
        }
    }

    pub fn with_fallback(loader: LoaderRef, fallback: ViewRef) -> Self {
        Self { loader, fallback }
    }

    /// resolve
    ///
    /// Loads the view module declared by the route node.
    ///
    /// An `extended_only` node whose module is absent is an expected edition
    /// gap: the build was stripped, the route tree was not. That case
    /// degrades to the placeholder view with a diagnostic, never an error.
    /// A missing module on any other node is a packaging defect and is
    /// surfaced as `ResolveError::ModuleUnavailable`.
    pub async fn resolve(&self, node: &RouteNode) -> Result<ViewRef, ResolveError> {
        match self.loader.load(&node.module).await {
            Ok(view) => Ok(view),
            Err(err) if node.meta.extended_only => {
                tracing::warn!(
                    route = %node.name,
                    module = %node.module,
                    error = %err,
                    "extended module absent; mounting placeholder view"
                );
                Ok(self.fallback.clone())
            }
            Err(err) => Err(ResolveError::ModuleUnavailable {
                route: node.name.clone(),
                module: node.module.clone(),
                source: err,
            }),
        }
    }
}
