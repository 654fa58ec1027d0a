use std::collections::HashSet;
use thiserror::Error;

use crate::models::{AccessMeta, Edition, RouteDescriptor};

/// TableError
///
/// Defects in the base route set. Unlike an extension failure these are hard
/// errors: a broken base table means the application was misdeclared, and
/// starting with a partial base tree would silently hide destinations.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("duplicate route name '{0}' in the base route set")]
    DuplicateName(String),
    #[error("route with empty name under path '{0}'")]
    UnnamedRoute(String),
}

/// ExtensionError
///
/// Why the extension route set could not be produced. This is the one
/// expected, tolerated failure of table construction: the builder logs it
/// and proceeds with the base-only tree.
#[derive(Debug, Error)]
pub enum ExtensionError {
    #[error("extension route set is not present in this build")]
    Missing,
    #[error("extension route set failed to load: {0}")]
    Failed(String),
}

/// RouteNode
///
/// One built destination in the effective route tree: a path segment, a
/// globally unique name, its access metadata, the id of the view module to
/// mount, and ordered children (insertion order = menu order). The tree is
/// immutable once built.
#[derive(Debug, Clone)]
pub struct RouteNode {
    pub path: String,
    pub name: String,
    pub meta: AccessMeta,
    pub module: String,
    pub children: Vec<RouteNode>,
}

impl From<RouteDescriptor> for RouteNode {
    fn from(desc: RouteDescriptor) -> Self {
        RouteNode {
            path: desc.path,
            name: desc.name,
            meta: desc.meta,
            module: desc.module,
            children: desc.children.into_iter().map(RouteNode::from).collect(),
        }
    }
}

/// RouteTable
///
/// The effective, edition-filtered set of navigable destinations. Built once
/// at startup and read-only thereafter; the Navigation Guard consumes it per
/// transition and the shell walks it to render the menu.
pub struct RouteTable {
    edition: Edition,
    roots: Vec<RouteNode>,
}

impl RouteTable {
    /// build
    ///
    /// Assembles the effective route tree for the resolved edition.
    ///
    /// Base routes are always included, in declaration order. The
    /// `extension` source is evaluated ONLY for `Edition::Extended`; its
    /// routes and all their descendants are appended after the base set.
    ///
    /// Failure policy: a defect in the base set (duplicate or empty name)
    /// is a hard `TableError`. A failing extension source — or an extension
    /// set that would break the global name invariant — must not take the
    /// whole table down: it is logged as a diagnostic and the builder
    /// proceeds with the base-only tree, so an edition-stripped build still
    /// starts.
    ///
    /// Building is deterministic: identical inputs always yield an
    /// identical tree.
    pub fn build<F>(
        edition: Edition,
        base: Vec<RouteDescriptor>,
        extension: F,
    ) -> Result<Self, TableError>
    where
        F: FnOnce() -> Result<Vec<RouteDescriptor>, ExtensionError>,
    {
        let mut roots: Vec<RouteNode> = base.into_iter().map(RouteNode::from).collect();

        // The base set must satisfy the global-uniqueness invariant on its own.
        let mut names = HashSet::new();
        for node in &roots {
            register_names(node, &mut names)?;
        }

        if edition.is_extended() {
            match extension() {
                Ok(descriptors) => {
                    let candidates: Vec<RouteNode> =
                        descriptors.into_iter().map(RouteNode::from).collect();

                    // Validate the extension against the names already taken
                    // before committing any of it: the extension is appended
                    // whole or not at all.
                    let mut merged = names.clone();
                    let valid = candidates
                        .iter()
                        .try_for_each(|node| register_names(node, &mut merged));

                    match valid {
                        Ok(()) => {
                            tracing::info!(
                                routes = candidates.len(),
                                "extension route set added"
                            );
                            roots.extend(candidates);
                        }
                        Err(err) => {
                            tracing::warn!(
                                error = %err,
                                "extension route set conflicts with base routes; \
                                 continuing with base routes only"
                            );
                        }
                    }
                }
                Err(err) => {
                    tracing::warn!(
                        error = %err,
                        "extension route set unavailable; continuing with base routes only"
                    );
                }
            }
        }

        Ok(Self { edition, roots })
    }

    /// The edition this table was built for.
    pub fn edition(&self) -> Edition {
        self.edition
    }

    /// Top-level routes in menu order.
    pub fn roots(&self) -> &[RouteNode] {
        &self.roots
    }

    /// find
    ///
    /// Looks up a destination by its unique name. Navigation is by name, so
    /// a node absent from the tree (an extension route in a base build)
    /// fails here — before the guard is ever consulted.
    pub fn find(&self, name: &str) -> Option<&RouteNode> {
        find_in(&self.roots, name)
    }

    /// path_of
    ///
    /// The full path of a destination, joined from its ancestors' segments
    /// (e.g. "accountSetting" -> "/setting/accountSetting").
    pub fn path_of(&self, name: &str) -> Option<String> {
        path_in(&self.roots, name, "")
    }

    /// flatten
    ///
    /// All nodes in menu order (depth-first, declaration order). Used by the
    /// shell to render the navigation menu.
    pub fn flatten(&self) -> Vec<&RouteNode> {
        let mut out = Vec::new();
        for node in &self.roots {
            flatten_into(node, &mut out);
        }
        out
    }
}

/// Records the names of `node` and its descendants into `taken`, rejecting
/// duplicates and empty names.
fn register_names(node: &RouteNode, taken: &mut HashSet<String>) -> Result<(), TableError> {
    if node.name.is_empty() {
        return Err(TableError::UnnamedRoute(node.path.clone()));
    }
    if !taken.insert(node.name.clone()) {
        return Err(TableError::DuplicateName(node.name.clone()));
    }
    for child in &node.children {
        register_names(child, taken)?;
    }
    Ok(())
}

fn find_in<'a>(nodes: &'a [RouteNode], name: &str) -> Option<&'a RouteNode> {
    for node in nodes {
        if node.name == name {
            return Some(node);
        }
        if let Some(found) = find_in(&node.children, name) {
            return Some(found);
        }
    }
    None
}

fn path_in(nodes: &[RouteNode], name: &str, prefix: &str) -> Option<String> {
    for node in nodes {
        let full = join_path(prefix, &node.path);
        if node.name == name {
            return Some(full);
        }
        if let Some(found) = path_in(&node.children, name, &full) {
            return Some(found);
        }
    }
    None
}

/// Joins a parent path with a child segment. Root segments already carry
/// their leading slash; nested segments are declared bare.
fn join_path(prefix: &str, segment: &str) -> String {
    if prefix.is_empty() || segment.starts_with('/') {
        segment.to_string()
    } else {
        format!("{}/{}", prefix.trim_end_matches('/'), segment)
    }
}

fn flatten_into<'a>(node: &'a RouteNode, out: &mut Vec<&'a RouteNode>) {
    out.push(node);
    for child in &node.children {
        flatten_into(child, out);
    }
}
