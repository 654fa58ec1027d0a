use portal_shell::models::{AccessMeta, Edition, RouteDescriptor};
use portal_shell::routes;
use portal_shell::table::{ExtensionError, RouteTable, TableError};
use std::sync::atomic::{AtomicBool, Ordering};

// --- Helpers ---

fn names(table: &RouteTable) -> Vec<String> {
    table
        .flatten()
        .iter()
        .map(|node| node.name.clone())
        .collect()
}

// --- Edition containment ---

#[test]
fn base_edition_never_evaluates_the_extension_source() {
    let consulted = AtomicBool::new(false);

    let table = RouteTable::build(Edition::Base, routes::base::base_routes(), || {
        consulted.store(true, Ordering::SeqCst);
        routes::extension::extension_routes()
    })
    .unwrap();

    assert!(!consulted.load(Ordering::SeqCst));
    assert!(table.find("enterprise").is_none());
}

#[test]
fn base_edition_tree_contains_no_extended_nodes() {
    let table = routes::declared_table(Edition::Base).unwrap();

    assert!(table.flatten().iter().all(|node| !node.meta.extended_only));
    // Absence, not a forbidden decision: the name simply does not resolve.
    assert!(table.find("enterprise").is_none());
    assert!(table.find("enterpriseAnalytics").is_none());
}

#[test]
fn extended_edition_includes_the_extension_subtree() {
    let table = routes::declared_table(Edition::Extended).unwrap();

    let analytics = table.find("enterpriseAnalytics").expect("extension route");
    assert!(analytics.meta.extended_only);
    assert!(analytics.meta.requires_auth);
    assert_eq!(analytics.meta.roles, vec!["admin".into()]);

    let dashboard = table.find("enterprise").expect("extension root");
    assert_eq!(dashboard.children.len(), 2);
}

// --- Determinism & order ---

#[test]
fn identical_inputs_build_identical_trees() {
    let first = routes::declared_table(Edition::Extended).unwrap();
    let second = routes::declared_table(Edition::Extended).unwrap();

    assert_eq!(names(&first), names(&second));
}

#[test]
fn menu_order_follows_declaration_order() {
    let table = routes::declared_table(Edition::Base).unwrap();
    let flat = names(&table);

    assert_eq!(flat.first().map(String::as_str), Some("login"));
    assert_eq!(flat.last().map(String::as_str), Some("characterAuthClose"));

    // Children sit directly after their parent, in declared order.
    let industry = table.find("industry").unwrap();
    let children: Vec<&str> = industry.children.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(
        children,
        vec![
            "overview",
            "assetView",
            "industryPlan",
            "flowDecomposition",
            "workflow"
        ]
    );
}

// --- Failure policy ---

#[test]
fn failing_extension_source_degrades_to_base_only() {
    let table = RouteTable::build(Edition::Extended, routes::base::base_routes(), || {
        Err(ExtensionError::Missing)
    })
    .expect("extension failure must not fail the table");

    assert!(table.find("enterprise").is_none());
    assert!(table.find("home").is_some());
}

#[test]
fn extension_conflicting_with_base_names_is_skipped() {
    let base = routes::base::base_routes();
    let base_len = RouteTable::build(Edition::Base, base.clone(), routes::extension::extension_routes)
        .unwrap()
        .flatten()
        .len();

    // An extension set reusing the name "home" would break the global
    // uniqueness invariant; the builder drops the whole extension set.
    let table = RouteTable::build(Edition::Extended, base, || {
        Ok(vec![
            RouteDescriptor::new("/extra", "extra", "views/extra"),
            RouteDescriptor::new("/home2", "home", "views/home2"),
        ])
    })
    .unwrap();

    assert_eq!(table.flatten().len(), base_len);
    assert!(table.find("extra").is_none());
}

#[test]
fn duplicate_name_in_base_set_is_a_hard_error() {
    let result = RouteTable::build(
        Edition::Base,
        vec![
            RouteDescriptor::new("/a", "dup", "views/a"),
            RouteDescriptor::new("/b", "dup", "views/b"),
        ],
        || Ok(vec![]),
    );

    match result {
        Err(TableError::DuplicateName(name)) => assert_eq!(name, "dup"),
        other => panic!("expected DuplicateName, got {:?}", other.map(|t| names(&t))),
    }
}

#[test]
fn empty_name_in_base_set_is_a_hard_error() {
    let result = RouteTable::build(
        Edition::Base,
        vec![RouteDescriptor::new("/a", "", "views/a")],
        || Ok(vec![]),
    );

    assert!(matches!(result, Err(TableError::UnnamedRoute(_))));
}

#[test]
fn duplicate_nested_names_are_detected() {
    let result = RouteTable::build(
        Edition::Base,
        vec![
            RouteDescriptor::new("/parent", "parent", "views/parent").with_children(vec![
                RouteDescriptor::new("child", "parent", "views/child"),
            ]),
        ],
        || Ok(vec![]),
    );

    assert!(matches!(result, Err(TableError::DuplicateName(_))));
}

// --- Lookup & paths ---

#[test]
fn find_reaches_nested_routes_by_unique_name() {
    let table = routes::declared_table(Edition::Base).unwrap();

    let node = table.find("accountSetting").expect("nested route");
    assert_eq!(node.path, "accountSetting");
    assert_eq!(node.meta.roles, vec!["user".into()]);
}

#[test]
fn path_of_joins_ancestor_segments() {
    let table = routes::declared_table(Edition::Extended).unwrap();

    assert_eq!(
        table.path_of("accountSetting").as_deref(),
        Some("/setting/accountSetting")
    );
    assert_eq!(
        table.path_of("enterpriseAnalytics").as_deref(),
        Some("/enterprise/analytics")
    );
    assert_eq!(table.path_of("publicStorage").as_deref(), Some("/storage/:sid"));
    assert_eq!(table.path_of("login").as_deref(), Some("/login"));
}

// --- Metadata defaults ---

#[test]
fn descriptor_meta_defaults_to_public() {
    let meta = AccessMeta::default();
    assert!(!meta.requires_auth);
    assert!(meta.roles.is_empty());
    assert!(!meta.extended_only);
    assert!(!meta.requires_identity());
}
