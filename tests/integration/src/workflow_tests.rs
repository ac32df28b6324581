//! Cross-crate workflows: registry lifecycle, path marking, forest
//! synthesis, and patch serialization

use conf_sync::{Error, check_sync_forest, sync, sync_forest, sync_merge_forest};
use conf_tree::{Node, NodeSet, Operation, SchemaRegistry};
use pretty_assertions::assert_eq;

const NS: &str = "urn:example:system";

fn iface(name: &str, mtu: &str) -> Node {
    Node::list_entry(NS, "interface", ["name", "mtu"], ["name"])
        .with_child(Node::leaf(NS, "name", name))
        .with_child(Node::leaf(NS, "mtu", mtu))
}

#[test]
fn registry_lifecycle_is_explicitly_owned() {
    let mut registry = SchemaRegistry::new();
    registry.register(NS, "example-system");
    registry.register("urn:example:routing", "example-routing");

    assert_eq!(registry.lookup(NS), Some("example-system"));
    assert_eq!(registry.len(), 2);

    // a decoder unloads one module; the other registration survives
    assert_eq!(
        registry.unregister(NS),
        Some("example-system".to_string())
    );
    assert!(!registry.contains(NS));
    assert!(registry.contains("urn:example:routing"));
}

#[test]
fn manual_marking_follows_paths_and_reports_missing_ones() {
    let mut tree = Node::container(NS, "interfaces", ["interface"])
        .with_child(iface("eth0", "1500"));

    tree.mark_leaf_replace("interface/mtu").unwrap();
    assert_eq!(
        tree.get("interface/mtu")[0].operation(),
        Operation::Replace
    );

    let err = tree.mark_leaf_delete("interface/speed").unwrap_err();
    assert!(matches!(err, conf_tree::Error::ElementMissing { .. }));
}

#[test]
fn forest_round_trip_through_both_engines() {
    let current: NodeSet = vec![iface("eth0", "1500"), iface("eth1", "1500")].into();
    let desired: NodeSet = vec![iface("eth0", "9000"), iface("eth1", "1500")].into();

    assert!(!check_sync_forest(&current, &desired));

    let replace_patch = sync_forest(&current, &desired).unwrap();
    assert_eq!(replace_patch.len(), 1);
    assert_eq!(replace_patch[0].operation(), Operation::Replace);
    assert_eq!(
        replace_patch[0].get_child("name").unwrap().value(),
        Some("eth0")
    );

    let merge_patch = sync_merge_forest(&current, &desired);
    assert_eq!(merge_patch.len(), 1);
    let entry = &merge_patch[0];
    assert_eq!(entry.get_child("mtu").unwrap().value(), Some("9000"));
    // the untouched eth1 entry does not travel at all
    assert!(
        merge_patch
            .find(|n| n.get_child("name").is_some_and(|k| k.value() == Some("eth1")))
            .is_none()
    );
}

#[test]
fn incompatible_roots_surface_a_structural_mismatch() {
    let a = Node::container(NS, "interfaces", ["interface"]);
    let b = Node::container(NS, "routing", ["route"]);

    match sync(&a, &b) {
        Err(Error::StructuralMismatch { .. }) => {}
        other => panic!("expected structural mismatch, got {other:?}"),
    }
}

#[test]
fn patch_trees_serialize_for_inspection() {
    let current: NodeSet = vec![iface("eth0", "1500")].into();
    let desired: NodeSet = NodeSet::new();

    let patch = sync_forest(&current, &desired).unwrap();
    assert_eq!(patch.len(), 1);
    assert_eq!(patch[0].operation(), Operation::Delete);

    let json = serde_json::to_value(&patch).unwrap();
    assert_eq!(json[0]["operation"], "delete");
    assert_eq!(json[0]["tag"]["name"], "interface");
}
