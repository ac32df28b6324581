//! End-to-end synchronization scenarios
//!
//! Each test walks a full manager round: build the device tree A and the
//! desired tree B, check sync state, and synthesize both patch flavors.

use conf_sync::{check_sync, diff, sync, sync_merge};
use conf_tree::{Node, Operation};
use pretty_assertions::assert_eq;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const NS: &str = "urn:example:system";

/// Initialize a tracing subscriber for test output.
///
/// Honors `RUST_LOG`, defaulting to "info". Safe to call from every
/// test; only the first call installs the subscriber.
fn init_tracing() {
    let fmt_layer = fmt::layer().with_target(true).with_level(true).compact();
    let filter_layer =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .try_init();
}

fn host(name: &str) -> Node {
    Node::container(NS, "host", ["name"]).with_child(Node::leaf(NS, "name", name))
}

fn iface(name: &str, mtu: &str) -> Node {
    Node::list_entry(NS, "interface", ["name", "mtu", "enabled"], ["name"])
        .with_child(Node::leaf(NS, "name", name))
        .with_child(Node::leaf(NS, "mtu", mtu))
        .with_child(Node::leaf(NS, "enabled", "true"))
}

fn interfaces(entries: Vec<Node>) -> Node {
    let mut root = Node::container(NS, "interfaces", ["interface"]);
    for entry in entries {
        root.add_child(entry);
    }
    root
}

fn count_tagged(node: &Node) -> usize {
    let own = usize::from(node.operation() != Operation::None);
    own + node.children().iter().map(count_tagged).sum::<usize>()
}

#[test]
fn identical_host_trees_need_no_sync() {
    init_tracing();
    let a = host("r1");
    let b = host("r1");

    assert!(check_sync(&a, &b));
    assert!(sync(&a, &b).unwrap().is_none());
    assert_eq!(count_tagged(&sync_merge(&a, &b)), 0);
}

#[test]
fn added_and_removed_interfaces() {
    init_tracing();
    let a = interfaces(vec![iface("eth0", "1500"), iface("eth1", "1500")]);
    let b = interfaces(vec![iface("eth1", "1500"), iface("eth2", "1500")]);

    let d = diff(&a, &b);
    assert_eq!(d.unique_a.len(), 1);
    assert_eq!(
        d.unique_a[0].node.get_child("name").unwrap().value(),
        Some("eth0")
    );
    assert_eq!(d.unique_b.len(), 1);
    assert_eq!(
        d.unique_b[0].node.get_child("name").unwrap().value(),
        Some("eth2")
    );
    // eth1 matched across positions and carried no changes
    assert!(d.changed_a.is_empty());

    let patch = sync(&a, &b).unwrap().unwrap();
    let ops: Vec<Operation> = patch.children().iter().map(|c| c.operation()).collect();
    assert!(ops.contains(&Operation::Delete));
    assert!(ops.contains(&Operation::Create));
}

#[test]
fn changed_mtu_coarse_versus_fine() {
    init_tracing();
    let a = interfaces(vec![iface("eth0", "1500")]);
    let b = interfaces(vec![iface("eth0", "9000")]);

    // replace semantics: the whole entry pair is the unit of change
    let d = diff(&a, &b);
    assert_eq!(d.changed_a.len(), 1);
    assert_eq!(d.changed_a[0].node.name(), "interface");

    let replace_patch = sync(&a, &b).unwrap().unwrap();
    let entry = &replace_patch.children()[0];
    assert_eq!(entry.operation(), Operation::Replace);
    // the replacement carries the full entry content
    assert_eq!(entry.children().len(), 3);

    // merge semantics: only the changed leaf travels, plus its key
    let merge_patch = sync_merge(&a, &b);
    let entry = &merge_patch.children()[0];
    assert_eq!(entry.children().len(), 2);
    assert_eq!(entry.get_child("name").unwrap().value(), Some("eth0"));
    assert_eq!(entry.get_child("mtu").unwrap().value(), Some("9000"));
    assert!(entry.get_child("enabled").is_none());
}

#[test]
fn deep_grandchild_change_coarse_versus_fine() {
    init_tracing();
    let device = |mtu: &str| {
        Node::container(NS, "device", ["host", "interfaces"])
            .with_child(host("r1"))
            .with_child(interfaces(vec![iface("eth0", mtu)]))
    };
    let a = device("1500");
    let b = device("9000");

    // replace: the whole top-level subtree containing the change
    let d = diff(&a, &b);
    assert_eq!(d.changed_a.len(), 1);
    assert_eq!(d.changed_a[0].node.name(), "interfaces");

    // merge: just the leaf and its minimal ancestor path; in-sync
    // siblings are pruned away
    let merge_patch = sync_merge(&a, &b);
    assert!(merge_patch.get_child("host").is_none());
    let mtu_leaves = merge_patch.get("interfaces/interface/mtu");
    assert_eq!(mtu_leaves.len(), 1);
    assert_eq!(mtu_leaves[0].value(), Some("9000"));
    let entry = &merge_patch.get_child("interfaces").unwrap().children()[0];
    assert!(entry.get_child("enabled").is_none());
}

#[test]
fn resync_after_apply_is_clean() {
    init_tracing();
    let a = interfaces(vec![iface("eth0", "1500")]);
    let b = interfaces(vec![iface("eth0", "9000"), iface("eth1", "1500")]);

    assert!(!check_sync(&a, &b));
    // once the device matches B, every engine agrees nothing is left
    assert!(check_sync(&b, &b.clone()));
    assert!(sync(&b, &b.clone()).unwrap().is_none());
    assert_eq!(count_tagged(&sync_merge(&b, &b.clone())), 0);
}
