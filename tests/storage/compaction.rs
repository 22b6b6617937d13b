//! Integration tests for bucket compaction
//!
//! Tests the miss threshold, survivor order, and configuration presets.

use tessera_storage::{DEFAULT_COMPACTION_THRESHOLD, Namespace, NamespaceConfig};

#[test]
fn compacts_once_threshold_is_reached() {
    crate::init_tracing();
    let ns = Namespace::new();
    let dead = ns.new_entity();
    let live = ns.new_entity();
    dead.tag("k");
    live.tag("k");
    dead.remove("k");

    for _ in 0..DEFAULT_COMPACTION_THRESHOLD - 1 {
        ns.sweep("k", |_| true);
    }
    assert_eq!(ns.bucket_len("k"), 2);
    assert_eq!(ns.bucket("k").unwrap().misses(), DEFAULT_COMPACTION_THRESHOLD - 1);

    ns.sweep("k", |_| true);
    assert_eq!(ns.bucket_len("k"), 1);
    assert_eq!(ns.bucket("k").unwrap().misses(), 0);
    assert!(live.has("k"));
    assert_eq!(ns.count("k"), 1);
}

#[test]
fn below_threshold_keeps_stale_references() {
    let ns = Namespace::new();
    let dead = ns.new_entity();
    ns.new_entity().tag("k");
    dead.tag("k");
    dead.remove("k");

    for _ in 0..10 {
        ns.sweep("k", |_| true);
    }

    assert_eq!(ns.bucket_len("k"), 2);
    assert_eq!(ns.count("k"), 1);
}

#[test]
fn eager_config_compacts_after_first_miss() {
    crate::init_tracing();
    let ns = Namespace::with_config(NamespaceConfig::eager());
    let entities: Vec<_> = (0..4i64)
        .map(|i| {
            let e = ns.new_entity();
            e.set("n", i);
            e
        })
        .collect();
    entities[0].delete();
    entities[2].delete();

    ns.sweep("n", |_| true);
    assert_eq!(ns.bucket_len("n"), 2);

    let mut order = Vec::new();
    ns.sweep("n", |p| {
        order.push(p.payload().as_int().unwrap_or_default());
        true
    });
    assert_eq!(order, [1, 3]);
}

#[test]
fn custom_threshold() {
    let ns = Namespace::with_config(NamespaceConfig::default().with_compaction_threshold(3));
    let dead = ns.new_entity();
    dead.tag("k");
    dead.delete();

    ns.sweep("k", |_| true);
    ns.sweep("k", |_| true);
    assert_eq!(ns.bucket_len("k"), 1);

    ns.sweep("k", |_| true);
    assert_eq!(ns.bucket_len("k"), 0);
}

#[test]
fn early_stop_counts_only_reached_misses() {
    let ns = Namespace::with_config(NamespaceConfig::eager());
    ns.new_entity().tag("k");
    let dead = ns.new_entity();
    dead.tag("k");
    dead.delete();

    ns.sweep("k", |_| false);
    assert_eq!(ns.bucket_len("k"), 2);
    assert_eq!(ns.bucket("k").unwrap().misses(), 0);
}

#[test]
fn removed_entities_are_released_after_compaction() {
    let ns = Namespace::with_config(NamespaceConfig::eager());
    for i in 0..1_000 {
        let e = ns.new_entity();
        let p = e.tag("k").unwrap();
        if i % 2 == 0 {
            p.remove();
        } else {
            e.remove("k");
        }
    }
    assert_eq!(ns.len(), 0);
    assert_eq!(ns.bucket_len("k"), 1_000);

    let stats = ns.sweep("k", |_| true);
    assert_eq!(stats.visited, 0);
    assert_eq!(ns.bucket_len("k"), 0);
    assert!(ns.is_empty());
}

#[test]
fn entity_without_handles_lives_while_swept() {
    let ns = Namespace::with_config(NamespaceConfig::eager());
    ns.new_entity().set("hp", 5);
    assert_eq!(ns.len(), 1);

    let mut owner = None;
    ns.sweep("hp", |p| {
        owner = p.owner();
        true
    });
    let owner = owner.unwrap();
    assert_eq!(owner.get("hp").unwrap().payload().as_int(), Some(5));

    owner.remove("hp");
    drop(owner);
    ns.sweep("hp", |_| true);
    assert_eq!(ns.bucket_len("hp"), 0);
    assert!(ns.is_empty());
}
