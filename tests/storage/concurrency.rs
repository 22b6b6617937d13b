//! Integration tests for concurrent use
//!
//! Tests delete exclusivity, parallel sets, and sweeps racing mutation.

use std::sync::{Arc, Barrier};
use std::thread;

use tessera_storage::{Entity, Namespace};

const RACING_SETS: usize = 10_000;

// =============================================================================
// Delete Exclusivity
// =============================================================================

#[test]
fn racing_sets_never_outlive_delete() {
    crate::init_tracing();
    let ns = Namespace::new();
    let e = ns.new_entity();
    let names: Vec<String> = (0..RACING_SETS).map(|i| format!("attr{i}")).collect();
    let start = Arc::new(Barrier::new(5));

    thread::scope(|s| {
        for chunk in names.chunks(RACING_SETS / 4) {
            let e = e.clone();
            let start = Arc::clone(&start);
            s.spawn(move || {
                start.wait();
                for name in chunk {
                    e.set(name, 1);
                }
            });
        }
        let e = e.clone();
        let start = Arc::clone(&start);
        s.spawn(move || {
            start.wait();
            e.delete();
        });
    });

    assert!(e.is_deleted());
    assert!(e.is_empty());
    let live: usize = names.iter().map(|n| ns.count(n)).sum();
    assert_eq!(live, 0);
}

#[test]
fn props_returned_before_delete_end_up_removed() {
    for _ in 0..20 {
        let e = Namespace::new().new_entity();
        let landed = thread::scope(|s| {
            let setter = s.spawn(|| {
                (0..200)
                    .filter_map(|i| e.set(&format!("p{i}"), i))
                    .collect::<Vec<_>>()
            });
            s.spawn(|| e.delete());
            setter.join().unwrap()
        });
        assert!(landed.iter().all(|p| p.is_removed()));
    }
}

// =============================================================================
// Parallel Mutation
// =============================================================================

#[test]
fn parallel_sets_on_one_name_share_one_prop() {
    let ns = Namespace::new();
    let e = ns.new_entity();
    e.set("hp", 0);

    thread::scope(|s| {
        for t in 0..8i64 {
            let e = &e;
            s.spawn(move || {
                for i in 0..1_000 {
                    e.set("hp", t * 1_000 + i);
                }
            });
        }
    });

    assert_eq!(ns.bucket_len("hp"), 1);
    assert_eq!(ns.count("hp"), 1);
}

#[test]
fn parallel_entity_creation_indexes_everything() {
    let ns = Namespace::new();
    thread::scope(|s| {
        for _ in 0..8 {
            s.spawn(|| {
                for _ in 0..500 {
                    ns.new_entity().tag("spawned");
                }
            });
        }
    });

    assert_eq!(ns.len(), 4_000);
    assert_eq!(ns.count("spawned"), 4_000);
}

#[test]
fn sweeps_race_removals_safely() {
    let ns = Namespace::with_config(tessera_storage::NamespaceConfig::eager());
    let entities: Vec<Entity> = (0..2_000)
        .map(|_| {
            let e = ns.new_entity();
            e.tag("k");
            e
        })
        .collect();

    thread::scope(|s| {
        s.spawn(|| {
            for e in &entities {
                e.remove("k");
            }
        });
        for _ in 0..4 {
            s.spawn(|| {
                for _ in 0..50 {
                    ns.sweep("k", |p| {
                        assert_eq!(p.name(), "k");
                        true
                    });
                }
            });
        }
    });

    assert_eq!(ns.count("k"), 0);
    assert_eq!(ns.bucket_len("k"), 0);
}
