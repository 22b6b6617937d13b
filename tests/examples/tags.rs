//! Key-only tag integration tests.
//!
//! Tags are props without data. Systems check them with `has` and find all
//! tagged entities with a sweep.

use tessera_storage::{Entity, Namespace};

fn spawn_tool(ns: &Namespace, damaged: bool) -> Entity {
    let tool = ns.new_entity();
    tool.set("durability", if damaged { 0 } else { 10 });
    if damaged {
        tool.tag("damaged");
    }
    tool
}

/// Uses a tool, wearing it down. Returns false if it was too damaged.
fn use_tool(tool: &Entity) -> bool {
    if tool.has("damaged") {
        return false;
    }
    let left = tool
        .get("durability")
        .and_then(|p| p.payload().as_int())
        .unwrap_or_default()
        - 5;
    tool.set("durability", left);
    if left <= 0 {
        tool.tag("damaged");
    }
    true
}

#[test]
fn damaged_tools_refuse_use() {
    let ns = Namespace::new();
    let broken = spawn_tool(&ns, true);
    assert!(!use_tool(&broken));
}

#[test]
fn tools_wear_out() {
    let ns = Namespace::new();
    let hammer = spawn_tool(&ns, false);

    assert!(use_tool(&hammer));
    assert!(use_tool(&hammer));
    assert!(hammer.has("damaged"));
    assert!(!use_tool(&hammer));
}

#[test]
fn repair_system_sweeps_tag() {
    let ns = Namespace::new();
    let tools: Vec<Entity> = (0..6).map(|i| spawn_tool(&ns, i % 2 == 0)).collect();
    assert_eq!(ns.count("damaged"), 3);

    ns.sweep("damaged", |tag| {
        if let Some(tool) = tag.owner() {
            tool.set("durability", 10);
        }
        tag.remove();
        true
    });

    assert_eq!(ns.count("damaged"), 0);
    assert!(tools.iter().all(|t| !t.has("damaged")));
    assert!(tools.iter().all(use_tool));
}

#[test]
fn enchanted_sword_catches_fire() {
    let ns = Namespace::new();
    let sword = ns.new_entity();
    sword.set("enchantedFlame", 3);

    if let Some(flame) = sword.get("enchantedFlame") {
        if flame.payload_as::<i64>().unwrap_or_default() > 2 {
            sword.tag("onFire");
        }
    }

    assert!(sword.has("onFire"));
    assert!(sword.get("onFire").unwrap().payload().is_nil());
}
