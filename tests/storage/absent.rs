//! Integration tests for absent receivers
//!
//! Tests that lookups chain through missing entities and props without
//! checks, and that mutations on nothing are reported.

use tessera_storage::{Entity, Namespace, OptionalEntity, OptionalProp};

#[test]
fn chained_lookup_through_missing_target() {
    let ns = Namespace::new();
    let archer = ns.new_entity();

    let target = archer.get("target");
    assert!(target.is_removed());
    assert!(target.payload().is_none());
    assert!(target.owner().get("hp").is_none());
    assert!(!target.owner().has("hp"));
}

#[test]
fn chained_lookup_through_present_target() {
    let ns = Namespace::new();
    let knight = ns.new_entity();
    let hp = knight.set("hp", 30);

    assert_eq!(hp.owner().get("hp").payload().and_then(|v| v.as_int()), Some(30));
}

#[test]
fn set_on_absent_entity_is_invalid_use() {
    let nobody: Option<Entity> = None;
    let err = nobody.set("hp", 1).unwrap_err();
    assert!(err.is_invalid_use());
    assert!(err.to_string().contains("hp"));
}

#[test]
fn set_on_deleted_entity_is_silent() {
    let e = Entity::new();
    e.delete();
    assert!(Some(&e).set("hp", 1).unwrap().is_none());
}

#[test]
fn absent_prop_name_and_payload_mutation_are_invalid_use() {
    let e = Entity::new();
    let missing = e.get("mana");
    assert!(missing.name().unwrap_err().is_invalid_use());
    assert!(missing.set_payload(3).unwrap_err().is_invalid_use());
}

#[test]
fn absent_removals_are_noops() {
    let e = Entity::new();
    e.get("mana").remove();
    OptionalEntity::remove(&e.get("mana").owner(), "mana");
    e.get("mana").owner().delete();
    assert!(!e.is_deleted());
}
