//! Complete device lifecycle over the durable ledger

use crate::test_utils::*;
use devledger_core::error::RegistryError;

#[test]
fn test_complete_device_lifecycle() {
    let db_path = temp_db_path();
    let ledger = open_ledger(&db_path);
    let registry = test_registry(ledger);

    // Register
    let device = registry.register("sensor-1").unwrap();
    assert_eq!(device.name, "sensor-1");
    assert_eq!(device.reputation, 3.0);

    // Apply delta +1.5
    let device = registry.update_reputation(&device.id, 1.5).unwrap();
    assert_eq!(device.reputation, 4.5);

    // Apply delta +2.0, clamps at the configured max
    let device = registry.update_reputation(&device.id, 2.0).unwrap();
    assert_eq!(device.reputation, 5.0);

    // Query and verify the update
    let fetched = registry.get(&device.id).unwrap();
    assert_eq!(fetched.reputation, 5.0);

    // History tracks the score after every record
    let history = registry.history(&device.id).unwrap();
    assert_eq!(history.len(), 3);
    assert_eq!(history[0].reputation, 3.0);
    assert_eq!(history[1].reputation, 4.5);
    assert_eq!(history[2].reputation, 5.0);

    // Retire and verify the tombstone wins
    registry.retire(&device.id).unwrap();
    assert!(matches!(
        registry.get(&device.id).unwrap_err(),
        RegistryError::NotFound { .. }
    ));

    std::fs::remove_file(db_path).ok();
}

#[test]
fn test_state_survives_reopen() {
    let db_path = temp_db_path();

    let device_id = {
        let ledger = open_ledger(&db_path);
        let registry = test_registry(ledger);
        let device = registry.register("sensor-1").unwrap();
        registry.update_reputation(&device.id, -1.0).unwrap();
        device.id
    };

    // A fresh registry over the reopened ledger reproduces the same view
    let ledger = open_ledger(&db_path);
    let registry = test_registry(ledger);

    let device = registry.get(&device_id).unwrap();
    assert_eq!(device.name, "sensor-1");
    assert_eq!(device.reputation, 2.0);

    std::fs::remove_file(db_path).ok();
}

#[test]
fn test_current_view_is_idempotent() {
    let db_path = temp_db_path();
    let ledger = open_ledger(&db_path);
    let registry = test_registry(ledger);

    let device = registry.register("sensor-1").unwrap();
    registry.update_reputation(&device.id, 0.7).unwrap();

    let first = registry.get(&device.id).unwrap();
    let second = registry.get(&device.id).unwrap();
    assert_eq!(first, second);

    std::fs::remove_file(db_path).ok();
}

#[test]
fn test_unregistered_device_is_not_found() {
    let db_path = temp_db_path();
    let ledger = open_ledger(&db_path);
    let registry = test_registry(ledger);

    assert!(matches!(
        registry.get("never-registered").unwrap_err(),
        RegistryError::NotFound { .. }
    ));

    std::fs::remove_file(db_path).ok();
}

#[test]
fn test_devices_are_isolated() {
    let db_path = temp_db_path();
    let ledger = open_ledger(&db_path);
    let registry = test_registry(ledger);

    let a = registry.register("sensor-a").unwrap();
    let b = registry.register("sensor-b").unwrap();

    registry.update_reputation(&a.id, 1.0).unwrap();

    assert_eq!(registry.get(&a.id).unwrap().reputation, 4.0);
    assert_eq!(registry.get(&b.id).unwrap().reputation, 3.0);

    std::fs::remove_file(db_path).ok();
}
