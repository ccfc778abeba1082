//! Concurrent reputation updates under optimistic concurrency

use crate::test_utils::*;
use std::sync::Arc;

const WRITERS: usize = 8;
const DELTA: f64 = 0.2;

#[test]
fn test_concurrent_updates_all_commit_exactly_once() {
    let db_path = temp_db_path();
    let ledger = open_ledger(&db_path);
    let registry = Arc::new(test_registry(ledger.clone()));

    let device = registry.register("sensor-1").unwrap();

    std::thread::scope(|scope| {
        let mut handles = Vec::new();
        for _ in 0..WRITERS {
            let registry = registry.clone();
            let device_id = device.id.clone();
            handles.push(scope.spawn(move || registry.update_reputation(&device_id, DELTA)));
        }
        for handle in handles {
            // Every writer succeeds after bounded retries
            handle.join().unwrap().unwrap();
        }
    });

    // Final score equals the fold of all deltas in commit order
    let expected = (0..WRITERS).fold(3.0f64, |score, _| (score + DELTA).clamp(0.0, 5.0));
    let final_view = registry.get(&device.id).unwrap();
    assert_eq!(final_view.reputation, expected);

    // One register record plus one record per writer, gap-free
    assert_eq!(ledger.latest_sequence().unwrap(), 1 + WRITERS as u64);

    std::fs::remove_file(db_path).ok();
}

#[test]
fn test_concurrent_updates_to_different_devices_do_not_contend() {
    let db_path = temp_db_path();
    let ledger = open_ledger(&db_path);
    let registry = Arc::new(test_registry(ledger));

    let devices: Vec<_> = (0..4)
        .map(|i| registry.register(&format!("sensor-{}", i)).unwrap())
        .collect();

    std::thread::scope(|scope| {
        let mut handles = Vec::new();
        for device in &devices {
            let registry = registry.clone();
            let device_id = device.id.clone();
            handles.push(scope.spawn(move || registry.update_reputation(&device_id, 1.0)));
        }
        for handle in handles {
            handle.join().unwrap().unwrap();
        }
    });

    for device in &devices {
        assert_eq!(registry.get(&device.id).unwrap().reputation, 4.0);
    }

    std::fs::remove_file(db_path).ok();
}
