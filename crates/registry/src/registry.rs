//! Registry operations over the shared ledger store.

use crate::device::{Device, DeviceSnapshot};
use devledger_core::config::ReputationConfig;
use devledger_core::error::{RegistryError, Result};
use devledger_core::ledger::{LedgerEvent, LedgerRecord, LedgerStore};
use devledger_reputation::{fold, ReputationEngine, ReputationState};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Device registry backed by the ledger store.
///
/// Holds a shared reference to the store, passed at construction; all device
/// state is reconstructible from the record sequence.
pub struct DeviceRegistry {
    ledger: Arc<dyn LedgerStore>,
    engine: ReputationEngine,
}

impl DeviceRegistry {
    pub fn new(ledger: Arc<dyn LedgerStore>, config: ReputationConfig) -> Self {
        let engine = ReputationEngine::new(ledger.clone(), config);
        Self { ledger, engine }
    }

    pub fn engine(&self) -> &ReputationEngine {
        &self.engine
    }

    /// Register a new device under the given name.
    ///
    /// Generates a fresh UUID identifier and appends the registration
    /// record; the device starts at the configured default reputation.
    pub fn register(&self, name: &str) -> Result<Device> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RegistryError::Validation(
                "device name must not be empty".to_string(),
            ));
        }

        let device_id = Uuid::new_v4().to_string();
        let record = self.ledger.append(
            &device_id,
            LedgerEvent::Register {
                name: name.to_string(),
            },
            None,
        )?;

        info!(
            device_id = %device_id,
            name = %name,
            sequence = record.sequence,
            "Device registered"
        );

        Ok(Device {
            id: device_id,
            name: name.to_string(),
            reputation: self.engine.config().default_score,
            registered_at: record.timestamp,
            updated_at: record.timestamp,
        })
    }

    /// Fetch the current view of a device.
    ///
    /// Fails with `NotFound` if the device was never registered or has been
    /// retired.
    pub fn get(&self, device_id: &str) -> Result<Device> {
        let records = self.ledger.read_device(device_id)?;
        let state = fold(device_id, self.engine.config(), &records)?;
        if state.retired {
            return Err(RegistryError::NotFound {
                device_id: device_id.to_string(),
            });
        }

        let (name, registered_at) =
            registration_info(&records).ok_or_else(|| RegistryError::NotFound {
                device_id: device_id.to_string(),
            })?;

        Ok(Device {
            id: device_id.to_string(),
            name,
            reputation: state.score,
            registered_at,
            updated_at: state.updated_at,
        })
    }

    /// Adjust a device's reputation by `delta` and return the updated view.
    pub fn update_reputation(&self, device_id: &str, delta: f64) -> Result<Device> {
        let state = self.engine.apply(device_id, delta)?;

        let records = self.ledger.read_device(device_id)?;
        let (name, registered_at) =
            registration_info(&records).ok_or_else(|| RegistryError::NotFound {
                device_id: device_id.to_string(),
            })?;

        info!(
            device_id = %device_id,
            delta = delta,
            score = state.score,
            "Reputation updated"
        );

        Ok(Device {
            id: device_id.to_string(),
            name,
            reputation: state.score,
            registered_at,
            updated_at: state.updated_at,
        })
    }

    /// Soft-retire a device by appending the tombstone record.
    ///
    /// Fails with `NotFound` if the device was never registered or is
    /// already retired.
    pub fn retire(&self, device_id: &str) -> Result<()> {
        self.engine.apply_event(device_id, LedgerEvent::Retire)?;
        info!(device_id = %device_id, "Device retired");
        Ok(())
    }

    /// Per-record history of a device, oldest first.
    ///
    /// Available for retired devices as well; their record sequence is
    /// never deleted.
    pub fn history(&self, device_id: &str) -> Result<Vec<DeviceSnapshot>> {
        let records = self.ledger.read_device(device_id)?;
        if records.is_empty() {
            return Err(RegistryError::NotFound {
                device_id: device_id.to_string(),
            });
        }

        let config = self.engine.config();
        let mut state = ReputationState {
            device_id: device_id.to_string(),
            score: config.default_score,
            head_sequence: 0,
            retired: false,
            updated_at: 0,
        };

        let mut snapshots = Vec::with_capacity(records.len());
        for record in &records {
            state = state.advanced(record, config);
            snapshots.push(DeviceSnapshot {
                sequence: record.sequence,
                event: record.event.kind().to_string(),
                reputation: state.score,
                retired: state.retired,
                timestamp: record.timestamp,
            });
        }

        Ok(snapshots)
    }
}

/// Name and registration timestamp from a device's record sequence.
///
/// The name comes from the most recent `Register` record, the timestamp
/// from the first.
fn registration_info(records: &[LedgerRecord]) -> Option<(String, u64)> {
    let mut name = None;
    let mut registered_at = 0;
    for record in records {
        if let LedgerEvent::Register { name: n } = &record.event {
            if name.is_none() {
                registered_at = record.timestamp;
            }
            name = Some(n.clone());
        }
    }
    name.map(|n| (n, registered_at))
}
