//! Device views derived from the record sequence.

use serde::{Deserialize, Serialize};

/// Current registry view of a device.
///
/// `reputation` is derived, never directly settable; the device itself is
/// never physically deleted, only soft-retired.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    /// Unique identifier, immutable once assigned
    pub id: String,
    /// Mutable metadata
    pub name: String,
    /// Derived reputation score
    pub reputation: f64,
    /// Timestamp of the registration record (Unix milliseconds)
    pub registered_at: u64,
    /// Timestamp of the device's latest record (Unix milliseconds)
    pub updated_at: u64,
}

/// Point-in-time view of a device after one of its records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceSnapshot {
    /// Sequence of the record that produced this snapshot
    pub sequence: u64,
    /// Kind tag of the record's event
    pub event: String,
    /// Reputation after applying the record
    pub reputation: f64,
    /// Whether the device was retired as of this record
    pub retired: bool,
    /// Record timestamp (Unix milliseconds)
    pub timestamp: u64,
}
