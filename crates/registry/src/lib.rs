//! Device Registry
//!
//! Maps device identifiers to current device state, built atop the ledger
//! store and the reputation engine:
//! - Registration with generated UUID identifiers
//! - Read views derived from the record sequence
//! - Reputation adjustment via the engine's bounded-retry path
//! - Soft retirement through tombstone records
//! - Per-record history snapshots

pub mod device;
pub mod registry;

pub use device::{Device, DeviceSnapshot};
pub use registry::DeviceRegistry;
