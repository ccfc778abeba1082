//! Derived reputation state and the fold that produces it.

use devledger_core::config::ReputationConfig;
use devledger_core::error::{RegistryError, Result};
use devledger_core::ledger::{LedgerEvent, LedgerRecord};
use serde::{Deserialize, Serialize};

/// Current reputation view of a device, derived from its record sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReputationState {
    /// Device the state belongs to
    pub device_id: String,
    /// Current score, clamped to the configured bounds
    pub score: f64,
    /// Sequence of the device's latest record; the optimistic-concurrency
    /// token for the next append
    pub head_sequence: u64,
    /// Whether the latest lifecycle state is the retire tombstone
    pub retired: bool,
    /// Timestamp of the latest record (Unix milliseconds)
    pub updated_at: u64,
}

impl ReputationState {
    /// State after one more committed record, without re-reading the ledger.
    ///
    /// Valid only when `record` was appended with this state's
    /// `head_sequence` as the compare-and-swap token, which guarantees no
    /// record landed in between.
    pub fn advanced(&self, record: &LedgerRecord, config: &ReputationConfig) -> ReputationState {
        let mut next = self.clone();
        match &record.event {
            LedgerEvent::Register { .. } => {
                next.score = config.default_score;
                next.retired = false;
            }
            LedgerEvent::ReputationDelta { delta } => {
                next.score = (self.score + delta).clamp(config.min_score, config.max_score);
            }
            LedgerEvent::Retire => {
                next.retired = true;
            }
        }
        next.head_sequence = record.sequence;
        next.updated_at = record.timestamp;
        next
    }
}

/// Fold a device's ordered records into its reputation state.
///
/// Pure and deterministic: the same record sequence always produces the same
/// state. Ordering by sequence number is authoritative; out-of-order input
/// is rejected rather than reordered, as is a record belonging to a
/// different device.
pub fn fold(
    device_id: &str,
    config: &ReputationConfig,
    records: &[LedgerRecord],
) -> Result<ReputationState> {
    if records.is_empty() {
        return Err(RegistryError::NotFound {
            device_id: device_id.to_string(),
        });
    }

    let mut score = config.default_score;
    let mut registered = false;
    let mut retired = false;
    let mut head_sequence = 0u64;
    let mut updated_at = 0u64;

    for record in records {
        if record.device_id != device_id {
            return Err(RegistryError::Validation(format!(
                "record {} belongs to device {}, not {}",
                record.sequence, record.device_id, device_id
            )));
        }
        if record.sequence <= head_sequence {
            return Err(RegistryError::Validation(format!(
                "records out of sequence order: {} after {}",
                record.sequence, head_sequence
            )));
        }

        match &record.event {
            LedgerEvent::Register { .. } => {
                registered = true;
                retired = false;
                score = config.default_score;
            }
            LedgerEvent::ReputationDelta { delta } => {
                score = (score + delta).clamp(config.min_score, config.max_score);
            }
            LedgerEvent::Retire => {
                retired = true;
            }
        }

        head_sequence = record.sequence;
        updated_at = record.timestamp;
    }

    if !registered {
        return Err(RegistryError::NotFound {
            device_id: device_id.to_string(),
        });
    }

    Ok(ReputationState {
        device_id: device_id.to_string(),
        score,
        head_sequence,
        retired,
        updated_at,
    })
}
