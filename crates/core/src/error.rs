//! Registry error taxonomy
//!
//! Component-level errors shared across the workspace. Module-local errors
//! (e.g. `ledger::LedgerError`) convert into `RegistryError` at the
//! component seam.

use thiserror::Error;

/// Top-level error type for registry operations.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Bad input from the caller. Not retryable.
    #[error("Validation error: {0}")]
    Validation(String),

    /// No such device, or the device has been retired. Not retryable.
    #[error("Device not found: {device_id}")]
    NotFound { device_id: String },

    /// Optimistic-concurrency check failed: the caller's view of the device
    /// head is stale. Transient, retryable.
    #[error("Append conflict for {device_id}: expected head {expected:?}, actual {actual:?}")]
    Conflict {
        device_id: String,
        expected: Option<u64>,
        actual: Option<u64>,
    },

    /// Conflict retries exhausted without a successful commit.
    #[error("Concurrent update on {device_id} not resolved after {attempts} attempts")]
    ConcurrentUpdate { device_id: String, attempts: u32 },

    /// Durability failure in the underlying store.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Storage-layer failure that is not a plain IO error (corruption,
    /// database errors, serialization of persisted payloads).
    #[error("Storage error: {0}")]
    Storage(String),

    /// A bounded wait expired before the operation completed. Retryable.
    #[error("Timed out during {operation}")]
    Timeout { operation: String },
}

impl RegistryError {
    /// Whether the caller may retry the failed operation as-is.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            RegistryError::Conflict { .. } | RegistryError::Timeout { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, RegistryError>;
