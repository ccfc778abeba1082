//! Device Event Ledger - Append-Only, Content-Addressed Storage
//!
//! This module provides the durable record log that every other component
//! derives its state from:
//! - SQLite backend with WAL mode for durability
//! - Strict append-only semantics (no updates or deletes)
//! - Per-device optimistic concurrency at append time
//! - Startup continuity checks for corruption detection
//! - Observability metrics and health reporting
//!
//! # Architecture
//!
//! Each record is persisted with:
//! - sequence: Monotonically increasing, gap-free, assigned at commit time
//! - device_id: The device the record belongs to
//! - event: Register / ReputationDelta / Retire payload
//! - record_hash: BLAKE3 content address of the record
//! - prev_record_hash: Hash of the previous record (chain pointer)
//! - timestamp: Record creation time (Unix milliseconds)
//!
//! # Guarantees
//!
//! - Strict ordering: sequence increases by 1 for each record, never reused
//! - Chain continuity: prev_record_hash must match the previous record's hash
//! - Append-only: no in-place updates or deletes allowed
//! - Durability: once `append` returns, the record is visible to all
//!   subsequent reads (no read-after-write anomaly)
//! - Corruption detection: startup checks verify sequence and chain integrity
//!
//! Writers contend only on the short commit critical section; appends to
//! different devices never fail each other's optimistic-concurrency check.

#[cfg(feature = "sqlite")]
use rusqlite::{params, Connection, OpenFlags, OptionalExtension};
use serde::{Deserialize, Serialize};
#[cfg(feature = "sqlite")]
use std::path::Path;
use std::sync::Mutex;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use thiserror::Error;
use tracing::{debug, error, info, warn};

/// Chain pointer of the first record in the log.
pub const GENESIS_HASH: [u8; 32] = [0u8; 32];

/// Event recorded against a device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LedgerEvent {
    /// Device enters the registry under the given name.
    Register { name: String },
    /// Signed adjustment to the device's reputation score.
    ReputationDelta { delta: f64 },
    /// Tombstone. The device is soft-retired, never physically deleted.
    Retire,
}

impl LedgerEvent {
    /// Stable kind tag, used for indexing and log output.
    pub fn kind(&self) -> &'static str {
        match self {
            LedgerEvent::Register { .. } => "register",
            LedgerEvent::ReputationDelta { .. } => "reputation_delta",
            LedgerEvent::Retire => "retire",
        }
    }
}

/// An immutable, committed ledger record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerRecord {
    /// Gap-free global sequence number, assigned at commit
    pub sequence: u64,
    /// Device the record belongs to
    pub device_id: String,
    /// Recorded event
    pub event: LedgerEvent,
    /// BLAKE3 content address of this record
    pub record_hash: Vec<u8>,
    /// Hash of the previous record in the log
    pub prev_record_hash: Vec<u8>,
    /// Record creation timestamp (Unix milliseconds)
    pub timestamp: u64,
}

/// Ledger health status
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LedgerHealth {
    /// Ledger is healthy
    Ok,
    /// Ledger is corrupted
    Corrupted {
        /// Last good sequence number
        last_good_sequence: Option<u64>,
        /// First failing sequence number
        first_bad_sequence: u64,
        /// Error type description
        error_type: String,
    },
}

impl LedgerHealth {
    /// Check if the ledger is healthy
    pub fn is_ok(&self) -> bool {
        matches!(self, LedgerHealth::Ok)
    }
}

/// Ledger health information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerHealthInfo {
    /// Health status
    pub status: LedgerHealth,
    /// Node identifier
    pub node_id: String,
}

/// Errors that can occur in ledger operations
#[derive(Debug, Error)]
pub enum LedgerError {
    #[cfg(feature = "sqlite")]
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Head conflict for {device_id}: expected {expected:?}, actual {actual:?}")]
    HeadConflict {
        device_id: String,
        expected: Option<u64>,
        actual: Option<u64>,
    },

    #[error("Ledger corrupted: {0}")]
    CorruptionDetected(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid record: {0}")]
    InvalidRecord(String),
}

pub type Result<T> = std::result::Result<T, LedgerError>;

impl From<LedgerError> for crate::error::RegistryError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::HeadConflict {
                device_id,
                expected,
                actual,
            } => crate::error::RegistryError::Conflict {
                device_id,
                expected,
                actual,
            },
            #[cfg(feature = "sqlite")]
            LedgerError::Database(rusqlite::Error::SqliteFailure(code, _))
                if matches!(
                    code.code,
                    rusqlite::ErrorCode::DatabaseBusy | rusqlite::ErrorCode::DatabaseLocked
                ) =>
            {
                crate::error::RegistryError::Timeout {
                    operation: "ledger append".to_string(),
                }
            }
            LedgerError::IoError(e) => crate::error::RegistryError::Io(e),
            other => crate::error::RegistryError::Storage(other.to_string()),
        }
    }
}

/// Observability metrics for the ledger
#[derive(Debug, Default, Clone)]
pub struct LedgerMetrics {
    /// Total records appended to the ledger
    pub records_appended_total: u64,
    /// Total head-conflict rejections
    pub head_conflicts_total: u64,
    /// Total startup checks performed
    pub startup_checks_total: u64,
    /// Total corruption detections
    pub corruption_detections_total: u64,
}

/// Append-only record store.
///
/// The ledger exclusively owns the record sequence; registry and monitor
/// components hold only derived, reconstructible views. Implementations are
/// pluggable rather than tied to a vendor SDK: the workspace ships a
/// SQLite-backed store and an in-memory store.
///
/// `read_range` is `from`-inclusive, `to`-exclusive. `expected_head` is the
/// caller's view of the device's latest sequence (`None` for a device with
/// no records); a mismatch fails with `HeadConflict` and the caller must
/// re-read before retrying.
pub trait LedgerStore: Send + Sync {
    /// Append an event for a device, enforcing the per-device
    /// compare-and-swap on `expected_head`. Returns the committed record.
    fn append(
        &self,
        device_id: &str,
        event: LedgerEvent,
        expected_head: Option<u64>,
    ) -> Result<LedgerRecord>;

    /// Ordered records with `from <= sequence < to`.
    fn read_range(&self, from: u64, to: u64) -> Result<Vec<LedgerRecord>>;

    /// Ordered records for a single device.
    fn read_device(&self, device_id: &str) -> Result<Vec<LedgerRecord>>;

    /// Highest committed sequence number, 0 for an empty ledger.
    fn latest_sequence(&self) -> Result<u64>;

    /// Latest sequence for a device, `None` if the device has no records.
    fn device_head(&self, device_id: &str) -> Result<Option<u64>>;

    /// Current health of the store.
    fn health(&self) -> LedgerHealthInfo;
}

fn compute_record_hash(
    sequence: u64,
    device_id: &str,
    event_json: &str,
    prev_record_hash: &[u8],
    timestamp: u64,
) -> Vec<u8> {
    let mut hasher = blake3::Hasher::new();
    hasher.update(&sequence.to_le_bytes());
    hasher.update(device_id.as_bytes());
    hasher.update(event_json.as_bytes());
    hasher.update(prev_record_hash);
    hasher.update(&timestamp.to_le_bytes());
    hasher.finalize().as_bytes().to_vec()
}

fn encode_event(event: &LedgerEvent) -> Result<String> {
    serde_json::to_string(event).map_err(|e| LedgerError::InvalidRecord(e.to_string()))
}

fn decode_event(event_json: &str) -> Result<LedgerEvent> {
    serde_json::from_str(event_json).map_err(|e| LedgerError::InvalidRecord(e.to_string()))
}

fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or(Duration::ZERO)
        .as_millis() as u64
}

/// Ledger store with SQLite backend
#[cfg(feature = "sqlite")]
#[derive(Debug)]
pub struct SqliteLedger {
    conn: Mutex<Connection>,
    node_id: String,
    health: Mutex<LedgerHealth>,
    metrics: Mutex<LedgerMetrics>,
}

#[cfg(feature = "sqlite")]
impl SqliteLedger {
    /// Create or open a ledger at the specified path.
    ///
    /// # Arguments
    /// * `path` - Path to the SQLite database file
    /// * `node_id` - Unique identifier for this node
    /// * `busy_timeout` - Bound on how long an append may wait on a busy
    ///   database before failing with a retryable error
    ///
    /// # Returns
    /// * `Ok(SqliteLedger)` - Successfully opened ledger
    /// * `Err(LedgerError)` - Failed to open, or corruption was detected
    pub fn open(
        path: impl AsRef<Path>,
        node_id: impl Into<String>,
        busy_timeout: Duration,
    ) -> Result<Self> {
        let node_id = node_id.into();
        let path = path.as_ref();

        info!(
            node_id = %node_id,
            path = %path.display(),
            "Opening device ledger"
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;

        // WAL mode for better concurrency and durability
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        conn.busy_timeout(busy_timeout)?;

        Self::init_schema(&conn)?;

        let ledger = Self {
            conn: Mutex::new(conn),
            node_id,
            health: Mutex::new(LedgerHealth::Ok),
            metrics: Mutex::new(LedgerMetrics::default()),
        };

        ledger.startup_continuity_check()?;

        Ok(ledger)
    }

    fn init_schema(conn: &Connection) -> Result<()> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS ledger_records (
                sequence INTEGER PRIMARY KEY,
                device_id TEXT NOT NULL,
                event_kind TEXT NOT NULL,
                event_json TEXT NOT NULL,
                record_hash BLOB NOT NULL,
                prev_record_hash BLOB NOT NULL,
                timestamp INTEGER NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_device_id ON ledger_records(device_id);
            CREATE INDEX IF NOT EXISTS idx_timestamp ON ledger_records(timestamp);
            "#,
        )?;

        Ok(())
    }

    /// Perform startup continuity check.
    ///
    /// Verifies:
    /// - Sequence numbers are gap-free and strictly increasing by 1
    /// - Chain continuity (prev_record_hash matches)
    /// - Stored record hashes match their recomputed content address
    ///
    /// # Returns
    /// * `Ok(())` - Ledger is valid
    /// * `Err(LedgerError)` - Corruption detected
    pub fn startup_continuity_check(&self) -> Result<()> {
        self.metrics.lock().unwrap().startup_checks_total += 1;

        info!(node_id = %self.node_id, "Starting ledger continuity check");

        let records = self.read_all_raw()?;

        if records.is_empty() {
            info!(node_id = %self.node_id, "Ledger is empty, continuity check passed");
            return Ok(());
        }

        let mut expected_sequence = 1u64;
        let mut prev_record_hash = GENESIS_HASH.to_vec();

        for (i, raw) in records.iter().enumerate() {
            let (sequence, device_id, event_json, record_hash, stored_prev, timestamp) = raw;

            if *sequence != expected_sequence {
                let error_type = if *sequence < expected_sequence {
                    format!("Duplicated sequence number: {}", sequence)
                } else {
                    format!(
                        "Missing records: gap between {} and {}",
                        expected_sequence - 1,
                        sequence
                    )
                };
                return Err(self.mark_corrupted(&records, i, *sequence, error_type));
            }

            if *stored_prev != prev_record_hash {
                let error_type = format!(
                    "Chain break at sequence {}: expected prev hash {}, got {}",
                    sequence,
                    hex::encode(&prev_record_hash),
                    hex::encode(stored_prev)
                );
                return Err(self.mark_corrupted(&records, i, *sequence, error_type));
            }

            let recomputed =
                compute_record_hash(*sequence, device_id, event_json, stored_prev, *timestamp);
            if recomputed != *record_hash {
                let error_type = format!(
                    "Content address mismatch at sequence {}: stored {}, recomputed {}",
                    sequence,
                    hex::encode(record_hash),
                    hex::encode(&recomputed)
                );
                return Err(self.mark_corrupted(&records, i, *sequence, error_type));
            }

            prev_record_hash = record_hash.clone();
            expected_sequence += 1;
        }

        info!(
            node_id = %self.node_id,
            record_count = records.len(),
            "Ledger continuity check passed"
        );

        Ok(())
    }

    #[allow(clippy::type_complexity)]
    fn read_all_raw(&self) -> Result<Vec<(u64, String, String, Vec<u8>, Vec<u8>, u64)>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            r#"
            SELECT sequence, device_id, event_json, record_hash, prev_record_hash, timestamp
            FROM ledger_records
            ORDER BY sequence ASC
            "#,
        )?;

        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, i64>(0)? as u64,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, Vec<u8>>(3)?,
                    row.get::<_, Vec<u8>>(4)?,
                    row.get::<_, i64>(5)? as u64,
                ))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(rows)
    }

    fn mark_corrupted(
        &self,
        records: &[(u64, String, String, Vec<u8>, Vec<u8>, u64)],
        index: usize,
        sequence: u64,
        error_type: String,
    ) -> LedgerError {
        *self.health.lock().unwrap() = LedgerHealth::Corrupted {
            last_good_sequence: if index > 0 {
                Some(records[index - 1].0)
            } else {
                None
            },
            first_bad_sequence: sequence,
            error_type: error_type.clone(),
        };

        self.metrics.lock().unwrap().corruption_detections_total += 1;

        error!(
            node_id = %self.node_id,
            sequence = sequence,
            error_type = %error_type,
            "Ledger corruption detected"
        );

        LedgerError::CorruptionDetected(error_type)
    }

    /// Get ledger metrics
    pub fn metrics(&self) -> LedgerMetrics {
        self.metrics.lock().unwrap().clone()
    }

    /// Get the node ID
    pub fn node_id(&self) -> &str {
        &self.node_id
    }

    /// Execute raw SQL for testing purposes only.
    ///
    /// **WARNING**: This bypasses ledger integrity checks and should ONLY be
    /// used in tests to simulate corruption scenarios.
    #[doc(hidden)]
    pub fn __test_execute_raw_sql(
        &self,
        sql: &str,
        params: &[&dyn rusqlite::ToSql],
    ) -> Result<usize> {
        Ok(self.conn.lock().unwrap().execute(sql, params)?)
    }
}

#[cfg(feature = "sqlite")]
impl LedgerStore for SqliteLedger {
    fn append(
        &self,
        device_id: &str,
        event: LedgerEvent,
        expected_head: Option<u64>,
    ) -> Result<LedgerRecord> {
        if !self.health.lock().unwrap().is_ok() {
            warn!(
                node_id = %self.node_id,
                device_id = %device_id,
                "Attempted to append to corrupted ledger"
            );
            return Err(LedgerError::CorruptionDetected(
                "Cannot append to corrupted ledger".to_string(),
            ));
        }

        if device_id.is_empty() {
            return Err(LedgerError::InvalidRecord(
                "device_id cannot be empty".to_string(),
            ));
        }

        let event_json = encode_event(&event)?;

        let mut conn = self.conn.lock().unwrap();
        let tx = conn.transaction()?;

        // Per-device compare-and-swap
        let actual_head: Option<u64> = tx
            .query_row(
                "SELECT MAX(sequence) FROM ledger_records WHERE device_id = ?1",
                [device_id],
                |row| row.get::<_, Option<i64>>(0),
            )?
            .map(|seq| seq as u64);

        if actual_head != expected_head {
            drop(tx);
            self.metrics.lock().unwrap().head_conflicts_total += 1;
            debug!(
                node_id = %self.node_id,
                device_id = %device_id,
                expected = ?expected_head,
                actual = ?actual_head,
                "Append rejected: stale device head"
            );
            return Err(LedgerError::HeadConflict {
                device_id: device_id.to_string(),
                expected: expected_head,
                actual: actual_head,
            });
        }

        // Global sequence and chain pointer assigned inside the commit
        let (latest_sequence, prev_record_hash): (u64, Vec<u8>) = tx
            .query_row(
                r#"
                SELECT sequence, record_hash
                FROM ledger_records
                ORDER BY sequence DESC
                LIMIT 1
                "#,
                [],
                |row| Ok((row.get::<_, i64>(0)? as u64, row.get::<_, Vec<u8>>(1)?)),
            )
            .optional()?
            .unwrap_or((0, GENESIS_HASH.to_vec()));

        let sequence = latest_sequence + 1;
        let timestamp = current_timestamp_ms();
        let record_hash =
            compute_record_hash(sequence, device_id, &event_json, &prev_record_hash, timestamp);

        tx.execute(
            r#"
            INSERT INTO ledger_records (
                sequence, device_id, event_kind, event_json,
                record_hash, prev_record_hash, timestamp
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                sequence as i64,
                device_id,
                event.kind(),
                event_json,
                record_hash,
                prev_record_hash,
                timestamp as i64,
            ],
        )?;

        tx.commit()?;

        self.metrics.lock().unwrap().records_appended_total += 1;

        debug!(
            node_id = %self.node_id,
            sequence = sequence,
            device_id = %device_id,
            event_kind = event.kind(),
            "Record appended to ledger"
        );

        Ok(LedgerRecord {
            sequence,
            device_id: device_id.to_string(),
            event,
            record_hash,
            prev_record_hash,
            timestamp,
        })
    }

    fn read_range(&self, from: u64, to: u64) -> Result<Vec<LedgerRecord>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            r#"
            SELECT sequence, device_id, event_json, record_hash, prev_record_hash, timestamp
            FROM ledger_records
            WHERE sequence >= ?1 AND sequence < ?2
            ORDER BY sequence ASC
            "#,
        )?;

        let rows = stmt
            .query_map(params![from as i64, to as i64], |row| {
                Ok((
                    row.get::<_, i64>(0)? as u64,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, Vec<u8>>(3)?,
                    row.get::<_, Vec<u8>>(4)?,
                    row.get::<_, i64>(5)? as u64,
                ))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        drop(stmt);
        drop(conn);

        rows.into_iter()
            .map(|(sequence, device_id, event_json, record_hash, prev_record_hash, timestamp)| {
                Ok(LedgerRecord {
                    sequence,
                    device_id,
                    event: decode_event(&event_json)?,
                    record_hash,
                    prev_record_hash,
                    timestamp,
                })
            })
            .collect()
    }

    fn read_device(&self, device_id: &str) -> Result<Vec<LedgerRecord>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            r#"
            SELECT sequence, device_id, event_json, record_hash, prev_record_hash, timestamp
            FROM ledger_records
            WHERE device_id = ?1
            ORDER BY sequence ASC
            "#,
        )?;

        let rows = stmt
            .query_map([device_id], |row| {
                Ok((
                    row.get::<_, i64>(0)? as u64,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, Vec<u8>>(3)?,
                    row.get::<_, Vec<u8>>(4)?,
                    row.get::<_, i64>(5)? as u64,
                ))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        drop(stmt);
        drop(conn);

        rows.into_iter()
            .map(|(sequence, device_id, event_json, record_hash, prev_record_hash, timestamp)| {
                Ok(LedgerRecord {
                    sequence,
                    device_id,
                    event: decode_event(&event_json)?,
                    record_hash,
                    prev_record_hash,
                    timestamp,
                })
            })
            .collect()
    }

    fn latest_sequence(&self) -> Result<u64> {
        let conn = self.conn.lock().unwrap();
        let latest: Option<i64> = conn.query_row(
            "SELECT MAX(sequence) FROM ledger_records",
            [],
            |row| row.get(0),
        )?;
        Ok(latest.unwrap_or(0) as u64)
    }

    fn device_head(&self, device_id: &str) -> Result<Option<u64>> {
        let conn = self.conn.lock().unwrap();
        let head: Option<i64> = conn.query_row(
            "SELECT MAX(sequence) FROM ledger_records WHERE device_id = ?1",
            [device_id],
            |row| row.get(0),
        )?;
        Ok(head.map(|seq| seq as u64))
    }

    fn health(&self) -> LedgerHealthInfo {
        LedgerHealthInfo {
            status: self.health.lock().unwrap().clone(),
            node_id: self.node_id.clone(),
        }
    }
}

/// In-memory ledger store.
///
/// Enforces the same sequencing, chain and optimistic-concurrency invariants
/// as the SQLite store, without durability. Used by unit tests and the
/// gateway's ephemeral mode.
pub struct MemoryLedger {
    node_id: String,
    records: Mutex<Vec<LedgerRecord>>,
}

impl MemoryLedger {
    pub fn new(node_id: impl Into<String>) -> Self {
        Self {
            node_id: node_id.into(),
            records: Mutex::new(Vec::new()),
        }
    }

    pub fn node_id(&self) -> &str {
        &self.node_id
    }
}

impl LedgerStore for MemoryLedger {
    fn append(
        &self,
        device_id: &str,
        event: LedgerEvent,
        expected_head: Option<u64>,
    ) -> Result<LedgerRecord> {
        if device_id.is_empty() {
            return Err(LedgerError::InvalidRecord(
                "device_id cannot be empty".to_string(),
            ));
        }

        let event_json = encode_event(&event)?;

        let mut records = self.records.lock().unwrap();

        let actual_head = records
            .iter()
            .rev()
            .find(|r| r.device_id == device_id)
            .map(|r| r.sequence);

        if actual_head != expected_head {
            return Err(LedgerError::HeadConflict {
                device_id: device_id.to_string(),
                expected: expected_head,
                actual: actual_head,
            });
        }

        let (sequence, prev_record_hash) = match records.last() {
            Some(last) => (last.sequence + 1, last.record_hash.clone()),
            None => (1, GENESIS_HASH.to_vec()),
        };

        let timestamp = current_timestamp_ms();
        let record_hash =
            compute_record_hash(sequence, device_id, &event_json, &prev_record_hash, timestamp);

        let record = LedgerRecord {
            sequence,
            device_id: device_id.to_string(),
            event,
            record_hash,
            prev_record_hash,
            timestamp,
        };

        records.push(record.clone());
        Ok(record)
    }

    fn read_range(&self, from: u64, to: u64) -> Result<Vec<LedgerRecord>> {
        let records = self.records.lock().unwrap();
        Ok(records
            .iter()
            .filter(|r| r.sequence >= from && r.sequence < to)
            .cloned()
            .collect())
    }

    fn read_device(&self, device_id: &str) -> Result<Vec<LedgerRecord>> {
        let records = self.records.lock().unwrap();
        Ok(records
            .iter()
            .filter(|r| r.device_id == device_id)
            .cloned()
            .collect())
    }

    fn latest_sequence(&self) -> Result<u64> {
        let records = self.records.lock().unwrap();
        Ok(records.last().map(|r| r.sequence).unwrap_or(0))
    }

    fn device_head(&self, device_id: &str) -> Result<Option<u64>> {
        let records = self.records.lock().unwrap();
        Ok(records
            .iter()
            .rev()
            .find(|r| r.device_id == device_id)
            .map(|r| r.sequence))
    }

    fn health(&self) -> LedgerHealthInfo {
        LedgerHealthInfo {
            status: LedgerHealth::Ok,
            node_id: self.node_id.clone(),
        }
    }
}
