//! Crash recovery orchestration
//!
//! Rebuilds the in-memory store from the log and hands the restored
//! sequence counter to a resumed writer. Runs once at startup, single
//! threaded, before any client traffic exists: the phases
//! (scan → replay → resume) complete inside [`RecoveryManager::recover`],
//! and the only state in which reads and writes are possible is holding
//! the [`RecoveredState`] it returns.
//!
//! A truncated or corrupted tail is the expected shape of a crash and is
//! logged at WARN, then physically truncated. Structurally valid records
//! with nonsensical contents are a different animal: replay refuses to
//! produce an ambiguous store and fails fatally instead.

use std::path::Path;

use crate::config::WalSyncStrategy;
use crate::error::{RecoveryError, Result};
use crate::store::KeyValueStore;
use crate::wal::{LogTail, Operation, SequenceCounter, WalReader, WalRecord, WalWriter};

/// Result of a recovery or verification pass
#[derive(Debug, Clone)]
pub struct RecoveryReport {
    /// Number of valid records replayed (or counted, for verify)
    pub records_applied: u64,

    /// Number of corrupted records detected at the tail
    pub records_discarded: u64,

    /// Highest sequence seen in a valid record, `None` for an empty log
    pub last_sequence: Option<u64>,

    /// Whether a crash tail was found (and, for recover, truncated)
    pub was_truncated: bool,
}

/// Everything a process needs after startup recovery
pub struct RecoveredState {
    /// Store populated by replay
    pub store: KeyValueStore,

    /// Writer resumed after the valid prefix, counter restored
    pub writer: WalWriter,

    /// What recovery found
    pub report: RecoveryReport,
}

/// Orchestrates startup: scan, replay, counter hand-off
///
/// Kept separate from the WAL itself so replay is testable against a bare
/// store; the WAL module stays mechanism, this is policy.
pub struct RecoveryManager;

impl RecoveryManager {
    /// Recover store and writer from the log at `path`
    ///
    /// 1. Scan the log, collecting valid records and classifying the tail
    /// 2. Replay records in sequence order (last writer wins per key)
    /// 3. Initialize the sequence counter to `last + 1` (0 for empty)
    /// 4. Resume the writer after the valid prefix, truncating the tail
    ///
    /// A missing log file is created. Tail damage is WARN-logged, not an
    /// error. Semantically invalid records fail with
    /// [`RecoveryError::Fatal`] and the engine must not come up.
    pub fn recover(
        path: &Path,
        sync_strategy: WalSyncStrategy,
    ) -> Result<RecoveredState, RecoveryError> {
        let scan = WalReader::scan(path)?;
        let report = Self::report_scan(path, &scan.records, &scan.tail);

        let store = KeyValueStore::new();
        let mut previous: Option<u64> = None;

        for record in &scan.records {
            Self::validate_record(record, previous)?;

            match &record.operation {
                Operation::Put { key, value } => {
                    store.put(key.clone(), value.clone());
                }
                Operation::Delete { key } => {
                    store.delete(key);
                }
            }

            previous = Some(record.sequence);
        }

        let counter = SequenceCounter::resume_after(scan.last_sequence());
        let writer = WalWriter::resume(path, sync_strategy, counter, scan.valid_len)?;

        tracing::info!(
            records_applied = report.records_applied,
            last_sequence = ?report.last_sequence,
            keys = store.len(),
            "recovery complete"
        );

        Ok(RecoveredState {
            store,
            writer,
            report,
        })
    }

    /// Verify integrity of a log without replaying or modifying it
    ///
    /// Same scan as [`recover`](Self::recover), stats only; the crash
    /// tail, if any, is left in place.
    pub fn verify(path: &Path) -> Result<RecoveryReport, RecoveryError> {
        let scan = WalReader::scan(path)?;
        Ok(Self::report_scan(path, &scan.records, &scan.tail))
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    /// Build the report and WARN about any crash tail
    fn report_scan(path: &Path, records: &[WalRecord], tail: &LogTail) -> RecoveryReport {
        let records_discarded = match tail {
            LogTail::Clean => 0,
            LogTail::Incomplete { offset, .. } => {
                tracing::warn!(
                    path = %path.display(),
                    offset = *offset,
                    "discarding incomplete record at log tail"
                );
                0
            }
            LogTail::Corrupted { offset, error } => {
                tracing::warn!(
                    path = %path.display(),
                    offset = *offset,
                    %error,
                    "discarding corrupted log tail"
                );
                1
            }
        };

        RecoveryReport {
            records_applied: records.len() as u64,
            records_discarded,
            last_sequence: SequenceCounter::recover_last_sequence(records),
            was_truncated: !matches!(tail, LogTail::Clean),
        }
    }

    /// Reject structurally valid records whose contents make replay ambiguous
    ///
    /// The codec already vouched for the frame; what is checked here can
    /// only arise from a writer bug or offline tampering, never from a
    /// crash, so it is fatal rather than truncatable.
    fn validate_record(record: &WalRecord, previous: Option<u64>) -> Result<(), RecoveryError> {
        if record.operation.key().is_empty() {
            return Err(RecoveryError::Fatal(format!(
                "record {} has an empty key",
                record.sequence
            )));
        }

        if let Some(prev) = previous {
            if record.sequence <= prev {
                return Err(RecoveryError::Fatal(format!(
                    "sequence {} follows {} out of order",
                    record.sequence, prev
                )));
            }
        }

        Ok(())
    }
}
