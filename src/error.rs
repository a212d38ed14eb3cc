//! Error types for LedgerKV
//!
//! Three error families, matching how callers handle them:
//! - [`DecodeError`] — codec-level failures seen while scanning the log
//! - [`WalError`] — append-path failures surfaced to writers
//! - [`RecoveryError`] — startup failures; `Fatal` means the engine must
//!   not come up

use thiserror::Error;

/// Result type alias; defaults to [`WalError`] for the write path
pub type Result<T, E = WalError> = std::result::Result<T, E>;

/// Failures while decoding a single record from the log
///
/// `Incomplete` is the expected end-of-valid-data marker after a crash
/// mid-write. `ChecksumMismatch` and `Malformed` indicate corruption. All
/// three truncate the scan at the failing offset; they are distinguished
/// for diagnostics.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("incomplete record: need {needed} bytes, have {available}")]
    Incomplete { needed: usize, available: usize },

    #[error("checksum mismatch: stored {stored:#010x}, computed {computed:#010x}")]
    ChecksumMismatch { stored: u32, computed: u32 },

    #[error("malformed record: {0}")]
    Malformed(String),
}

/// Failures on the write path (append + flush) and when opening a log
#[derive(Debug, Error)]
pub enum WalError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("empty keys are not allowed")]
    EmptyKey,

    #[error("invalid log header: {0}")]
    InvalidHeader(String),
}

/// Failures during startup recovery
///
/// A corrupted tail is *not* an error (it is logged and truncated);
/// `Fatal` is reserved for internal inconsistencies that make the
/// replayed state ambiguous.
#[derive(Debug, Error)]
pub enum RecoveryError {
    #[error("IO error during recovery: {0}")]
    Io(#[from] std::io::Error),

    #[error("WAL error during recovery: {0}")]
    Wal(#[from] WalError),

    #[error("fatal replay inconsistency: {0}")]
    Fatal(String),
}
