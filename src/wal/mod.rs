//! Write-Ahead Log (WAL) Module
//!
//! Provides durability guarantees through append-only logging.
//!
//! ## Responsibilities
//! - Append log records before any store mutation
//! - CRC32 checksums for corruption detection
//! - Monotonic sequence numbers for ordering, surviving restarts
//! - Forward scanning with crash-tail classification
//!
//! ## File Format
//! ```text
//! ┌─────────────────────────────────────────┐
//! │ Header: Magic (4) │ Version (2) │ Rsvd  │
//! ├─────────────────────────────────────────┤
//! │ Record 1                                │
//! │ ┌─────────┬─────────┬────────┬────────┐ │
//! │ │ Seq (8) │ CRC (4) │Len (4) │ Data   │ │
//! │ └─────────┴─────────┴────────┴────────┘ │
//! ├─────────────────────────────────────────┤
//! │ Record 2                                │
//! │ ┌─────────┬─────────┬────────┬────────┐ │
//! │ │ Seq (8) │ CRC (4) │Len (4) │ Data   │ │
//! │ └─────────┴─────────┴────────┴────────┘ │
//! └─────────────────────────────────────────┘
//! ```

mod record;
mod reader;
mod sequence;
mod writer;

pub use reader::{LogTail, RecordIter, ScanResult, WalReader};
pub use record::{
    Operation, WalRecord, LOG_HEADER_SIZE, LOG_MAGIC, LOG_VERSION, MAX_PAYLOAD_SIZE,
    RECORD_HEADER_SIZE,
};
pub use sequence::SequenceCounter;
pub use writer::WalWriter;
