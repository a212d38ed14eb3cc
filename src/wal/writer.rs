//! WAL Writer
//!
//! Appends records to the log and owns the durability boundary: with the
//! default sync strategy, `append` does not return until the bytes are
//! flushed to disk.
//!
//! The writer exclusively owns the append cursor and the sequence
//! counter. Concurrent callers must serialize through an external lock
//! (the engine wraps the writer in a mutex); under that lock, sequence
//! assignment order, on-disk order, and acknowledgement order coincide.

use std::fs::{File, OpenOptions};
use std::io::{Seek, SeekFrom, Write};
use std::path::Path;

use crate::config::WalSyncStrategy;
use crate::error::{Result, WalError};

use super::record::encode_file_header;
use super::reader::WalReader;
use super::{Operation, SequenceCounter, WalRecord};

/// Appends records to the WAL file
pub struct WalWriter {
    file: File,
    counter: SequenceCounter,
    sync_strategy: WalSyncStrategy,
    uncommitted: usize,
}

impl WalWriter {
    /// Open or create a WAL file, scanning any existing content to
    /// restore the sequence counter
    ///
    /// Convenience for standalone use; recovery goes through
    /// [`resume`](Self::resume) with the scan it already performed.
    pub fn open(path: &Path, sync_strategy: WalSyncStrategy) -> Result<Self> {
        let scan = WalReader::scan(path)?;
        let counter = SequenceCounter::resume_after(scan.last_sequence());
        Self::resume(path, sync_strategy, counter, scan.valid_len)
    }

    /// Resume appending to a log whose valid prefix is already known
    ///
    /// Truncates everything past `valid_len` — the crash tail a scan
    /// classified — so new records land directly after the last valid one.
    /// With `valid_len` 0 the file is recreated with a fresh header.
    pub fn resume(
        path: &Path,
        sync_strategy: WalSyncStrategy,
        counter: SequenceCounter,
        valid_len: u64,
    ) -> Result<Self> {
        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .open(path)?;

        let file_len = file.metadata()?.len();

        if valid_len == 0 {
            file.set_len(0)?;
            file.write_all(&encode_file_header())?;
            file.sync_all()?;
        } else {
            if file_len > valid_len {
                file.set_len(valid_len)?;
                file.sync_all()?;
            }
            file.seek(SeekFrom::End(0))?;
        }

        Ok(Self {
            file,
            counter,
            sync_strategy,
            uncommitted: 0,
        })
    }

    /// Append an operation to the log
    ///
    /// Assigns the next sequence number, writes the encoded record, and
    /// flushes per the sync strategy. Returns the assigned sequence on
    /// success. On failure the sequence number is consumed but no record
    /// materializes at it — the caller must not apply the corresponding
    /// store mutation.
    pub fn append(&mut self, operation: Operation) -> Result<u64> {
        if operation.key().is_empty() {
            return Err(WalError::EmptyKey);
        }

        let sequence = self.counter.next();
        let record = WalRecord::new(sequence, operation);
        let frame = record.encode()?;

        self.file.write_all(&frame)?;
        self.uncommitted += 1;

        match self.sync_strategy {
            WalSyncStrategy::EveryWrite => self.sync()?,
            WalSyncStrategy::EveryNEntries { count } => {
                if self.uncommitted >= count {
                    self.sync()?;
                }
            }
        }

        Ok(sequence)
    }

    /// Force a flush of all written records to disk
    pub fn sync(&mut self) -> Result<()> {
        self.file.sync_all()?;
        self.uncommitted = 0;
        Ok(())
    }

    /// The sequence number the next append will be assigned
    pub fn next_sequence(&self) -> u64 {
        self.counter.peek()
    }

    /// Appends written since the last sync
    pub fn uncommitted_count(&self) -> usize {
        self.uncommitted
    }
}
