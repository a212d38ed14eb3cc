//! WAL Reader / recovery scanner
//!
//! Forward, ordered reading of a persisted log. The scanner decodes
//! records until the first failure; everything from the failing offset to
//! end-of-file is the crash tail and is reported, never silently dropped.
//!
//! The whole file is buffered in memory for the scan. The store this log
//! rebuilds is in-memory, so the log a single process can accumulate is
//! bounded by memory by construction.

use std::fs;
use std::path::Path;

use crate::error::{DecodeError, Result, WalError};

use super::record::{check_file_header, encode_file_header, LOG_HEADER_SIZE};
use super::{SequenceCounter, WalRecord};

/// Reads records from a WAL file
pub struct WalReader {
    /// Entire file contents
    buf: Vec<u8>,

    /// Byte offset of the next undecoded frame
    position: usize,
}

impl WalReader {
    /// Open a WAL file for reading
    ///
    /// A zero-length file is a valid empty log. A file shorter than the
    /// fixed header is accepted only if its bytes are a prefix of the
    /// expected header (a crash during creation); anything else fails with
    /// `InvalidHeader` rather than being mistaken for an empty log.
    pub fn open(path: &Path) -> Result<Self> {
        let buf = fs::read(path)?;

        if buf.len() >= LOG_HEADER_SIZE {
            check_file_header(&buf)?;
        } else if !buf.is_empty() {
            let expected = encode_file_header();
            if buf[..] != expected[..buf.len()] {
                return Err(WalError::InvalidHeader(format!(
                    "unrecognized {}-byte file",
                    buf.len()
                )));
            }
        }

        let position = buf.len().min(LOG_HEADER_SIZE);
        Ok(Self { buf, position })
    }

    /// Decode the next record, advancing past it on success
    ///
    /// Returns `Ok(None)` at a clean end of log. A partially written
    /// header (including a partially written *file* header) surfaces as
    /// `DecodeError::Incomplete`; the reader does not advance past a
    /// failing frame.
    pub fn next_record(&mut self) -> Result<Option<WalRecord>, DecodeError> {
        if self.buf.len() < LOG_HEADER_SIZE {
            if self.buf.is_empty() {
                return Ok(None);
            }
            return Err(DecodeError::Incomplete {
                needed: LOG_HEADER_SIZE,
                available: self.buf.len(),
            });
        }

        if self.position >= self.buf.len() {
            return Ok(None);
        }

        let (record, consumed) = WalRecord::decode(&self.buf[self.position..])?;
        self.position += consumed;
        Ok(Some(record))
    }

    /// Byte offset of the next undecoded frame
    pub fn position(&self) -> u64 {
        self.position as u64
    }

    /// Iterate over records until end of log or the first failure
    pub fn records(self) -> RecordIter {
        RecordIter {
            reader: self,
            done: false,
        }
    }

    /// Scan a log from the start, collecting every valid record and
    /// classifying the tail
    ///
    /// A missing file scans as an empty log. Decode failures terminate the
    /// scan but are not errors — they become the [`LogTail`]; only an
    /// unreadable or foreign file is an `Err`.
    pub fn scan(path: &Path) -> Result<ScanResult> {
        if !path.exists() {
            return Ok(ScanResult {
                records: Vec::new(),
                tail: LogTail::Clean,
                valid_len: 0,
            });
        }

        let mut reader = Self::open(path)?;

        // A partially written file header: the valid prefix is empty and
        // the whole file is the crash tail.
        if !reader.buf.is_empty() && reader.buf.len() < LOG_HEADER_SIZE {
            return Ok(ScanResult {
                records: Vec::new(),
                tail: LogTail::Incomplete {
                    offset: 0,
                    error: DecodeError::Incomplete {
                        needed: LOG_HEADER_SIZE,
                        available: reader.buf.len(),
                    },
                },
                valid_len: 0,
            });
        }

        let mut records = Vec::new();
        let mut valid_len = reader.position();

        let tail = loop {
            match reader.next_record() {
                Ok(Some(record)) => {
                    records.push(record);
                    valid_len = reader.position();
                }
                Ok(None) => break LogTail::Clean,
                Err(error @ DecodeError::Incomplete { .. }) => {
                    break LogTail::Incomplete {
                        offset: reader.position(),
                        error,
                    }
                }
                Err(error) => {
                    break LogTail::Corrupted {
                        offset: reader.position(),
                        error,
                    }
                }
            }
        };

        Ok(ScanResult {
            records,
            tail,
            valid_len,
        })
    }
}

/// Iterator over WAL records
///
/// Stops silently at a clean end of log or an incomplete tail; yields the
/// error once for a corrupted frame, then ends.
pub struct RecordIter {
    reader: WalReader,
    done: bool,
}

impl Iterator for RecordIter {
    type Item = Result<WalRecord, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.reader.next_record() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(DecodeError::Incomplete { .. }) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

// =============================================================================
// Scan Result
// =============================================================================

/// Outcome of a full forward scan
#[derive(Debug)]
pub struct ScanResult {
    /// Every structurally valid record, in on-disk order
    pub records: Vec<WalRecord>,

    /// Disposition of the bytes after the last valid record
    pub tail: LogTail,

    /// Byte length of the valid prefix (file header plus intact records);
    /// everything past this offset is the crash tail
    pub valid_len: u64,
}

impl ScanResult {
    /// Highest sequence among the valid records, or `None` if the log is empty
    pub fn last_sequence(&self) -> Option<u64> {
        SequenceCounter::recover_last_sequence(&self.records)
    }

    /// Whether the scan hit a tail that must be discarded
    pub fn is_truncated(&self) -> bool {
        !matches!(self.tail, LogTail::Clean)
    }
}

/// Classification of a log's trailing bytes
///
/// `Incomplete` and `Corrupted` trigger the same truncation but are kept
/// distinct: the former is the expected shape of a crash mid-write, the
/// latter means bits changed under us.
#[derive(Debug)]
pub enum LogTail {
    /// The log ends exactly at a record boundary
    Clean,

    /// The final frame claims more bytes than the file holds
    Incomplete { offset: u64, error: DecodeError },

    /// The final frame fails its checksum or does not parse
    Corrupted { offset: u64, error: DecodeError },
}
