//! WAL record definitions and binary codec
//!
//! Defines the structure of individual log records and their on-disk
//! encoding. Encoding and decoding are pure transformations; file I/O
//! lives in the writer and reader.

use bytes::{Buf, BufMut, Bytes, BytesMut};
use serde::{Deserialize, Serialize};

use crate::error::{DecodeError, Result, WalError};

// =============================================================================
// Format Constants
// =============================================================================

/// Magic bytes at the start of every log file
pub const LOG_MAGIC: [u8; 4] = *b"LKV1";

/// Current log format version
pub const LOG_VERSION: u16 = 1;

/// Size of the fixed file header: magic (4) + version (2) + reserved (2)
pub const LOG_HEADER_SIZE: usize = 8;

/// Size of the per-record header: sequence (8) + crc (4) + length (4)
pub const RECORD_HEADER_SIZE: usize = 16;

/// Maximum payload size for a single record (16 MB)
pub const MAX_PAYLOAD_SIZE: u32 = 16 * 1024 * 1024;

// =============================================================================
// Record Types
// =============================================================================

/// A single record in the WAL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalRecord {
    /// Sequence number - strictly increasing, never reused
    pub sequence: u64,

    /// The operation to perform
    pub operation: Operation,
}

/// Operations that can be logged
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operation {
    /// Put a key-value pair
    Put { key: Vec<u8>, value: Vec<u8> },

    /// Delete a key
    Delete { key: Vec<u8> },
}

impl Operation {
    /// The key this operation targets
    pub fn key(&self) -> &[u8] {
        match self {
            Operation::Put { key, .. } => key,
            Operation::Delete { key } => key,
        }
    }
}

// =============================================================================
// Codec
// =============================================================================
//
// On-disk frame (big-endian integers, matching the rest of the codebase):
//
// ┌──────────┬─────────┬─────────┬──────────────────┐
// │ Seq (8)  │ CRC (4) │ Len (4) │ Payload (Len)    │
// └──────────┴─────────┴─────────┴──────────────────┘
//
// Payload is the bincode-serialized Operation. The CRC covers the sequence
// bytes plus the payload, so a record whose sequence bytes were damaged
// fails validation even though the payload still decodes.

impl WalRecord {
    /// Create a new record
    pub fn new(sequence: u64, operation: Operation) -> Self {
        Self { sequence, operation }
    }

    /// Encode this record into a self-delimiting byte frame
    pub fn encode(&self) -> Result<Bytes> {
        let payload = bincode::serialize(&self.operation)
            .map_err(|e| WalError::Serialization(e.to_string()))?;

        if payload.len() > MAX_PAYLOAD_SIZE as usize {
            return Err(WalError::Serialization(format!(
                "payload of {} bytes exceeds maximum {}",
                payload.len(),
                MAX_PAYLOAD_SIZE
            )));
        }

        let crc = compute_crc(self.sequence, &payload);

        let mut buf = BytesMut::with_capacity(RECORD_HEADER_SIZE + payload.len());
        buf.put_u64(self.sequence);
        buf.put_u32(crc);
        buf.put_u32(payload.len() as u32);
        buf.put_slice(&payload);

        Ok(buf.freeze())
    }

    /// Decode one record from the front of `buf`
    ///
    /// Returns the record and the number of bytes it occupied, so a caller
    /// can advance to the next frame without look-ahead.
    ///
    /// Errors:
    /// - `Incomplete` — `buf` holds fewer bytes than the frame claims
    ///   (the crash-truncated tail during a scan)
    /// - `ChecksumMismatch` — stored digest does not match the recomputed one
    /// - `Malformed` — absurd length claim or undecodable payload
    pub fn decode(buf: &[u8]) -> Result<(Self, usize), DecodeError> {
        if buf.len() < RECORD_HEADER_SIZE {
            return Err(DecodeError::Incomplete {
                needed: RECORD_HEADER_SIZE,
                available: buf.len(),
            });
        }

        let mut header = &buf[..RECORD_HEADER_SIZE];
        let sequence = header.get_u64();
        let stored_crc = header.get_u32();
        let payload_len = header.get_u32();

        if payload_len > MAX_PAYLOAD_SIZE {
            return Err(DecodeError::Malformed(format!(
                "payload length {} exceeds maximum {}",
                payload_len, MAX_PAYLOAD_SIZE
            )));
        }

        let total_len = RECORD_HEADER_SIZE + payload_len as usize;
        if buf.len() < total_len {
            return Err(DecodeError::Incomplete {
                needed: total_len,
                available: buf.len(),
            });
        }

        let payload = &buf[RECORD_HEADER_SIZE..total_len];
        let computed_crc = compute_crc(sequence, payload);
        if computed_crc != stored_crc {
            return Err(DecodeError::ChecksumMismatch {
                stored: stored_crc,
                computed: computed_crc,
            });
        }

        let operation: Operation = bincode::deserialize(payload)
            .map_err(|e| DecodeError::Malformed(format!("undecodable payload: {}", e)))?;

        Ok((Self { sequence, operation }, total_len))
    }

    /// Size in bytes this record occupies on disk once encoded
    pub fn encoded_len(&self) -> Result<usize> {
        let payload_len = bincode::serialized_size(&self.operation)
            .map_err(|e| WalError::Serialization(e.to_string()))?;
        Ok(RECORD_HEADER_SIZE + payload_len as usize)
    }
}

/// CRC32 over the big-endian sequence bytes followed by the payload
pub fn compute_crc(sequence: u64, payload: &[u8]) -> u32 {
    let mut hasher = crc32fast::Hasher::new();
    hasher.update(&sequence.to_be_bytes());
    hasher.update(payload);
    hasher.finalize()
}

// =============================================================================
// File Header
// =============================================================================

/// Encode the fixed header written when a log file is created
pub fn encode_file_header() -> [u8; LOG_HEADER_SIZE] {
    let mut header = [0u8; LOG_HEADER_SIZE];
    header[..4].copy_from_slice(&LOG_MAGIC);
    header[4..6].copy_from_slice(&LOG_VERSION.to_be_bytes());
    // bytes 6..8 reserved, zero
    header
}

/// Validate a file header read from the start of a log
///
/// Wrong magic or an unsupported version is a hard error: treating a
/// foreign or future-format file as an empty log invites silent data loss.
pub fn check_file_header(header: &[u8]) -> Result<()> {
    if header.len() < LOG_HEADER_SIZE {
        return Err(WalError::InvalidHeader(format!(
            "header too short: {} bytes",
            header.len()
        )));
    }
    if header[..4] != LOG_MAGIC {
        return Err(WalError::InvalidHeader(format!(
            "bad magic {:02x?}",
            &header[..4]
        )));
    }
    let version = u16::from_be_bytes([header[4], header[5]]);
    if version != LOG_VERSION {
        return Err(WalError::InvalidHeader(format!(
            "unsupported format version {}",
            version
        )));
    }
    Ok(())
}
