//! Sequence number authority
//!
//! Issues the strictly increasing sequence numbers that order the log.
//! On startup the counter is rebuilt from the scan results; afterwards it
//! is owned by the WAL writer and only ever advanced under the writer's
//! lock, so it needs no synchronization of its own.

use super::WalRecord;

/// Issues monotonically increasing sequence numbers
///
/// Zero-based: the first record of a fresh log gets sequence 0. The
/// counter is never decremented; a failed append can therefore leave a
/// hole in the visible record stream, which is fine — ordering requires
/// monotonicity, not contiguity across failures.
#[derive(Debug, Clone)]
pub struct SequenceCounter {
    next: u64,
}

impl SequenceCounter {
    /// Counter for a fresh, empty log
    pub fn new() -> Self {
        Self { next: 0 }
    }

    /// Counter resuming after the given last issued sequence
    ///
    /// `None` means the log held no valid records; the counter starts at 0.
    pub fn resume_after(last: Option<u64>) -> Self {
        Self {
            next: last.map_or(0, |seq| seq + 1),
        }
    }

    /// Highest sequence among the scanned records, or `None` if empty
    ///
    /// Records arrive in on-disk order, so the last one carries the max,
    /// but this does not rely on that.
    pub fn recover_last_sequence(records: &[WalRecord]) -> Option<u64> {
        records.iter().map(|r| r.sequence).max()
    }

    /// Return the current value and advance the counter
    pub fn next(&mut self) -> u64 {
        let seq = self.next;
        self.next += 1;
        seq
    }

    /// The sequence the next call to [`next`](Self::next) will return
    pub fn peek(&self) -> u64 {
        self.next
    }
}

impl Default for SequenceCounter {
    fn default() -> Self {
        Self::new()
    }
}
