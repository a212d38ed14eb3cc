//! Engine Module
//!
//! The process-facing handle combining WAL and store.
//!
//! ## Responsibilities
//! - Run recovery before anything else can touch the data
//! - Serialize the write path: WAL append, then store mutation
//! - Serve reads from the store, bypassing the WAL
//!
//! ## Concurrency Model: Single-Writer / Multiple-Reader (SWMR)
//!
//! - **Writes** (put/delete): serialized by the WAL mutex. The guard is
//!   held across the append *and* the store mutation, so on-disk sequence
//!   order and store mutation order are the same order.
//! - **Reads** (get): never take the WAL mutex; the store's internal
//!   RwLock admits many concurrent readers.
//!
//! An `Engine` value only exists after recovery has completed — there is
//! no way to reach the write or read path on a partially replayed store.

use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

use crate::config::Config;
use crate::error::{RecoveryError, Result};
use crate::recovery::{RecoveryManager, RecoveryReport};
use crate::store::KeyValueStore;
use crate::wal::{Operation, WalWriter};

/// The main storage engine
pub struct Engine {
    /// Engine configuration
    config: Config,

    /// Write-ahead log writer; the mutex is the write-path lock
    wal: Mutex<WalWriter>,

    /// In-memory store (internal RwLock)
    store: KeyValueStore,

    /// What startup recovery found
    recovery_report: RecoveryReport,
}

impl Engine {
    // =========================================================================
    // Path Constants
    // =========================================================================

    /// Log filename inside the data directory
    pub const WAL_FILENAME: &'static str = "wal.log";

    /// Open or create an engine with the given config
    ///
    /// On startup:
    /// 1. Create the data directory if it doesn't exist
    /// 2. Recover: scan the log, replay valid records, truncate the tail
    /// 3. Resume the writer with the restored sequence counter
    ///
    /// Returns only once the engine is ready to serve reads and writes.
    pub fn open(config: Config) -> Result<Self, RecoveryError> {
        fs::create_dir_all(&config.data_dir)?;

        let wal_path = config.data_dir.join(Self::WAL_FILENAME);
        let recovered = RecoveryManager::recover(&wal_path, config.wal_sync_strategy)?;

        Ok(Self {
            config,
            wal: Mutex::new(recovered.writer),
            store: recovered.store,
            recovery_report: recovered.report,
        })
    }

    /// Open with a path (convenience method)
    ///
    /// Uses default config with the specified data directory
    pub fn open_path(path: &Path) -> Result<Self, RecoveryError> {
        let config = Config::builder().data_dir(path).build();
        Self::open(config)
    }

    /// Get a value by key
    ///
    /// Reads hit the store directly; the WAL is not consulted.
    pub fn get(&self, key: &[u8]) -> Option<Vec<u8>> {
        self.store.get(key)
    }

    /// Put a key-value pair
    ///
    /// Appends to the WAL (durable per the sync strategy) and only then
    /// mutates the store. If the append fails, the store is untouched —
    /// visible state never runs ahead of durable state.
    pub fn put(&self, key: &[u8], value: &[u8]) -> Result<()> {
        let mut wal = self.wal.lock();
        wal.append(Operation::Put {
            key: key.to_vec(),
            value: value.to_vec(),
        })?;
        self.store.put(key.to_vec(), value.to_vec());
        Ok(())
    }

    /// Delete a key
    ///
    /// Logged like a put; deleting an absent key still appends a record
    /// (the log orders intent, the store resolves it) and is a no-op on
    /// the map.
    pub fn delete(&self, key: &[u8]) -> Result<()> {
        let mut wal = self.wal.lock();
        wal.append(Operation::Delete { key: key.to_vec() })?;
        self.store.delete(key);
        Ok(())
    }

    /// Force a flush of any batched appends to disk
    pub fn sync(&self) -> Result<()> {
        self.wal.lock().sync()
    }

    /// Close the engine gracefully, syncing the WAL
    pub fn close(self) -> Result<()> {
        self.wal.lock().sync()
    }

    // =========================================================================
    // Accessors (for testing and debugging)
    // =========================================================================

    /// Get the data directory path
    pub fn data_dir(&self) -> &Path {
        &self.config.data_dir
    }

    /// Path of the write-ahead log file
    pub fn wal_path(&self) -> PathBuf {
        self.config.data_dir.join(Self::WAL_FILENAME)
    }

    /// The sequence number the next append will be assigned
    pub fn next_sequence(&self) -> u64 {
        self.wal.lock().next_sequence()
    }

    /// Number of live keys in the store
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Whether the store holds no keys
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// What startup recovery found
    pub fn recovery_report(&self) -> &RecoveryReport {
        &self.recovery_report
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}
