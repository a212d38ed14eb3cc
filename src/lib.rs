//! # LedgerKV
//!
//! A durable key-value store built on a write-ahead log:
//! - Every mutation is appended and flushed to the log before it is applied
//! - Crash recovery replays the log, discarding the corrupted tail
//! - Monotonic sequence numbers survive restarts, never reused
//! - Single-writer/multi-reader concurrency model
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Engine                                │
//! │              (Single Writer / Multi Reader)                  │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │ writes                  │ reads
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │  WalWriter  │  ──────▶ │KeyValueStore│
//!   │  (Append)   │  apply   │  (RwLock)   │
//!   └──────┬──────┘          └─────────────┘
//!          │                         ▲
//!          ▼                         │ replay
//!   ┌─────────────┐          ┌──────┴──────┐
//!   │   wal.log   │  ──────▶ │  Recovery   │
//!   │  (Durable)  │   scan   │   Manager   │
//!   └─────────────┘          └─────────────┘
//! ```
//!
//! On startup the recovery manager scans the log, rebuilds the store, and
//! hands the restored sequence counter to the writer; only then does an
//! [`Engine`] exist to serve traffic.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;

pub mod engine;
pub mod recovery;
pub mod store;
pub mod wal;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use config::{Config, WalSyncStrategy};
pub use engine::Engine;
pub use error::{DecodeError, RecoveryError, Result, WalError};
pub use recovery::{RecoveredState, RecoveryManager, RecoveryReport};
pub use store::KeyValueStore;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of LedgerKV
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
