//! Key-Value Store Module
//!
//! In-memory map rebuilt from the WAL at startup.
//!
//! ## Responsibilities
//! - Fast reads and writes in memory
//! - Single-writer/multi-reader access pattern
//! - No durability of its own: the WAL is the source of truth, and the
//!   store is populated only by recovery replay and acknowledged writes
//!
//! ## Data Structure Choice
//! HashMap wrapped in RwLock:
//! - No ordering or iteration semantics required, so no BTreeMap
//! - Readers share the lock; the single mutator path holds it briefly

mod table;

pub use table::KeyValueStore;
