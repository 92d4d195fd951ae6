//! # Storage Layer
//!
//! File-backed persistence for typed entities, one JSON document per table.
//!
//! ## Storage Formats
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Full tables | JSON array, pretty-printed | `<data-dir>/{table}.json` |
//! | Shards | JSON array, compact | `<data-dir>/{table}-{shard}.json` |
//!
//! An absent file is equivalent to an empty table and is materialized on
//! first access. The files are plain JSON; nothing stops outside tooling from
//! reading them directly.
//!
//! ## Concurrency Contract
//!
//! Every mutating operation is a whole-file read-modify-write, and **no
//! operation takes the table lock on its own**. Single-file reads and writes
//! are serialized with advisory file locks and writes land atomically via
//! temp-file + rename, but any multi-step sequence (check-then-save,
//! allocate-id-then-save) is only correct when every concurrent caller wraps
//! it in the same table's lock:
//!
//! ```no_run
//! use tapstore::domain::{table_file, Group};
//! use tapstore::storage::{IdAllocator, LockRegistry, TableStore};
//!
//! # fn demo() -> tapstore::storage::Result<()> {
//! let store = TableStore::new("/var/lib/tapstore");
//! let locks = LockRegistry::new();
//! let ids = IdAllocator::new();
//!
//! locks.with_table(&table_file::<Group>(), || {
//!     let mut group = Group::default();
//!     group.id = ids.next_id::<Group>(&store)?;
//!     store.save(&group)
//! })?;
//! # Ok(())
//! # }
//! ```
//!
//! A single caller bypassing the lock breaks the guarantee for everyone.
//! Locks are table-scoped: callers updating different keys in the same table
//! still serialize fully, and operations on different tables never contend.
//!
//! ## Key Types
//!
//! - [`TableStore`] - full-table CRUD keyed by [`Entity::key`](crate::domain::Entity::key)
//! - [`ShardStore`] - append-only log partitioned by shard key
//! - [`LockRegistry`] - named mutexes for caller-managed bracketing
//! - [`IdAllocator`] - lazily seeded per-table id counters
//! - [`StoreConfig`] - data-directory resolution

mod error;
mod io;
mod table;
mod shard;
mod lock;
mod ids;
mod config;

pub use error::{Result, StoreError};
pub use table::{TableStore, TABLE_CAPACITY};
pub use shard::ShardStore;
pub use lock::{LockRegistry, TableGuard};
pub use ids::IdAllocator;
pub use config::{ConfigError, ConfigFile, StoreConfig};
