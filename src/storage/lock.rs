//! Named table locks
//!
//! The stores never lock on their own: a single `save` or `delete` is a full
//! read-modify-write of the table file, so two uncoordinated callers can lose
//! an update. Every multi-step sequence against a table (check-then-save,
//! allocate-id-then-save, read-then-delete) must run under that table's lock,
//! and the discipline only holds if every concurrent caller follows it.
//!
//! [`LockRegistry::with_table`] is the intended entry point. The guard form
//! exists for sequences spanning scopes, and releases on drop on every exit
//! path. Acquisition blocks unboundedly; a guard kept alive forever wedges its
//! table for the life of the process.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::lock_api::ArcMutexGuard;
use parking_lot::{Mutex, RawMutex};
use tracing::debug;

/// Process-wide map from table name to an exclusive mutex.
///
/// Mutexes are created lazily on first reference and retained until process
/// exit. Construct one registry at startup and pass it to every caller that
/// touches the same tables; two registries know nothing about each other.
#[derive(Default)]
pub struct LockRegistry {
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl LockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Blocks until the named table's mutex is held, then returns a guard
    /// that releases it on drop.
    pub fn acquire(&self, table: &str) -> TableGuard {
        debug!(table, "acquiring table lock");
        let guard = self.table_mutex(table).lock_arc();
        TableGuard {
            table: table.to_string(),
            _inner: guard,
        }
    }

    /// Runs `op` while holding the named table's lock. The lock is released
    /// when `op` returns or unwinds.
    pub fn with_table<R>(&self, table: &str, op: impl FnOnce() -> R) -> R {
        let _guard = self.acquire(table);
        op()
    }

    fn table_mutex(&self, table: &str) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock();
        locks.entry(table.to_string()).or_default().clone()
    }
}

/// Exclusive hold on one table's lock.
pub struct TableGuard {
    table: String,
    _inner: ArcMutexGuard<RawMutex, ()>,
}

impl Drop for TableGuard {
    fn drop(&mut self) {
        debug!(table = %self.table, "releasing table lock");
    }
}
