//! Per-table identifier allocation

use std::collections::HashMap;

use parking_lot::Mutex;
use tracing::debug;

use crate::domain::{table_file, Entity};

use super::error::Result;
use super::table::TableStore;

/// Monotonic per-table integer counters, seeded lazily from table contents.
///
/// Counters live in process memory only. On the first request for a table the
/// allocator reads that table (an I/O side effect) and seeds from the highest
/// numeric key still present, so deletions cannot cause an identifier already
/// held by a surviving record to be issued again. Keys that do not parse as
/// integers are ignored when seeding.
///
/// Identifiers are monotonically increasing within a process lifetime only; a
/// restart reseeds from whatever records survive. Callers that need an id for
/// a new record must hold the table's lock across the allocate-then-save
/// sequence, like any other multi-step operation.
#[derive(Default)]
pub struct IdAllocator {
    counters: Mutex<HashMap<String, u64>>,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the next identifier for `E`'s table.
    pub fn next_id<E: Entity>(&self, store: &TableStore) -> Result<u64> {
        let table = table_file::<E>();
        let mut counters = self.counters.lock();

        let next = match counters.get(&table) {
            Some(current) => current + 1,
            None => {
                let seed = Self::seed_from_table::<E>(store)?;
                debug!(%table, seed, "seeding id counter");
                seed + 1
            }
        };

        counters.insert(table, next);
        Ok(next)
    }

    fn seed_from_table<E: Entity>(store: &TableStore) -> Result<u64> {
        let all = store.read_all::<E>()?;
        Ok(all
            .iter()
            .filter_map(|e| e.key().parse::<u64>().ok())
            .max()
            .unwrap_or(0))
    }
}
