//! Full-table CRUD store
//!
//! Every operation works on the whole table document: read the entire array,
//! optionally mutate it in memory, write the entire array back. There is no
//! partial update, so two concurrent save calls on the same table can lose an
//! update unless both callers hold the table's lock around their read-modify-
//! write sequence (see [`LockRegistry`](super::LockRegistry)).

use std::path::{Path, PathBuf};

use tracing::{debug, error};

use crate::domain::{table_file, Entity};

use super::error::{Result, StoreError};
use super::io;

/// Hard per-table record ceiling. A policy limit, not resource exhaustion.
pub const TABLE_CAPACITY: usize = 2500;

/// CRUD engine over one JSON document per entity type.
///
/// Table files live directly under the store's root directory, named after
/// [`Entity::TABLE`], pretty-printed for outside inspection. An absent file is
/// equivalent to an empty table and is materialized on first access.
pub struct TableStore {
    root: PathBuf,
}

impl TableStore {
    /// Creates a store rooted at the given data directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the store's root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the path of the table file for `E`.
    pub fn table_path<E: Entity>(&self) -> PathBuf {
        self.root.join(table_file::<E>())
    }

    /// Reads the whole table, creating it empty if it does not exist yet.
    pub fn read_all<E: Entity>(&self) -> Result<Vec<E>> {
        let table = table_file::<E>();
        let data = io::read_table(&self.root, &table)?;

        let entities: Vec<E> = serde_json::from_slice(&data).map_err(|e| {
            error!(%table, err = %e, "failed to decode table");
            StoreError::Decode { table: table.clone(), source: e }
        })?;

        debug!(%table, count = entities.len(), "data read");
        Ok(entities)
    }

    /// Returns the entity whose key matches `probe`'s.
    pub fn read<E: Entity>(&self, probe: &E) -> Result<E> {
        let key = probe.key();
        self.read_all::<E>()?
            .into_iter()
            .find(|e| e.key() == key)
            .ok_or_else(|| StoreError::NotFound {
                table: table_file::<E>(),
                key,
            })
    }

    /// Inserts `entity`, or replaces the existing record with the same key in
    /// place. Appends fail with [`StoreError::CapacityExceeded`] once the
    /// table holds [`TABLE_CAPACITY`] records.
    pub fn save<E: Entity>(&self, entity: &E) -> Result<()> {
        let table = table_file::<E>();
        let key = entity.key();
        let mut all = self.read_all::<E>()?;

        match all.iter_mut().find(|e| e.key() == key) {
            Some(existing) => *existing = entity.clone(),
            None => {
                if all.len() >= TABLE_CAPACITY {
                    return Err(StoreError::CapacityExceeded {
                        table,
                        limit: TABLE_CAPACITY,
                    });
                }
                all.push(entity.clone());
            }
        }

        self.write_all(&all)?;
        debug!(table = %table_file::<E>(), %key, count = all.len(), "entity saved");
        Ok(())
    }

    /// Removes the first entity whose key matches `probe`'s.
    pub fn delete<E: Entity>(&self, probe: &E) -> Result<()> {
        let key = probe.key();
        let mut all = self.read_all::<E>()?;

        let index = all
            .iter()
            .position(|e| e.key() == key)
            .ok_or_else(|| StoreError::NotFound {
                table: table_file::<E>(),
                key: key.clone(),
            })?;

        all.remove(index);
        self.write_all(&all)?;
        debug!(table = %table_file::<E>(), %key, "entity deleted");
        Ok(())
    }

    /// Removes the table file entirely. The next read recreates it empty.
    pub fn clear<E: Entity>(&self) -> Result<()> {
        debug!(table = %table_file::<E>(), "clearing table");
        io::remove_table(&self.root, &table_file::<E>(), false)
    }

    /// True if an entity with `probe`'s key is present.
    pub fn exists<E: Entity>(&self, probe: &E) -> Result<bool> {
        let key = probe.key();
        Ok(self.read_all::<E>()?.iter().any(|e| e.key() == key))
    }

    fn write_all<E: Entity>(&self, entities: &[E]) -> Result<()> {
        let table = table_file::<E>();
        let data = serde_json::to_vec_pretty(entities).map_err(|e| StoreError::Encode {
            table: table.clone(),
            source: e,
        })?;
        io::write_table(&self.root, &table, &data)
    }
}
