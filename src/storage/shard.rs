//! Sharded append-only store
//!
//! A table partitioned by each entity's shard key, one file per (type, shard
//! key) pair. Shards accumulate: appends are unconditional, nothing is
//! deduplicated, and there is no update or delete-by-key. The intended access
//! pattern is "append one, read many".

use std::path::{Path, PathBuf};

use tracing::{debug, error};

use crate::domain::{shard_file, ShardedEntity};

use super::error::{Result, StoreError};
use super::io;

/// Append/read/clear engine over one JSON document per shard.
///
/// Shard files are compact JSON, written whole on every append. An absent
/// shard is equivalent to an empty one.
pub struct ShardStore {
    root: PathBuf,
}

impl ShardStore {
    /// Creates a store rooted at the given data directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the store's root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the path of the shard file `probe` selects.
    pub fn shard_path<E: ShardedEntity>(&self, probe: &E) -> PathBuf {
        self.root.join(shard_file(probe))
    }

    /// Reads the whole shard `probe` selects, creating it empty if it does
    /// not exist yet.
    pub fn read_shard<E: ShardedEntity>(&self, probe: &E) -> Result<Vec<E>> {
        let table = shard_file(probe);
        let data = io::read_table(&self.root, &table)?;

        let entities: Vec<E> = serde_json::from_slice(&data).map_err(|e| {
            error!(%table, err = %e, "failed to decode shard");
            StoreError::Decode { table: table.clone(), source: e }
        })?;

        debug!(%table, count = entities.len(), "data read");
        Ok(entities)
    }

    /// Appends `entity` to its shard. No key-uniqueness check; identical
    /// appends are all retained, in append order.
    pub fn append<E: ShardedEntity>(&self, entity: &E) -> Result<()> {
        let table = shard_file(entity);
        let mut all = self.read_shard(entity)?;
        all.push(entity.clone());

        let data = serde_json::to_vec(&all).map_err(|e| StoreError::Encode {
            table: table.clone(),
            source: e,
        })?;
        io::write_table(&self.root, &table, &data)?;

        debug!(%table, count = all.len(), "entity appended");
        Ok(())
    }

    /// Deletes the shard file `probe` selects. A shard that was never created
    /// is already clear, not an error.
    pub fn clear_shard<E: ShardedEntity>(&self, probe: &E) -> Result<()> {
        let table = shard_file(probe);
        debug!(%table, "clearing shard");
        io::remove_table(&self.root, &table, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use std::fs;
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Ping {
        seq: u32,
        channel: String,
    }

    impl crate::domain::Entity for Ping {
        const TABLE: &'static str = "pings";

        fn key(&self) -> String {
            self.seq.to_string()
        }
    }

    impl ShardedEntity for Ping {
        fn shard_key(&self) -> String {
            self.channel.clone()
        }
    }

    fn ping(seq: u32, channel: &str) -> Ping {
        Ping {
            seq,
            channel: channel.into(),
        }
    }

    #[test]
    fn appends_are_kept_in_order() {
        let dir = TempDir::new().unwrap();
        let store = ShardStore::new(dir.path());

        store.append(&ping(1, "a")).unwrap();
        store.append(&ping(2, "a")).unwrap();
        store.append(&ping(3, "a")).unwrap();

        let all = store.read_shard(&ping(0, "a")).unwrap();
        assert_eq!(all, vec![ping(1, "a"), ping(2, "a"), ping(3, "a")]);
    }

    #[test]
    fn duplicate_keys_are_not_deduplicated() {
        let dir = TempDir::new().unwrap();
        let store = ShardStore::new(dir.path());

        store.append(&ping(1, "a")).unwrap();
        store.append(&ping(1, "a")).unwrap();

        assert_eq!(store.read_shard(&ping(0, "a")).unwrap().len(), 2);
    }

    #[test]
    fn shards_are_independent_files() {
        let dir = TempDir::new().unwrap();
        let store = ShardStore::new(dir.path());

        store.append(&ping(1, "a")).unwrap();
        store.append(&ping(2, "b")).unwrap();

        assert_eq!(store.read_shard(&ping(0, "a")).unwrap(), vec![ping(1, "a")]);
        assert_eq!(store.read_shard(&ping(0, "b")).unwrap(), vec![ping(2, "b")]);
        assert!(dir.path().join("pings-a.json").is_file());
        assert!(dir.path().join("pings-b.json").is_file());
    }

    #[test]
    fn clear_shard_is_scoped_to_one_shard() {
        let dir = TempDir::new().unwrap();
        let store = ShardStore::new(dir.path());

        store.append(&ping(1, "a")).unwrap();
        store.append(&ping(2, "b")).unwrap();

        store.clear_shard(&ping(0, "a")).unwrap();

        assert!(!dir.path().join("pings-a.json").exists());
        assert_eq!(store.read_shard(&ping(0, "b")).unwrap().len(), 1);
    }

    #[test]
    fn clearing_a_never_created_shard_succeeds() {
        let dir = TempDir::new().unwrap();
        let store = ShardStore::new(dir.path());

        store.clear_shard(&ping(0, "nope")).unwrap();
    }

    #[test]
    fn shard_file_is_compact() {
        let dir = TempDir::new().unwrap();
        let store = ShardStore::new(dir.path());

        store.append(&ping(1, "a")).unwrap();

        let raw = fs::read_to_string(store.shard_path(&ping(0, "a"))).unwrap();
        assert!(!raw.contains('\n'));
    }
}
