//! Entity contracts for stored types
//!
//! Every type persisted by the store declares a static table identifier and a
//! natural key. Types stored in the sharded append log additionally declare a
//! shard key that selects which physical file holds them.
//!
//! Keys must be pure functions of entity state and must never change once an
//! entity has been persisted. The store does not enforce this; callers do.

use serde::de::DeserializeOwned;
use serde::Serialize;

/// A value persisted in a full table.
///
/// `TABLE` is the stable file basename (without extension) for the type's
/// table, and [`key`](Entity::key) is the natural key an entity is looked up
/// by. No two entities in one table may share a key.
pub trait Entity: Clone + Serialize + DeserializeOwned {
    /// Stable table identifier, used as the file basename.
    const TABLE: &'static str;

    /// Natural key, unique within the table.
    fn key(&self) -> String;
}

/// A value persisted in a sharded append log.
///
/// Each distinct shard key gets its own file. Entities within a shard are not
/// deduplicated; repeated appends are all retained.
pub trait ShardedEntity: Entity {
    /// Selects the physical shard file this entity is stored in.
    fn shard_key(&self) -> String;
}

/// File name for a type's full table.
///
/// Pure; this name also keys the lock registry and the id allocator.
pub fn table_file<E: Entity>() -> String {
    format!("{}.json", E::TABLE)
}

/// File name for the shard holding `entity`.
///
/// Pure; one file per (type, shard key) pair.
pub fn shard_file<E: ShardedEntity>(entity: &E) -> String {
    format!("{}-{}.json", E::TABLE, entity.shard_key())
}
