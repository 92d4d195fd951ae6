//! tapstore - a file-backed JSON table store for typed entities
//!
//! Tables are whole JSON documents on disk, one per entity type, with an
//! append-only sharded variant for accumulation logs. Correctness under
//! concurrency is the caller's job: multi-step read-modify-write sequences
//! must be bracketed with the table's lock from [`storage::LockRegistry`].
//! See the [`storage`] module docs for the full contract.

pub mod domain;
pub mod storage;
pub mod cli;

pub use domain::{Account, Entity, Group, Invitation, ShardedEntity, Tap};
pub use storage::{IdAllocator, LockRegistry, ShardStore, StoreError, TableStore};
