//! Domain models for tapstore
//!
//! The entity contracts plus the concrete types persisted by the store, free
//! of any I/O concerns. Format and membership validation belongs to the
//! consumers of this crate, not here.

mod entity;
mod account;
mod group;
mod invitation;
mod tap;

pub use entity::{shard_file, table_file, Entity, ShardedEntity};
pub use account::Account;
pub use group::Group;
pub use invitation::Invitation;
pub use tap::Tap;
