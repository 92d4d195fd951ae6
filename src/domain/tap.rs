//! Tap events

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Account, Entity, ShardedEntity};

/// One tap sent to a group, recorded with millisecond precision.
///
/// Taps live in the sharded append log, one shard per group, so one busy
/// group's history never rewrites another's. They are accumulated, never
/// updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tap {
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub time: DateTime<Utc>,

    pub group_id: u64,

    pub user: Account,
}

impl Tap {
    /// Creates a tap stamped with the current time.
    pub fn new(group_id: u64, user: Account) -> Self {
        Self {
            time: Utc::now(),
            group_id,
            user,
        }
    }

    /// Creates a lookup probe for the given group's shard.
    pub fn for_group(group_id: u64) -> Self {
        Self {
            time: DateTime::<Utc>::UNIX_EPOCH,
            group_id,
            user: Account::default(),
        }
    }
}

impl Entity for Tap {
    const TABLE: &'static str = "taps";

    fn key(&self) -> String {
        format!("{}-{}", self.time.timestamp_millis(), self.user.email)
    }
}

impl ShardedEntity for Tap {
    fn shard_key(&self) -> String {
        self.group_id.to_string()
    }
}
