//! Tap groups

use serde::{Deserialize, Serialize};

use super::{Account, Entity};

/// A group of accounts that tap each other.
///
/// Keyed by a numeric id rendered as a string; ids are handed out by the
/// identifier allocator, so group creation must run under the group table
/// lock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Group {
    #[serde(default)]
    pub id: u64,

    pub name: String,

    pub emoji: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<Account>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub invites: Vec<Account>,
}

impl Group {
    /// Creates a lookup probe for the given id.
    pub fn with_id(id: u64) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    /// True if `email` owns or is a member of this group.
    pub fn has_member(&self, email: &str) -> bool {
        self.owner.as_deref() == Some(email) || self.members.iter().any(|a| a.email == email)
    }
}

impl Entity for Group {
    const TABLE: &'static str = "groups";

    fn key(&self) -> String {
        self.id.to_string()
    }
}
