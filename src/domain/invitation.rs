//! Group invitations

use serde::{Deserialize, Serialize};

use super::Entity;

/// A pending invitation of one email address into one group.
///
/// The compound key means an account can hold at most one open invitation per
/// group, while still being invited to any number of groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Invitation {
    pub group_id: u64,
    pub group_name: String,
    pub email: String,
}

impl Invitation {
    pub fn new(group_id: u64, group_name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            group_id,
            group_name: group_name.into(),
            email: email.into(),
        }
    }
}

impl Entity for Invitation {
    const TABLE: &'static str = "invitations";

    fn key(&self) -> String {
        format!("{}-{}", self.group_id, self.email)
    }
}
