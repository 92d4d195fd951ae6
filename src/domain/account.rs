//! User accounts

use serde::{Deserialize, Serialize};

use super::Entity;

/// A user account, keyed by email address.
///
/// `tag` is an optional display handle; `password` is only present on the
/// stored record and on credential-bearing requests, never on listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Account {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,

    pub email: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl Account {
    /// Creates an account with just an email, as used for lookups.
    pub fn with_email(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            ..Self::default()
        }
    }

    /// User-facing identifier: the tag when set, the email otherwise.
    pub fn identifier(&self) -> &str {
        match &self.tag {
            Some(tag) if !tag.is_empty() => tag,
            _ => &self.email,
        }
    }
}

impl Entity for Account {
    const TABLE: &'static str = "accounts";

    fn key(&self) -> String {
        self.email.clone()
    }
}
