//! User record of the security service.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A user account.
///
/// The server never returns passwords, so `password` is only populated on
/// outbound records.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    #[serde(default)]
    pub admin: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl User {
    pub fn new(username: impl Into<String>, admin: bool) -> Self {
        Self {
            username: username.into(),
            admin,
            password: None,
        }
    }

    /// Same user with `password` set.
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("username", &self.username)
            .field("admin", &self.admin)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
