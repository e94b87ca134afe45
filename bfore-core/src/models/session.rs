//! Authenticated session.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Bearer token and the username it was issued to.
///
/// An empty token means "not logged in". A session is read-only input to
/// every API call; it is created by login and discarded by logout.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Bearer token.
    pub token: String,
    /// Username returned by the login endpoint.
    pub username: String,
}

impl Session {
    /// Creates a session.
    pub fn new(token: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            username: username.into(),
        }
    }

    /// An unauthenticated session.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Returns true if a token is present.
    pub fn is_authenticated(&self) -> bool {
        !self.token.trim().is_empty()
    }

    /// The token, if any.
    pub fn token(&self) -> Option<&str> {
        self.is_authenticated().then_some(self.token.as_str())
    }

    /// Value for the `Authorization` header.
    pub fn bearer(&self) -> Option<String> {
        self.token().map(|t| format!("Bearer {t}"))
    }
}

// Keeps tokens out of debug logs.
impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("username", &self.username)
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}
