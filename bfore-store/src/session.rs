//! Session storage.
//!
//! The login command saves a [`Session`], every other command loads it, and
//! logout clears it. The default store keeps it in the system keychain:
//! - macOS: Keychain Services
//! - Linux: Secret Service (GNOME Keyring, KDE Wallet)
//!
//! The session is stored as one JSON entry so token and username can never
//! drift apart.

use bfore_core::Session;
use keyring::Entry;
use std::sync::Mutex;
use tracing::debug;

use crate::error::StoreError;

/// Keychain service name.
pub const KEYCHAIN_SERVICE: &str = "bfore";

/// Keychain account holding the session.
pub const KEYCHAIN_ACCOUNT: &str = "session";

/// Where the current session lives.
pub trait SessionStore: Send + Sync {
    /// Returns the stored session, or an anonymous one if none is stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend is unavailable or the entry is corrupt.
    fn current(&self) -> Result<Session, StoreError>;

    /// Replaces the stored session.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the write.
    fn save(&self, session: &Session) -> Result<(), StoreError>;

    /// Removes the stored session. Clearing an empty store is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the delete.
    fn clear(&self) -> Result<(), StoreError>;
}

// ============================================================================
// Keychain Store
// ============================================================================

/// Session store backed by the system keychain.
#[derive(Debug, Clone)]
pub struct KeychainSessionStore {
    service: String,
    account: String,
}

impl KeychainSessionStore {
    /// Store under the default service and account.
    pub fn new() -> Self {
        Self::with_service(KEYCHAIN_SERVICE)
    }

    /// Store under a custom service name.
    pub fn with_service(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            account: KEYCHAIN_ACCOUNT.to_string(),
        }
    }

    fn entry(&self) -> Result<Entry, StoreError> {
        Ok(Entry::new(&self.service, &self.account)?)
    }
}

impl Default for KeychainSessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore for KeychainSessionStore {
    fn current(&self) -> Result<Session, StoreError> {
        match self.entry()?.get_password() {
            Ok(json) => {
                let session: Session = serde_json::from_str(&json)?;
                debug!(service = %self.service, "Session loaded from keychain");
                Ok(session)
            }
            Err(keyring::Error::NoEntry) => Ok(Session::anonymous()),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, session: &Session) -> Result<(), StoreError> {
        let json = serde_json::to_string(session)?;
        self.entry()?.set_password(&json)?;
        debug!(service = %self.service, "Session stored in keychain");
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        match self.entry()?.delete_credential() {
            Ok(()) => {
                debug!(service = %self.service, "Session deleted from keychain");
                Ok(())
            }
            Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

// ============================================================================
// Memory Store
// ============================================================================

/// Session store that lives as long as the process.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    session: Mutex<Session>,
}

impl MemorySessionStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding `session`.
    pub fn with_session(session: Session) -> Self {
        Self {
            session: Mutex::new(session),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn current(&self) -> Result<Session, StoreError> {
        let guard = self
            .session
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        Ok(guard.clone())
    }

    fn save(&self, session: &Session) -> Result<(), StoreError> {
        let mut guard = self
            .session
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        *guard = session.clone();
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        self.save(&Session::anonymous())
    }
}

// ============================================================================
// Tests
// ============================================================================
