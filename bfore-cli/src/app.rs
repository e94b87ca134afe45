//! Per-process state shared by every command.

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use anyhow::{Context, Result};
use bfore_core::Session;
use bfore_fetch::{FetchContext, FetchSettings};
use bfore_store::{Config, KeychainSessionStore, MemorySessionStore, SessionStore};
use tracing::{debug, warn};

use crate::Cli;
use crate::output::TextFormatter;

/// Configuration, session access and output style for one process.
pub struct AppContext {
    /// Loaded configuration.
    pub config: Config,
    /// Path the configuration was loaded from.
    pub config_path: PathBuf,
    /// Text formatter honoring `--no-color`.
    pub formatter: TextFormatter,
    /// `--quiet` was given.
    pub quiet: bool,
    keychain: Arc<dyn SessionStore>,
    cache: MemorySessionStore,
    /// Set once a keychain read failure has been reported.
    keychain_warned: AtomicBool,
}

impl AppContext {
    /// Builds the context from parsed flags.
    ///
    /// `--base-url` overrides the configured base URL.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let config_path = cli.config.clone().unwrap_or_else(Config::default_path);
        let mut config = Config::load_from(&config_path)
            .with_context(|| format!("Failed to load {}", config_path.display()))?;
        if let Some(url) = &cli.base_url {
            config.api.base_url.clone_from(url);
        }

        Ok(Self::new(
            config,
            config_path,
            Arc::new(KeychainSessionStore::new()),
            TextFormatter::new(!cli.no_color),
            cli.quiet,
        ))
    }

    /// Builds a context around an explicit session store.
    pub fn new(
        config: Config,
        config_path: PathBuf,
        keychain: Arc<dyn SessionStore>,
        formatter: TextFormatter,
        quiet: bool,
    ) -> Self {
        Self {
            config,
            config_path,
            formatter,
            quiet,
            keychain,
            cache: MemorySessionStore::new(),
            keychain_warned: AtomicBool::new(false),
        }
    }

    /// The current session.
    ///
    /// A session saved earlier in this process wins. Otherwise the keychain
    /// is asked; if it is unavailable the session is anonymous. Only the
    /// first read failure is logged as a warning.
    pub fn session(&self) -> Session {
        if let Ok(session) = self.cache.current() {
            if session.is_authenticated() {
                return session;
            }
        }
        match self.keychain.current() {
            Ok(session) => {
                self.keychain_warned.store(false, Ordering::Relaxed);
                if session.is_authenticated() {
                    let _ = self.cache.save(&session);
                }
                session
            }
            Err(e) => {
                if self.keychain_warned.swap(true, Ordering::Relaxed) {
                    debug!(error = %e, "Could not read session from keychain");
                } else {
                    warn!(error = %e, "Could not read session from keychain");
                }
                Session::anonymous()
            }
        }
    }

    /// Stores `session` for this process and, if possible, in the keychain.
    ///
    /// Returns false if only the in-process copy could be kept.
    pub fn save_session(&self, session: &Session) -> bool {
        let _ = self.cache.save(session);
        match self.keychain.save(session) {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "Could not store session in keychain");
                false
            }
        }
    }

    /// Forgets the session here and in the keychain.
    pub fn clear_session(&self) -> Result<()> {
        self.cache.clear()?;
        self.keychain.clear()?;
        debug!("Session cleared");
        Ok(())
    }

    /// Fetch settings from config, with optional per-command overrides.
    pub fn fetch_settings(
        &self,
        window_minutes: Option<i64>,
        max_concurrency: Option<usize>,
    ) -> FetchSettings {
        FetchSettings {
            base_url: self.config.api.base_url.clone(),
            timeout: Duration::from_secs(self.config.api.timeout_secs),
            window_minutes: window_minutes.unwrap_or(self.config.sample.window_minutes),
            max_concurrency: max_concurrency.unwrap_or(self.config.sample.max_concurrency),
        }
    }

    /// A fetch context using the configured settings.
    pub fn fetch_context(&self, settings: FetchSettings) -> Result<FetchContext> {
        FetchContext::with_settings(settings).context("Failed to create API client")
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use bfore_store::StoreError;

    struct BrokenStore;

    impl SessionStore for BrokenStore {
        fn current(&self) -> Result<Session, StoreError> {
            Err(StoreError::Keychain("no secret service".to_string()))
        }

        fn save(&self, _session: &Session) -> Result<(), StoreError> {
            Err(StoreError::Keychain("no secret service".to_string()))
        }

        fn clear(&self) -> Result<(), StoreError> {
            Ok(())
        }
    }

    fn app(store: Arc<dyn SessionStore>) -> AppContext {
        AppContext::new(
            Config::default(),
            PathBuf::from("config.json"),
            store,
            TextFormatter::new(false),
            true,
        )
    }

    #[test]
    fn test_session_from_store() {
        let store = Arc::new(MemorySessionStore::with_session(Session::new("t", "alice")));
        let app = app(store);
        assert_eq!(app.session().username, "alice");
    }

    #[test]
    fn test_session_survives_broken_keychain() {
        let app = app(Arc::new(BrokenStore));
        assert!(!app.session().is_authenticated());

        assert!(!app.save_session(&Session::new("t", "bob")));
        assert_eq!(app.session().username, "bob");

        app.clear_session().unwrap();
        assert!(!app.session().is_authenticated());
    }

    #[test]
    fn test_keychain_failure_reported_once() {
        let app = app(Arc::new(BrokenStore));
        assert!(!app.keychain_warned.load(Ordering::Relaxed));

        for _ in 0..3 {
            assert!(!app.session().is_authenticated());
            assert!(app.keychain_warned.load(Ordering::Relaxed));
        }
    }

    #[test]
    fn test_keychain_recovery_rearms_warning() {
        let app = app(Arc::new(MemorySessionStore::new()));
        app.keychain_warned.store(true, Ordering::Relaxed);
        assert!(!app.session().is_authenticated());
        assert!(!app.keychain_warned.load(Ordering::Relaxed));
    }

    #[test]
    fn test_fetch_settings_overrides() {
        let app = app(Arc::new(MemorySessionStore::new()));
        let settings = app.fetch_settings(None, None);
        assert_eq!(settings.window_minutes, 30);
        assert_eq!(settings.max_concurrency, 8);

        let settings = app.fetch_settings(Some(10), Some(0));
        assert_eq!(settings.window_minutes, 10);
        assert_eq!(settings.max_concurrency, 0);
        assert_eq!(settings.timeout, Duration::from_secs(30));
    }
}
