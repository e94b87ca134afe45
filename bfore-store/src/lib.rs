// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # bfore Store
//!
//! Everything bfore keeps outside the process.
//!
//! This crate provides:
//!
//! - **Session storage**: [`SessionStore`] with a keychain-backed and an
//!   in-memory implementation
//! - **Config**: JSON configuration file with defaults
//! - **Export**: JSON and CSV files for sampled domains and DNS records
//!
//! ## Usage
//!
//! ```ignore
//! use bfore_store::{Config, ExportFormat, KeychainSessionStore, SessionStore, export_domains};
//!
//! let config = Config::load_from(&Config::default_path())?;
//! let session = KeychainSessionStore::new().current()?;
//!
//! export_domains(&report.items, Path::new("domain_data"), ExportFormat::Both)?;
//! ```

pub mod config;
pub mod error;
pub mod export;
pub mod session;

pub use config::{ApiConfig, Config, SampleConfig};
pub use error::{ExportError, StoreError};
pub use export::{ExportFormat, export_domains, export_records};
pub use session::{KeychainSessionStore, MemorySessionStore, SessionStore};
