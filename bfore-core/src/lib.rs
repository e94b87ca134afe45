// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # bfore Core
//!
//! Core types and models shared by every bfore crate.
//!
//! This crate has no I/O. It provides:
//!
//! - Domain models returned by the BforeAI API
//! - The time window and session value types used by the fetch pipeline
//! - Error types
//!
//! ## Key Types
//!
//! ### Scoring
//! - [`ScoredDomain`] - One PreCrime-scored domain, the item the pipeline collects
//! - [`TimeWindow`] - Half-open `[start, end)` slice of a requested range
//!
//! ### Reports
//! - [`DomainReport`] - Envelope of the report-list endpoint
//! - [`Report`], [`Certificate`], [`DnsRecord`] - Report contents
//!
//! ### Session
//! - [`Session`] - Bearer token plus the username it belongs to

pub mod error;
pub mod models;

pub use error::CoreError;

pub use models::{
    // Scoring
    ScoredDomain,
    TimeWindow,
    WINDOW_TIMESTAMP_FORMAT,
    format_timestamp,
    parse_timestamp,
    // Reports
    Certificate,
    DnsRecord,
    DomainReport,
    Report,
    // Session
    Session,
};
