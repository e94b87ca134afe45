//! Domain models for bfore.
//!
//! ## Submodules
//!
//! - [`domain`] - Scored domains returned by the domain list endpoint
//! - [`window`] - Time windows and the timestamp layout the API expects
//! - [`report`] - Domain reports (certificate and DNS records)
//! - [`session`] - Authenticated session value

mod domain;
mod report;
mod session;
mod window;

pub use domain::ScoredDomain;
pub use report::{Certificate, DnsRecord, DomainReport, Report};
pub use session::Session;
pub use window::{TimeWindow, WINDOW_TIMESTAMP_FORMAT, format_timestamp, parse_timestamp};

#[cfg(test)]
mod serde_tests;
