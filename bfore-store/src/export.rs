//! JSON and CSV export of results.
//!
//! Both exporters take a base filename and append `.json` / `.csv`
//! themselves. JSON is pretty-printed with a two-space indent.
//!
//! | data | JSON | CSV header |
//! |---|---|---|
//! | scored domains | `{"Domains": [...]}` | `ID,Name,Score,Created` |
//! | DNS records | `[...]` | `DomainName,RecordType,Address,Server,Texts` |

use bfore_core::{DnsRecord, ScoredDomain};
use serde::Serialize;
use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::info;

use crate::error::ExportError;

/// Which files to write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// `<base>.json` only.
    #[default]
    Json,
    /// `<base>.csv` only.
    Csv,
    /// Both files.
    Both,
}

impl ExportFormat {
    /// Returns true if a JSON file is written.
    pub fn includes_json(self) -> bool {
        matches!(self, Self::Json | Self::Both)
    }

    /// Returns true if a CSV file is written.
    pub fn includes_csv(self) -> bool {
        matches!(self, Self::Csv | Self::Both)
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            "both" => Ok(Self::Both),
            other => Err(ExportError::UnknownFormat(other.to_string())),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
            Self::Both => write!(f, "both"),
        }
    }
}

#[derive(Serialize)]
struct DomainsEnvelope<'a> {
    #[serde(rename = "Domains")]
    domains: &'a [ScoredDomain],
}

/// Writes scored domains. Returns the paths written, JSON first.
///
/// # Errors
///
/// Returns an error if the base name is empty or a file cannot be written.
/// Files written before the error are left in place.
pub fn export_domains(
    domains: &[ScoredDomain],
    base: &Path,
    format: ExportFormat,
) -> Result<Vec<PathBuf>, ExportError> {
    export_with(
        base,
        format,
        &DomainsEnvelope { domains },
        &["ID", "Name", "Score", "Created"],
        domains.iter().map(|d| {
            vec![
                d.id.to_string(),
                d.name.clone(),
                format!("{:.6}", d.score),
                d.domain_created.clone(),
            ]
        }),
    )
}

/// Writes DNS records. Returns the paths written, JSON first.
///
/// # Errors
///
/// Returns an error if the base name is empty or a file cannot be written.
pub fn export_records(
    records: &[DnsRecord],
    base: &Path,
    format: ExportFormat,
) -> Result<Vec<PathBuf>, ExportError> {
    export_with(
        base,
        format,
        records,
        &["DomainName", "RecordType", "Address", "Server", "Texts"],
        records.iter().map(|r| {
            vec![
                r.domain_name.clone(),
                r.record_type.clone(),
                r.address.clone(),
                r.server.clone(),
                r.texts.join(", "),
            ]
        }),
    )
}

fn export_with<T, I>(
    base: &Path,
    format: ExportFormat,
    json: &T,
    header: &[&str],
    rows: I,
) -> Result<Vec<PathBuf>, ExportError>
where
    T: Serialize + ?Sized,
    I: IntoIterator<Item = Vec<String>>,
{
    if base.as_os_str().is_empty() {
        return Err(ExportError::EmptyBaseName);
    }

    let mut written = Vec::new();

    if format.includes_json() {
        let path = with_suffix(base, ".json");
        let content = serde_json::to_string_pretty(json)?;
        std::fs::write(&path, content).map_err(|source| ExportError::Io {
            path: path.display().to_string(),
            source,
        })?;
        info!(path = %path.display(), "Saved JSON export");
        written.push(path);
    }

    if format.includes_csv() {
        let path = with_suffix(base, ".csv");
        let mut writer = csv::Writer::from_path(&path)?;
        writer.write_record(header)?;
        for row in rows {
            writer.write_record(&row)?;
        }
        writer.flush().map_err(|source| ExportError::Io {
            path: path.display().to_string(),
            source,
        })?;
        info!(path = %path.display(), "Saved CSV export");
        written.push(path);
    }

    Ok(written)
}

/// `base` + `suffix`, without touching any dots already in `base`.
fn with_suffix(base: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(base.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

// ============================================================================
// Tests
// ============================================================================
