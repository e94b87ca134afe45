//! Domain reports returned by the report list endpoint.

use serde::{Deserialize, Serialize};

/// Envelope of the report list endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DomainReport {
    /// Reports matching the query.
    #[serde(rename = "Reports", default)]
    pub reports: Vec<Report>,
}

impl DomainReport {
    /// All DNS records across all reports, in report order.
    pub fn records(&self) -> Vec<DnsRecord> {
        self.reports
            .iter()
            .flat_map(|r| r.records.iter().cloned())
            .collect()
    }
}

/// A single report for a domain.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Report {
    /// Report identifier.
    #[serde(rename = "Id", default)]
    pub id: String,
    /// When the report was created.
    #[serde(rename = "Created", default)]
    pub created: String,
    /// TLS certificate seen for the domain.
    #[serde(rename = "Certificate", default)]
    pub certificate: Certificate,
    /// DNS records seen for the domain.
    #[serde(rename = "Records", default)]
    pub records: Vec<DnsRecord>,
}

/// TLS certificate details.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Certificate {
    /// Issuer DN.
    #[serde(rename = "Issuer", default)]
    pub issuer: String,
    /// Expiry.
    #[serde(rename = "NotAfter", default)]
    pub not_after: String,
    /// Start of validity.
    #[serde(rename = "NotBefore", default)]
    pub not_before: String,
    /// Subject DN.
    #[serde(rename = "Subject", default)]
    pub subject: String,
    /// Certificate thumbprint.
    #[serde(rename = "Thumbprint", default)]
    pub thumbprint: String,
}

/// A DNS record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DnsRecord {
    /// Address (A/AAAA records).
    #[serde(rename = "Address", default, skip_serializing_if = "String::is_empty")]
    pub address: String,
    /// Queried name.
    #[serde(rename = "DomainName", default)]
    pub domain_name: String,
    /// Record type, e.g. `A`, `MX`, `TXT`.
    #[serde(rename = "RecordType", default)]
    pub record_type: String,
    /// Target server (MX/NS records).
    #[serde(rename = "Server", default, skip_serializing_if = "String::is_empty")]
    pub server: String,
    /// Text values (TXT records).
    #[serde(rename = "Texts", default, skip_serializing_if = "Vec::is_empty")]
    pub texts: Vec<String>,
}
