//! Scored domains.

use serde::{Deserialize, Serialize};

/// A domain with its PreCrime score, as returned by the domain list endpoint.
///
/// Field names follow the API's PascalCase JSON exactly; the same names are
/// used when results are exported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredDomain {
    /// API identifier.
    #[serde(rename = "Id")]
    pub id: i64,
    /// Domain name.
    #[serde(rename = "Name")]
    pub name: String,
    /// When the domain was registered.
    #[serde(rename = "DomainCreated")]
    pub domain_created: String,
    /// When the score was computed. This is the sort key.
    #[serde(rename = "ScoreCreated")]
    pub score_created: String,
    /// PreCrime score.
    #[serde(rename = "Score")]
    pub score: f64,
}

impl ScoredDomain {
    /// The key results are ordered by.
    pub fn sort_key(&self) -> &str {
        &self.score_created
    }

    /// Returns true if the sort key is a zero-padded `YYYY-MM-DDTHH:MM:SS`
    /// prefix, the only shape for which string order is time order.
    pub fn has_canonical_key(&self) -> bool {
        is_canonical_timestamp(&self.score_created)
    }
}

fn is_canonical_timestamp(value: &str) -> bool {
    // YYYY-MM-DDTHH:MM:SS
    const SHAPE: &[u8] = b"dddd-dd-ddTdd:dd:dd";
    let bytes = value.as_bytes();
    if bytes.len() < SHAPE.len() {
        return false;
    }
    SHAPE.iter().zip(bytes).all(|(shape, b)| match shape {
        b'd' => b.is_ascii_digit(),
        b'T' => *b == b'T' || *b == b' ',
        other => b == other,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn domain(score_created: &str) -> ScoredDomain {
        ScoredDomain {
            id: 1,
            name: "example.com".to_string(),
            domain_created: "2024-01-01T00:00:00".to_string(),
            score_created: score_created.to_string(),
            score: 0.5,
        }
    }

    #[test]
    fn test_canonical_keys() {
        assert!(domain("2024-01-01T00:05:00").has_canonical_key());
        assert!(domain("2024-01-01T00:05:00.123Z").has_canonical_key());
        assert!(domain("2024-01-01 00:05:00").has_canonical_key());
    }

    #[test]
    fn test_non_canonical_keys() {
        assert!(!domain("2024-1-1T0:5:0").has_canonical_key());
        assert!(!domain("").has_canonical_key());
        assert!(!domain("01/01/2024 00:05").has_canonical_key());
    }
}
