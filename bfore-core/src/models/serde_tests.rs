//! Deserialization tests against payloads shaped like the live API.

use super::*;

#[test]
fn test_scored_domain_list_from_api() {
    let json = r#"[
        {"Id": 42, "Name": "paypa1-login.com", "DomainCreated": "2024-01-01T00:00:00",
         "ScoreCreated": "2024-01-02T03:04:05", "Score": 0.97},
        {"Id": 43, "Name": "examp1e.net", "DomainCreated": "2024-01-01T01:00:00",
         "ScoreCreated": "2024-01-02T03:04:06", "Score": 0.5}
    ]"#;

    let domains: Vec<ScoredDomain> = serde_json::from_str(json).unwrap();
    assert_eq!(domains.len(), 2);
    assert_eq!(domains[0].id, 42);
    assert_eq!(domains[0].name, "paypa1-login.com");
    assert_eq!(domains[0].sort_key(), "2024-01-02T03:04:05");
    assert!((domains[0].score - 0.97).abs() < f64::EPSILON);
}

#[test]
fn test_scored_domain_serializes_pascal_case() {
    let domain = ScoredDomain {
        id: 7,
        name: "a.com".to_string(),
        domain_created: "dc".to_string(),
        score_created: "sc".to_string(),
        score: 1.0,
    };
    let value = serde_json::to_value(&domain).unwrap();
    assert_eq!(value["Id"], 7);
    assert_eq!(value["Name"], "a.com");
    assert_eq!(value["DomainCreated"], "dc");
    assert_eq!(value["ScoreCreated"], "sc");
}

#[test]
fn test_object_body_is_not_a_domain_list() {
    let json = r#"{"Domains": []}"#;
    assert!(serde_json::from_str::<Vec<ScoredDomain>>(json).is_err());
}

#[test]
fn test_domain_report_from_api() {
    let json = r#"{
        "Reports": [{
            "Id": "r-1",
            "Created": "2024-01-01T00:00:00Z",
            "Certificate": {"Issuer": "CN=R3", "NotAfter": "2024-04-01", "NotBefore": "2024-01-01",
                            "Subject": "CN=example.com", "Thumbprint": "AB:CD"},
            "Records": [
                {"DomainName": "example.com", "RecordType": "A", "Address": "93.184.216.34"},
                {"DomainName": "example.com", "RecordType": "TXT", "Texts": ["v=spf1 -all", "x"]}
            ]
        }, {
            "Id": "r-2",
            "Records": [{"DomainName": "example.com", "RecordType": "MX", "Server": "mx.example.com"}]
        }]
    }"#;

    let report: DomainReport = serde_json::from_str(json).unwrap();
    assert_eq!(report.reports.len(), 2);
    assert_eq!(report.reports[0].certificate.issuer, "CN=R3");

    let records = report.records();
    assert_eq!(records.len(), 3);
    assert_eq!(records[1].texts, vec!["v=spf1 -all", "x"]);
    assert_eq!(records[2].server, "mx.example.com");
}

#[test]
fn test_dns_record_omits_empty_optionals() {
    let record = DnsRecord {
        domain_name: "example.com".to_string(),
        record_type: "A".to_string(),
        address: "1.2.3.4".to_string(),
        ..Default::default()
    };
    let json = serde_json::to_string(&record).unwrap();
    assert!(json.contains("\"Address\""));
    assert!(!json.contains("\"Server\""));
    assert!(!json.contains("\"Texts\""));
}

#[test]
fn test_session_roundtrip() {
    let session = Session::new("tok", "alice");
    let json = serde_json::to_string(&session).unwrap();
    let parsed: Session = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, session);
}
