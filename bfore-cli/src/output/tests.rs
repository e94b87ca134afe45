//! CLI output formatting tests.

#[cfg(test)]
mod text_formatter_tests {
    use super::super::text::{TextFormatter, mask_token};
    use bfore_core::{DnsRecord, ScoredDomain, Session, TimeWindow, parse_timestamp};
    use bfore_fetch::{PipelineReport, WindowFailure};

    fn domain(id: i64) -> ScoredDomain {
        ScoredDomain {
            id,
            name: format!("site{id}.com"),
            domain_created: "2023-12-01T00:00:00".to_string(),
            score_created: "2024-01-01T00:05:00".to_string(),
            score: 0.8125,
        }
    }

    #[test]
    fn test_progress_line_empty() {
        let formatter = TextFormatter::new(false).with_bar_width(10);
        assert_eq!(
            formatter.progress_line(0, 4),
            "Fetching data   0% |░░░░░░░░░░| (0/4)"
        );
    }

    #[test]
    fn test_progress_line_half() {
        let formatter = TextFormatter::new(false).with_bar_width(10);
        assert_eq!(
            formatter.progress_line(2, 4),
            "Fetching data  50% |█████░░░░░| (2/4)"
        );
    }

    #[test]
    fn test_progress_line_full_and_zero_total() {
        let formatter = TextFormatter::new(false).with_bar_width(10);
        assert_eq!(
            formatter.progress_line(4, 4),
            "Fetching data 100% |██████████| (4/4)"
        );
        assert!(formatter.progress_line(0, 0).contains("100%"));
    }

    #[test]
    fn test_progress_line_with_colors() {
        let formatter = TextFormatter::new(true).with_bar_width(4);
        let line = formatter.progress_line(1, 2);
        assert!(line.contains("\x1b[32m"));
        assert!(line.contains("\x1b[0m"));
    }

    #[test]
    fn test_prompt() {
        let formatter = TextFormatter::new(false);
        assert_eq!(formatter.prompt(&Session::anonymous()), "$ ");
        assert_eq!(formatter.prompt(&Session::new("tok", "user")), "user-cli $ ");
    }

    #[test]
    fn test_format_domains() {
        let formatter = TextFormatter::new(false);
        let output = formatter.format_domains(&[domain(1), domain(2)]);
        assert!(output.contains("Result 1:"));
        assert!(output.contains("Result 2:"));
        assert!(output.contains("site2.com"));
        assert!(output.contains("Score:          0.812500"));
        assert!(!output.contains("\x1b["));
    }

    #[test]
    fn test_format_records_skips_empty_fields() {
        let formatter = TextFormatter::new(false);
        let output = formatter.format_records(&[DnsRecord {
            domain_name: "example.com".to_string(),
            record_type: "TXT".to_string(),
            texts: vec!["a".to_string(), "b".to_string()],
            ..Default::default()
        }]);
        assert!(output.contains("Record 1:"));
        assert!(output.contains("Texts:       a; b"));
        assert!(!output.contains("Address:"));
        assert!(!output.contains("Server:"));
    }

    #[test]
    fn test_sample_summary() {
        let formatter = TextFormatter::new(false);
        let mut report = PipelineReport {
            items: vec![domain(1)],
            windows_total: 3,
            failures: Vec::new(),
        };
        assert_eq!(
            formatter.format_sample_summary(&report),
            "Finished sample generation. Found 1 total domains."
        );

        let window = TimeWindow::new(
            parse_timestamp("2024-01-01T00:00:00").unwrap(),
            parse_timestamp("2024-01-01T00:30:00").unwrap(),
        )
        .unwrap();
        report.failures.push(WindowFailure {
            window,
            cause: "API returned status 500: boom".to_string(),
        });
        let summary = formatter.format_sample_summary(&report);
        assert!(summary.ends_with("1 of 3 windows failed"));
    }

    #[test]
    fn test_sample_summary_all_windows_failed() {
        let formatter = TextFormatter::new(false);
        let failures = ["2024-01-01T00:00:00", "2024-01-01T00:30:00"]
            .iter()
            .map(|start| {
                let start = parse_timestamp(start).unwrap();
                WindowFailure {
                    window: TimeWindow::new(start, start + chrono::Duration::minutes(30)).unwrap(),
                    cause: "API returned status 503: unavailable".to_string(),
                }
            })
            .collect();
        let report = PipelineReport {
            items: Vec::new(),
            windows_total: 2,
            failures,
        };
        assert_eq!(
            formatter.format_sample_summary(&report),
            "Finished sample generation. Found 0 total domains.\n2 of 2 windows failed"
        );
    }

    #[test]
    fn test_format_session() {
        let formatter = TextFormatter::new(false);
        let session = Session::new("abcd1234efgh5678", "alice");

        let masked = formatter.format_session(&session, false);
        assert!(masked.contains("alice"));
        assert!(masked.contains("abcd…5678"));
        assert!(!masked.contains("abcd1234efgh5678"));

        assert!(formatter.format_session(&session, true).contains("abcd1234efgh5678"));
        assert_eq!(formatter.format_session(&Session::anonymous(), false), "Not logged in.");
    }

    #[test]
    fn test_mask_token() {
        assert_eq!(mask_token("short"), "*****");
        assert_eq!(mask_token("0123456789"), "0123…6789");
    }

    #[test]
    fn test_banner_without_colors() {
        let banner = TextFormatter::new(false).banner();
        assert!(banner.contains("BforeAI CLI -- Type 'help' for commands, 'exit' to quit."));
        assert!(!banner.contains("\x1b["));
    }
}
