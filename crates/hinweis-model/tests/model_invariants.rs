// SPDX-License-Identifier: Apache-2.0

use hinweis_model::{CaseId, CaseRecord, CaseStatus, TimestampField, CASE_ID_MAX_LEN};

#[test]
fn case_id_rejects_hidden_trimming() {
    assert!(CaseId::parse("HGS-2025-0001").is_ok());
    assert!(CaseId::parse(" HGS-2025-0001").is_err());
    assert!(CaseId::parse("HGS-2025-0001 ").is_err());
    assert!(CaseId::parse("").is_err());
    assert!(CaseId::parse("a\nb").is_err());
}

#[test]
fn max_size_limits_are_enforced() {
    let too_long = "c".repeat(CASE_ID_MAX_LEN + 1);
    assert!(CaseId::parse(&too_long).is_err());
    assert!(CaseId::parse(&"c".repeat(CASE_ID_MAX_LEN)).is_ok());
}

#[test]
fn completion_flags_follow_non_null_timestamps() {
    let mut case = CaseRecord::new(
        CaseId::parse("HGS-1").expect("id"),
        TimestampField::parse("2025-01-01"),
    );
    assert!(!case.acknowledgment_recorded());
    assert!(!case.feedback_recorded());

    case.acknowledged_at = TimestampField::parse("kaputt");
    assert!(case.acknowledgment_recorded(), "garbled but non-null still counts");

    case.closed_at = TimestampField::parse("2025-03-01");
    assert!(case.feedback_recorded());
    assert!(!case.purge_recorded());
}

#[test]
fn timestamp_field_states_are_distinct() {
    assert_eq!(TimestampField::parse("  "), TimestampField::Missing);
    assert!(matches!(TimestampField::parse("2025-01-08"), TimestampField::Valid(_)));
    assert_eq!(
        TimestampField::parse("31.12.2024"),
        TimestampField::Invalid("31.12.2024".to_string())
    );
    assert_eq!(TimestampField::parse("31.12.2024").instant(), None);
}

#[test]
fn status_parse_accepts_wire_names_and_legacy_alias() {
    for status in CaseStatus::ALL {
        assert_eq!(CaseStatus::parse(status.as_str()), Some(status));
    }
    assert_eq!(
        CaseStatus::parse("acknowledgment_sent"),
        Some(CaseStatus::Acknowledged)
    );
    assert_eq!(CaseStatus::parse("erledigt"), None);
}
