// SPDX-License-Identifier: Apache-2.0

use hinweis_policies::{load_policy_file, FristenPolicy};

#[test]
fn standalone_policy_file_uses_embedded_schema() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let path = tmp.path().join("custom.json");
    let mut policy = FristenPolicy::default();
    policy.warning_windows.case_list = 5;
    std::fs::write(&path, serde_json::to_vec_pretty(&policy).expect("encode")).expect("write");

    let loaded = load_policy_file(&path).expect("load");
    assert_eq!(loaded, policy);
}

#[test]
fn sibling_schema_takes_precedence() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let path = tmp.path().join("fristen.json");
    std::fs::write(
        &path,
        serde_json::to_vec_pretty(&FristenPolicy::default()).expect("encode"),
    )
    .expect("write");
    std::fs::write(
        tmp.path().join("fristen.schema.json"),
        r#"{"properties":{"schema_version":{"const":"2"}}}"#,
    )
    .expect("write schema");

    let err = load_policy_file(&path).expect_err("schema v2 is not supported");
    assert!(err.to_string().contains("pins unsupported schema_version 2"));
}

#[test]
fn invalid_offsets_fail_loading_with_rule_id() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let path = tmp.path().join("bad.json");
    let mut policy = FristenPolicy::default();
    policy.offsets.acknowledgment_days = 14;
    std::fs::write(&path, serde_json::to_vec(&policy).expect("encode")).expect("write");

    let err = load_policy_file(&path).expect_err("ack offset above legal maximum");
    assert!(err.to_string().starts_with("policy.offsets.acknowledgment_days.range"));
}

#[test]
fn missing_file_reports_path() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let path = tmp.path().join("absent.json");
    let err = load_policy_file(&path).expect_err("missing");
    assert!(err.to_string().contains("absent.json"));
}
