// SPDX-License-Identifier: Apache-2.0

use assert_cmd::Command;
use serde_json::Value;
use std::path::{Path, PathBuf};

const NOW: &str = "2025-01-10T00:00:00Z";

fn fixture_cases() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/cases.json")
}

fn shipped_policy() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../configs/policy/fristen.json")
}

/// A `hinweis` invocation isolated from the caller's config directories.
fn hinweis(home: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_hinweis"));
    cmd.current_dir(home)
        .env("HOME", home)
        .env_remove("XDG_CONFIG_HOME")
        .env_remove("HINWEIS_POLICY_PATH")
        .env_remove("HINWEIS_LOG_JSON")
        .env("HINWEIS_LOG_LEVEL", "error");
    cmd
}

fn stdout_json(output: &std::process::Output) -> Value {
    serde_json::from_slice(&output.stdout).expect("stdout json")
}

fn write_policy(dir: &Path, edit: impl FnOnce(&mut Value)) -> PathBuf {
    let raw = std::fs::read_to_string(shipped_policy()).expect("read shipped policy");
    let mut value: Value = serde_json::from_str(&raw).expect("policy json");
    edit(&mut value);
    let path = dir.join("fristen.json");
    std::fs::write(&path, serde_json::to_vec_pretty(&value).expect("encode")).expect("write");
    path
}

#[test]
fn evaluate_reports_one_row_per_case_in_input_order() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let output = hinweis(tmp.path())
        .args(["--json", "--now", NOW, "evaluate", "--cases"])
        .arg(fixture_cases())
        .output()
        .expect("run evaluate");
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let payload = stdout_json(&output);
    assert_eq!(payload["surface"], "case_list");
    assert_eq!(payload["warning_window_days"], 3);
    assert_eq!(payload["now"], NOW);

    let rows = payload["cases"].as_array().expect("rows");
    let statuses: Vec<&str> = rows.iter().map(|r| r["status"].as_str().unwrap_or("")).collect();
    assert_eq!(statuses, ["red", "yellow", "green", "done", "unknown", "unknown"]);

    assert_eq!(rows[0]["case_id"], "HGS-2025-001");
    assert_eq!(rows[0]["days_remaining"], -2);
    assert_eq!(rows[0]["kind"], "acknowledgment");
    assert_eq!(rows[0]["label"], "2 Tage überfällig");
    assert_eq!(rows[0]["status_label"], "Überfällig");
    assert_eq!(
        rows[0]["tooltip"],
        "Eingangsbestätigung fällig am 08.01.2025 (2 Tage überfällig)"
    );
    assert_eq!(rows[1]["label"], "noch 1 Tag");
    assert_eq!(rows[3]["label"], "erledigt");
    assert_eq!(rows[4]["label"], "-");
    assert!(rows[5]["due_at"].is_null());
}

#[test]
fn window_days_flag_overrides_the_surface_window() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let output = hinweis(tmp.path())
        .args(["--json", "--now", NOW, "evaluate", "--window-days", "0", "--cases"])
        .arg(fixture_cases())
        .output()
        .expect("run evaluate");
    assert!(output.status.success());
    let payload = stdout_json(&output);
    assert_eq!(payload["warning_window_days"], 0);
    assert_eq!(payload["cases"][1]["status"], "green");
}

#[test]
fn summary_counts_match_the_dashboard_tiles() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let output = hinweis(tmp.path())
        .args(["--json", "--now", NOW, "summary", "--cases"])
        .arg(fixture_cases())
        .output()
        .expect("run summary");
    assert!(output.status.success());
    let summary = &stdout_json(&output)["summary"];
    assert_eq!(summary["green"], 1);
    assert_eq!(summary["yellow"], 1);
    assert_eq!(summary["red"], 1);
    assert_eq!(summary["done"], 1);
    assert_eq!(summary["unknown"], 2);
    assert_eq!(summary["total"], 4);
}

#[test]
fn banner_surface_uses_its_wider_window() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let output = hinweis(tmp.path())
        .args(["--json", "--now", NOW, "summary", "--surface", "dashboard-banner", "--cases"])
        .arg(fixture_cases())
        .output()
        .expect("run summary");
    assert!(output.status.success());
    let payload = stdout_json(&output);
    assert_eq!(payload["surface"], "dashboard_banner");
    assert_eq!(payload["summary"]["yellow"], 2);
    assert_eq!(payload["summary"]["green"], 0);
    assert_eq!(payload["labels"]["yellow"], "Bald fällig");
}

#[test]
fn policy_from_environment_changes_the_window() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let policy = write_policy(tmp.path(), |v| v["warning_windows"]["case_list"] = 7.into());
    let output = hinweis(tmp.path())
        .env("HINWEIS_POLICY_PATH", &policy)
        .args(["--json", "--now", NOW, "summary", "--cases"])
        .arg(fixture_cases())
        .output()
        .expect("run summary");
    assert!(output.status.success());
    let payload = stdout_json(&output);
    assert_eq!(payload["warning_window_days"], 7);
    assert_eq!(payload["summary"]["yellow"], 2);

    let show = hinweis(tmp.path())
        .env("HINWEIS_POLICY_PATH", &policy)
        .args(["--json", "policy", "show"])
        .output()
        .expect("run policy show");
    assert!(show.status.success());
    let payload = stdout_json(&show);
    assert!(payload["source"].as_str().unwrap_or("").starts_with("env:"));
    assert_eq!(payload["policy"]["warning_windows"]["case_list"], 7);
}

#[test]
fn policy_show_falls_back_to_built_in_defaults() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let output = hinweis(tmp.path())
        .args(["--json", "policy", "show"])
        .output()
        .expect("run policy show");
    assert!(output.status.success());
    let payload = stdout_json(&output);
    assert_eq!(payload["source"], "built-in");
    assert_eq!(payload["policy"]["offsets"]["acknowledgment_days"], 7);
    assert_eq!(payload["warnings"][0]["id"], "policy.warning_windows.inconsistent");
}

#[test]
fn shipped_policy_validates_with_only_the_inconsistency_warning() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let output = hinweis(tmp.path())
        .args(["--json", "policy", "validate", "--path"])
        .arg(shipped_policy())
        .output()
        .expect("run policy validate");
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let payload = stdout_json(&output);
    let warnings = payload["warnings"].as_array().expect("warnings");
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0]["id"], "policy.warning_windows.inconsistent");
}

#[test]
fn invalid_policy_exits_with_validation_code() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let policy = write_policy(tmp.path(), |v| v["offsets"]["acknowledgment_days"] = 10.into());
    let output = hinweis(tmp.path())
        .args(["--json", "policy", "validate", "--path"])
        .arg(&policy)
        .output()
        .expect("run policy validate");
    assert_eq!(output.status.code(), Some(3));
    let err: Value = serde_json::from_slice(&output.stderr).expect("machine error");
    assert_eq!(err["code"], "policy_invalid");
    assert!(err["message"]
        .as_str()
        .unwrap_or("")
        .contains("policy.offsets.acknowledgment_days.range"));
}

#[test]
fn check_bump_rejects_silent_policy_edits() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let edited_dir = tmp.path().join("edited");
    std::fs::create_dir_all(&edited_dir).expect("mkdir");
    let edited = write_policy(&edited_dir, |v| v["offsets"]["feedback_days"] = 60.into());

    let same = hinweis(tmp.path())
        .args(["--json", "policy", "check-bump", "--old"])
        .arg(shipped_policy())
        .arg("--new")
        .arg(shipped_policy())
        .output()
        .expect("run check-bump");
    assert!(same.status.success());

    let output = hinweis(tmp.path())
        .args(["--json", "policy", "check-bump", "--old"])
        .arg(shipped_policy())
        .arg("--new")
        .arg(&edited)
        .output()
        .expect("run check-bump");
    assert_eq!(output.status.code(), Some(3));
    let err: Value = serde_json::from_slice(&output.stderr).expect("machine error");
    assert_eq!(err["code"], "policy_version_bump_required");
}

#[test]
fn check_bump_cannot_advance_past_the_only_schema_version() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let bumped = write_policy(tmp.path(), |policy| {
        policy["schema_version"] = Value::from("2");
        policy["warning_windows"]["deadline_badge"] = Value::from(10);
    });
    let output = hinweis(tmp.path())
        .args(["--json", "policy", "check-bump", "--old"])
        .arg(shipped_policy())
        .arg("--new")
        .arg(&bumped)
        .output()
        .expect("run check-bump");
    assert_eq!(output.status.code(), Some(3));
    let err: Value = serde_json::from_slice(&output.stderr).expect("machine error");
    assert_eq!(err["code"], "policy_invalid");
}

#[test]
fn label_and_transitions_workflows() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let overdue = hinweis(tmp.path())
        .args(["--json", "label", "--days=-2"])
        .output()
        .expect("run label");
    assert!(overdue.status.success());
    assert_eq!(stdout_json(&overdue)["label"], "2 Tage überfällig");

    let ahead = hinweis(tmp.path())
        .args(["--json", "label", "--days", "2"])
        .output()
        .expect("run label");
    assert_eq!(stdout_json(&ahead)["label"], "noch 2 Tage");

    let transitions = hinweis(tmp.path())
        .args(["--json", "transitions", "--status", "under_review"])
        .output()
        .expect("run transitions");
    assert!(transitions.status.success());
    let payload = stdout_json(&transitions);
    let allowed: Vec<&str> = payload["allowed"]
        .as_array()
        .expect("allowed")
        .iter()
        .map(|v| v["status"].as_str().unwrap_or(""))
        .collect();
    assert_eq!(allowed, ["in_progress", "closed"]);
    assert_eq!(payload["terminal"], false);

    let unknown = hinweis(tmp.path())
        .args(["--json", "transitions", "--status", "verloren"])
        .output()
        .expect("run transitions");
    assert_eq!(unknown.status.code(), Some(2));
    let err: Value = serde_json::from_slice(&unknown.stderr).expect("machine error");
    assert_eq!(err["code"], "unknown_status");
}

#[test]
fn case_file_failures_map_to_exit_codes() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let missing = hinweis(tmp.path())
        .args(["--json", "--now", NOW, "summary", "--cases", "nope.json"])
        .output()
        .expect("run summary");
    assert_eq!(missing.status.code(), Some(4));
    let err: Value = serde_json::from_slice(&missing.stderr).expect("machine error");
    assert_eq!(err["code"], "case_source_unavailable");

    let bad = tmp.path().join("bad.json");
    std::fs::write(&bad, r#"{"cases":{"id":"HGS-1"}}"#).expect("write");
    let malformed = hinweis(tmp.path())
        .args(["--json", "--now", NOW, "evaluate", "--cases"])
        .arg(&bad)
        .output()
        .expect("run evaluate");
    assert_eq!(malformed.status.code(), Some(3));
    let err: Value = serde_json::from_slice(&malformed.stderr).expect("machine error");
    assert_eq!(err["code"], "invalid_case_file");
}

#[test]
fn undecodable_records_render_as_unknown_rows() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let cases = tmp.path().join("mixed.json");
    std::fs::write(
        &cases,
        r#"[
            {"id":"HGS-A","status":"received","received_at":"2025-01-01T00:00:00Z"},
            {"id":"HGS-B","status":"in_bearbeitung","received_at":"2025-01-09T00:00:00Z"},
            {"id":"HGS-C","received_at":"2025-01-01","eingang_am":"2025-01-01"},
            {"received_at":"2025-01-01"}
        ]"#,
    )
    .expect("write");

    let evaluate = hinweis(tmp.path())
        .args(["--json", "--now", NOW, "evaluate", "--cases"])
        .arg(&cases)
        .output()
        .expect("run evaluate");
    assert!(evaluate.status.success(), "{}", String::from_utf8_lossy(&evaluate.stderr));
    let rows = stdout_json(&evaluate)["cases"].as_array().expect("rows").clone();
    let ids: Vec<Value> = rows.iter().map(|r| r["case_id"].clone()).collect();
    assert_eq!(ids, [Value::from("HGS-A"), "HGS-B".into(), "HGS-C".into(), Value::Null]);
    let statuses: Vec<&str> = rows.iter().map(|r| r["status"].as_str().unwrap_or("")).collect();
    assert_eq!(statuses, ["red", "green", "unknown", "unknown"]);
    assert_eq!(rows[2]["label"], "-");
    assert!(rows[2]["decode_error"].as_str().unwrap_or("").contains("duplicate field"));

    let summary = hinweis(tmp.path())
        .args(["--json", "--now", NOW, "summary", "--cases"])
        .arg(&cases)
        .output()
        .expect("run summary");
    assert!(summary.status.success(), "{}", String::from_utf8_lossy(&summary.stderr));
    let payload = stdout_json(&summary);
    assert_eq!(payload["summary"]["red"], 1);
    assert_eq!(payload["summary"]["green"], 1);
    assert_eq!(payload["summary"]["unknown"], 2);
    assert_eq!(payload["summary"]["total"], 2);
    assert_eq!(payload["rejected_records"], 2);
}

#[test]
fn watch_stops_after_max_refreshes() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let output = hinweis(tmp.path())
        .args([
            "--json",
            "--now",
            NOW,
            "watch",
            "--interval-secs",
            "1",
            "--max-refreshes",
            "2",
            "--cases",
        ])
        .arg(fixture_cases())
        .timeout(std::time::Duration::from_secs(30))
        .output()
        .expect("run watch");
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let text = String::from_utf8(output.stdout).expect("utf8 stdout");
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    for line in lines {
        let payload: Value = serde_json::from_str(line).expect("refresh json");
        assert_eq!(payload["summary"]["red"], 1);
    }
}

#[test]
fn watch_rejects_zero_interval() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let output = hinweis(tmp.path())
        .args(["--json", "watch", "--interval-secs", "0", "--cases"])
        .arg(fixture_cases())
        .output()
        .expect("run watch");
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn watch_rejects_zero_max_refreshes() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let output = hinweis(tmp.path())
        .args(["--json", "watch", "--max-refreshes", "0", "--cases"])
        .arg(fixture_cases())
        .timeout(std::time::Duration::from_secs(30))
        .output()
        .expect("run watch");
    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty(), "no refresh may be printed");
    let err: Value = serde_json::from_slice(&output.stderr).expect("machine error");
    assert_eq!(err["code"], "usage_error");
}
