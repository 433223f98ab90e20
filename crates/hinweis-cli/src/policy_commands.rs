// SPDX-License-Identifier: Apache-2.0

use crate::helpers::{emit_ok, load_policy, locate_policy, PolicySource};
use crate::{CliError, OutputMode};
use hinweis_core::{ExitCode, MachineError};
use hinweis_policies::{
    canonical_policy_json, evaluate_policy, load_policy_file,
    validate_policy_change_requires_version_bump, PolicySeverity,
};
use serde_json::{json, Value};
use std::path::Path;

fn violations_payload(policy: &hinweis_policies::FristenPolicy) -> Vec<Value> {
    evaluate_policy(policy)
        .into_iter()
        .filter(|v| v.severity < PolicySeverity::Error)
        .map(|v| {
            json!({
                "id": v.id,
                "severity": v.severity,
                "message": v.message,
                "evidence": v.evidence,
            })
        })
        .collect()
}

pub(crate) fn run_validate(path: Option<&Path>, output_mode: OutputMode) -> Result<(), CliError> {
    let source = locate_policy(path);
    let policy = load_policy(&source)?;
    emit_ok(
        output_mode,
        json!({
            "command": "policy validate",
            "status": "ok",
            "source": source.describe(),
            "schema_version": policy.schema_version.as_str(),
            "warnings": violations_payload(&policy),
        }),
    )
    .map_err(CliError::internal)
}

pub(crate) fn run_show(source: &PolicySource, output_mode: OutputMode) -> Result<(), CliError> {
    let policy = load_policy(source)?;
    let canonical = canonical_policy_json(&policy).map_err(|e| CliError::internal(e.0))?;
    let policy_value: Value =
        serde_json::from_str(&canonical).map_err(|e| CliError::internal(e.to_string()))?;
    emit_ok(
        output_mode,
        json!({
            "command": "policy show",
            "source": source.describe(),
            "policy": policy_value,
            "warnings": violations_payload(&policy),
        }),
    )
    .map_err(CliError::internal)
}

pub(crate) fn run_check_bump(old: &Path, new: &Path, output_mode: OutputMode) -> Result<(), CliError> {
    let invalid = |path: &Path, message: String| CliError {
        exit_code: ExitCode::Validation,
        machine: MachineError::new("policy_invalid", &message)
            .with_detail("path", &path.display().to_string()),
    };
    let old_policy = load_policy_file(old).map_err(|e| invalid(old, e.0))?;
    let new_policy = load_policy_file(new).map_err(|e| invalid(new, e.0))?;
    validate_policy_change_requires_version_bump(&old_policy, &new_policy).map_err(|e| CliError {
        exit_code: ExitCode::Validation,
        machine: MachineError::new("policy_version_bump_required", &e.0)
            .with_detail("old", old_policy.schema_version.as_str())
            .with_detail("new", new_policy.schema_version.as_str()),
    })?;
    emit_ok(
        output_mode,
        json!({
            "command": "policy check-bump",
            "status": "ok",
            "old_schema_version": old_policy.schema_version.as_str(),
            "new_schema_version": new_policy.schema_version.as_str(),
        }),
    )
    .map_err(CliError::internal)
}
