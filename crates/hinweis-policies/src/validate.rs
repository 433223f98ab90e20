// SPDX-License-Identifier: Apache-2.0

use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::limits::{MAX_SCHEMA_BUMP_STEP, MIN_POLICY_SCHEMA_VERSION};
use crate::schema::{FristenPolicy, PolicySchema, PolicySchemaVersion};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyValidationError(pub String);

impl std::fmt::Display for PolicyValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for PolicyValidationError {}

fn numeric_schema_version(raw: &str) -> Result<u32, PolicyValidationError> {
    let version = raw.trim().parse::<u32>().map_err(|_| {
        PolicyValidationError(format!("schema_version `{raw}` is not a number"))
    })?;
    if version < MIN_POLICY_SCHEMA_VERSION {
        return Err(PolicyValidationError(format!(
            "schema_version must be at least {MIN_POLICY_SCHEMA_VERSION}, got {version}"
        )));
    }
    Ok(version)
}

/// A policy may keep its schema version or move up by one step; downgrades
/// and skipped versions are rejected.
pub fn validate_schema_version_transition(
    from: &str,
    to: &str,
) -> Result<(), PolicyValidationError> {
    let from = numeric_schema_version(from)?;
    let to = numeric_schema_version(to)?;
    match to.checked_sub(from) {
        None => Err(PolicyValidationError(format!(
            "schema_version must not go back from {from} to {to}"
        ))),
        Some(step) if step > MAX_SCHEMA_BUMP_STEP => Err(PolicyValidationError(format!(
            "schema_version may advance by at most {MAX_SCHEMA_BUMP_STEP}, got {from} -> {to}"
        ))),
        Some(_) => Ok(()),
    }
}

/// Deadline offsets and windows are legally relevant; editing them without a
/// version bump hides the change from anyone comparing policy versions.
pub fn validate_policy_change_requires_version_bump(
    old: &FristenPolicy,
    new: &FristenPolicy,
) -> Result<(), PolicyValidationError> {
    let content_changed = canonical_policy_json(old)? != canonical_policy_json(new)?;
    if content_changed && old.schema_version == new.schema_version {
        return Err(PolicyValidationError(format!(
            "policy content changed but schema_version stayed at {}",
            new.schema_version.as_str()
        )));
    }
    validate_schema_version_transition(old.schema_version.as_str(), new.schema_version.as_str())
}

/// Pretty JSON with object keys sorted, for diffing and change detection.
pub fn canonical_policy_json(policy: &FristenPolicy) -> Result<String, PolicyValidationError> {
    let value = serde_json::to_value(policy)
        .map_err(|e| PolicyValidationError(format!("encode policy failed: {e}")))?;
    serde_json::to_string_pretty(&sorted_keys(value))
        .map_err(|e| PolicyValidationError(format!("print policy failed: {e}")))
}

/// True when a dotted path such as `offsets.feedback_days` names a field of
/// the policy document.
pub(crate) fn field_path_exists(root: &Value, path: &str) -> bool {
    path.split('.')
        .try_fold(root, |node, segment| {
            if segment.is_empty() {
                None
            } else {
                node.as_object()?.get(segment)
            }
        })
        .is_some()
}

/// Reads `properties.schema_version.const` from the schema document.
pub(crate) fn decode_schema_version(schema: &Value) -> Result<PolicySchema, PolicyValidationError> {
    let pinned = schema
        .pointer("/properties/schema_version/const")
        .and_then(Value::as_str)
        .ok_or_else(|| {
            PolicyValidationError(
                "policy schema does not pin properties.schema_version.const".to_string(),
            )
        })?;
    let schema_version = match pinned {
        "1" => PolicySchemaVersion::V1,
        other => {
            return Err(PolicyValidationError(format!(
                "policy schema pins unsupported schema_version {other}"
            )))
        }
    };
    Ok(PolicySchema { schema_version })
}

fn sorted_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let sorted: BTreeMap<String, Value> = map
                .into_iter()
                .map(|(key, inner)| (key, sorted_keys(inner)))
                .collect();
            Value::Object(sorted.into_iter().collect::<Map<String, Value>>())
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sorted_keys).collect()),
        other => other,
    }
}
