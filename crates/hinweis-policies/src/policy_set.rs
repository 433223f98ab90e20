// SPDX-License-Identifier: Apache-2.0

use serde_json::Value;
use std::collections::BTreeSet;

use crate::evaluation::{evaluate_policy, PolicySeverity};
use crate::schema::{DisplaySurface, FristenPolicy, WarningWindow};
use crate::validate::{
    decode_schema_version, field_path_exists, validate_schema_version_transition,
    PolicyValidationError,
};

/// Decodes and validates a policy document against its schema document.
pub fn parse_policy_json(
    config_raw: &str,
    schema_raw: &str,
) -> Result<FristenPolicy, PolicyValidationError> {
    let config_val: Value = serde_json::from_str(config_raw)
        .map_err(|e| PolicyValidationError(format!("parse policy config failed: {e}")))?;
    let schema_val: Value = serde_json::from_str(schema_raw)
        .map_err(|e| PolicyValidationError(format!("parse policy schema failed: {e}")))?;

    validate_documented_defaults(&config_val)?;

    let policy: FristenPolicy = serde_json::from_value(config_val)
        .map_err(|e| PolicyValidationError(format!("decode policy config failed: {e}")))?;
    let schema = decode_schema_version(&schema_val)?;

    validate_policy(&policy)?;
    validate_schema_version_transition(
        schema.schema_version.as_str(),
        policy.schema_version.as_str(),
    )?;

    Ok(policy)
}

/// Fails on the first error-severity violation. Warnings pass.
pub fn validate_policy(policy: &FristenPolicy) -> Result<(), PolicyValidationError> {
    if let Some(v) = evaluate_policy(policy)
        .into_iter()
        .find(|v| matches!(v.severity, PolicySeverity::Error))
    {
        return Err(PolicyValidationError(format!(
            "{}: {} ({})",
            v.id, v.message, v.evidence
        )));
    }
    let root = serde_json::to_value(policy)
        .map_err(|e| PolicyValidationError(format!("encode policy failed: {e}")))?;
    validate_documented_defaults(&root)
}

/// Window for the given surface, or the policy's default surface.
#[must_use]
pub fn resolve_warning_window(
    policy: &FristenPolicy,
    surface: Option<DisplaySurface>,
) -> WarningWindow {
    policy
        .warning_windows
        .for_surface(surface.unwrap_or(policy.default_surface))
}

fn validate_documented_defaults(value: &Value) -> Result<(), PolicyValidationError> {
    let obj = value
        .as_object()
        .ok_or_else(|| PolicyValidationError("policy config must be object".to_string()))?;
    let defaults = obj
        .get("documented_defaults")
        .ok_or_else(|| PolicyValidationError("documented_defaults is required".to_string()))?;
    let arr = defaults
        .as_array()
        .ok_or_else(|| PolicyValidationError("documented_defaults must be an array".to_string()))?;

    let mut seen = BTreeSet::<String>::new();
    for item in arr {
        let obj = item.as_object().ok_or_else(|| {
            PolicyValidationError("documented_defaults entries must be objects".to_string())
        })?;
        let field = obj.get("field").and_then(Value::as_str).ok_or_else(|| {
            PolicyValidationError("documented_defaults.field must be a string".to_string())
        })?;
        let reason = obj.get("reason").and_then(Value::as_str).ok_or_else(|| {
            PolicyValidationError("documented_defaults.reason must be a string".to_string())
        })?;
        let field = field.trim();
        if field.is_empty() || reason.trim().is_empty() {
            return Err(PolicyValidationError(
                "documented_defaults.field/reason must be non-empty".to_string(),
            ));
        }
        if !seen.insert(field.to_string()) {
            return Err(PolicyValidationError(format!(
                "documented_defaults.field duplicated: {field}"
            )));
        }
        if field == "documented_defaults" || field.starts_with("documented_defaults.") {
            return Err(PolicyValidationError(
                "documented_defaults entries cannot describe documented_defaults itself"
                    .to_string(),
            ));
        }
        if !field_path_exists(value, field) {
            return Err(PolicyValidationError(format!(
                "documented_defaults.field does not exist in policy: {field}"
            )));
        }
    }

    Ok(())
}
