// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;

use crate::limits::{
    MAX_ACKNOWLEDGMENT_DAYS, MAX_FEEDBACK_DAYS, MAX_RETENTION_YEARS, MIN_REFRESH_INTERVAL_SECS,
    MIN_RETENTION_YEARS,
};
use crate::schema::FristenPolicy;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum PolicySeverity {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PolicyViolation {
    pub id: &'static str,
    pub severity: PolicySeverity,
    pub message: &'static str,
    pub evidence: String,
}

#[derive(Debug, Clone, Copy)]
enum RuleKind {
    NumberRange(u64, u64),
    NumberMin(u64),
    ArrayNonEmpty,
}

#[derive(Debug, Clone, Copy)]
struct RuleSpec {
    id: &'static str,
    severity: PolicySeverity,
    message: &'static str,
    path: &'static str,
    kind: RuleKind,
}

const POLICY_RULES: &[RuleSpec] = &[
    RuleSpec {
        id: "policy.offsets.acknowledgment_days.range",
        severity: PolicySeverity::Error,
        message: "offsets.acknowledgment_days must be within 1..=7",
        path: "offsets.acknowledgment_days",
        kind: RuleKind::NumberRange(1, MAX_ACKNOWLEDGMENT_DAYS),
    },
    RuleSpec {
        id: "policy.offsets.feedback_days.range",
        severity: PolicySeverity::Error,
        message: "offsets.feedback_days must be within 1..=99",
        path: "offsets.feedback_days",
        kind: RuleKind::NumberRange(1, MAX_FEEDBACK_DAYS),
    },
    RuleSpec {
        id: "policy.offsets.retention_years.range",
        severity: PolicySeverity::Error,
        message: "offsets.retention_years must be within 3..=10",
        path: "offsets.retention_years",
        kind: RuleKind::NumberRange(MIN_RETENTION_YEARS, MAX_RETENTION_YEARS),
    },
    RuleSpec {
        id: "policy.refresh.interval.min",
        severity: PolicySeverity::Error,
        message: "refresh.dashboard_interval_secs must be >= 5",
        path: "refresh.dashboard_interval_secs",
        kind: RuleKind::NumberMin(MIN_REFRESH_INTERVAL_SECS),
    },
    RuleSpec {
        id: "policy.documented_defaults.non_empty",
        severity: PolicySeverity::Error,
        message: "documented_defaults must not be empty",
        path: "documented_defaults",
        kind: RuleKind::ArrayNonEmpty,
    },
];

/// Runs the rule table plus the cross-field checks.
///
/// Errors block loading; warnings are surfaced but do not.
#[must_use]
pub fn evaluate_policy(policy: &FristenPolicy) -> Vec<PolicyViolation> {
    let mut violations = Vec::new();
    let value = match serde_json::to_value(policy) {
        Ok(value) => value,
        Err(error) => {
            violations.push(PolicyViolation {
                id: "policy.serialization.failure",
                severity: PolicySeverity::Error,
                message: "policy serialization failed",
                evidence: error.to_string(),
            });
            return violations;
        }
    };

    for rule in POLICY_RULES {
        apply_rule(&value, *rule, &mut violations);
    }

    let offsets = policy.offsets;
    if offsets.acknowledgment_days >= offsets.feedback_days {
        violations.push(PolicyViolation {
            id: "policy.offsets.order",
            severity: PolicySeverity::Error,
            message: "acknowledgment deadline must fall before the feedback deadline",
            evidence: format!(
                "acknowledgment_days={} feedback_days={}",
                offsets.acknowledgment_days, offsets.feedback_days
            ),
        });
    }

    for (surface, window) in policy.warning_windows.iter() {
        if window.as_days() >= offsets.feedback_days {
            violations.push(PolicyViolation {
                id: "policy.warning_windows.max",
                severity: PolicySeverity::Error,
                message: "warning window must be shorter than the feedback deadline",
                evidence: format!(
                    "surface={} window_days={} feedback_days={}",
                    surface,
                    window.as_days(),
                    offsets.feedback_days
                ),
            });
        }
    }

    let distinct: BTreeSet<u32> = policy
        .warning_windows
        .iter()
        .map(|(_, window)| window.as_days())
        .collect();
    if distinct.len() > 1 {
        let evidence = policy
            .warning_windows
            .iter()
            .map(|(surface, window)| format!("{}={}", surface, window.as_days()))
            .collect::<Vec<_>>()
            .join(" ");
        violations.push(PolicyViolation {
            id: "policy.warning_windows.inconsistent",
            severity: PolicySeverity::Warning,
            message: "warning windows differ between surfaces; confirm with product",
            evidence,
        });
    }

    violations
}

#[must_use]
pub fn policy_warnings(policy: &FristenPolicy) -> Vec<PolicyViolation> {
    evaluate_policy(policy)
        .into_iter()
        .filter(|v| v.severity < PolicySeverity::Error)
        .collect()
}

fn apply_rule(root: &Value, rule: RuleSpec, out: &mut Vec<PolicyViolation>) {
    let Some(value) = field_path(root, rule.path) else {
        out.push(PolicyViolation {
            id: rule.id,
            severity: PolicySeverity::Error,
            message: "required policy path missing",
            evidence: format!("path={}", rule.path),
        });
        return;
    };

    let pass = match rule.kind {
        RuleKind::NumberRange(min, max) => value.as_u64().is_some_and(|n| (min..=max).contains(&n)),
        RuleKind::NumberMin(min) => value.as_u64().is_some_and(|n| n >= min),
        RuleKind::ArrayNonEmpty => value.as_array().is_some_and(|v| !v.is_empty()),
    };

    if !pass {
        out.push(PolicyViolation {
            id: rule.id,
            severity: rule.severity,
            message: rule.message,
            evidence: format!("path={} value={}", rule.path, value),
        });
    }
}

fn field_path<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    let mut cur = root;
    for seg in path.split('.') {
        cur = cur.get(seg)?;
    }
    Some(cur)
}
