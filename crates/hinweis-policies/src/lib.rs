// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

mod adapters;
mod evaluation;
mod limits;
mod policy_set;
mod schema;
mod validate;

pub use adapters::{
    load_policy_file, load_policy_from_workspace, policy_config_path, policy_schema_path,
    EMBEDDED_POLICY_SCHEMA,
};
pub use evaluation::{evaluate_policy, policy_warnings, PolicySeverity, PolicyViolation};
pub use limits::{
    MAX_ACKNOWLEDGMENT_DAYS, MAX_FEEDBACK_DAYS, MAX_RETENTION_YEARS, MAX_SCHEMA_BUMP_STEP,
    MIN_POLICY_SCHEMA_VERSION, MIN_REFRESH_INTERVAL_SECS, MIN_RETENTION_YEARS,
};
pub use policy_set::{parse_policy_json, resolve_warning_window, validate_policy};
pub use schema::{
    DeadlineOffsets, DisplaySurface, DocumentedDefault, FristenPolicy, PolicySchema,
    PolicySchemaVersion, RefreshPolicy, WarningWindow, WarningWindows,
};
pub use validate::{
    canonical_policy_json, validate_policy_change_requires_version_bump,
    validate_schema_version_transition, PolicyValidationError,
};

pub const CRATE_NAME: &str = "hinweis-policies";
