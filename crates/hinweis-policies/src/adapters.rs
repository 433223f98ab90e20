// SPDX-License-Identifier: Apache-2.0

use std::fs;
use std::path::{Path, PathBuf};

use hinweis_core::workspace_policy_path;

use crate::policy_set::parse_policy_json;
use crate::schema::FristenPolicy;
use crate::validate::PolicyValidationError;

const POLICY_SCHEMA_PATH: &str = "configs/policy/fristen.schema.json";
const SCHEMA_FILE_NAME: &str = "fristen.schema.json";

/// Schema shipped with the binary, used when a policy file has no sibling schema.
pub const EMBEDDED_POLICY_SCHEMA: &str = include_str!("../../../configs/policy/fristen.schema.json");

#[must_use]
pub fn policy_config_path(root: &Path) -> PathBuf {
    workspace_policy_path(root)
}

#[must_use]
pub fn policy_schema_path(root: &Path) -> PathBuf {
    root.join(POLICY_SCHEMA_PATH)
}

pub fn load_policy_from_workspace(root: &Path) -> Result<FristenPolicy, PolicyValidationError> {
    let config_raw = fs::read_to_string(policy_config_path(root))
        .map_err(|e| PolicyValidationError(format!("read policy config failed: {e}")))?;
    let schema_raw = fs::read_to_string(policy_schema_path(root))
        .map_err(|e| PolicyValidationError(format!("read policy schema failed: {e}")))?;

    parse_policy_json(&config_raw, &schema_raw)
}

/// Loads a standalone policy file, validating it against a sibling
/// `fristen.schema.json` when one exists and the embedded schema otherwise.
pub fn load_policy_file(path: &Path) -> Result<FristenPolicy, PolicyValidationError> {
    let config_raw = fs::read_to_string(path).map_err(|e| {
        PolicyValidationError(format!("read policy config {} failed: {e}", path.display()))
    })?;
    let sibling = path.with_file_name(SCHEMA_FILE_NAME);
    let schema_raw = if sibling.is_file() && sibling != path {
        fs::read_to_string(&sibling)
            .map_err(|e| PolicyValidationError(format!("read policy schema failed: {e}")))?
    } else {
        EMBEDDED_POLICY_SCHEMA.to_string()
    };

    parse_policy_json(&config_raw, &schema_raw)
}
