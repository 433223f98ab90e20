// SPDX-License-Identifier: Apache-2.0

use crate::{CliError, OutputMode};
use chrono::{DateTime, Utc};
use hinweis_core::{
    parse_instant, resolve_policy_path, Clock, ConfigPathScope, ExitCode, FixedClock,
    MachineError, SystemClock, ENV_HINWEIS_POLICY_PATH, WORKSPACE_POLICY_PATH,
};
use hinweis_policies::{load_policy_file, policy_warnings, FristenPolicy};
use serde_json::Value;
use std::path::{Path, PathBuf};

pub(crate) fn emit_ok(output_mode: OutputMode, payload: Value) -> Result<(), String> {
    if output_mode.json {
        println!(
            "{}",
            serde_json::to_string(&payload).map_err(|e| e.to_string())?
        );
    } else {
        println!(
            "{}",
            serde_json::to_string_pretty(&payload).map_err(|e| e.to_string())?
        );
    }
    Ok(())
}

/// `--now` freezes the clock for the whole invocation.
pub(crate) fn clock_from_flag(now: Option<&str>) -> Result<Box<dyn Clock>, CliError> {
    match now {
        None => Ok(Box::new(SystemClock)),
        Some(raw) => parse_instant(raw)
            .map(|instant| Box::new(FixedClock(instant)) as Box<dyn Clock>)
            .ok_or_else(|| CliError {
                exit_code: ExitCode::Usage,
                machine: MachineError::new("usage_error", "--now is not a valid timestamp")
                    .with_detail("now", raw),
            }),
    }
}

pub(crate) fn rfc3339(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
}

/// Where the effective policy was taken from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PolicySource {
    Flag(PathBuf),
    Env(PathBuf),
    User(PathBuf),
    Workspace(PathBuf),
    BuiltIn,
}

impl PolicySource {
    pub(crate) fn describe(&self) -> String {
        match self {
            Self::Flag(path) => format!("flag:{}", path.display()),
            Self::Env(path) => format!("env:{}", path.display()),
            Self::User(path) => format!("user:{}", path.display()),
            Self::Workspace(path) => format!("workspace:{}", path.display()),
            Self::BuiltIn => "built-in".to_string(),
        }
    }

    fn path(&self) -> Option<&Path> {
        match self {
            Self::Flag(path) | Self::Env(path) | Self::User(path) | Self::Workspace(path) => {
                Some(path)
            }
            Self::BuiltIn => None,
        }
    }
}

/// Lookup order: `--policy`, `HINWEIS_POLICY_PATH`, the user config
/// directory, the workspace file, then the built-in defaults.
///
/// Explicitly named files must exist; discovered ones are skipped when absent.
pub(crate) fn locate_policy(flag: Option<&Path>) -> PolicySource {
    if let Some(path) = flag {
        return PolicySource::Flag(path.to_path_buf());
    }
    let env_set = std::env::var(ENV_HINWEIS_POLICY_PATH)
        .map(|v| !v.trim().is_empty())
        .unwrap_or(false);
    let user = resolve_policy_path(ConfigPathScope::User);
    if env_set {
        return PolicySource::Env(user);
    }
    if user.is_file() {
        return PolicySource::User(user);
    }
    let workspace = resolve_policy_path(ConfigPathScope::Workspace);
    if workspace.is_file() {
        return PolicySource::Workspace(workspace);
    }
    PolicySource::BuiltIn
}

pub(crate) fn load_policy(source: &PolicySource) -> Result<FristenPolicy, CliError> {
    let policy = match source.path() {
        Some(path) => load_policy_file(path).map_err(|e| CliError {
            exit_code: ExitCode::Validation,
            machine: MachineError::new("policy_invalid", &e.to_string())
                .with_detail("source", &source.describe()),
        })?,
        None => FristenPolicy::default(),
    };
    tracing::info!(source = %source.describe(), "deadline policy loaded");
    for warning in policy_warnings(&policy) {
        tracing::warn!(rule = warning.id, evidence = %warning.evidence, "{}", warning.message);
    }
    Ok(policy)
}

pub(crate) fn config_paths_payload() -> Value {
    serde_json::json!({
        "policy_env": ENV_HINWEIS_POLICY_PATH,
        "user_policy": resolve_policy_path(ConfigPathScope::User),
        "workspace_policy": WORKSPACE_POLICY_PATH,
    })
}
