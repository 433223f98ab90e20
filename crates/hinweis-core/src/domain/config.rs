// SPDX-License-Identifier: Apache-2.0

use std::path::{Path, PathBuf};

use crate::errors::ConfigPathScope;

pub const ENV_HINWEIS_POLICY_PATH: &str = "HINWEIS_POLICY_PATH";
pub const WORKSPACE_POLICY_PATH: &str = "configs/policy/fristen.json";

#[must_use]
pub fn workspace_policy_path(root: &Path) -> PathBuf {
    root.join(WORKSPACE_POLICY_PATH)
}

/// Where the deadline policy is looked up for the given scope.
///
/// The user scope honours `HINWEIS_POLICY_PATH` first, then the XDG config
/// directory, then `~/.config`. Callers decide whether the returned file
/// has to exist.
#[must_use]
pub fn resolve_policy_path(scope: ConfigPathScope) -> PathBuf {
    match scope {
        ConfigPathScope::User => {
            if let Ok(explicit) = std::env::var(ENV_HINWEIS_POLICY_PATH) {
                let trimmed = explicit.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            if let Ok(xdg_config_home) = std::env::var("XDG_CONFIG_HOME") {
                let trimmed = xdg_config_home.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed).join("hinweis").join("fristen.json");
                }
            }
            if let Ok(home) = std::env::var("HOME") {
                let trimmed = home.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed)
                        .join(".config")
                        .join("hinweis")
                        .join("fristen.json");
                }
            }
            PathBuf::from(".hinweis").join("fristen.json")
        }
        ConfigPathScope::Workspace => PathBuf::from(WORKSPACE_POLICY_PATH),
    }
}
