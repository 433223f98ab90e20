// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]
//! Shared plumbing for the Hinweisgebersystem deadline tooling.
//!
//! Nothing in here touches the network or spawns processes. The only
//! environment access is config path resolution, and the only wall-clock
//! access is [`SystemClock`].

mod domain;
mod errors;

pub use domain::config::{
    resolve_policy_path, workspace_policy_path, ENV_HINWEIS_POLICY_PATH, WORKSPACE_POLICY_PATH,
};
pub use domain::time::{parse_instant, Clock, FixedClock, SystemClock};
pub use errors::{ConfigPathScope, ErrorContext, ExitCode, MachineError, ResultExt};

pub const CRATE_NAME: &str = "hinweis-core";

pub const ENV_HINWEIS_LOG_LEVEL: &str = "HINWEIS_LOG_LEVEL";
pub const ENV_HINWEIS_LOG_JSON: &str = "HINWEIS_LOG_JSON";
