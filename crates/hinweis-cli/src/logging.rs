// SPDX-License-Identifier: Apache-2.0

use crate::LogFlags;
use hinweis_core::{ENV_HINWEIS_LOG_JSON, ENV_HINWEIS_LOG_LEVEL};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn env_bool(name: &str) -> bool {
    std::env::var(name)
        .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

fn filter_for(log_flags: LogFlags) -> EnvFilter {
    if log_flags.trace || log_flags.verbose > 1 {
        return EnvFilter::new("trace");
    }
    if log_flags.verbose == 1 {
        return EnvFilter::new("debug");
    }
    if log_flags.quiet {
        return EnvFilter::new("error");
    }
    EnvFilter::try_from_env(ENV_HINWEIS_LOG_LEVEL)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Logs go to stderr so stdout stays machine readable.
pub(crate) fn init_tracing(log_flags: LogFlags) {
    let filter = filter_for(log_flags);
    let result = if env_bool(ENV_HINWEIS_LOG_JSON) {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init()
    };
    if result.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}
