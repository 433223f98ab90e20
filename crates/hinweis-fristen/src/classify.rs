// SPDX-License-Identifier: Apache-2.0

use chrono::{DateTime, Duration, Utc};
use hinweis_policies::WarningWindow;
use serde::{Deserialize, Serialize};
use std::fmt;

const DAY_SECS: i64 = 24 * 60 * 60;

/// Traffic-light state of a deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum FristStatus {
    Green,
    Yellow,
    Red,
    Done,
    Unknown,
}

impl FristStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Red => "red",
            Self::Done => "done",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for FristStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub status: FristStatus,
    pub days_remaining: i64,
}

/// Whole calendar days until `due_at`, rounded up toward the future.
///
/// Computed on whole seconds; a sub-second remainder is dropped. Negative once
/// the due date has passed by at least a full day.
#[must_use]
pub fn days_remaining(due_at: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let secs = due_at.signed_duration_since(now).num_seconds();
    let whole = secs.div_euclid(DAY_SECS);
    if secs.rem_euclid(DAY_SECS) == 0 {
        whole
    } else {
        whole + 1
    }
}

#[must_use]
pub fn classify(
    due_at: DateTime<Utc>,
    done: bool,
    now: DateTime<Utc>,
    window: WarningWindow,
) -> Classification {
    let days = days_remaining(due_at, now);
    let status = if done {
        FristStatus::Done
    } else if now > due_at {
        FristStatus::Red
    } else if due_at.signed_duration_since(now) <= Duration::days(i64::from(window.as_days())) {
        FristStatus::Yellow
    } else {
        FristStatus::Green
    };
    Classification {
        status,
        days_remaining: days,
    }
}
