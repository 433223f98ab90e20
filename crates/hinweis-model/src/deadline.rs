// SPDX-License-Identifier: Apache-2.0

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum DeadlineKind {
    Acknowledgment,
    Feedback,
    Retention,
}

impl DeadlineKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Acknowledgment => "acknowledgment",
            Self::Feedback => "feedback",
            Self::Retention => "retention",
        }
    }
}

impl fmt::Display for DeadlineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A deadline derived from a case. Never stored; rebuilt on every read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Deadline {
    pub kind: DeadlineKind,
    pub due_at: DateTime<Utc>,
    pub done: bool,
}

impl Deadline {
    #[must_use]
    pub const fn new(kind: DeadlineKind, due_at: DateTime<Utc>, done: bool) -> Self {
        Self { kind, due_at, done }
    }

    #[must_use]
    pub const fn is_pending(&self) -> bool {
        !self.done
    }
}
