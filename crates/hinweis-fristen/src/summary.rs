// SPDX-License-Identifier: Apache-2.0

use chrono::{DateTime, Utc};
use hinweis_model::CaseRecord;
use hinweis_policies::{FristenPolicy, WarningWindow};
use serde::{Deserialize, Serialize};

use crate::classify::FristStatus;
use crate::evaluate::evaluate_case;

/// Dashboard tile counts.
///
/// `total` counts evaluable cases only; `total + unknown` is the number of
/// cases passed in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateSummary {
    pub green: usize,
    pub yellow: usize,
    pub red: usize,
    pub done: usize,
    pub unknown: usize,
    pub total: usize,
}

impl AggregateSummary {
    fn record(&mut self, status: FristStatus) {
        match status {
            FristStatus::Green => self.green += 1,
            FristStatus::Yellow => self.yellow += 1,
            FristStatus::Red => self.red += 1,
            FristStatus::Done => self.done += 1,
            FristStatus::Unknown => {
                self.unknown += 1;
                return;
            }
        }
        self.total += 1;
    }

    /// Cases that still need attention.
    #[must_use]
    pub const fn open(&self) -> usize {
        self.green + self.yellow + self.red
    }
}

#[must_use]
pub fn aggregate_summary(
    cases: &[CaseRecord],
    policy: &FristenPolicy,
    now: DateTime<Utc>,
    window: WarningWindow,
) -> AggregateSummary {
    cases.iter().fold(AggregateSummary::default(), |mut acc, case| {
        acc.record(evaluate_case(case, policy, now, window).status);
        acc
    })
}
