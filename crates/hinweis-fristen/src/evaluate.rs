// SPDX-License-Identifier: Apache-2.0

use chrono::{DateTime, Utc};
use hinweis_model::{CaseId, CaseRecord, DeadlineKind};
use hinweis_policies::{FristenPolicy, WarningWindow};
use serde::{Deserialize, Serialize};

use crate::classify::{classify, FristStatus};
use crate::deadlines::{acknowledgment_deadline, feedback_deadline};
use crate::labels;

/// Traffic-light state of a case, reduced to its most urgent deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeadlineStatusSummary {
    pub status: FristStatus,
    pub days_remaining: Option<i64>,
    pub due_at: Option<DateTime<Utc>>,
    pub kind: Option<DeadlineKind>,
}

impl DeadlineStatusSummary {
    #[must_use]
    pub const fn done() -> Self {
        Self {
            status: FristStatus::Done,
            days_remaining: None,
            due_at: None,
            kind: None,
        }
    }

    #[must_use]
    pub const fn unknown() -> Self {
        Self {
            status: FristStatus::Unknown,
            days_remaining: None,
            due_at: None,
            kind: None,
        }
    }
}

/// Reports the pending acknowledgment or feedback deadline that falls due
/// first. Acknowledgment wins ties.
#[must_use]
pub fn evaluate_case(
    case: &CaseRecord,
    policy: &FristenPolicy,
    now: DateTime<Utc>,
    window: WarningWindow,
) -> DeadlineStatusSummary {
    if case.received_at.instant().is_none() {
        tracing::debug!(
            case_id = %case.id,
            received_at = %case.received_at,
            "case has no usable receipt timestamp"
        );
        return DeadlineStatusSummary::unknown();
    }
    let (Some(ack), Some(feedback)) = (
        acknowledgment_deadline(case, policy),
        feedback_deadline(case, policy),
    ) else {
        tracing::debug!(case_id = %case.id, "deadline arithmetic out of range");
        return DeadlineStatusSummary::unknown();
    };

    let Some(next) = [ack, feedback]
        .into_iter()
        .filter(|deadline| deadline.is_pending())
        .min_by_key(|deadline| deadline.due_at)
    else {
        return DeadlineStatusSummary::done();
    };

    let classification = classify(next.due_at, next.done, now, window);
    DeadlineStatusSummary {
        status: classification.status,
        days_remaining: Some(classification.days_remaining),
        due_at: Some(next.due_at),
        kind: Some(next.kind),
    }
}

/// One row of a case list: the summary plus its rendered German labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseEvaluation {
    pub case_id: CaseId,
    #[serde(flatten)]
    pub summary: DeadlineStatusSummary,
    pub label: String,
    pub tooltip: String,
}

impl CaseEvaluation {
    #[must_use]
    pub fn new(case_id: CaseId, summary: DeadlineStatusSummary) -> Self {
        Self {
            case_id,
            label: labels::summary_label(&summary),
            tooltip: labels::tooltip(&summary),
            summary,
        }
    }
}

#[must_use]
pub fn evaluate_batch(
    cases: &[CaseRecord],
    policy: &FristenPolicy,
    now: DateTime<Utc>,
    window: WarningWindow,
) -> Vec<CaseEvaluation> {
    cases
        .iter()
        .map(|case| CaseEvaluation::new(case.id.clone(), evaluate_case(case, policy, now, window)))
        .collect()
}
