// SPDX-License-Identifier: Apache-2.0

use chrono::{DateTime, Days, Months, Utc};
use hinweis_model::{CaseRecord, Deadline, DeadlineKind};
use hinweis_policies::FristenPolicy;

fn add_days(start: DateTime<Utc>, days: u32) -> Option<DateTime<Utc>> {
    start.checked_add_days(Days::new(u64::from(days)))
}

/// Calendar years; a Feb 29 start lands on Feb 28 in non-leap years.
fn add_years(start: DateTime<Utc>, years: u32) -> Option<DateTime<Utc>> {
    start.checked_add_months(Months::new(years.checked_mul(12)?))
}

/// `None` when `received_at` is missing, unparsable or the offset overflows.
#[must_use]
pub fn acknowledgment_deadline(case: &CaseRecord, policy: &FristenPolicy) -> Option<Deadline> {
    let received = case.received_at.instant()?;
    let due_at = add_days(received, policy.offsets.acknowledgment_days)?;
    Some(Deadline::new(
        DeadlineKind::Acknowledgment,
        due_at,
        case.acknowledgment_recorded(),
    ))
}

#[must_use]
pub fn feedback_deadline(case: &CaseRecord, policy: &FristenPolicy) -> Option<Deadline> {
    let received = case.received_at.instant()?;
    let due_at = add_days(received, policy.offsets.feedback_days)?;
    Some(Deadline::new(
        DeadlineKind::Feedback,
        due_at,
        case.feedback_recorded(),
    ))
}

/// Retention runs from closure, so it only exists once `closed_at` is valid.
#[must_use]
pub fn retention_deadline(case: &CaseRecord, policy: &FristenPolicy) -> Option<Deadline> {
    let closed = case.closed_at.instant()?;
    let due_at = add_years(closed, policy.offsets.retention_years)?;
    Some(Deadline::new(
        DeadlineKind::Retention,
        due_at,
        case.purge_recorded(),
    ))
}

/// All derivable deadlines, in acknowledgment / feedback / retention order.
#[must_use]
pub fn deadlines_for_case(case: &CaseRecord, policy: &FristenPolicy) -> Vec<Deadline> {
    [
        acknowledgment_deadline(case, policy),
        feedback_deadline(case, policy),
        retention_deadline(case, policy),
    ]
    .into_iter()
    .flatten()
    .collect()
}
