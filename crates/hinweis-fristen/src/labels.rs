// SPDX-License-Identifier: Apache-2.0

//! German display strings for the case list, detail view and dashboard.

use hinweis_model::DeadlineKind;

use crate::classify::FristStatus;
use crate::evaluate::DeadlineStatusSummary;

#[must_use]
pub const fn status_label(status: FristStatus) -> &'static str {
    match status {
        FristStatus::Green => "Im Plan",
        FristStatus::Yellow => "Bald fällig",
        FristStatus::Red => "Überfällig",
        FristStatus::Done => "Erledigt",
        FristStatus::Unknown => "Unbekannt",
    }
}

#[must_use]
pub const fn kind_label(kind: DeadlineKind) -> &'static str {
    match kind {
        DeadlineKind::Acknowledgment => "Eingangsbestätigung",
        DeadlineKind::Feedback => "Rückmeldung",
        DeadlineKind::Retention => "Aufbewahrung",
        _ => "Frist",
    }
}

/// `-2` -> "2 Tage überfällig", `0` -> "heute fällig", `1` -> "noch 1 Tag".
#[must_use]
pub fn format_days_remaining(days: i64) -> String {
    let n = days.unsigned_abs();
    let unit = if n == 1 { "Tag" } else { "Tage" };
    match days {
        d if d < 0 => format!("{n} {unit} überfällig"),
        0 => "heute fällig".to_string(),
        _ => format!("noch {n} {unit}"),
    }
}

#[must_use]
pub fn summary_label(summary: &DeadlineStatusSummary) -> String {
    match (summary.status, summary.days_remaining) {
        (FristStatus::Done, _) => "erledigt".to_string(),
        (FristStatus::Unknown, _) | (_, None) => "-".to_string(),
        (FristStatus::Red, Some(days)) if days >= 0 => "überfällig".to_string(),
        (_, Some(days)) => format_days_remaining(days),
    }
}

/// "Eingangsbestätigung fällig am 08.01.2025 (noch 2 Tage)", or "-" when the
/// summary carries no pending deadline.
#[must_use]
pub fn tooltip(summary: &DeadlineStatusSummary) -> String {
    match (summary.kind, summary.due_at) {
        (Some(kind), Some(due_at)) if summary.status != FristStatus::Unknown => format!(
            "{} fällig am {} ({})",
            kind_label(kind),
            due_at.format("%d.%m.%Y"),
            summary_label(summary)
        ),
        _ => "-".to_string(),
    }
}
