// SPDX-License-Identifier: Apache-2.0

use crate::case_source::{CaseSource, CaseSourceError, RejectedRecord};
use crate::helpers::{emit_ok, rfc3339};
use crate::{CliError, OutputMode};
use hinweis_core::{Clock, ExitCode, MachineError};
use hinweis_fristen::{aggregate_summary, evaluate_batch, labels, FristStatus};
use hinweis_model::CaseStatus;
use hinweis_policies::{resolve_warning_window, DisplaySurface, FristenPolicy, WarningWindow};
use serde_json::{json, Value};
use std::time::Duration;

impl From<CaseSourceError> for CliError {
    fn from(value: CaseSourceError) -> Self {
        match value {
            CaseSourceError::Unavailable(msg) => Self {
                exit_code: ExitCode::DependencyFailure,
                machine: MachineError::new("case_source_unavailable", &msg),
            },
            CaseSourceError::Malformed(msg) => Self {
                exit_code: ExitCode::Validation,
                machine: MachineError::new("invalid_case_file", &msg),
            },
        }
    }
}

/// Surface and window a command renders for. `--window-days` wins over the
/// surface's configured window.
#[derive(Debug, Clone, Copy)]
pub(crate) struct WindowSelection {
    pub(crate) surface: DisplaySurface,
    pub(crate) window: WarningWindow,
}

impl WindowSelection {
    pub(crate) fn resolve(
        policy: &FristenPolicy,
        surface: Option<DisplaySurface>,
        window_days: Option<u32>,
    ) -> Self {
        let surface = surface.unwrap_or(policy.default_surface);
        let window = window_days
            .map(WarningWindow::days)
            .unwrap_or_else(|| resolve_warning_window(policy, Some(surface)));
        Self { surface, window }
    }
}

fn status_labels() -> Value {
    let mut map = serde_json::Map::new();
    for status in [
        FristStatus::Green,
        FristStatus::Yellow,
        FristStatus::Red,
        FristStatus::Done,
        FristStatus::Unknown,
    ] {
        map.insert(
            status.as_str().to_string(),
            Value::from(labels::status_label(status)),
        );
    }
    Value::Object(map)
}

/// Row for a record the case source could not decode. Rendered like any
/// other unknown case.
fn rejected_row(record: &RejectedRecord) -> Value {
    json!({
        "case_id": record.id,
        "status": FristStatus::Unknown.as_str(),
        "days_remaining": null,
        "due_at": null,
        "kind": null,
        "label": "-",
        "tooltip": "-",
        "status_label": labels::status_label(FristStatus::Unknown),
        "decode_error": record.reason,
    })
}

pub(crate) fn run_evaluate(
    source: &dyn CaseSource,
    policy: &FristenPolicy,
    clock: &dyn Clock,
    selection: WindowSelection,
    output_mode: OutputMode,
) -> Result<(), CliError> {
    let batch = source.load_cases()?;
    let now = clock.now();
    let mut evaluated = evaluate_batch(&batch.cases, policy, now, selection.window).into_iter();
    let mut rejected = batch.rejected.iter().peekable();
    let mut rows = Vec::with_capacity(batch.len());
    for index in 0..batch.len() {
        if let Some(record) = rejected.next_if(|r| r.index == index) {
            rows.push(rejected_row(record));
            continue;
        }
        let Some(row) = evaluated.next() else { break };
        let status_label = labels::status_label(row.summary.status);
        let mut value = serde_json::to_value(&row).map_err(|e| CliError::internal(e.to_string()))?;
        if let Value::Object(obj) = &mut value {
            obj.insert("status_label".to_string(), Value::from(status_label));
        }
        rows.push(value);
    }
    emit_ok(
        output_mode,
        json!({
            "command": "evaluate",
            "source": source.describe(),
            "now": rfc3339(now),
            "surface": selection.surface.as_str(),
            "warning_window_days": selection.window.as_days(),
            "cases": rows,
        }),
    )
    .map_err(CliError::internal)
}

fn summary_payload(
    source: &dyn CaseSource,
    policy: &FristenPolicy,
    clock: &dyn Clock,
    selection: WindowSelection,
) -> Result<Value, CaseSourceError> {
    let batch = source.load_cases()?;
    let now = clock.now();
    let mut summary = aggregate_summary(&batch.cases, policy, now, selection.window);
    summary.unknown += batch.rejected.len();
    Ok(json!({
        "command": "summary",
        "source": source.describe(),
        "now": rfc3339(now),
        "surface": selection.surface.as_str(),
        "warning_window_days": selection.window.as_days(),
        "summary": summary,
        "rejected_records": batch.rejected.len(),
        "labels": status_labels(),
    }))
}

pub(crate) fn run_summary(
    source: &dyn CaseSource,
    policy: &FristenPolicy,
    clock: &dyn Clock,
    selection: WindowSelection,
    output_mode: OutputMode,
) -> Result<(), CliError> {
    let payload = summary_payload(source, policy, clock, selection)?;
    emit_ok(output_mode, payload).map_err(CliError::internal)
}

pub(crate) fn run_label(days: i64, output_mode: OutputMode) -> Result<(), CliError> {
    emit_ok(
        output_mode,
        json!({
            "command": "label",
            "days": days,
            "label": labels::format_days_remaining(days),
        }),
    )
    .map_err(CliError::internal)
}

pub(crate) fn run_transitions(raw_status: &str, output_mode: OutputMode) -> Result<(), CliError> {
    let status = CaseStatus::parse(raw_status).ok_or_else(|| CliError {
        exit_code: ExitCode::Usage,
        machine: MachineError::new("unknown_status", "unknown case status")
            .with_detail("status", raw_status),
    })?;
    let allowed: Vec<Value> = status
        .allowed_transitions()
        .iter()
        .map(|next| json!({ "status": next.as_str(), "label": next.label() }))
        .collect();
    emit_ok(
        output_mode,
        json!({
            "command": "transitions",
            "from": status.as_str(),
            "label": status.label(),
            "terminal": status.is_terminal(),
            "allowed": allowed,
        }),
    )
    .map_err(CliError::internal)
}

pub(crate) struct WatchOptions {
    pub(crate) interval: Duration,
    pub(crate) max_refreshes: Option<u64>,
}

/// Re-reads the case source on every tick and prints a fresh summary.
///
/// Stops on Ctrl-C or after `max_refreshes` ticks. A failed refresh is
/// logged and the previous summary stays on screen.
pub(crate) fn run_watch(
    source: &dyn CaseSource,
    policy: &FristenPolicy,
    clock: &dyn Clock,
    selection: WindowSelection,
    options: WatchOptions,
    output_mode: OutputMode,
) -> Result<(), CliError> {
    if options.interval.is_zero() {
        return Err(CliError {
            exit_code: ExitCode::Usage,
            machine: MachineError::new("usage_error", "--interval-secs must be positive"),
        });
    }
    if options.max_refreshes == Some(0) {
        return Err(CliError {
            exit_code: ExitCode::Usage,
            machine: MachineError::new("usage_error", "--max-refreshes must be positive"),
        });
    }
    // Fail fast on an unreadable source instead of logging forever.
    source.load_cases()?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| CliError::internal(format!("failed to start runtime: {e}")))?;

    runtime.block_on(async {
        let mut interval = tokio::time::interval(options.interval);
        let shutdown = tokio::signal::ctrl_c();
        tokio::pin!(shutdown);
        let mut refreshes: u64 = 0;
        loop {
            tokio::select! {
                _ = interval.tick() => {}
                _ = &mut shutdown => {
                    tracing::info!(refreshes, "watch stopped by signal");
                    break;
                }
            }
            match summary_payload(source, policy, clock, selection) {
                Ok(payload) => emit_ok(output_mode, payload).map_err(CliError::internal)?,
                Err(e) => tracing::error!(source = %source.describe(), "refresh failed: {e}"),
            }
            refreshes += 1;
            tracing::debug!(refreshes, "dashboard refreshed");
            if options.max_refreshes.is_some_and(|max| refreshes >= max) {
                break;
            }
        }
        Ok::<(), CliError>(())
    })
}
