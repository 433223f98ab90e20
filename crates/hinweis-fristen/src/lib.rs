// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]
//! Deadline status evaluation.
//!
//! Every function here is pure: callers pass `now` and the warning window,
//! nothing reads the wall clock and nothing is cached. Malformed case data
//! degrades to [`FristStatus::Unknown`] instead of failing.

mod classify;
mod deadlines;
mod evaluate;
pub mod labels;
mod summary;

pub use classify::{classify, days_remaining, Classification, FristStatus};
pub use deadlines::{
    acknowledgment_deadline, deadlines_for_case, feedback_deadline, retention_deadline,
};
pub use evaluate::{evaluate_batch, evaluate_case, CaseEvaluation, DeadlineStatusSummary};
pub use summary::{aggregate_summary, AggregateSummary};

pub const CRATE_NAME: &str = "hinweis-fristen";
