// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]
//! Case model SSOT.
//!
//! Every consumer of case data goes through [`CaseRecord`]; views never pull
//! fields out of untyped JSON.
//!
//! ```compile_fail
//! use hinweis_model::DeadlineKind;
//!
//! fn exhaustive_match(k: DeadlineKind) -> &'static str {
//!     match k {
//!         DeadlineKind::Acknowledgment => "a",
//!         DeadlineKind::Feedback => "f",
//!         DeadlineKind::Retention => "r",
//!     }
//! }
//! ```

mod case;
mod deadline;
mod status;
mod timestamp;

pub use case::{CaseId, CaseRecord, ValidationError, CASE_ID_MAX_LEN};
pub use deadline::{Deadline, DeadlineKind};
pub use status::CaseStatus;
pub use timestamp::TimestampField;

pub const CRATE_NAME: &str = "hinweis-model";
