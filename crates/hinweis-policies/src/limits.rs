// SPDX-License-Identifier: Apache-2.0

pub const MIN_POLICY_SCHEMA_VERSION: u32 = 1;
pub const MAX_SCHEMA_BUMP_STEP: u32 = 1;

/// HinSchG: acknowledgment within seven days of receipt.
pub const MAX_ACKNOWLEDGMENT_DAYS: u64 = 7;
/// Three months after acknowledgment, counted from receipt (7 + 92).
pub const MAX_FEEDBACK_DAYS: u64 = 99;
pub const MIN_RETENTION_YEARS: u64 = 3;
pub const MAX_RETENTION_YEARS: u64 = 10;

pub const MIN_REFRESH_INTERVAL_SECS: u64 = 5;
