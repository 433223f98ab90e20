// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

use crate::status::CaseStatus;
use crate::timestamp::TimestampField;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError(pub String);

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ValidationError {}

pub const CASE_ID_MAX_LEN: usize = 128;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CaseId(String);

impl CaseId {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        if input.is_empty() {
            return Err(ValidationError("case id must not be empty".to_string()));
        }
        if input.trim() != input {
            return Err(ValidationError(
                "case id must not contain leading/trailing whitespace".to_string(),
            ));
        }
        if input.len() > CASE_ID_MAX_LEN {
            return Err(ValidationError(format!(
                "case id exceeds max length {CASE_ID_MAX_LEN}"
            )));
        }
        if input.chars().any(char::is_control) {
            return Err(ValidationError(
                "case id must not contain control characters".to_string(),
            ));
        }
        Ok(Self(input.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for CaseId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<CaseId> for String {
    fn from(value: CaseId) -> Self {
        value.0
    }
}

impl Display for CaseId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The canonical case shape shared by every view.
///
/// Unknown fields are ignored so that case API payloads with extra
/// presentation data still decode, and an unrecognized `status` decodes to
/// `None`. The German aliases cover the field names older exports used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseRecord {
    pub id: CaseId,
    #[serde(
        default,
        deserialize_with = "crate::status::deserialize_lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub status: Option<CaseStatus>,
    #[serde(default, alias = "eingang_am", skip_serializing_if = "TimestampField::is_missing")]
    pub received_at: TimestampField,
    #[serde(
        default,
        alias = "eingangsbestaetigung_am",
        skip_serializing_if = "TimestampField::is_missing"
    )]
    pub acknowledged_at: TimestampField,
    #[serde(default, alias = "rueckmeldung_am", skip_serializing_if = "TimestampField::is_missing")]
    pub resolved_at: TimestampField,
    #[serde(default, alias = "abgeschlossen_am", skip_serializing_if = "TimestampField::is_missing")]
    pub closed_at: TimestampField,
    #[serde(default, skip_serializing_if = "TimestampField::is_missing")]
    pub purged_at: TimestampField,
}

impl CaseRecord {
    #[must_use]
    pub fn new(id: CaseId, received_at: impl Into<TimestampField>) -> Self {
        Self {
            id,
            status: None,
            received_at: received_at.into(),
            acknowledged_at: TimestampField::Missing,
            resolved_at: TimestampField::Missing,
            closed_at: TimestampField::Missing,
            purged_at: TimestampField::Missing,
        }
    }

    #[must_use]
    pub fn acknowledgment_recorded(&self) -> bool {
        self.acknowledged_at.is_set()
    }

    #[must_use]
    pub fn feedback_recorded(&self) -> bool {
        self.resolved_at.is_set() || self.closed_at.is_set()
    }

    #[must_use]
    pub fn purge_recorded(&self) -> bool {
        self.purged_at.is_set()
    }
}
