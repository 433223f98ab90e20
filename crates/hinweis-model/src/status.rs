// SPDX-License-Identifier: Apache-2.0

use serde::de::{self, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Lifecycle stage of a case.
///
/// Transitions are enforced by the case-management API; the table here only
/// tells the UI which actions to offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum CaseStatus {
    Received,
    #[serde(alias = "acknowledgment_sent")]
    Acknowledged,
    UnderReview,
    InProgress,
    FollowUp,
    FeedbackGiven,
    Closed,
    Archived,
}

impl CaseStatus {
    pub const ALL: [Self; 8] = [
        Self::Received,
        Self::Acknowledged,
        Self::UnderReview,
        Self::InProgress,
        Self::FollowUp,
        Self::FeedbackGiven,
        Self::Closed,
        Self::Archived,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Received => "received",
            Self::Acknowledged => "acknowledged",
            Self::UnderReview => "under_review",
            Self::InProgress => "in_progress",
            Self::FollowUp => "follow_up",
            Self::FeedbackGiven => "feedback_given",
            Self::Closed => "closed",
            Self::Archived => "archived",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Received => "Eingegangen",
            Self::Acknowledged => "Eingangsbestätigung versendet",
            Self::UnderReview => "In Prüfung",
            Self::InProgress => "In Bearbeitung",
            Self::FollowUp => "Folgemaßnahmen",
            Self::FeedbackGiven => "Rückmeldung erteilt",
            Self::Closed => "Abgeschlossen",
            Self::Archived => "Archiviert",
        }
    }

    #[must_use]
    pub const fn allowed_transitions(self) -> &'static [Self] {
        match self {
            Self::Received => &[Self::Acknowledged],
            Self::Acknowledged => &[Self::UnderReview],
            Self::UnderReview => &[Self::InProgress, Self::Closed],
            Self::InProgress => &[Self::FollowUp, Self::FeedbackGiven],
            Self::FollowUp => &[Self::InProgress, Self::FeedbackGiven, Self::Closed],
            Self::FeedbackGiven => &[Self::Closed],
            Self::Closed => &[Self::Archived],
            Self::Archived => &[],
        }
    }

    #[must_use]
    pub fn can_transition(self, to: Self) -> bool {
        self.allowed_transitions().contains(&to)
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Archived)
    }

    pub fn parse(input: &str) -> Option<Self> {
        let s = input.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .or_else(|| (s == "acknowledgment_sent").then_some(Self::Acknowledged))
    }
}

impl fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Decodes an optional status without failing the record.
///
/// Statuses this build does not know, and non-string values, become `None`.
pub(crate) fn deserialize_lenient<'de, D>(deserializer: D) -> Result<Option<CaseStatus>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(LenientStatusVisitor)
}

struct LenientStatusVisitor;

impl LenientStatusVisitor {
    fn unrecognized(raw: &str) -> Option<CaseStatus> {
        tracing::debug!(status = raw, "ignoring unrecognized case status");
        None
    }
}

impl<'de> Visitor<'de> for LenientStatusVisitor {
    type Value = Option<CaseStatus>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a case status string or null")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(CaseStatus::parse(v).or_else(|| Self::unrecognized(v)))
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(self)
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
        Ok(Self::unrecognized(&v.to_string()))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(Self::unrecognized(&v.to_string()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(Self::unrecognized(&v.to_string()))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(Self::unrecognized(&v.to_string()))
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(Self::unrecognized("[array]"))
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
        Ok(Self::unrecognized("[object]"))
    }
}
