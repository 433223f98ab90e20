// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use hinweis_core::parse_instant;
use serde::de::{self, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A lifecycle timestamp as it arrives from the case API.
///
/// Decoding never fails: absent, `null` and blank values are `Missing`,
/// anything that does not parse is kept verbatim as `Invalid`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TimestampField {
    #[default]
    Missing,
    Valid(DateTime<Utc>),
    Invalid(String),
}

impl TimestampField {
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        if raw.trim().is_empty() {
            return Self::Missing;
        }
        match parse_instant(raw) {
            Some(instant) => Self::Valid(instant),
            None => Self::Invalid(raw.to_string()),
        }
    }

    /// Non-null, whether or not the stored value parses.
    #[must_use]
    pub const fn is_set(&self) -> bool {
        !matches!(self, Self::Missing)
    }

    #[must_use]
    pub const fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    #[must_use]
    pub const fn instant(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Valid(instant) => Some(*instant),
            Self::Missing | Self::Invalid(_) => None,
        }
    }
}

impl From<DateTime<Utc>> for TimestampField {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Valid(value)
    }
}

impl From<Option<DateTime<Utc>>> for TimestampField {
    fn from(value: Option<DateTime<Utc>>) -> Self {
        value.map_or(Self::Missing, Self::Valid)
    }
}

impl fmt::Display for TimestampField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => write!(f, "-"),
            Self::Valid(instant) => write!(f, "{}", instant.to_rfc3339_opts(SecondsFormat::Secs, true)),
            Self::Invalid(raw) => write!(f, "{raw}"),
        }
    }
}

impl Serialize for TimestampField {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Missing => serializer.serialize_none(),
            Self::Valid(instant) => {
                serializer.serialize_str(&instant.to_rfc3339_opts(SecondsFormat::Secs, true))
            }
            Self::Invalid(raw) => serializer.serialize_str(raw),
        }
    }
}

impl<'de> Deserialize<'de> for TimestampField {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(TimestampVisitor)
    }
}

struct TimestampVisitor;

impl<'de> Visitor<'de> for TimestampVisitor {
    type Value = TimestampField;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a timestamp string or null")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(TimestampField::parse(v))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(TimestampField::parse(&v))
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(TimestampField::Missing)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(TimestampField::Missing)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(self)
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
        Ok(TimestampField::Invalid(v.to_string()))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(TimestampField::Invalid(v.to_string()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(TimestampField::Invalid(v.to_string()))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(TimestampField::Invalid(v.to_string()))
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(TimestampField::Invalid("[array]".to_string()))
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
        Ok(TimestampField::Invalid("[object]".to_string()))
    }
}
