// SPDX-License-Identifier: Apache-2.0

use hinweis_core::ResultExt;
use hinweis_model::CaseRecord;
use serde_json::Value;
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum CaseSourceError {
    Unavailable(String),
    Malformed(String),
}

impl fmt::Display for CaseSourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable(msg) | Self::Malformed(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for CaseSourceError {}

/// A record that could not be decoded, kept so it still shows up as an
/// unknown row and in the unknown count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RejectedRecord {
    pub(crate) index: usize,
    pub(crate) id: Option<String>,
    pub(crate) reason: String,
}

/// Decoded case export. `cases` and `rejected` together cover every element
/// of the input list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct CaseBatch {
    pub(crate) cases: Vec<CaseRecord>,
    pub(crate) rejected: Vec<RejectedRecord>,
}

impl CaseBatch {
    pub(crate) fn len(&self) -> usize {
        self.cases.len() + self.rejected.len()
    }
}

/// Where case records come from. Re-read on every dashboard refresh.
pub(crate) trait CaseSource {
    fn describe(&self) -> String;
    fn load_cases(&self) -> Result<CaseBatch, CaseSourceError>;
}

/// A case export on disk: either a bare JSON array or `{ "cases": [...] }`.
pub(crate) struct JsonFileCaseSource {
    path: PathBuf,
}

impl JsonFileCaseSource {
    pub(crate) fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CaseSource for JsonFileCaseSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn load_cases(&self) -> Result<CaseBatch, CaseSourceError> {
        let raw = std::fs::read_to_string(&self.path)
            .with_context("read case file")
            .map_err(|e| CaseSourceError::Unavailable(format!("{}: {e}", self.path.display())))?;
        decode_cases(&raw)
    }
}

/// Decodes a case export element by element.
///
/// Only the envelope can fail the whole file. A record that does not decode
/// is logged and returned in `rejected`.
pub(crate) fn decode_cases(raw: &str) -> Result<CaseBatch, CaseSourceError> {
    let value: Value = serde_json::from_str(raw)
        .map_err(|e| CaseSourceError::Malformed(format!("case file is not JSON: {e}")))?;
    let list = match value {
        Value::Array(items) => items,
        Value::Object(mut obj) => match obj.remove("cases") {
            Some(Value::Array(items)) => items,
            Some(_) => {
                return Err(CaseSourceError::Malformed("`cases` must be an array".to_string()))
            }
            None => {
                return Err(CaseSourceError::Malformed(
                    "case file object must have a `cases` array".to_string(),
                ))
            }
        },
        _ => {
            return Err(CaseSourceError::Malformed(
                "case file must be an array or an object with `cases`".to_string(),
            ))
        }
    };

    let mut batch = CaseBatch::default();
    for (index, item) in list.into_iter().enumerate() {
        let id = item.get("id").and_then(Value::as_str).map(str::to_string);
        match serde_json::from_value::<CaseRecord>(item) {
            Ok(case) => batch.cases.push(case),
            Err(e) => {
                tracing::warn!(index, case_id = ?id, "skipping undecodable case record: {e}");
                batch.rejected.push(RejectedRecord {
                    index,
                    id,
                    reason: e.to_string(),
                });
            }
        }
    }
    Ok(batch)
}
