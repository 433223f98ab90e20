// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum PolicySchemaVersion {
    #[serde(rename = "1")]
    V1,
}

impl PolicySchemaVersion {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::V1 => "1",
        }
    }
}

/// Deadline configuration shared by every view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FristenPolicy {
    pub schema_version: PolicySchemaVersion,
    pub offsets: DeadlineOffsets,
    pub warning_windows: WarningWindows,
    pub default_surface: DisplaySurface,
    pub refresh: RefreshPolicy,
    pub documented_defaults: Vec<DocumentedDefault>,
}

impl Default for FristenPolicy {
    fn default() -> Self {
        Self {
            schema_version: PolicySchemaVersion::V1,
            offsets: DeadlineOffsets {
                acknowledgment_days: 7,
                feedback_days: 90,
                retention_years: 3,
            },
            warning_windows: WarningWindows {
                case_list: 3,
                case_detail: 3,
                dashboard_banner: 7,
                deadline_badge: 14,
            },
            default_surface: DisplaySurface::CaseList,
            refresh: RefreshPolicy {
                dashboard_interval_secs: 60,
            },
            documented_defaults: vec![
                DocumentedDefault {
                    field: "offsets.feedback_days".to_string(),
                    reason: "three months approximated as 90 days from receipt".to_string(),
                },
                DocumentedDefault {
                    field: "warning_windows".to_string(),
                    reason: "per-surface lead times pending product clarification".to_string(),
                },
            ],
        }
    }
}

/// Legal offsets counted from `received_at` (retention from `closed_at`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeadlineOffsets {
    pub acknowledgment_days: u32,
    pub feedback_days: u32,
    pub retention_years: u32,
}

/// Warning lead time in days, per presentation surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WarningWindows {
    pub case_list: u32,
    pub case_detail: u32,
    pub dashboard_banner: u32,
    pub deadline_badge: u32,
}

impl WarningWindows {
    #[must_use]
    pub const fn for_surface(&self, surface: DisplaySurface) -> WarningWindow {
        let days = match surface {
            DisplaySurface::CaseList => self.case_list,
            DisplaySurface::CaseDetail => self.case_detail,
            DisplaySurface::DashboardBanner => self.dashboard_banner,
            DisplaySurface::DeadlineBadge => self.deadline_badge,
        };
        WarningWindow::days(days)
    }

    pub fn iter(&self) -> impl Iterator<Item = (DisplaySurface, WarningWindow)> + '_ {
        DisplaySurface::ALL
            .into_iter()
            .map(move |surface| (surface, self.for_surface(surface)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum DisplaySurface {
    CaseList,
    CaseDetail,
    DashboardBanner,
    DeadlineBadge,
}

impl DisplaySurface {
    pub const ALL: [Self; 4] = [
        Self::CaseList,
        Self::CaseDetail,
        Self::DashboardBanner,
        Self::DeadlineBadge,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CaseList => "case_list",
            Self::CaseDetail => "case_detail",
            Self::DashboardBanner => "dashboard_banner",
            Self::DeadlineBadge => "deadline_badge",
        }
    }
}

impl fmt::Display for DisplaySurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How far ahead of a due date a pending deadline turns yellow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WarningWindow(u32);

impl WarningWindow {
    #[must_use]
    pub const fn days(days: u32) -> Self {
        Self(days)
    }

    #[must_use]
    pub const fn as_days(self) -> u32 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RefreshPolicy {
    pub dashboard_interval_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DocumentedDefault {
    pub field: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PolicySchema {
    pub schema_version: PolicySchemaVersion,
}
