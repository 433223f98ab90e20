// SPDX-License-Identifier: Apache-2.0

use clap::{Subcommand, ValueEnum};
use hinweis_policies::DisplaySurface;
use std::path::PathBuf;

#[derive(Subcommand)]
pub(crate) enum PolicyCommand {
    /// Load and validate a policy file.
    Validate {
        #[arg(long)]
        path: Option<PathBuf>,
    },
    /// Print the effective policy and where it came from.
    Show,
    /// Check that a policy edit comes with a schema version bump.
    CheckBump {
        #[arg(long)]
        old: PathBuf,
        #[arg(long)]
        new: PathBuf,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub(crate) enum SurfaceCli {
    CaseList,
    CaseDetail,
    DashboardBanner,
    DeadlineBadge,
}

impl From<SurfaceCli> for DisplaySurface {
    fn from(value: SurfaceCli) -> Self {
        match value {
            SurfaceCli::CaseList => Self::CaseList,
            SurfaceCli::CaseDetail => Self::CaseDetail,
            SurfaceCli::DashboardBanner => Self::DashboardBanner,
            SurfaceCli::DeadlineBadge => Self::DeadlineBadge,
        }
    }
}
