// SPDX-License-Identifier: GPL-3.0-only

//! Booth workflow steps

use std::fmt;

/// How photos are being acquired
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AcquisitionMode {
    /// Live camera with optional countdown
    #[default]
    Camera,
    /// Files chosen by the user
    Upload,
}

/// Workflow step
///
/// ```text
/// Welcome → Acquisition(Camera | Upload) → Review → Reorder
///         → FilterApply → CustomizeLayout → Export
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Step {
    #[default]
    Welcome,
    Acquisition(AcquisitionMode),
    Review,
    Reorder,
    FilterApply,
    CustomizeLayout,
    /// Terminal; only restart leaves it
    Export,
}

impl Step {
    /// Step reached by an explicit "next"
    ///
    /// Welcome has no single successor (the user picks a mode) and Export is
    /// terminal, so both return `None`.
    pub fn next(&self) -> Option<Step> {
        match self {
            Step::Welcome | Step::Export => None,
            Step::Acquisition(_) => Some(Step::Review),
            Step::Review => Some(Step::Reorder),
            Step::Reorder => Some(Step::FilterApply),
            Step::FilterApply => Some(Step::CustomizeLayout),
            Step::CustomizeLayout => Some(Step::Export),
        }
    }

    /// Step reached by "back"; `mode` is the last acquisition mode used
    pub fn previous(&self, mode: AcquisitionMode) -> Option<Step> {
        match self {
            Step::Welcome | Step::Export => None,
            Step::Acquisition(_) => Some(Step::Welcome),
            Step::Review => Some(Step::Acquisition(mode)),
            Step::Reorder => Some(Step::Review),
            Step::FilterApply => Some(Step::Reorder),
            Step::CustomizeLayout => Some(Step::FilterApply),
        }
    }

    pub fn is_acquisition(&self) -> bool {
        matches!(self, Step::Acquisition(_))
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Welcome => write!(f, "welcome"),
            Step::Acquisition(AcquisitionMode::Camera) => write!(f, "camera"),
            Step::Acquisition(AcquisitionMode::Upload) => write!(f, "upload"),
            Step::Review => write!(f, "review"),
            Step::Reorder => write!(f, "reorder"),
            Step::FilterApply => write!(f, "filter"),
            Step::CustomizeLayout => write!(f, "customize"),
            Step::Export => write!(f, "export"),
        }
    }
}
