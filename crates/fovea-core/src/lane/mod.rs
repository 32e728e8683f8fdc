// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! # Lane Abstraction
//!
//! A **lane** is one swappable stage of the per-frame foveation pipeline.
//! The pipeline owns one lane per stage and drives them in a fixed order:
//!
//! ```text
//! Gaze -> Prediction -> Uncertainty -> Mask -> Upload
//! ```
//!
//! Every lane implements [`Lane`] for identity and classification, and
//! exposes its stage-specific entry point as inherent methods. Failures are
//! reported as [`LaneError`] and never abort the frame.

use crate::error::{BackendError, InferenceError, TrackerError};
use std::fmt;

/// Error type for lane operations.
#[derive(Debug, Clone, PartialEq)]
pub enum LaneError {
    /// The lane was invoked before its precondition held.
    PreconditionFailed(&'static str),
    /// The gaze tracker failed.
    Tracker(TrackerError),
    /// The inference runtime failed or produced unusable output.
    Inference(InferenceError),
    /// The graphics backend rejected an operation.
    Backend(BackendError),
}

impl fmt::Display for LaneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LaneError::PreconditionFailed(what) => write!(f, "Lane precondition failed: {what}"),
            LaneError::Tracker(e) => write!(f, "Lane execution failed: {e}"),
            LaneError::Inference(e) => write!(f, "Lane execution failed: {e}"),
            LaneError::Backend(e) => write!(f, "Lane execution failed: {e}"),
        }
    }
}

impl std::error::Error for LaneError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LaneError::PreconditionFailed(_) => None,
            LaneError::Tracker(e) => Some(e),
            LaneError::Inference(e) => Some(e),
            LaneError::Backend(e) => Some(e),
        }
    }
}

impl From<TrackerError> for LaneError {
    fn from(e: TrackerError) -> Self {
        LaneError::Tracker(e)
    }
}

impl From<InferenceError> for LaneError {
    fn from(e: InferenceError) -> Self {
        LaneError::Inference(e)
    }
}

impl From<BackendError> for LaneError {
    fn from(e: BackendError) -> Self {
        LaneError::Backend(e)
    }
}

/// Classification of lanes by pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LaneKind {
    /// Tracker polling and degree conversion.
    Gaze,
    /// Saccade landing-point prediction.
    Prediction,
    /// Prediction error estimation.
    Uncertainty,
    /// Per-tile rate level generation.
    Mask,
    /// Mask serialization and shading-rate binding.
    Upload,
}

impl fmt::Display for LaneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LaneKind::Gaze => write!(f, "Gaze"),
            LaneKind::Prediction => write!(f, "Prediction"),
            LaneKind::Uncertainty => write!(f, "Uncertainty"),
            LaneKind::Mask => write!(f, "Mask"),
            LaneKind::Upload => write!(f, "Upload"),
        }
    }
}

/// Base trait for every pipeline lane.
pub trait Lane: Send {
    /// Human-readable name identifying this lane's strategy.
    ///
    /// Used for logging. Should be unique within a lane kind.
    fn strategy_name(&self) -> &'static str;

    /// The pipeline stage this lane implements.
    fn lane_kind(&self) -> LaneKind;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_lane_error_wraps_domain_errors() {
        let err: LaneError = InferenceError::NonFiniteOutput.into();
        assert_eq!(err, LaneError::Inference(InferenceError::NonFiniteOutput));
        assert!(err.source().is_some());
        assert!(err.to_string().contains("non-finite"));

        let err = LaneError::PreconditionFailed("history not full");
        assert!(err.source().is_none());
    }

    #[test]
    fn test_lane_kind_display() {
        assert_eq!(LaneKind::Mask.to_string(), "Mask");
        assert_eq!(LaneKind::Upload.to_string(), "Upload");
    }
}
