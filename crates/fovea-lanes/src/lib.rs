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

//! # Fovea Lanes
//!
//! One lane per stage of the per-frame pipeline. Lanes hold only the
//! constants they were built with; all rolling state belongs to the caller.

#![warn(missing_docs)]

pub mod gaze_lane;
pub mod mask_lane;
pub mod prediction_lane;

pub use gaze_lane::GazeIngestLane;
pub use mask_lane::{MaskGenerationLane, MaskUploadLane};
pub use prediction_lane::{SaccadePredictionLane, UncertaintyLane};
