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

use fovea_core::lane::LaneError;
use fovea_core::math::Vec2;
use fovea_core::{PredictionResult, RateLevel, UncertaintyEstimate};

/// What the pipeline did with a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FramePhase {
    /// History not yet full. Prediction, uncertainty, and mask update skipped.
    Warmup,
    /// A fresh prediction drove the mask.
    Predicted,
    /// Inference failed; the previous prediction drove the mask.
    Stale,
}

/// Per-frame summary returned by [`FoveationPipeline::update_frame`](super::FoveationPipeline::update_frame).
#[derive(Debug, Clone, PartialEq)]
pub struct FrameReport {
    /// Zero-based frame counter.
    pub frame_index: u64,
    /// Samples appended to the history this frame.
    pub samples_ingested: usize,
    /// How the frame was handled.
    pub phase: FramePhase,
    /// The prediction in effect after this frame, fresh or stale.
    pub prediction: Option<PredictionResult>,
    /// Uncertainty used for this frame's mask.
    pub uncertainty: UncertaintyEstimate,
    /// Normalized point the mask was centred on.
    pub focus: Vec2,
    /// Tile counts per level, indexed `[Full, Half, Quarter]`.
    pub level_counts: [usize; 3],
    /// `true` if the mask was uploaded and bound.
    pub mask_bound: bool,
    /// Recoverable failures absorbed during the frame.
    pub errors: Vec<LaneError>,
}

impl FrameReport {
    /// Number of tiles at `level`.
    pub fn tiles_at(&self, level: RateLevel) -> usize {
        self.level_counts[level.as_u8() as usize - 1]
    }
}
