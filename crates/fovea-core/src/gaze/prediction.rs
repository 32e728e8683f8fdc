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

use super::GazeSample;
use crate::math::Vec2;

/// The saccade predictor's output for one frame.
///
/// Only produced once the history is full; on other frames the previous
/// value is reused.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PredictionResult {
    /// Predicted gaze offset from the screen centre, in degrees.
    pub angle_deg: GazeSample,
    /// The same point as a normalized screen position.
    pub normalized_position: Vec2,
}

/// Live uncertainty of the prediction.
///
/// `raw_error` is the angular distance between the previous frame's
/// prediction and the newest observed sample. `total_error` combines it in
/// quadrature with the sensor precision constant.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct UncertaintyEstimate {
    /// Prediction error in degrees.
    pub raw_error: f32,
    /// `sqrt(raw_error^2 + sensor_precision^2)`.
    pub total_error: f32,
}

impl UncertaintyEstimate {
    /// The estimate used before any prediction exists.
    pub const ZERO: Self = Self {
        raw_error: 0.0,
        total_error: 0.0,
    };
}
