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

use crate::math::Vec2;
use serde::{Deserialize, Serialize};

/// Angular offset of the gaze from the screen centre, in degrees of visual angle.
///
/// Produced once per tracker update and never modified after being stored.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GazeSample {
    /// Horizontal offset, positive to the right.
    pub x_deg: f32,
    /// Vertical offset, positive upwards.
    pub y_deg: f32,
}

impl GazeSample {
    /// Creates a new sample.
    #[inline]
    pub const fn new(x_deg: f32, y_deg: f32) -> Self {
        Self { x_deg, y_deg }
    }

    /// Angular distance to another sample, in degrees.
    #[inline]
    pub fn distance(&self, other: &GazeSample) -> f32 {
        self.as_vec2().distance(other.as_vec2())
    }

    /// Views the sample as a plain vector.
    #[inline]
    pub fn as_vec2(&self) -> Vec2 {
        Vec2::new(self.x_deg, self.y_deg)
    }

    /// Returns `true` if both components are finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x_deg.is_finite() && self.y_deg.is_finite()
    }
}

impl From<[f32; 2]> for GazeSample {
    fn from([x_deg, y_deg]: [f32; 2]) -> Self {
        Self { x_deg, y_deg }
    }
}
