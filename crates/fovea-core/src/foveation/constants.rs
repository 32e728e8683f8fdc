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

use crate::config::FoveationConfig;
use crate::display::DisplayGeometry;
use crate::error::ConfigError;

/// Normalized radii derived once from a validated configuration.
///
/// All values are fractions of the shorter screen dimension, see
/// [`crate::math::angle_to_normalized_radius`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FoveationConstants {
    /// Base foveal radius before error inflation.
    pub inner_r_base: f32,
    /// Parafoveal radius. Never inflated.
    pub middle_r_base: f32,
    /// Eye-tracker precision expressed as a normalized radius.
    pub sensor_precision_norm: f32,
    /// Damping applied to the total error.
    pub error_scale: f32,
}

impl FoveationConstants {
    /// Validates `config` and derives the constants from it.
    pub fn from_config(config: &FoveationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::derive(
            &config.display,
            config.inner_radius_deg,
            config.middle_radius_deg,
            config.sensor_precision_deg,
            config.error_scale,
        ))
    }

    /// Derives the constants without validation.
    pub fn derive(
        display: &DisplayGeometry,
        inner_deg: f32,
        middle_deg: f32,
        precision_deg: f32,
        error_scale: f32,
    ) -> Self {
        Self {
            inner_r_base: display.angle_to_normalized_radius(inner_deg),
            middle_r_base: display.angle_to_normalized_radius(middle_deg),
            sensor_precision_norm: display.angle_to_normalized_radius(precision_deg),
            error_scale,
        }
    }
}
