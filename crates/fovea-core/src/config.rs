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

//! Static configuration of the foveation pipeline, read once at startup.

use crate::display::DisplayGeometry;
use crate::error::ConfigError;
use crate::gaze::HISTORY_CAPACITY;
use crate::math::Vec2;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where the pretrained saccade model is loaded from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ModelSource {
    /// A model file on disk.
    Path(PathBuf),
    /// A model already read into memory.
    Bytes(Vec<u8>),
}

impl ModelSource {
    /// Human readable description used in logs and errors.
    pub fn describe(&self) -> String {
        match self {
            ModelSource::Path(path) => format!("'{}'", path.display()),
            ModelSource::Bytes(bytes) => format!("in-memory buffer ({} bytes)", bytes.len()),
        }
    }
}

/// Every tunable of the pipeline. No dynamic reload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FoveationConfig {
    /// Physical display the radii are calibrated against.
    pub display: DisplayGeometry,
    /// Gaze history length. Fixed by the model input shape.
    pub history_capacity: usize,
    /// Foveal (full rate) radius in degrees of visual angle.
    pub inner_radius_deg: f32,
    /// Parafoveal (half rate) radius in degrees of visual angle.
    pub middle_radius_deg: f32,
    /// Eye-tracker precision in degrees of visual angle.
    pub sensor_precision_deg: f32,
    /// Damping applied to the total error before it inflates the inner radius.
    pub error_scale: f32,
    /// Focus point used until the first prediction, normalized.
    pub default_gaze: Vec2,
    /// Pretrained model location. `None` lets the caller supply a loaded model.
    pub model: Option<ModelSource>,
    /// Optional upper bound on a single inference call.
    pub inference_deadline_ms: Option<f32>,
}

impl Default for FoveationConfig {
    fn default() -> Self {
        Self {
            display: DisplayGeometry::default(),
            history_capacity: HISTORY_CAPACITY,
            inner_radius_deg: 6.5,
            middle_radius_deg: 14.25,
            sensor_precision_deg: 1.01,
            error_scale: 0.1,
            default_gaze: Vec2::SCREEN_CENTER,
            model: None,
            inference_deadline_ms: None,
        }
    }
}

impl FoveationConfig {
    /// Returns the configuration with its display replaced.
    pub fn with_display(mut self, display: DisplayGeometry) -> Self {
        self.display = display;
        self
    }

    /// Returns the configuration with its model source replaced.
    pub fn with_model(mut self, model: ModelSource) -> Self {
        self.model = Some(model);
        self
    }

    /// Rejects any configuration the pipeline cannot start with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.display.validate()?;

        if self.history_capacity != HISTORY_CAPACITY {
            return Err(ConfigError::InvalidHistoryCapacity {
                expected: HISTORY_CAPACITY,
                found: self.history_capacity,
            });
        }

        check_non_negative("inner_radius_deg", self.inner_radius_deg)?;
        check_non_negative("middle_radius_deg", self.middle_radius_deg)?;
        check_non_negative("sensor_precision_deg", self.sensor_precision_deg)?;
        check_non_negative("error_scale", self.error_scale)?;

        if self.middle_radius_deg < self.inner_radius_deg {
            return Err(ConfigError::RadiusOrdering {
                inner_deg: self.inner_radius_deg,
                middle_deg: self.middle_radius_deg,
            });
        }

        // Sanity bound on the foveal radii; the chord itself holds up to 180 degrees.
        for (field, value) in [
            ("inner_radius_deg", self.inner_radius_deg),
            ("middle_radius_deg", self.middle_radius_deg),
        ] {
            if value >= 90.0 {
                return Err(ConfigError::InvalidParameter { field, value });
            }
        }

        if !self.default_gaze.is_finite() {
            return Err(ConfigError::InvalidParameter {
                field: "default_gaze",
                value: f32::NAN,
            });
        }

        if let Some(deadline) = self.inference_deadline_ms {
            if !(deadline.is_finite() && deadline > 0.0) {
                return Err(ConfigError::InvalidParameter {
                    field: "inference_deadline_ms",
                    value: deadline,
                });
            }
        }

        Ok(())
    }
}

fn check_non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidParameter { field, value })
    }
}
