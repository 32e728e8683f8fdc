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

//! # Fovea Core
//!
//! Foundational crate containing the unit conversion layer, the gaze and
//! foveation data model, and the contracts every external collaborator
//! (eye tracker, inference runtime, graphics backend) must satisfy.

#![warn(missing_docs)]

pub mod config;
pub mod display;
pub mod error;
pub mod foveation;
pub mod gaze;
pub mod lane;
pub mod math;
pub mod telemetry;
pub mod traits;
pub mod utils;

pub use config::{FoveationConfig, ModelSource};
pub use display::DisplayGeometry;
pub use error::{BackendError, ConfigError, FoveaError, InferenceError, TrackerError};
pub use foveation::{
    FoveationConstants, FoveationMask, RateLevel, ShadingRate, ShadingRatePalette, TileGrid,
};
pub use gaze::{GazeHistory, GazeSample, GazeTensor, PredictionResult, UncertaintyEstimate};
pub use utils::timer::Stopwatch;
