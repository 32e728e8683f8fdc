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

//! # Fovea Infra
//!
//! Concrete implementations of the collaborator contracts defined in
//! `fovea-core`: a native dense-network inference runtime, simulated gaze
//! trackers, and shading-rate backends (headless and, with the `graphics`
//! feature, wgpu).

#![warn(missing_docs)]

pub mod graphics;
pub mod inference;
pub mod tracker;

pub use graphics::HeadlessShadingRateBackend;
#[cfg(feature = "graphics")]
pub use graphics::WgpuShadingRateBackend;
pub use inference::{DenseModel, DenseModelDesc, DenseModelError, NativeInferenceRuntime};
pub use tracker::{CursorGazeTracker, ScriptedGazeTracker};
