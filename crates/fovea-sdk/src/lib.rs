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

//! The public-facing entry point of the foveated rendering pipeline.
//!
//! Load a [`FoveationConfig`](fovea_core::FoveationConfig) with
//! [`config::load_config`], pick a tracker, an inference runtime and a
//! shading-rate backend, then drive a [`FoveatedSession`] once per frame.

pub mod config;
mod session;

pub use session::{FoveatedSession, DEFAULT_SCENE};

pub mod prelude {
    //! Types most applications need.
    pub use crate::config::{load_config, parse_config};
    pub use crate::FoveatedSession;
    pub use fovea_agents::{FramePhase, FrameReport};
    pub use fovea_core::math::{Extent2D, Vec2};
    pub use fovea_core::traits::{
        GazeTracker, InferenceRuntime, RenderRequest, SceneId, ShadingRateBackend,
    };
    pub use fovea_core::{DisplayGeometry, FoveationConfig, ModelSource, RateLevel};
    #[cfg(feature = "graphics")]
    pub use fovea_infra::WgpuShadingRateBackend;
    pub use fovea_infra::{
        CursorGazeTracker, HeadlessShadingRateBackend, NativeInferenceRuntime, ScriptedGazeTracker,
    };
}
