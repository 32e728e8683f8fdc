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

//! # Fovea Agents
//!
//! The [`FoveationPipeline`](foveation_agent::FoveationPipeline) owns the gaze
//! history, the last prediction, and the current mask, and runs every lane
//! once per frame on the caller's thread.

#![warn(missing_docs)]

pub mod foveation_agent;

pub use foveation_agent::{FoveationPipeline, FramePhase, FrameReport};
