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

use crate::error::TrackerError;
use crate::math::Vec2;

/// A source of normalized gaze positions.
pub trait GazeTracker: Send {
    /// Tracker model name. Queried once at startup for diagnostics.
    fn model_name(&self) -> String;

    /// Returns every sample received since the previous poll, oldest first.
    ///
    /// Positions are normalized to `[0, 1]` with a bottom-left origin. An
    /// empty vector means the tracker had nothing new this frame.
    fn poll(&mut self) -> Result<Vec<Vec2>, TrackerError>;
}
