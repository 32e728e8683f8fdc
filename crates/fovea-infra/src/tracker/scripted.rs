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

use fovea_core::math::Vec2;
use fovea_core::traits::GazeTracker;
use fovea_core::TrackerError;
use std::collections::VecDeque;

/// One poll's worth of scripted tracker output.
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptStep {
    /// Samples returned by the poll.
    Samples(Vec<Vec2>),
    /// An error returned by the poll.
    Fail(TrackerError),
}

/// Replays a fixed script, one step per poll. Once exhausted every poll is empty.
#[derive(Debug, Clone, Default)]
pub struct ScriptedGazeTracker {
    steps: VecDeque<ScriptStep>,
}

impl ScriptedGazeTracker {
    /// Creates a tracker from explicit steps.
    pub fn new(steps: impl IntoIterator<Item = ScriptStep>) -> Self {
        Self {
            steps: steps.into_iter().collect(),
        }
    }

    /// One sample per poll.
    pub fn from_positions(positions: impl IntoIterator<Item = Vec2>) -> Self {
        Self::new(positions.into_iter().map(|p| ScriptStep::Samples(vec![p])))
    }

    /// A fixation on `from`, a smoothstep saccade to `to`, then a fixation on `to`.
    pub fn saccade(from: Vec2, to: Vec2, fixation_frames: usize, saccade_frames: usize) -> Self {
        let fixation = std::iter::repeat(from).take(fixation_frames);
        let travel = (1..=saccade_frames).map(move |i| {
            let t = i as f32 / saccade_frames as f32;
            let eased = t * t * (3.0 - 2.0 * t);
            from + (to - from) * eased
        });
        let landing = std::iter::repeat(to).take(fixation_frames);
        Self::from_positions(fixation.chain(travel).chain(landing))
    }

    /// Appends a step to the script.
    pub fn push(&mut self, step: ScriptStep) {
        self.steps.push_back(step);
    }

    /// Steps not yet replayed.
    pub fn remaining(&self) -> usize {
        self.steps.len()
    }
}

impl GazeTracker for ScriptedGazeTracker {
    fn model_name(&self) -> String {
        "Scripted Replay".into()
    }

    fn poll(&mut self) -> Result<Vec<Vec2>, TrackerError> {
        match self.steps.pop_front() {
            Some(ScriptStep::Samples(samples)) => Ok(samples),
            Some(ScriptStep::Fail(error)) => Err(error),
            None => Ok(Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replays_steps_in_order() {
        let mut tracker = ScriptedGazeTracker::new([
            ScriptStep::Samples(vec![Vec2::new(0.1, 0.1), Vec2::new(0.2, 0.2)]),
            ScriptStep::Fail(TrackerError::Disconnected("cable".into())),
        ]);
        assert_eq!(tracker.poll().unwrap().len(), 2);
        assert!(tracker.poll().is_err());
        assert_eq!(tracker.poll().unwrap(), Vec::new());
        assert_eq!(tracker.remaining(), 0);
    }

    #[test]
    fn test_saccade_path_ends_on_target() {
        let from = Vec2::new(0.2, 0.5);
        let to = Vec2::new(0.8, 0.5);
        let mut tracker = ScriptedGazeTracker::saccade(from, to, 3, 4);
        assert_eq!(tracker.remaining(), 10);

        let path: Vec<Vec2> = (0..10).flat_map(|_| tracker.poll().unwrap()).collect();
        assert_eq!(path[0], from);
        assert!(path[6].distance(to) < 1e-6);
        assert_eq!(path[9], to);
        assert!(path.windows(2).all(|w| w[1].x >= w[0].x - 1e-6));
    }
}
