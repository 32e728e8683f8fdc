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

//! Polls the tracker and appends converted samples to the history.

use fovea_core::lane::{Lane, LaneError, LaneKind};
use fovea_core::traits::GazeTracker;
use fovea_core::{DisplayGeometry, GazeHistory, GazeSample};

/// Converts normalized tracker positions to degrees and feeds the history.
#[derive(Debug, Clone)]
pub struct GazeIngestLane {
    display: DisplayGeometry,
}

impl GazeIngestLane {
    /// Creates a lane converting against `display`.
    pub fn new(display: DisplayGeometry) -> Self {
        Self { display }
    }

    /// Polls `tracker` once and pushes every usable sample into `history`.
    ///
    /// Returns the number of samples pushed. Non-finite positions are dropped.
    pub fn run(
        &self,
        tracker: &mut dyn GazeTracker,
        history: &mut GazeHistory,
    ) -> Result<usize, LaneError> {
        let positions = tracker.poll()?;
        let mut pushed = 0;
        for position in positions {
            if !position.is_finite() {
                log::warn!("Dropping non-finite gaze sample ({}, {})", position.x, position.y);
                continue;
            }
            let sample: GazeSample = self.display.normalized_to_degrees(position);
            log::trace!("Gaze sample ({:.3}, {:.3}) deg", sample.x_deg, sample.y_deg);
            history.push(sample);
            pushed += 1;
        }
        Ok(pushed)
    }
}

impl Lane for GazeIngestLane {
    fn strategy_name(&self) -> &'static str {
        "NormalizedToDegrees"
    }

    fn lane_kind(&self) -> LaneKind {
        LaneKind::Gaze
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use fovea_core::math::Vec2;
    use fovea_core::TrackerError;

    struct FixedTracker(Result<Vec<Vec2>, TrackerError>);

    impl GazeTracker for FixedTracker {
        fn model_name(&self) -> String {
            "fixed".into()
        }

        fn poll(&mut self) -> Result<Vec<Vec2>, TrackerError> {
            self.0.clone()
        }
    }

    #[test]
    fn test_pushes_converted_samples_in_order() {
        let lane = GazeIngestLane::new(DisplayGeometry::default());
        let mut tracker = FixedTracker(Ok(vec![Vec2::new(0.5, 0.5), Vec2::new(0.75, 0.5)]));
        let mut history = GazeHistory::new();

        assert_eq!(lane.run(&mut tracker, &mut history).unwrap(), 2);
        let samples: Vec<_> = history.contents().copied().collect();
        assert_abs_diff_eq!(samples[0].x_deg, 0.0, epsilon = 1e-6);
        assert!(samples[1].x_deg > 0.0);
        assert_abs_diff_eq!(samples[1].y_deg, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_drops_non_finite_samples() {
        let lane = GazeIngestLane::new(DisplayGeometry::default());
        let mut tracker = FixedTracker(Ok(vec![
            Vec2::new(f32::NAN, 0.5),
            Vec2::new(0.2, f32::INFINITY),
            Vec2::new(0.2, 0.2),
        ]));
        let mut history = GazeHistory::new();
        assert_eq!(lane.run(&mut tracker, &mut history).unwrap(), 1);
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_tracker_error_is_reported() {
        let lane = GazeIngestLane::new(DisplayGeometry::default());
        let mut tracker = FixedTracker(Err(TrackerError::Disconnected("usb".into())));
        let mut history = GazeHistory::new();
        assert!(matches!(
            lane.run(&mut tracker, &mut history),
            Err(LaneError::Tracker(TrackerError::Disconnected(_)))
        ));
        assert!(history.is_empty());
    }
}
