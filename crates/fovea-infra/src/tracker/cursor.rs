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

use fovea_core::math::{Extent2D, Vec2};
use fovea_core::traits::GazeTracker;
use fovea_core::TrackerError;

/// Exponential smoothing factor applied to cursor positions.
pub const CURSOR_SMOOTHING: f32 = 0.3;

/// A tracker that follows the mouse pointer.
///
/// Cursor coordinates use a top-left pixel origin; they are flipped to the
/// bottom-left normalized space and smoothed before being reported.
#[derive(Debug, Clone)]
pub struct CursorGazeTracker {
    window: Extent2D,
    smoothing: f32,
    position: Vec2,
    pending: Vec<Vec2>,
}

impl CursorGazeTracker {
    /// Creates a tracker for a window of `window` pixels, resting at the centre.
    pub fn new(window: Extent2D) -> Self {
        Self {
            window,
            smoothing: CURSOR_SMOOTHING,
            position: Vec2::SCREEN_CENTER,
            pending: Vec::new(),
        }
    }

    /// Overrides the smoothing factor, clamped to `[0, 1]`.
    pub fn with_smoothing(mut self, smoothing: f32) -> Self {
        self.smoothing = smoothing.clamp(0.0, 1.0);
        self
    }

    /// Feeds one cursor event in window pixels.
    pub fn on_cursor_moved(&mut self, x_px: f64, y_px: f64) {
        if self.window.is_empty() {
            return;
        }
        let target = Vec2::new(
            (x_px / self.window.width as f64) as f32,
            1.0 - (y_px / self.window.height as f64) as f32,
        );
        self.position = self.position + (target - self.position) * self.smoothing;
        self.pending.push(self.position);
    }

    /// Updates the window size after a resize.
    pub fn resize(&mut self, window: Extent2D) {
        self.window = window;
    }

    /// Current smoothed position.
    pub fn position(&self) -> Vec2 {
        self.position
    }
}

impl GazeTracker for CursorGazeTracker {
    fn model_name(&self) -> String {
        "Mouse Cursor".into()
    }

    fn poll(&mut self) -> Result<Vec<Vec2>, TrackerError> {
        Ok(std::mem::take(&mut self.pending))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_cursor_is_flipped_and_smoothed() {
        let mut tracker = CursorGazeTracker::new(Extent2D::new(1000, 500));
        tracker.on_cursor_moved(1000.0, 0.0);
        let first = tracker.position();
        assert_relative_eq!(first.x, 0.65, epsilon = 1e-6);
        assert_relative_eq!(first.y, 0.65, epsilon = 1e-6);

        tracker.on_cursor_moved(1000.0, 0.0);
        let samples = tracker.poll().unwrap();
        assert_eq!(samples.len(), 2);
        assert!(samples[1].x > samples[0].x);
        assert!(tracker.poll().unwrap().is_empty());
    }

    #[test]
    fn test_converges_on_a_still_cursor() {
        let mut tracker = CursorGazeTracker::new(Extent2D::new(800, 800));
        for _ in 0..60 {
            tracker.on_cursor_moved(200.0, 600.0);
        }
        assert_relative_eq!(tracker.position().x, 0.25, epsilon = 1e-4);
        assert_relative_eq!(tracker.position().y, 0.25, epsilon = 1e-4);
    }
}
