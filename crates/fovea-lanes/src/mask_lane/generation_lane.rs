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

//! Per-tile rate level assignment around the predicted gaze point.

use fovea_core::lane::{Lane, LaneKind};
use fovea_core::math::Vec2;
use fovea_core::{FoveationConstants, FoveationMask, RateLevel, TileGrid};

/// Builds the foveation mask from a focus point and its uncertainty.
#[derive(Debug, Clone)]
pub struct MaskGenerationLane {
    grid: TileGrid,
    constants: FoveationConstants,
}

impl MaskGenerationLane {
    /// Creates a lane for `grid` using the startup radii in `constants`.
    pub fn new(grid: TileGrid, constants: FoveationConstants) -> Self {
        Self { grid, constants }
    }

    /// The tile grid masks are sized to.
    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    /// Effective `(inner_r, middle_r)` for a given total error.
    ///
    /// Only the inner radius is inflated, and never past the middle radius,
    /// so tiles beyond `middle_r` stay at quarter rate for any error.
    pub fn radii(&self, total_error: f32) -> (f32, f32) {
        let dynamic_error = total_error * self.constants.error_scale;
        let middle_r = self.constants.middle_r_base;
        let inner_r = (self.constants.inner_r_base + dynamic_error).min(middle_r);
        (inner_r, middle_r)
    }

    /// Allocates and fills a new mask.
    pub fn run(&self, focus: Vec2, total_error: f32) -> FoveationMask {
        let mut mask = FoveationMask::filled(self.grid.extent(), RateLevel::Quarter);
        self.run_into(&mut mask, focus, total_error);
        mask
    }

    /// Overwrites every tile of `mask`, reallocating it only if its size
    /// differs from the grid.
    pub fn run_into(&self, mask: &mut FoveationMask, focus: Vec2, total_error: f32) {
        let extent = self.grid.extent();
        if mask.extent() != extent {
            *mask = FoveationMask::filled(extent, RateLevel::Quarter);
        }

        let (inner_r, middle_r) = self.radii(total_error);
        for y in 0..extent.height {
            for x in 0..extent.width {
                let d = self.grid.tile_center(x, y).distance(focus);
                let level = if d < inner_r {
                    RateLevel::Full
                } else if d < middle_r {
                    RateLevel::Half
                } else {
                    RateLevel::Quarter
                };
                mask.set(x, y, level);
            }
        }
    }
}

impl Lane for MaskGenerationLane {
    fn strategy_name(&self) -> &'static str {
        "RadialThreeLevel"
    }

    fn lane_kind(&self) -> LaneKind {
        LaneKind::Mask
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fovea_core::math::Extent2D;
    use fovea_core::FoveationConfig;

    fn reference_lane() -> MaskGenerationLane {
        let constants = FoveationConstants::from_config(&FoveationConfig::default()).unwrap();
        let grid = TileGrid::new(Extent2D::new(1920, 1080), Extent2D::new(16, 16));
        MaskGenerationLane::new(grid, constants)
    }

    #[test]
    fn test_focus_tile_is_full_rate() {
        let lane = reference_lane();
        let focus = lane.grid().tile_center(20, 10);
        let mask = lane.run(focus, 0.0);
        assert_eq!(mask.get(20, 10), Some(RateLevel::Full));
        assert_eq!(mask.extent(), Extent2D::new(120, 68));
    }

    #[test]
    fn test_far_tiles_stay_quarter_whatever_the_error() {
        let lane = reference_lane();
        let (_, middle_r) = lane.radii(0.0);
        assert_eq!(lane.radii(25.0), (middle_r, middle_r));
        for &error in &[0.0, 0.5, 3.0, 25.0] {
            let mask = lane.run(Vec2::new(0.0, 0.0), error);
            let grid = lane.grid();
            for y in 0..grid.extent().height {
                for x in 0..grid.extent().width {
                    if grid.tile_center(x, y).distance(Vec2::ZERO) > middle_r {
                        assert_eq!(mask.get(x, y), Some(RateLevel::Quarter));
                    }
                }
            }
        }
    }

    #[test]
    fn test_error_only_inflates_inner_radius() {
        let lane = reference_lane();
        let (inner0, middle0) = lane.radii(0.0);
        let (inner1, middle1) = lane.radii(1.0);
        assert!((inner1 - inner0 - 0.1).abs() < 1e-6);
        assert_eq!(middle0, middle1);

        let calm = lane.run(Vec2::SCREEN_CENTER, 0.0);
        let shaky = lane.run(Vec2::SCREEN_CENTER, 1.0);
        assert!(shaky.count(RateLevel::Full) > calm.count(RateLevel::Full));
        assert_eq!(
            shaky.count(RateLevel::Quarter),
            calm.count(RateLevel::Quarter)
        );
    }

    #[test]
    fn test_run_into_resizes_foreign_mask() {
        let lane = reference_lane();
        let mut mask = FoveationMask::filled(Extent2D::new(2, 2), RateLevel::Full);
        lane.run_into(&mut mask, Vec2::SCREEN_CENTER, 0.0);
        assert_eq!(mask, lane.run(Vec2::SCREEN_CENTER, 0.0));
    }
}
