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

//! Combines prediction error with tracker precision.

use fovea_core::lane::{Lane, LaneKind};
use fovea_core::{GazeSample, UncertaintyEstimate};

/// Estimates how far off the last prediction was.
#[derive(Debug, Clone, Copy)]
pub struct UncertaintyLane {
    sensor_precision_norm: f32,
}

impl UncertaintyLane {
    /// Creates a lane with the normalized tracker precision.
    pub fn new(sensor_precision_norm: f32) -> Self {
        Self {
            sensor_precision_norm,
        }
    }

    /// `raw_error` is the distance in degrees between `previous_prediction`
    /// and `current_sample`; `total_error` adds the precision in quadrature.
    ///
    /// Note the raw error is in degrees while the precision is normalized.
    /// The two are combined as-is.
    pub fn run(
        &self,
        previous_prediction: &GazeSample,
        current_sample: &GazeSample,
    ) -> UncertaintyEstimate {
        let raw_error = previous_prediction.distance(current_sample);
        let total_error = (raw_error * raw_error
            + self.sensor_precision_norm * self.sensor_precision_norm)
            .sqrt();
        UncertaintyEstimate {
            raw_error,
            total_error,
        }
    }
}

impl Lane for UncertaintyLane {
    fn strategy_name(&self) -> &'static str {
        "Quadrature"
    }

    fn lane_kind(&self) -> LaneKind {
        LaneKind::Uncertainty
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_exact_prediction_leaves_only_precision() {
        let lane = UncertaintyLane::new(0.025);
        let sample = GazeSample::new(3.0, -2.0);
        let estimate = lane.run(&sample, &sample);
        assert_eq!(estimate.raw_error, 0.0);
        assert_relative_eq!(estimate.total_error, 0.025);
    }

    #[test]
    fn test_quadrature_sum() {
        let lane = UncertaintyLane::new(4.0);
        let estimate = lane.run(&GazeSample::new(0.0, 0.0), &GazeSample::new(3.0, 0.0));
        assert_relative_eq!(estimate.raw_error, 3.0);
        assert_relative_eq!(estimate.total_error, 5.0);
    }
}
