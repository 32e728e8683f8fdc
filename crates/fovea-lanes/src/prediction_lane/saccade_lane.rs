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

//! Runs the pretrained sequence model over a full gaze history.

use fovea_core::lane::{Lane, LaneError, LaneKind};
use fovea_core::traits::SequenceModel;
use fovea_core::{
    DisplayGeometry, GazeHistory, GazeSample, GazeTensor, InferenceError, PredictionResult,
    Stopwatch,
};

/// Predicts where the current saccade will land.
#[derive(Debug, Clone)]
pub struct SaccadePredictionLane {
    display: DisplayGeometry,
    deadline_ms: Option<f32>,
}

impl SaccadePredictionLane {
    /// Creates a lane without an inference deadline.
    pub fn new(display: DisplayGeometry) -> Self {
        Self {
            display,
            deadline_ms: None,
        }
    }

    /// Discards results that take longer than `deadline_ms` to compute.
    pub fn with_deadline(mut self, deadline_ms: Option<f32>) -> Self {
        self.deadline_ms = deadline_ms;
        self
    }

    /// The configured deadline, if any.
    pub fn deadline_ms(&self) -> Option<f32> {
        self.deadline_ms
    }

    /// Runs one blocking forward pass.
    ///
    /// The history must be full; callers skip the lane otherwise. The model
    /// call itself is never interrupted, a late result is only rejected.
    pub fn run(
        &self,
        model: &mut dyn SequenceModel,
        history: &GazeHistory,
    ) -> Result<PredictionResult, LaneError> {
        let tensor = GazeTensor::from_history(history)
            .ok_or(LaneError::PreconditionFailed("gaze history is not full"))?;

        let stopwatch = Stopwatch::new();
        let output = model.run(&tensor)?;
        let elapsed_ms = stopwatch.elapsed_ms();

        if let Some(deadline_ms) = self.deadline_ms {
            if elapsed_ms > deadline_ms {
                return Err(InferenceError::DeadlineExceeded {
                    elapsed_ms,
                    deadline_ms,
                }
                .into());
            }
        }

        let angle_deg = GazeSample::from(output);
        if !angle_deg.is_finite() {
            return Err(InferenceError::NonFiniteOutput.into());
        }

        let normalized_position = self.display.degrees_to_normalized(angle_deg);
        log::trace!(
            "Predicted ({:.3}, {:.3}) deg -> ({:.4}, {:.4}) in {elapsed_ms:.3} ms",
            angle_deg.x_deg,
            angle_deg.y_deg,
            normalized_position.x,
            normalized_position.y
        );
        Ok(PredictionResult {
            angle_deg,
            normalized_position,
        })
    }
}

impl Lane for SaccadePredictionLane {
    fn strategy_name(&self) -> &'static str {
        "SequenceModel"
    }

    fn lane_kind(&self) -> LaneKind {
        LaneKind::Prediction
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::time::Duration;

    struct ConstantModel {
        output: [f32; 2],
        delay: Duration,
        calls: usize,
    }

    impl ConstantModel {
        fn new(output: [f32; 2]) -> Self {
            Self {
                output,
                delay: Duration::ZERO,
                calls: 0,
            }
        }
    }

    impl SequenceModel for ConstantModel {
        fn name(&self) -> &str {
            "constant"
        }

        fn run(&mut self, _input: &GazeTensor) -> Result<[f32; 2], InferenceError> {
            self.calls += 1;
            std::thread::sleep(self.delay);
            Ok(self.output)
        }
    }

    fn full_history() -> GazeHistory {
        let mut history = GazeHistory::new();
        for i in 0..10 {
            history.push(GazeSample::new(i as f32, 0.0));
        }
        history
    }

    #[test]
    fn test_partial_history_is_rejected_without_calling_model() {
        let lane = SaccadePredictionLane::new(DisplayGeometry::default());
        let mut model = ConstantModel::new([0.0, 0.0]);
        let mut history = GazeHistory::new();
        history.push(GazeSample::new(1.0, 1.0));

        assert!(matches!(
            lane.run(&mut model, &history),
            Err(LaneError::PreconditionFailed(_))
        ));
        assert_eq!(model.calls, 0);
    }

    #[test]
    fn test_zero_degrees_maps_to_screen_center() {
        let lane = SaccadePredictionLane::new(DisplayGeometry::default());
        let mut model = ConstantModel::new([0.0, 0.0]);
        let result = lane.run(&mut model, &full_history()).unwrap();
        assert_abs_diff_eq!(result.normalized_position.x, 0.5, epsilon = 1e-6);
        assert_abs_diff_eq!(result.normalized_position.y, 0.5, epsilon = 1e-6);
        assert_eq!(model.calls, 1);
    }

    #[test]
    fn test_non_finite_output_is_rejected() {
        let lane = SaccadePredictionLane::new(DisplayGeometry::default());
        let mut model = ConstantModel::new([f32::NAN, 0.0]);
        assert_eq!(
            lane.run(&mut model, &full_history()),
            Err(LaneError::Inference(InferenceError::NonFiniteOutput))
        );
    }

    #[test]
    fn test_late_result_is_discarded() {
        let lane = SaccadePredictionLane::new(DisplayGeometry::default()).with_deadline(Some(1.0));
        let mut model = ConstantModel::new([1.0, 1.0]);
        model.delay = Duration::from_millis(20);
        assert!(matches!(
            lane.run(&mut model, &full_history()),
            Err(LaneError::Inference(InferenceError::DeadlineExceeded { .. }))
        ));
    }
}
