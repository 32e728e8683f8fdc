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

//! Explicit context object holding all rolling pipeline state.

use super::metrics::{self, PipelineMetrics};
use super::report::{FramePhase, FrameReport};
use fovea_core::foveation::ShadingRatePalette;
use fovea_core::lane::{Lane, LaneError};
use fovea_core::math::Vec2;
use fovea_core::traits::{GazeTracker, SequenceModel, ShadingRateBackend};
use fovea_core::{
    DisplayGeometry, FoveaError, FoveationConfig, FoveationConstants, FoveationMask,
    GazeHistory, PredictionResult, RateLevel, TileGrid, UncertaintyEstimate,
};
use fovea_lanes::{
    GazeIngestLane, MaskGenerationLane, MaskUploadLane, SaccadePredictionLane, UncertaintyLane,
};
use fovea_telemetry::{MetricsRegistry, ScopedMetricTimer};

/// Gaze-contingent foveation pipeline.
///
/// Single-threaded: [`update_frame`](Self::update_frame) runs every stage on
/// the caller's thread and never fails. Only construction can fail.
pub struct FoveationPipeline {
    display: DisplayGeometry,
    constants: FoveationConstants,
    default_gaze: Vec2,

    ingest_lane: GazeIngestLane,
    prediction_lane: SaccadePredictionLane,
    uncertainty_lane: UncertaintyLane,
    mask_lane: MaskGenerationLane,
    upload_lane: MaskUploadLane,

    model: Box<dyn SequenceModel>,
    history: GazeHistory,
    last_prediction: Option<PredictionResult>,
    uncertainty: UncertaintyEstimate,
    mask: FoveationMask,
    frame_index: u64,

    metrics: Option<PipelineMetrics>,
}

impl FoveationPipeline {
    /// Validates `config`, derives the radii, and prepares `backend`.
    ///
    /// Fails if the configuration is invalid or the backend's shading-rate
    /// palette is too small. The initial mask is centred on the configured
    /// default gaze with zero error.
    pub fn new(
        config: &FoveationConfig,
        model: Box<dyn SequenceModel>,
        backend: &mut dyn ShadingRateBackend,
    ) -> Result<Self, FoveaError> {
        let constants = FoveationConstants::from_config(config)?;
        let display = config.display;

        let palette = ShadingRatePalette::standard(backend.palette_size())?;
        backend.configure_palette(&palette)?;

        let tile = backend.query_tile_size();
        let grid = TileGrid::new(display.resolution(), tile);

        log::info!(
            "Foveation display {}x{} px, {:.1} in at {:.0} mm",
            display.width_px,
            display.height_px,
            display.diagonal_inches,
            display.distance_mm
        );
        log::info!(
            "Foveation radii: inner {:.4}, middle {:.4}, precision {:.4} (normalized)",
            constants.inner_r_base,
            constants.middle_r_base,
            constants.sensor_precision_norm
        );
        log::info!(
            "Backend '{}': tile {}x{}, grid {}x{}, palette {:x?}",
            backend.backend_name(),
            tile.width,
            tile.height,
            grid.extent().width,
            grid.extent().height,
            palette.gl_enums()
        );
        log::info!("Saccade model '{}'", model.name());

        let mask_lane = MaskGenerationLane::new(grid, constants);
        let mask = mask_lane.run(config.default_gaze, 0.0);

        let pipeline = Self {
            display,
            constants,
            default_gaze: config.default_gaze,
            ingest_lane: GazeIngestLane::new(display),
            prediction_lane: SaccadePredictionLane::new(display)
                .with_deadline(config.inference_deadline_ms),
            uncertainty_lane: UncertaintyLane::new(constants.sensor_precision_norm),
            mask_lane,
            upload_lane: MaskUploadLane::new(),
            model,
            history: GazeHistory::with_capacity(config.history_capacity),
            last_prediction: None,
            uncertainty: UncertaintyEstimate::ZERO,
            mask,
            frame_index: 0,
            metrics: None,
        };
        pipeline.log_lanes();
        Ok(pipeline)
    }

    /// Registers the pipeline metrics in `registry`.
    ///
    /// On registration failure the pipeline keeps running without metrics.
    pub fn with_metrics(mut self, registry: &MetricsRegistry) -> Self {
        match PipelineMetrics::register(registry) {
            Ok(metrics) => self.metrics = Some(metrics),
            Err(e) => log::warn!("Foveation metrics disabled: {e}"),
        }
        self
    }

    /// Runs one frame: poll, history update, and if the history is full,
    /// uncertainty, prediction, and mask generation. The current mask is
    /// then uploaded and bound. When inference fails the previous mask is
    /// bound again as-is.
    ///
    /// Every failure is absorbed, logged, and reported in the returned
    /// [`FrameReport`]; the last-known-good state is kept.
    pub fn update_frame(
        &mut self,
        tracker: &mut dyn GazeTracker,
        backend: &mut dyn ShadingRateBackend,
    ) -> FrameReport {
        let mut errors = Vec::new();

        let samples_ingested = match self.ingest_lane.run(tracker, &mut self.history) {
            Ok(n) => n,
            Err(e) => {
                log::warn!("Frame {}: gaze poll failed: {e}", self.frame_index);
                errors.push(e);
                0
            }
        };

        let phase = if self.history.is_full() {
            let phase = self.predict_frame(&mut errors);
            // A stale frame re-binds the previous mask unchanged.
            if phase == FramePhase::Predicted {
                let focus = self.focus();
                self.mask_lane
                    .run_into(&mut self.mask, focus, self.uncertainty.total_error);
            }
            phase
        } else {
            log::trace!(
                "Frame {}: warming up ({}/{} samples)",
                self.frame_index,
                self.history.len(),
                self.history.capacity()
            );
            if let Some(m) = &self.metrics {
                metrics::bump(&m.warmup_frames);
            }
            FramePhase::Warmup
        };

        let mask_bound = match self.upload_lane.run(backend, &self.mask) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Frame {}: mask not bound: {e}", self.frame_index);
                if let Some(m) = &self.metrics {
                    metrics::bump(&m.upload_failures);
                }
                errors.push(e);
                false
            }
        };

        if let Some(m) = &self.metrics {
            metrics::bump(&m.frames);
        }

        let report = FrameReport {
            frame_index: self.frame_index,
            samples_ingested,
            phase,
            prediction: self.last_prediction,
            uncertainty: self.uncertainty,
            focus: self.focus(),
            level_counts: [
                self.mask.count(RateLevel::Full),
                self.mask.count(RateLevel::Half),
                self.mask.count(RateLevel::Quarter),
            ],
            mask_bound,
            errors,
        };
        self.frame_index += 1;
        report
    }

    /// Uncertainty against the previous prediction, then a new prediction.
    fn predict_frame(&mut self, errors: &mut Vec<LaneError>) -> FramePhase {
        self.uncertainty = match (&self.last_prediction, self.history.latest()) {
            (Some(previous), Some(latest)) => self.uncertainty_lane.run(&previous.angle_deg, latest),
            _ => UncertaintyEstimate::ZERO,
        };
        if let Some(m) = &self.metrics {
            metrics::set(&m.raw_error_deg, self.uncertainty.raw_error);
            metrics::set(&m.total_error, self.uncertainty.total_error);
        }

        let timer = self
            .metrics
            .as_ref()
            .map(|m| ScopedMetricTimer::new(&m.inference_ms));
        let result = self.prediction_lane.run(self.model.as_mut(), &self.history);
        drop(timer);

        match result {
            Ok(prediction) => {
                self.last_prediction = Some(prediction);
                if let Some(m) = &self.metrics {
                    metrics::bump(&m.predictions);
                }
                FramePhase::Predicted
            }
            Err(e) => {
                log::warn!(
                    "Frame {}: inference skipped, keeping previous prediction: {e}",
                    self.frame_index
                );
                if let Some(m) = &self.metrics {
                    metrics::bump(&m.inference_failures);
                }
                errors.push(e);
                FramePhase::Stale
            }
        }
    }

    fn log_lanes(&self) {
        let lanes: [&dyn Lane; 5] = [
            &self.ingest_lane,
            &self.prediction_lane,
            &self.uncertainty_lane,
            &self.mask_lane,
            &self.upload_lane,
        ];
        for lane in lanes {
            log::debug!("{} lane: {}", lane.lane_kind(), lane.strategy_name());
        }
    }

    /// Normalized point the next mask is centred on.
    pub fn focus(&self) -> Vec2 {
        self.last_prediction
            .map(|p| p.normalized_position)
            .unwrap_or(self.default_gaze)
    }

    /// The rolling gaze history.
    pub fn history(&self) -> &GazeHistory {
        &self.history
    }

    /// The last successful prediction.
    pub fn last_prediction(&self) -> Option<&PredictionResult> {
        self.last_prediction.as_ref()
    }

    /// Most recent uncertainty estimate.
    pub fn uncertainty(&self) -> UncertaintyEstimate {
        self.uncertainty
    }

    /// The mask bound for the next draw.
    pub fn mask(&self) -> &FoveationMask {
        &self.mask
    }

    /// Tile grid the mask covers.
    pub fn grid(&self) -> &TileGrid {
        self.mask_lane.grid()
    }

    /// Radii derived at startup.
    pub fn constants(&self) -> &FoveationConstants {
        &self.constants
    }

    /// Display geometry of the session.
    pub fn display(&self) -> &DisplayGeometry {
        &self.display
    }

    /// Number of frames processed.
    pub fn frame_count(&self) -> u64 {
        self.frame_index
    }
}

impl std::fmt::Debug for FoveationPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FoveationPipeline")
            .field("model", &self.model.name())
            .field("history_len", &self.history.len())
            .field("last_prediction", &self.last_prediction)
            .field("frame_index", &self.frame_index)
            .finish()
    }
}
