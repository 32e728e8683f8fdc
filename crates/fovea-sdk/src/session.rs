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

use anyhow::{anyhow, Context, Result};
use fovea_agents::foveation_agent::METRICS_NAMESPACE;
use fovea_agents::{FoveationPipeline, FrameReport};
use fovea_core::lane::LaneError;
use fovea_core::traits::{GazeTracker, InferenceRuntime, RenderRequest, SceneId, ShadingRateBackend};
use fovea_core::FoveationConfig;
use fovea_telemetry::{MetricsRegistry, TelemetryService};

/// Scene drawn when none is selected.
pub const DEFAULT_SCENE: SceneId = SceneId(0);

/// A running foveated rendering session.
///
/// Owns the tracker, the backend and the pipeline. Each call to
/// [`run_frame`](Self::run_frame) updates the mask and issues one draw.
pub struct FoveatedSession<B: ShadingRateBackend> {
    pipeline: FoveationPipeline,
    tracker: Box<dyn GazeTracker>,
    backend: B,
    request: RenderRequest,
    telemetry: TelemetryService,
}

impl<B: ShadingRateBackend> FoveatedSession<B> {
    /// Validates `config`, loads the saccade model through `runtime` and
    /// prepares `backend`.
    ///
    /// Every failure here is fatal: an invalid config, a missing or broken
    /// model, or a backend lacking the shading-rate capability.
    pub fn new(
        config: FoveationConfig,
        tracker: Box<dyn GazeTracker>,
        runtime: &dyn InferenceRuntime,
        backend: B,
    ) -> Result<Self> {
        Self::with_telemetry(config, tracker, runtime, backend, TelemetryService::default())
    }

    /// Like [`new`](Self::new), reporting metrics through `telemetry`.
    pub fn with_telemetry(
        config: FoveationConfig,
        tracker: Box<dyn GazeTracker>,
        runtime: &dyn InferenceRuntime,
        mut backend: B,
        telemetry: TelemetryService,
    ) -> Result<Self> {
        config.validate().context("Invalid foveation config")?;

        let source = config
            .model
            .as_ref()
            .ok_or_else(|| anyhow!("No saccade model configured"))?;
        let model = runtime
            .load(source)
            .with_context(|| format!("Runtime '{}' failed to load the model", runtime.runtime_name()))?;

        log::info!("Gaze tracker: {}", tracker.model_name());
        log::info!("Inference runtime: {}", runtime.runtime_name());

        let pipeline = FoveationPipeline::new(&config, model, &mut backend)
            .context("Failed to start the foveation pipeline")?
            .with_metrics(telemetry.metrics_registry());

        Ok(Self {
            pipeline,
            tracker,
            backend,
            request: RenderRequest::new(DEFAULT_SCENE, config.display.resolution()),
            telemetry,
        })
    }

    /// Runs the pipeline, draws once, and drains backend errors to the log.
    ///
    /// A failed draw is added to the report's errors.
    pub fn run_frame(&mut self) -> FrameReport {
        let mut report = self
            .pipeline
            .update_frame(self.tracker.as_mut(), &mut self.backend);

        if let Err(e) = self.backend.render(&self.request) {
            log::warn!("Frame {}: draw failed: {e}", report.frame_index);
            report.errors.push(LaneError::Backend(e));
        }
        for error in self.backend.drain_errors() {
            log::error!("Backend '{}': {error}", self.backend.backend_name());
        }

        log::trace!(
            "Frame {}: {:?}, focus ({:.3}, {:.3}), tiles {:?}",
            report.frame_index,
            report.phase,
            report.focus.x,
            report.focus.y,
            report.level_counts
        );

        if self.telemetry.tick() {
            self.telemetry.report(METRICS_NAMESPACE);
        }
        report
    }

    /// Runs `frames` frames and logs a final metrics summary.
    pub fn run(&mut self, frames: usize) -> Vec<FrameReport> {
        let reports = (0..frames).map(|_| self.run_frame()).collect();
        self.telemetry.report(METRICS_NAMESPACE);
        reports
    }

    /// Selects the scene drawn by following frames.
    pub fn set_scene(&mut self, scene: SceneId) {
        self.request.scene = scene;
    }

    /// The draw issued every frame.
    pub fn render_request(&self) -> &RenderRequest {
        &self.request
    }

    /// The underlying pipeline.
    pub fn pipeline(&self) -> &FoveationPipeline {
        &self.pipeline
    }

    /// The shading-rate backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Mutable access to the backend, e.g. to feed window events.
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Registry holding the pipeline metrics.
    pub fn metrics_registry(&self) -> &MetricsRegistry {
        self.telemetry.metrics_registry()
    }

    /// Pipeline metrics as a pretty-printed JSON array.
    pub fn metrics_json(&self) -> Result<String> {
        self.metrics_registry()
            .snapshot_json(METRICS_NAMESPACE)
            .context("Cannot export pipeline metrics")
    }
}
