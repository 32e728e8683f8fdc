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

use fovea_core::telemetry::MetricsResult;
use fovea_telemetry::{CounterHandle, GaugeHandle, HistogramHandle, MetricsRegistry};

/// Namespace of every pipeline metric.
pub const METRICS_NAMESPACE: &str = "foveation";

const INFERENCE_BUCKETS_MS: [f64; 6] = [0.1, 0.5, 1.0, 2.0, 5.0, 16.0];

/// Handles to the metrics the pipeline updates each frame.
#[derive(Debug, Clone)]
pub struct PipelineMetrics {
    /// Frames processed.
    pub frames: CounterHandle,
    /// Successful predictions.
    pub predictions: CounterHandle,
    /// Inference calls that failed, produced garbage, or ran late.
    pub inference_failures: CounterHandle,
    /// Frames spent filling the history.
    pub warmup_frames: CounterHandle,
    /// Frames whose mask could not be uploaded or bound.
    pub upload_failures: CounterHandle,
    /// Last raw prediction error.
    pub raw_error_deg: GaugeHandle,
    /// Last combined error.
    pub total_error: GaugeHandle,
    /// Inference wall-clock time.
    pub inference_ms: HistogramHandle,
}

impl PipelineMetrics {
    /// Registers every pipeline metric in `registry`.
    pub fn register(registry: &MetricsRegistry) -> MetricsResult<Self> {
        let ns = METRICS_NAMESPACE;
        Ok(Self {
            frames: registry.register_counter(ns, "frames", "Frames processed")?,
            predictions: registry.register_counter(ns, "predictions", "Successful predictions")?,
            inference_failures: registry.register_counter(
                ns,
                "inference_failures",
                "Inference calls whose result was discarded",
            )?,
            warmup_frames: registry.register_counter(
                ns,
                "warmup_frames",
                "Frames before the gaze history filled",
            )?,
            upload_failures: registry.register_counter(
                ns,
                "upload_failures",
                "Frames without a bound mask",
            )?,
            raw_error_deg: registry.register_gauge(
                ns,
                "raw_error_deg",
                "Distance between the last prediction and the newest sample",
                "deg",
            )?,
            total_error: registry.register_gauge(
                ns,
                "total_error",
                "Raw error combined with tracker precision",
                "mixed",
            )?,
            inference_ms: registry.register_histogram(
                ns,
                "inference_ms",
                "Inference wall-clock time",
                "ms",
                INFERENCE_BUCKETS_MS.to_vec(),
            )?,
        })
    }
}

pub(super) fn bump(counter: &CounterHandle) {
    if let Err(e) = counter.increment() {
        log::debug!("Failed to update {}: {e}", counter.id());
    }
}

pub(super) fn set(gauge: &GaugeHandle, value: f32) {
    if let Err(e) = gauge.set(value as f64) {
        log::debug!("Failed to update {}: {e}", gauge.id());
    }
}
