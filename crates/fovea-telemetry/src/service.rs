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

//! Periodic telemetry reporting.

use crate::metrics::registry::MetricsRegistry;
use std::time::{Duration, Instant};

/// Owns a metrics registry and rate-limits summary reports.
#[derive(Debug)]
pub struct TelemetryService {
    metrics: MetricsRegistry,
    last_report: Instant,
    report_interval: Duration,
}

impl TelemetryService {
    /// Creates a service reporting at most once per `report_interval`.
    pub fn new(report_interval: Duration) -> Self {
        Self {
            metrics: MetricsRegistry::new(),
            last_report: Instant::now(),
            report_interval,
        }
    }

    /// Call once per frame. Returns `true` when a report is due.
    pub fn tick(&mut self) -> bool {
        if self.last_report.elapsed() >= self.report_interval {
            self.last_report = Instant::now();
            true
        } else {
            false
        }
    }

    /// Logs a one-line summary of `namespace` at info level.
    pub fn report(&self, namespace: &str) {
        log::info!("[telemetry] {namespace}: {}", self.metrics.summary(namespace));
    }

    /// Returns the metrics registry.
    pub fn metrics_registry(&self) -> &MetricsRegistry {
        &self.metrics
    }
}

impl Default for TelemetryService {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_respects_interval() {
        let mut service = TelemetryService::new(Duration::from_secs(3600));
        assert!(!service.tick());

        let mut eager = TelemetryService::new(Duration::ZERO);
        assert!(eager.tick());
        assert!(eager.tick());
    }
}
