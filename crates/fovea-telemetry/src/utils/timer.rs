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

//! RAII timer recording the duration of a scope into a histogram.

use crate::metrics::registry::HistogramHandle;
use fovea_core::utils::timer::Stopwatch;

/// Records the time between its creation and its drop, in milliseconds.
pub struct ScopedMetricTimer<'a> {
    stopwatch: Stopwatch,
    histogram: &'a HistogramHandle,
}

impl<'a> ScopedMetricTimer<'a> {
    /// Starts timing immediately.
    pub fn new(histogram: &'a HistogramHandle) -> Self {
        Self {
            stopwatch: Stopwatch::new(),
            histogram,
        }
    }

    /// Elapsed milliseconds so far.
    pub fn elapsed_ms(&self) -> f32 {
        self.stopwatch.elapsed_ms()
    }
}

impl Drop for ScopedMetricTimer<'_> {
    fn drop(&mut self) {
        let elapsed_ms = self.stopwatch.elapsed_secs_f64() * 1000.0;
        if let Err(e) = self.histogram.observe(elapsed_ms) {
            log::warn!("[ScopedMetricTimer] Failed to record metric: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MetricsRegistry;

    #[test]
    fn test_records_on_drop() {
        let registry = MetricsRegistry::new();
        let histogram = registry
            .register_histogram("foveation", "inference_ms", "", "ms", vec![1.0, 10.0])
            .unwrap();
        {
            let _timer = ScopedMetricTimer::new(&histogram);
        }
        {
            let _timer = ScopedMetricTimer::new(&histogram);
        }
        let metric = histogram.get_metric().unwrap();
        assert_eq!(metric.value.histogram_count(), Some(2));
    }
}
