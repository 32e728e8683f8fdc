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

use fovea_core::telemetry::{Metric, MetricId, MetricType, MetricValue, MetricsError, MetricsResult};
use std::fmt::Debug;

/// Storage interface behind the [`MetricsRegistry`](crate::MetricsRegistry).
pub trait MetricsBackend: Send + Sync + Debug + 'static {
    /// Store or replace a metric.
    fn put_metric(&self, metric: Metric) -> MetricsResult<()>;

    /// Retrieve a copy of a metric.
    fn get_metric(&self, id: &MetricId) -> MetricsResult<Metric>;

    /// Check if a metric exists.
    fn contains_metric(&self, id: &MetricId) -> bool;

    /// All stored metrics, in no particular order.
    fn list_all_metrics(&self) -> Vec<Metric>;

    /// Remove every metric.
    fn clear_all(&self) -> MetricsResult<()>;

    /// Number of stored metrics.
    fn metric_count(&self) -> usize;

    /// Apply `update` to a stored metric in place.
    fn update_metric(
        &self,
        id: &MetricId,
        update: &mut dyn FnMut(&mut Metric) -> MetricsResult<()>,
    ) -> MetricsResult<()>;

    /// Increment a counter, returning the new value.
    fn increment_counter(&self, id: &MetricId, delta: u64) -> MetricsResult<u64> {
        let mut result = 0;
        self.update_metric(id, &mut |metric: &mut Metric| match metric.value {
            MetricValue::Counter(ref mut value) => {
                *value = value.saturating_add(delta);
                result = *value;
                Ok(())
            }
            _ => Err(mismatch(MetricType::Counter, metric)),
        })?;
        Ok(result)
    }

    /// Overwrite a gauge.
    fn set_gauge(&self, id: &MetricId, value: f64) -> MetricsResult<()> {
        self.update_metric(id, &mut |metric: &mut Metric| match metric.value {
            MetricValue::Gauge(ref mut gauge) => {
                *gauge = value;
                Ok(())
            }
            _ => Err(mismatch(MetricType::Gauge, metric)),
        })
    }

    /// Add a sample to a histogram.
    fn record_histogram_sample(&self, id: &MetricId, sample: f64) -> MetricsResult<()> {
        self.update_metric(id, &mut |metric: &mut Metric| {
            if metric.value.record_sample(sample) {
                Ok(())
            } else {
                Err(mismatch(MetricType::Histogram, metric))
            }
        })
    }
}

fn mismatch(expected: MetricType, metric: &Metric) -> MetricsError {
    MetricsError::TypeMismatch {
        expected,
        found: metric.metric_type(),
    }
}
