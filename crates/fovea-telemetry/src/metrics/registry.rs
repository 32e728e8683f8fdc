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

//! Registry for managing metrics.

use crate::storage::{backend::MetricsBackend, memory_backend::InMemoryBackend};
use fovea_core::telemetry::{Metric, MetricId, MetricType, MetricValue, MetricsError, MetricsResult};
use serde::Serialize;
use std::sync::Arc;

/// Entry point of the metrics system.
///
/// Registration returns a typed handle which is cheap to clone and updates
/// the shared backend directly.
#[derive(Debug, Clone)]
pub struct MetricsRegistry {
    backend: Arc<dyn MetricsBackend>,
}

impl MetricsRegistry {
    /// Create a registry over the default in-memory backend.
    pub fn new() -> Self {
        Self {
            backend: Arc::new(InMemoryBackend::new()),
        }
    }

    /// Create a registry over a custom backend.
    pub fn with_backend(backend: Arc<dyn MetricsBackend>) -> Self {
        Self { backend }
    }

    /// Register a counter starting at zero.
    pub fn register_counter(
        &self,
        namespace: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> MetricsResult<CounterHandle> {
        let id = MetricId::new(namespace, name);
        self.backend
            .put_metric(Metric::new_counter(id.clone(), description))?;
        Ok(CounterHandle {
            id,
            backend: self.backend.clone(),
        })
    }

    /// Register a gauge starting at zero.
    pub fn register_gauge(
        &self,
        namespace: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        unit: impl Into<String>,
    ) -> MetricsResult<GaugeHandle> {
        let id = MetricId::new(namespace, name);
        self.backend
            .put_metric(Metric::new_gauge(id.clone(), description, unit))?;
        Ok(GaugeHandle {
            id,
            backend: self.backend.clone(),
        })
    }

    /// Register a histogram. `buckets` must be sorted ascending.
    pub fn register_histogram(
        &self,
        namespace: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        unit: impl Into<String>,
        buckets: Vec<f64>,
    ) -> MetricsResult<HistogramHandle> {
        if buckets.windows(2).any(|w| w[0] >= w[1]) {
            return Err(MetricsError::InvalidOperation(
                "histogram bucket bounds must be strictly ascending".into(),
            ));
        }
        let id = MetricId::new(namespace, name);
        self.backend
            .put_metric(Metric::new_histogram(id.clone(), description, unit, buckets))?;
        Ok(HistogramHandle {
            id,
            backend: self.backend.clone(),
        })
    }

    /// Get a metric by ID.
    pub fn get_metric(&self, id: &MetricId) -> MetricsResult<Metric> {
        self.backend.get_metric(id)
    }

    /// Check if a metric exists.
    pub fn contains_metric(&self, id: &MetricId) -> bool {
        self.backend.contains_metric(id)
    }

    /// Metrics of one namespace, sorted by name.
    pub fn get_namespace_metrics(&self, namespace: &str) -> Vec<Metric> {
        let mut metrics: Vec<Metric> = self
            .backend
            .list_all_metrics()
            .into_iter()
            .filter(|m| m.id.namespace == namespace)
            .collect();
        metrics.sort_by(|a, b| a.id.cmp(&b.id));
        metrics
    }

    /// Space-separated `name=value` pairs for `namespace`, e.g. `frames=120`.
    pub fn summary(&self, namespace: &str) -> String {
        self.get_namespace_metrics(namespace)
            .iter()
            .map(|m| format!("{}={}", m.id.name, m.value))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Serializes every metric of `namespace` to a JSON array.
    pub fn snapshot_json(&self, namespace: &str) -> MetricsResult<String> {
        let snapshot: Vec<MetricSnapshot> = self
            .get_namespace_metrics(namespace)
            .iter()
            .map(MetricSnapshot::from)
            .collect();
        serde_json::to_string_pretty(&snapshot)
            .map_err(|e| MetricsError::StorageError(format!("JSON export failed: {e}")))
    }

    /// Number of registered metrics.
    pub fn metric_count(&self) -> usize {
        self.backend.metric_count()
    }

    /// Clear all metrics.
    pub fn clear_all(&self) -> MetricsResult<()> {
        self.backend.clear_all()
    }
}

impl Default for MetricsRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Serializable view of a metric.
#[derive(Debug, Clone, Serialize)]
struct MetricSnapshot {
    id: String,
    unit: String,
    kind: &'static str,
    value: Option<f64>,
    count: Option<u64>,
    mean: Option<f64>,
    max: Option<f64>,
}

impl From<&Metric> for MetricSnapshot {
    fn from(metric: &Metric) -> Self {
        let (kind, value, count) = match &metric.value {
            MetricValue::Counter(v) => ("counter", Some(*v as f64), None),
            MetricValue::Gauge(v) => ("gauge", Some(*v), None),
            MetricValue::Histogram { count, .. } => ("histogram", None, Some(*count)),
        };
        Self {
            id: metric.id.to_string(),
            unit: metric.unit.clone(),
            kind,
            value,
            count,
            mean: metric.value.histogram_mean(),
            max: metric.value.histogram_max(),
        }
    }
}

/// Handle for counter updates.
#[derive(Debug, Clone)]
pub struct CounterHandle {
    id: MetricId,
    backend: Arc<dyn MetricsBackend>,
}

impl CounterHandle {
    /// Increment by 1.
    pub fn increment(&self) -> MetricsResult<u64> {
        self.backend.increment_counter(&self.id, 1)
    }

    /// Increment by `amount`.
    pub fn increment_by(&self, amount: u64) -> MetricsResult<u64> {
        self.backend.increment_counter(&self.id, amount)
    }

    /// Current value.
    pub fn get(&self) -> MetricsResult<u64> {
        let metric = self.backend.get_metric(&self.id)?;
        metric.value.as_counter().ok_or(MetricsError::TypeMismatch {
            expected: MetricType::Counter,
            found: metric.metric_type(),
        })
    }

    /// The metric ID.
    pub fn id(&self) -> &MetricId {
        &self.id
    }
}

/// Handle for gauge updates.
#[derive(Debug, Clone)]
pub struct GaugeHandle {
    id: MetricId,
    backend: Arc<dyn MetricsBackend>,
}

impl GaugeHandle {
    /// Overwrite the value.
    pub fn set(&self, value: f64) -> MetricsResult<()> {
        self.backend.set_gauge(&self.id, value)
    }

    /// Current value.
    pub fn get(&self) -> MetricsResult<f64> {
        let metric = self.backend.get_metric(&self.id)?;
        metric.value.as_gauge().ok_or(MetricsError::TypeMismatch {
            expected: MetricType::Gauge,
            found: metric.metric_type(),
        })
    }

    /// The metric ID.
    pub fn id(&self) -> &MetricId {
        &self.id
    }
}

/// Handle for histogram samples.
#[derive(Debug, Clone)]
pub struct HistogramHandle {
    id: MetricId,
    backend: Arc<dyn MetricsBackend>,
}

impl HistogramHandle {
    /// Record one sample.
    pub fn observe(&self, value: f64) -> MetricsResult<()> {
        self.backend.record_histogram_sample(&self.id, value)
    }

    /// The full histogram metric.
    pub fn get_metric(&self) -> MetricsResult<Metric> {
        self.backend.get_metric(&self.id)
    }

    /// The metric ID.
    pub fn id(&self) -> &MetricId {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counter_and_gauge_handles() {
        let registry = MetricsRegistry::new();
        let frames = registry
            .register_counter("foveation", "frames", "Frames processed")
            .unwrap();
        let error = registry
            .register_gauge("foveation", "total_error", "Combined error", "norm")
            .unwrap();

        frames.increment().unwrap();
        assert_eq!(frames.increment_by(4).unwrap(), 5);
        error.set(0.25).unwrap();
        assert_eq!(error.get().unwrap(), 0.25);
        assert_eq!(registry.metric_count(), 2);
        assert!(registry.contains_metric(frames.id()));
    }

    #[test]
    fn test_histogram_bounds_must_ascend() {
        let registry = MetricsRegistry::new();
        assert!(registry
            .register_histogram("foveation", "inference_ms", "", "ms", vec![2.0, 1.0])
            .is_err());
        let histogram = registry
            .register_histogram("foveation", "inference_ms", "", "ms", vec![1.0, 2.0])
            .unwrap();
        histogram.observe(1.5).unwrap();
        assert_eq!(histogram.get_metric().unwrap().value.histogram_mean(), Some(1.5));
    }

    #[test]
    fn test_summary_and_json_snapshot() {
        let registry = MetricsRegistry::new();
        let frames = registry.register_counter("foveation", "frames", "").unwrap();
        registry.register_counter("other", "ignored", "").unwrap();
        frames.increment_by(3).unwrap();

        assert_eq!(registry.summary("foveation"), "frames=3");

        let json = registry.snapshot_json("foveation").unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed[0]["id"], "foveation:frames");
        assert_eq!(parsed[0]["kind"], "counter");
        assert_eq!(parsed[0]["value"], 3.0);
        assert_eq!(parsed.as_array().map(|a| a.len()), Some(1));
    }
}
