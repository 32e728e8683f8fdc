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

use crate::storage::backend::MetricsBackend;
use fovea_core::telemetry::{Metric, MetricId, MetricsError, MetricsResult};
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory metrics storage behind a `RwLock<HashMap>`.
#[derive(Debug, Default)]
pub struct InMemoryBackend {
    storage: RwLock<HashMap<MetricId, Metric>>,
}

impl InMemoryBackend {
    /// Create an empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Metrics of a single namespace, sorted by name.
    pub fn get_metrics_by_namespace(&self, namespace: &str) -> Vec<Metric> {
        let mut metrics: Vec<Metric> = match self.storage.read() {
            Ok(storage) => storage
                .values()
                .filter(|m| m.id.namespace == namespace)
                .cloned()
                .collect(),
            Err(_) => Vec::new(),
        };
        metrics.sort_by(|a, b| a.id.cmp(&b.id));
        metrics
    }
}

fn lock_error(kind: &str) -> MetricsError {
    MetricsError::StorageError(format!("Failed to acquire {kind} lock"))
}

impl MetricsBackend for InMemoryBackend {
    fn put_metric(&self, metric: Metric) -> MetricsResult<()> {
        let mut storage = self.storage.write().map_err(|_| lock_error("write"))?;
        storage.insert(metric.id.clone(), metric);
        Ok(())
    }

    fn get_metric(&self, id: &MetricId) -> MetricsResult<Metric> {
        let storage = self.storage.read().map_err(|_| lock_error("read"))?;
        storage
            .get(id)
            .cloned()
            .ok_or_else(|| MetricsError::MetricNotFound(id.clone()))
    }

    fn update_metric(
        &self,
        id: &MetricId,
        update: &mut dyn FnMut(&mut Metric) -> MetricsResult<()>,
    ) -> MetricsResult<()> {
        let mut storage = self.storage.write().map_err(|_| lock_error("write"))?;
        let metric = storage
            .get_mut(id)
            .ok_or_else(|| MetricsError::MetricNotFound(id.clone()))?;
        update(metric)
    }

    fn contains_metric(&self, id: &MetricId) -> bool {
        self.storage
            .read()
            .map(|storage| storage.contains_key(id))
            .unwrap_or(false)
    }

    fn list_all_metrics(&self) -> Vec<Metric> {
        self.storage
            .read()
            .map(|storage| storage.values().cloned().collect())
            .unwrap_or_default()
    }

    fn clear_all(&self) -> MetricsResult<()> {
        self.storage.write().map_err(|_| lock_error("write"))?.clear();
        Ok(())
    }

    fn metric_count(&self) -> usize {
        self.storage.read().map(|s| s.len()).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fovea_core::telemetry::{MetricType, MetricValue};

    #[test]
    fn test_counter_and_type_mismatch() {
        let backend = InMemoryBackend::new();
        let id = MetricId::new("foveation", "frames");
        backend
            .put_metric(Metric::new_counter(id.clone(), "frames"))
            .unwrap();

        assert_eq!(backend.increment_counter(&id, 2).unwrap(), 2);
        assert_eq!(backend.increment_counter(&id, 3).unwrap(), 5);
        assert_eq!(
            backend.set_gauge(&id, 1.0),
            Err(MetricsError::TypeMismatch {
                expected: MetricType::Gauge,
                found: MetricType::Counter,
            })
        );
    }

    #[test]
    fn test_histogram_buckets_are_cumulative() {
        let backend = InMemoryBackend::new();
        let id = MetricId::new("foveation", "inference_ms");
        backend
            .put_metric(Metric::new_histogram(id.clone(), "", "ms", vec![1.0, 4.0]))
            .unwrap();
        for sample in [0.5, 2.0, 8.0] {
            backend.record_histogram_sample(&id, sample).unwrap();
        }
        match backend.get_metric(&id).unwrap().value {
            MetricValue::Histogram {
                count,
                bucket_counts,
                ..
            } => {
                assert_eq!(count, 3);
                assert_eq!(bucket_counts, vec![1, 2]);
            }
            other => panic!("unexpected value {other:?}"),
        }
    }

    #[test]
    fn test_histogram_storage_stays_bounded() {
        // ARRANGE
        let backend = InMemoryBackend::new();
        let id = MetricId::new("foveation", "inference_ms");
        backend
            .put_metric(Metric::new_histogram(id.clone(), "", "ms", vec![1.0, 4.0]))
            .unwrap();

        // ACT
        let frames = 200_000u64;
        for frame in 0..frames {
            backend
                .record_histogram_sample(&id, (frame % 5) as f64)
                .unwrap();
        }

        // ASSERT
        let metric = backend.get_metric(&id).unwrap();
        match metric.value {
            MetricValue::Histogram {
                count,
                max,
                ref bucket_bounds,
                ref bucket_counts,
                ..
            } => {
                assert_eq!(count, frames);
                assert_eq!(max, 4.0);
                assert_eq!(bucket_bounds.len(), 2);
                assert_eq!(bucket_counts, &vec![frames * 2 / 5, frames]);
            }
            ref other => panic!("unexpected value {other:?}"),
        }
        approx::assert_relative_eq!(metric.value.histogram_mean().unwrap(), 2.0);
    }

    #[test]
    fn test_update_missing_metric_is_not_found() {
        let backend = InMemoryBackend::new();
        let id = MetricId::new("foveation", "missing");
        assert_eq!(
            backend.record_histogram_sample(&id, 1.0),
            Err(MetricsError::MetricNotFound(id))
        );
    }

    #[test]
    fn test_namespace_filter_and_clear() {
        let backend = InMemoryBackend::new();
        backend
            .put_metric(Metric::new_counter(MetricId::new("foveation", "b"), ""))
            .unwrap();
        backend
            .put_metric(Metric::new_counter(MetricId::new("foveation", "a"), ""))
            .unwrap();
        backend
            .put_metric(Metric::new_counter(MetricId::new("other", "c"), ""))
            .unwrap();

        let names: Vec<_> = backend
            .get_metrics_by_namespace("foveation")
            .into_iter()
            .map(|m| m.id.name)
            .collect();
        assert_eq!(names, vec!["a", "b"]);

        backend.clear_all().unwrap();
        assert_eq!(backend.metric_count(), 0);
        assert!(matches!(
            backend.get_metric(&MetricId::new("other", "c")),
            Err(MetricsError::MetricNotFound(_))
        ));
    }
}
