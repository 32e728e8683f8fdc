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

//! Abstract definitions for pipeline metrics.

use std::fmt::{self, Display};

/// Identifier of a metric: a namespace plus a name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MetricId {
    /// The broad category of the metric (e.g. "foveation").
    pub namespace: String,
    /// The specific name of the metric (e.g. "frames").
    pub name: String,
}

impl MetricId {
    /// Creates a new `MetricId` with a namespace and a name.
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }
}

impl Display for MetricId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.name)
    }
}

/// The fundamental type of a metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricType {
    /// A value that only increases.
    Counter,
    /// A value that can go up or down.
    Gauge,
    /// A distribution of measurements.
    Histogram,
}

/// The current value of a metric.
#[derive(Debug, Clone, PartialEq)]
pub enum MetricValue {
    /// Monotonic count.
    Counter(u64),
    /// Last written value.
    Gauge(f64),
    /// Running statistics and cumulative bucket counts. Storage does not
    /// grow with the number of observations.
    Histogram {
        /// Number of recorded samples.
        count: u64,
        /// Sum of every recorded sample.
        sum: f64,
        /// Largest recorded sample, `NEG_INFINITY` while empty.
        max: f64,
        /// Upper bounds of the buckets, ascending.
        bucket_bounds: Vec<f64>,
        /// Number of samples `<=` each bound.
        bucket_counts: Vec<u64>,
    },
}

impl MetricValue {
    /// Returns the [`MetricType`] corresponding to this value.
    pub fn metric_type(&self) -> MetricType {
        match self {
            MetricValue::Counter(_) => MetricType::Counter,
            MetricValue::Gauge(_) => MetricType::Gauge,
            MetricValue::Histogram { .. } => MetricType::Histogram,
        }
    }

    /// Returns the value if this is a counter.
    pub fn as_counter(&self) -> Option<u64> {
        match self {
            MetricValue::Counter(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the value if this is a gauge.
    pub fn as_gauge(&self) -> Option<f64> {
        match self {
            MetricValue::Gauge(v) => Some(*v),
            _ => None,
        }
    }

    /// Number of samples, if this is a histogram.
    pub fn histogram_count(&self) -> Option<u64> {
        match self {
            MetricValue::Histogram { count, .. } => Some(*count),
            _ => None,
        }
    }

    /// Mean of the recorded samples, if this is a non-empty histogram.
    pub fn histogram_mean(&self) -> Option<f64> {
        match self {
            MetricValue::Histogram { count, sum, .. } if *count > 0 => Some(sum / *count as f64),
            _ => None,
        }
    }

    /// Largest recorded sample, if this is a non-empty histogram.
    pub fn histogram_max(&self) -> Option<f64> {
        match self {
            MetricValue::Histogram { count, max, .. } if *count > 0 => Some(*max),
            _ => None,
        }
    }

    /// Fold one sample into a histogram. Returns `false` for other types.
    pub fn record_sample(&mut self, sample: f64) -> bool {
        match self {
            MetricValue::Histogram {
                count,
                sum,
                max,
                bucket_bounds,
                bucket_counts,
            } => {
                *count = count.saturating_add(1);
                *sum += sample;
                *max = max.max(sample);
                for (bucket, &bound) in bucket_counts.iter_mut().zip(bucket_bounds.iter()) {
                    if sample <= bound {
                        *bucket += 1;
                    }
                }
                true
            }
            _ => false,
        }
    }
}

impl Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Counter(v) => write!(f, "{v}"),
            MetricValue::Gauge(v) => write!(f, "{v:.4}"),
            MetricValue::Histogram { count, .. } => match (self.histogram_mean(), self.histogram_max()) {
                (Some(mean), Some(max)) => write!(f, "n={count} mean={mean:.3} max={max:.3}"),
                _ => write!(f, "n=0"),
            },
        }
    }
}

/// A metric together with its description and unit.
#[derive(Debug, Clone, PartialEq)]
pub struct Metric {
    /// The metric's identifier.
    pub id: MetricId,
    /// What the metric measures.
    pub description: String,
    /// Unit of measurement (e.g. "ms", "count").
    pub unit: String,
    /// The current value.
    pub value: MetricValue,
}

impl Metric {
    /// A counter starting at zero.
    pub fn new_counter(id: MetricId, description: impl Into<String>) -> Self {
        Self {
            id,
            description: description.into(),
            unit: "count".into(),
            value: MetricValue::Counter(0),
        }
    }

    /// A gauge starting at zero.
    pub fn new_gauge(id: MetricId, description: impl Into<String>, unit: impl Into<String>) -> Self {
        Self {
            id,
            description: description.into(),
            unit: unit.into(),
            value: MetricValue::Gauge(0.0),
        }
    }

    /// An empty histogram with the given bucket bounds.
    pub fn new_histogram(
        id: MetricId,
        description: impl Into<String>,
        unit: impl Into<String>,
        bucket_bounds: Vec<f64>,
    ) -> Self {
        let bucket_counts = vec![0; bucket_bounds.len()];
        Self {
            id,
            description: description.into(),
            unit: unit.into(),
            value: MetricValue::Histogram {
                count: 0,
                sum: 0.0,
                max: f64::NEG_INFINITY,
                bucket_bounds,
                bucket_counts,
            },
        }
    }

    /// The type of this metric.
    pub fn metric_type(&self) -> MetricType {
        self.value.metric_type()
    }
}

/// A specialized `Result` type for metric operations.
pub type MetricsResult<T> = Result<T, MetricsError>;

/// An error that can occur within the metrics system.
#[derive(Debug, Clone, PartialEq)]
pub enum MetricsError {
    /// The requested metric was never registered.
    MetricNotFound(MetricId),
    /// The operation does not apply to the metric's type.
    TypeMismatch {
        /// The type the operation needs.
        expected: MetricType,
        /// The type actually stored.
        found: MetricType,
    },
    /// The storage layer failed.
    StorageError(String),
    /// The operation is malformed (e.g. unsorted histogram bounds).
    InvalidOperation(String),
}

impl Display for MetricsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricsError::MetricNotFound(id) => write!(f, "Metric not found: {id}"),
            MetricsError::TypeMismatch { expected, found } => {
                write!(f, "Type mismatch: expected {expected:?}, found {found:?}")
            }
            MetricsError::StorageError(msg) => write!(f, "Storage error: {msg}"),
            MetricsError::InvalidOperation(msg) => write!(f, "Invalid operation: {msg}"),
        }
    }
}

impl std::error::Error for MetricsError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_id_display() {
        assert_eq!(MetricId::new("foveation", "frames").to_string(), "foveation:frames");
    }

    #[test]
    fn test_histogram_summary() {
        let mut metric = Metric::new_histogram(MetricId::new("a", "b"), "d", "ms", vec![5.0]);
        for sample in [1.0, 2.0, 6.0] {
            assert!(metric.value.record_sample(sample));
        }
        let value = metric.value;
        assert_eq!(value.metric_type(), MetricType::Histogram);
        assert_eq!(value.histogram_count(), Some(3));
        assert_eq!(value.histogram_mean(), Some(3.0));
        assert_eq!(value.histogram_max(), Some(6.0));
        assert_eq!(value.as_gauge(), None);
        assert_eq!(value.to_string(), "n=3 mean=3.000 max=6.000");

        let mut gauge = MetricValue::Gauge(1.0);
        assert!(!gauge.record_sample(2.0));
        assert_eq!(gauge, MetricValue::Gauge(1.0));

        let metric = Metric::new_histogram(MetricId::new("a", "b"), "d", "ms", vec![1.0]);
        assert_eq!(metric.value.histogram_mean(), None);
        assert_eq!(metric.value.to_string(), "n=0");
    }
}
