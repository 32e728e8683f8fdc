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

//! Defines the hierarchy of error types for the foveation pipeline.
//!
//! Startup errors ([`ConfigError`], model-load [`InferenceError`]s, capability
//! [`BackendError`]s) are fatal and surface through [`FoveaError`]. Per-frame
//! errors of the same types are absorbed by the pipeline and only logged.

use crate::math::Extent2D;
use std::fmt;

/// An error in the static configuration read at startup.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A display geometry field is out of range.
    InvalidDisplay {
        /// The offending field.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
    /// The history capacity does not match the model input shape.
    InvalidHistoryCapacity {
        /// The capacity the pretrained model expects.
        expected: usize,
        /// The configured capacity.
        found: usize,
    },
    /// A tunable parameter is negative or not finite.
    InvalidParameter {
        /// The offending field.
        field: &'static str,
        /// The rejected value.
        value: f32,
    },
    /// The middle (parafoveal) radius is smaller than the inner (foveal) one.
    RadiusOrdering {
        /// Configured inner radius in degrees.
        inner_deg: f32,
        /// Configured middle radius in degrees.
        middle_deg: f32,
    },
    /// The configuration source could not be read.
    Io {
        /// Where the configuration was read from.
        path: String,
        /// The underlying I/O error message.
        message: String,
    },
    /// The configuration source could not be parsed.
    Parse(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidDisplay { field, reason } => {
                write!(f, "Invalid display geometry '{field}': {reason}")
            }
            ConfigError::InvalidHistoryCapacity { expected, found } => write!(
                f,
                "History capacity {found} does not match the model input length {expected}"
            ),
            ConfigError::InvalidParameter { field, value } => {
                write!(f, "Invalid value {value} for '{field}'")
            }
            ConfigError::RadiusOrdering {
                inner_deg,
                middle_deg,
            } => write!(
                f,
                "Middle radius ({middle_deg} deg) must not be smaller than inner radius ({inner_deg} deg)"
            ),
            ConfigError::Io { path, message } => {
                write!(f, "Failed to read configuration from '{path}': {message}")
            }
            ConfigError::Parse(msg) => write!(f, "Failed to parse configuration: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// An error raised by the inference runtime collaborator.
#[derive(Debug, Clone, PartialEq)]
pub enum InferenceError {
    /// The serialized model could not be loaded.
    ModelLoad {
        /// Description of the model source (path or "in-memory buffer").
        source_desc: String,
        /// Detailed error message.
        details: String,
    },
    /// The model does not accept or produce the fixed tensor shape.
    ShapeMismatch {
        /// The expected element count.
        expected: usize,
        /// The element count found.
        found: usize,
    },
    /// The forward pass produced NaN or infinite values.
    NonFiniteOutput,
    /// The forward pass finished after the configured deadline.
    DeadlineExceeded {
        /// Measured inference time in milliseconds.
        elapsed_ms: f32,
        /// Configured deadline in milliseconds.
        deadline_ms: f32,
    },
    /// Any other runtime failure.
    Runtime(String),
}

impl fmt::Display for InferenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InferenceError::ModelLoad {
                source_desc,
                details,
            } => write!(f, "Failed to load model from {source_desc}: {details}"),
            InferenceError::ShapeMismatch { expected, found } => {
                write!(f, "Tensor shape mismatch: expected {expected} elements, found {found}")
            }
            InferenceError::NonFiniteOutput => write!(f, "Model produced a non-finite output"),
            InferenceError::DeadlineExceeded {
                elapsed_ms,
                deadline_ms,
            } => write!(
                f,
                "Inference took {elapsed_ms:.3} ms, exceeding the {deadline_ms:.3} ms deadline"
            ),
            InferenceError::Runtime(msg) => write!(f, "Inference runtime error: {msg}"),
        }
    }
}

impl std::error::Error for InferenceError {}

/// An error raised by the graphics backend collaborator.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendError {
    /// A capability required by the pipeline is unavailable.
    CapabilityMissing(String),
    /// The uploaded mask does not match the backend's tile grid.
    MaskSizeMismatch {
        /// The tile grid the backend was configured for.
        expected: Extent2D,
        /// The size of the mask that was submitted.
        found: Extent2D,
    },
    /// The byte buffer length does not match `width * height`.
    InvalidMaskData {
        /// Expected byte count.
        expected: usize,
        /// Received byte count.
        found: usize,
    },
    /// `bind` was called before any mask was uploaded.
    NothingToBind,
    /// Device-level failure reported by the backend.
    Device(String),
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendError::CapabilityMissing(what) => {
                write!(f, "Required graphics capability unavailable: {what}")
            }
            BackendError::MaskSizeMismatch { expected, found } => write!(
                f,
                "Mask size {}x{} does not match tile grid {}x{}",
                found.width, found.height, expected.width, expected.height
            ),
            BackendError::InvalidMaskData { expected, found } => {
                write!(f, "Mask data has {found} bytes, expected {expected}")
            }
            BackendError::NothingToBind => write!(f, "No shading-rate mask has been uploaded"),
            BackendError::Device(msg) => write!(f, "Graphics device error: {msg}"),
        }
    }
}

impl std::error::Error for BackendError {}

/// An error raised by the gaze tracker collaborator.
#[derive(Debug, Clone, PartialEq)]
pub enum TrackerError {
    /// The tracker is not connected or stopped streaming.
    Disconnected(String),
    /// Any other device failure.
    Device(String),
}

impl fmt::Display for TrackerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackerError::Disconnected(msg) => write!(f, "Gaze tracker disconnected: {msg}"),
            TrackerError::Device(msg) => write!(f, "Gaze tracker error: {msg}"),
        }
    }
}

impl std::error::Error for TrackerError {}

/// The umbrella error returned by fallible startup operations.
#[derive(Debug)]
pub enum FoveaError {
    /// Invalid configuration.
    Config(ConfigError),
    /// Inference runtime failure (fatal only when loading the model).
    Inference(InferenceError),
    /// Graphics backend failure (fatal only for missing capabilities).
    Backend(BackendError),
    /// Gaze tracker failure.
    Tracker(TrackerError),
}

impl fmt::Display for FoveaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FoveaError::Config(e) => write!(f, "Configuration error: {e}"),
            FoveaError::Inference(e) => write!(f, "Inference error: {e}"),
            FoveaError::Backend(e) => write!(f, "Backend error: {e}"),
            FoveaError::Tracker(e) => write!(f, "Tracker error: {e}"),
        }
    }
}

impl std::error::Error for FoveaError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FoveaError::Config(e) => Some(e),
            FoveaError::Inference(e) => Some(e),
            FoveaError::Backend(e) => Some(e),
            FoveaError::Tracker(e) => Some(e),
        }
    }
}

impl From<ConfigError> for FoveaError {
    fn from(err: ConfigError) -> Self {
        FoveaError::Config(err)
    }
}

impl From<InferenceError> for FoveaError {
    fn from(err: InferenceError) -> Self {
        FoveaError::Inference(err)
    }
}

impl From<BackendError> for FoveaError {
    fn from(err: BackendError) -> Self {
        FoveaError::Backend(err)
    }
}

impl From<TrackerError> for FoveaError {
    fn from(err: TrackerError) -> Self {
        FoveaError::Tracker(err)
    }
}
