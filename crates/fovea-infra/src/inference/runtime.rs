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

use super::dense::{DenseModel, DenseModelDesc, DenseModelError};
use fovea_core::traits::{InferenceRuntime, SequenceModel};
use fovea_core::{InferenceError, ModelSource};

/// Runs dense models described in RON on the CPU.
#[derive(Debug, Default, Clone, Copy)]
pub struct NativeInferenceRuntime;

impl NativeInferenceRuntime {
    /// Creates a new `NativeInferenceRuntime`.
    pub fn new() -> Self {
        Self
    }

    /// Reads, parses, and validates a model.
    pub fn load_dense(&self, source: &ModelSource) -> Result<DenseModel, DenseModelError> {
        let desc = match source {
            ModelSource::Path(path) => {
                let bytes = std::fs::read(path).map_err(|source| DenseModelError::Io {
                    path: path.display().to_string(),
                    source,
                })?;
                DenseModelDesc::from_ron_bytes(&bytes)?
            }
            ModelSource::Bytes(bytes) => DenseModelDesc::from_ron_bytes(bytes)?,
        };
        DenseModel::new(desc)
    }
}

impl InferenceRuntime for NativeInferenceRuntime {
    fn runtime_name(&self) -> &'static str {
        "native-dense"
    }

    fn load(&self, source: &ModelSource) -> Result<Box<dyn SequenceModel>, InferenceError> {
        let model = self
            .load_dense(source)
            .map_err(|e| InferenceError::ModelLoad {
                source_desc: source.describe(),
                details: e.to_string(),
            })?;
        log::info!(
            "Loaded dense model '{}' ({} layers) from {}",
            model.desc().name,
            model.desc().layers.len(),
            source.describe()
        );
        Ok(Box::new(model))
    }
}
