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

use crate::config::ModelSource;
use crate::error::InferenceError;
use crate::gaze::GazeTensor;

/// A loaded, ready-to-run saccade model with a fixed `(1, 10, 2) -> (2)` shape.
pub trait SequenceModel: Send {
    /// Name of the loaded model.
    fn name(&self) -> &str;

    /// Runs one blocking forward pass and returns `(x_deg, y_deg)`.
    fn run(&mut self, input: &GazeTensor) -> Result<[f32; 2], InferenceError>;
}

/// A local inference runtime able to load serialized models.
pub trait InferenceRuntime {
    /// Name of the runtime, for logs.
    fn runtime_name(&self) -> &'static str;

    /// Loads and validates a model. Failure here is fatal for the session.
    fn load(&self, source: &ModelSource) -> Result<Box<dyn SequenceModel>, InferenceError>;
}
