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

//! Gaze data model: samples, the rolling history, the model input tensor,
//! and the per-frame prediction and uncertainty results.

mod history;
mod prediction;
mod sample;
mod tensor;

pub use self::history::{GazeHistory, HISTORY_CAPACITY};
pub use self::prediction::{PredictionResult, UncertaintyEstimate};
pub use self::sample::GazeSample;
pub use self::tensor::{GazeTensor, TENSOR_FEATURES, TENSOR_LEN};
