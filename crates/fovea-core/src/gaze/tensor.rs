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

use super::{GazeHistory, HISTORY_CAPACITY};

/// Features per timestep (`x_deg`, `y_deg`).
pub const TENSOR_FEATURES: usize = 2;
/// Total number of elements in the model input.
pub const TENSOR_LEN: usize = HISTORY_CAPACITY * TENSOR_FEATURES;

/// The fixed-shape `(1, 10, 2)` model input, flattened oldest to newest as
/// `[x0, y0, x1, y1, ..., x9, y9]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GazeTensor {
    data: [f32; TENSOR_LEN],
}

impl GazeTensor {
    /// Logical shape of the tensor: batch, sequence, features.
    pub const SHAPE: [usize; 3] = [1, HISTORY_CAPACITY, TENSOR_FEATURES];

    /// Assembles the model input from a full history.
    ///
    /// Returns `None` unless the history holds exactly [`HISTORY_CAPACITY`] samples.
    pub fn from_history(history: &GazeHistory) -> Option<Self> {
        if !history.is_full() || history.capacity() != HISTORY_CAPACITY {
            return None;
        }
        let mut data = [0.0; TENSOR_LEN];
        for (slot, sample) in data.chunks_exact_mut(TENSOR_FEATURES).zip(history.contents()) {
            slot[0] = sample.x_deg;
            slot[1] = sample.y_deg;
        }
        Some(Self { data })
    }

    /// Wraps raw interleaved data.
    pub fn from_raw(data: [f32; TENSOR_LEN]) -> Self {
        Self { data }
    }

    /// The flattened, interleaved elements.
    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gaze::GazeSample;

    #[test]
    fn test_interleaves_oldest_first() {
        let mut history = GazeHistory::new();
        for i in 0..12 {
            history.push(GazeSample::new(i as f32, 100.0 + i as f32));
        }
        let tensor = GazeTensor::from_history(&history).unwrap();
        let data = tensor.as_slice();
        assert_eq!(data.len(), TENSOR_LEN);
        assert_eq!(&data[..4], &[2.0, 102.0, 3.0, 103.0]);
        assert_eq!(&data[18..], &[11.0, 111.0]);
    }

    #[test]
    fn test_requires_full_history() {
        let mut history = GazeHistory::new();
        for i in 0..9 {
            history.push(GazeSample::new(i as f32, 0.0));
        }
        assert!(GazeTensor::from_history(&history).is_none());

        let mut short = GazeHistory::with_capacity(4);
        for i in 0..4 {
            short.push(GazeSample::new(i as f32, 0.0));
        }
        assert!(short.is_full());
        assert!(GazeTensor::from_history(&short).is_none());
    }
}
