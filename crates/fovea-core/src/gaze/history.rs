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

use super::GazeSample;
use std::collections::VecDeque;

/// Number of samples the pretrained saccade model consumes per inference.
///
/// Fixed by the model's input shape; a different value requires a different model.
pub const HISTORY_CAPACITY: usize = 10;

/// A bounded FIFO of the most recent gaze samples, oldest first.
///
/// Owned exclusively by the pipeline. Pushing onto a full history evicts the
/// oldest sample.
#[derive(Debug, Clone)]
pub struct GazeHistory {
    samples: VecDeque<GazeSample>,
    capacity: usize,
}

impl GazeHistory {
    /// Creates an empty history sized for the saccade model.
    pub fn new() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }

    /// Creates an empty history with a custom capacity (at least one sample).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Appends a sample at the tail, evicting the head once over capacity.
    pub fn push(&mut self, sample: GazeSample) {
        self.samples.push_back(sample);
        while self.samples.len() > self.capacity {
            self.samples.pop_front();
        }
    }

    /// `true` only when the history holds exactly `capacity` samples.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.samples.len() == self.capacity
    }

    /// Ordered read-only view of the samples, oldest first.
    pub fn contents(&self) -> impl ExactSizeIterator<Item = &GazeSample> + '_ {
        self.samples.iter()
    }

    /// The most recently pushed sample.
    #[inline]
    pub fn latest(&self) -> Option<&GazeSample> {
        self.samples.back()
    }

    /// Number of stored samples.
    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// `true` if no sample has been pushed yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Maximum number of samples retained.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drops every stored sample.
    pub fn clear(&mut self) {
        self.samples.clear();
    }
}

impl Default for GazeHistory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(i: usize) -> GazeSample {
        GazeSample::new(i as f32, -(i as f32))
    }

    #[test]
    fn test_keeps_last_ten_oldest_first() {
        let mut history = GazeHistory::new();
        for i in 0..15 {
            history.push(sample(i));
        }

        assert_eq!(history.len(), HISTORY_CAPACITY);
        let kept: Vec<f32> = history.contents().map(|s| s.x_deg).collect();
        assert_eq!(kept, (5..15).map(|i| i as f32).collect::<Vec<_>>());
        assert_eq!(history.latest(), Some(&sample(14)));
    }

    #[test]
    fn test_is_full_only_at_capacity() {
        let mut history = GazeHistory::new();
        for i in 0..9 {
            history.push(sample(i));
            assert!(!history.is_full(), "not full after {} samples", i + 1);
        }
        history.push(sample(9));
        assert!(history.is_full());

        for i in 10..30 {
            history.push(sample(i));
            assert!(history.is_full());
        }
    }

    #[test]
    fn test_clear_resets_fill_state() {
        let mut history = GazeHistory::with_capacity(3);
        for i in 0..3 {
            history.push(sample(i));
        }
        assert!(history.is_full());
        history.clear();
        assert!(history.is_empty());
        assert!(!history.is_full());
        assert_eq!(history.capacity(), 3);
    }
}
