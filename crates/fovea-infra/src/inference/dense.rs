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

//! Dense feed-forward model: description format and forward pass.

use fovea_core::gaze::{GazeTensor, HISTORY_CAPACITY, TENSOR_FEATURES, TENSOR_LEN};
use fovea_core::traits::SequenceModel;
use fovea_core::InferenceError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading or validating a dense model.
#[derive(Debug, Error)]
pub enum DenseModelError {
    /// The model file could not be read.
    #[error("failed to read model file '{path}': {source}")]
    Io {
        /// Path of the model file.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The RON text is malformed.
    #[error("invalid model description: {0}")]
    Parse(#[from] ron::error::SpannedError),
    /// The model expects a different input sequence.
    #[error("model expects {sequence_length}x{features} inputs, the gaze tensor is 10x2")]
    InputShape {
        /// Declared sequence length.
        sequence_length: usize,
        /// Declared features per step.
        features: usize,
    },
    /// The model has no layers.
    #[error("model has no layers")]
    Empty,
    /// A layer's dimensions do not chain.
    #[error("layer {layer}: {reason}")]
    LayerShape {
        /// Zero-based layer index.
        layer: usize,
        /// What is inconsistent.
        reason: String,
    },
    /// The final layer does not produce exactly two values.
    #[error("model outputs {0} values, expected 2")]
    OutputShape(usize),
    /// A weight or bias is NaN or infinite.
    #[error("layer {0} contains non-finite parameters")]
    NonFiniteParameter(usize),
}

/// Non-linearity applied after a layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Activation {
    /// Identity.
    #[default]
    Linear,
    /// `max(0, x)`.
    Relu,
    /// Hyperbolic tangent.
    Tanh,
}

impl Activation {
    #[inline]
    fn apply(self, x: f32) -> f32 {
        match self {
            Activation::Linear => x,
            Activation::Relu => x.max(0.0),
            Activation::Tanh => x.tanh(),
        }
    }
}

/// One fully connected layer: `out = activation(weights * in + bias)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DenseLayerDesc {
    /// Row-major weights, one row per output.
    pub weights: Vec<Vec<f32>>,
    /// One bias per output.
    pub bias: Vec<f32>,
    /// Activation applied to every output.
    #[serde(default)]
    pub activation: Activation,
}

/// Serialized form of a dense saccade model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DenseModelDesc {
    /// Model name, for logs.
    pub name: String,
    /// Number of gaze samples consumed.
    pub sequence_length: usize,
    /// Values per gaze sample.
    pub features: usize,
    /// Layers applied in order.
    pub layers: Vec<DenseLayerDesc>,
}

impl DenseModelDesc {
    /// Parses a RON model description.
    pub fn from_ron_bytes(bytes: &[u8]) -> Result<Self, DenseModelError> {
        Ok(ron::de::from_bytes(bytes)?)
    }

    /// Checks the description against the fixed `(1, 10, 2) -> (2)` contract.
    pub fn validate(&self) -> Result<(), DenseModelError> {
        if self.sequence_length != HISTORY_CAPACITY || self.features != TENSOR_FEATURES {
            return Err(DenseModelError::InputShape {
                sequence_length: self.sequence_length,
                features: self.features,
            });
        }
        if self.layers.is_empty() {
            return Err(DenseModelError::Empty);
        }

        let mut width = TENSOR_LEN;
        for (index, layer) in self.layers.iter().enumerate() {
            if layer.weights.is_empty() {
                return Err(DenseModelError::LayerShape {
                    layer: index,
                    reason: "no outputs".into(),
                });
            }
            if let Some(row) = layer.weights.iter().find(|row| row.len() != width) {
                return Err(DenseModelError::LayerShape {
                    layer: index,
                    reason: format!("row has {} inputs, expected {width}", row.len()),
                });
            }
            if layer.bias.len() != layer.weights.len() {
                return Err(DenseModelError::LayerShape {
                    layer: index,
                    reason: format!(
                        "{} biases for {} outputs",
                        layer.bias.len(),
                        layer.weights.len()
                    ),
                });
            }
            let finite = layer.weights.iter().flatten().all(|w| w.is_finite())
                && layer.bias.iter().all(|b| b.is_finite());
            if !finite {
                return Err(DenseModelError::NonFiniteParameter(index));
            }
            width = layer.weights.len();
        }

        if width != 2 {
            return Err(DenseModelError::OutputShape(width));
        }
        Ok(())
    }
}

/// A validated dense model ready to run.
#[derive(Debug, Clone)]
pub struct DenseModel {
    desc: DenseModelDesc,
    scratch: [Vec<f32>; 2],
}

impl DenseModel {
    /// Validates `desc` and prepares the forward-pass buffers.
    pub fn new(desc: DenseModelDesc) -> Result<Self, DenseModelError> {
        desc.validate()?;
        let widest = desc
            .layers
            .iter()
            .map(|l| l.weights.len())
            .max()
            .unwrap_or(0)
            .max(TENSOR_LEN);
        Ok(Self {
            desc,
            scratch: [Vec::with_capacity(widest), Vec::with_capacity(widest)],
        })
    }

    /// The model description.
    pub fn desc(&self) -> &DenseModelDesc {
        &self.desc
    }

    /// Runs the forward pass over a flattened `(1, 10, 2)` input.
    pub fn forward(&mut self, input: &[f32]) -> Result<[f32; 2], InferenceError> {
        if input.len() != TENSOR_LEN {
            return Err(InferenceError::ShapeMismatch {
                expected: TENSOR_LEN,
                found: input.len(),
            });
        }

        let [current, next] = &mut self.scratch;
        current.clear();
        current.extend_from_slice(input);
        for layer in &self.desc.layers {
            next.clear();
            next.extend(layer.weights.iter().zip(&layer.bias).map(|(row, bias)| {
                let sum: f32 = row.iter().zip(current.iter()).map(|(w, x)| w * x).sum();
                layer.activation.apply(sum + bias)
            }));
            std::mem::swap(current, next);
        }

        match current.as_slice() {
            [x, y] => Ok([*x, *y]),
            other => Err(InferenceError::ShapeMismatch {
                expected: 2,
                found: other.len(),
            }),
        }
    }
}

impl SequenceModel for DenseModel {
    fn name(&self) -> &str {
        &self.desc.name
    }

    fn run(&mut self, input: &GazeTensor) -> Result<[f32; 2], InferenceError> {
        self.forward(input.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// `out = 2 * last - previous` for each axis.
    fn extrapolation_desc() -> DenseModelDesc {
        let mut rows = vec![vec![0.0; TENSOR_LEN]; 2];
        rows[0][16] = -1.0;
        rows[0][18] = 2.0;
        rows[1][17] = -1.0;
        rows[1][19] = 2.0;
        DenseModelDesc {
            name: "extrapolate".into(),
            sequence_length: 10,
            features: 2,
            layers: vec![DenseLayerDesc {
                weights: rows,
                bias: vec![0.0, 0.0],
                activation: Activation::Linear,
            }],
        }
    }

    #[test]
    fn test_linear_extrapolation() {
        let mut model = DenseModel::new(extrapolation_desc()).unwrap();
        let mut input = [0.0; TENSOR_LEN];
        input[16] = 1.0;
        input[17] = -1.0;
        input[18] = 2.0;
        input[19] = -3.0;
        let out = model.forward(&input).unwrap();
        assert_relative_eq!(out[0], 3.0);
        assert_relative_eq!(out[1], -5.0);
    }

    #[test]
    fn test_hidden_layer_with_activations() {
        let desc = DenseModelDesc {
            name: "hidden".into(),
            sequence_length: 10,
            features: 2,
            layers: vec![
                DenseLayerDesc {
                    weights: vec![vec![1.0; TENSOR_LEN], vec![-1.0; TENSOR_LEN]],
                    bias: vec![0.0, 0.0],
                    activation: Activation::Relu,
                },
                DenseLayerDesc {
                    weights: vec![vec![1.0, 1.0], vec![0.5, 0.0]],
                    bias: vec![0.0, 0.0],
                    activation: Activation::Tanh,
                },
            ],
        };
        let mut model = DenseModel::new(desc).unwrap();
        let out = model.forward(&[0.05; TENSOR_LEN]).unwrap();
        assert_relative_eq!(out[0], 1.0f32.tanh(), max_relative = 1e-6);
        assert_relative_eq!(out[1], 0.5f32.tanh(), max_relative = 1e-6);
    }

    #[test]
    fn test_shape_validation() {
        let mut desc = extrapolation_desc();
        desc.sequence_length = 8;
        assert!(matches!(
            desc.validate(),
            Err(DenseModelError::InputShape { .. })
        ));

        let mut desc = extrapolation_desc();
        desc.layers[0].weights.push(vec![0.0; TENSOR_LEN]);
        desc.layers[0].bias.push(0.0);
        assert!(matches!(desc.validate(), Err(DenseModelError::OutputShape(3))));

        let mut desc = extrapolation_desc();
        desc.layers[0].weights[1].pop();
        assert!(matches!(
            desc.validate(),
            Err(DenseModelError::LayerShape { layer: 0, .. })
        ));

        let mut desc = extrapolation_desc();
        desc.layers[0].bias[0] = f32::NAN;
        assert!(matches!(
            desc.validate(),
            Err(DenseModelError::NonFiniteParameter(0))
        ));

        let mut desc = extrapolation_desc();
        desc.layers.clear();
        assert!(matches!(desc.validate(), Err(DenseModelError::Empty)));
    }

    #[test]
    fn test_wrong_input_length() {
        let mut model = DenseModel::new(extrapolation_desc()).unwrap();
        assert_eq!(
            model.forward(&[0.0; 4]),
            Err(InferenceError::ShapeMismatch {
                expected: TENSOR_LEN,
                found: 4
            })
        );
    }

    #[test]
    fn test_ron_round_trip_keeps_default_activation() {
        let text = ron::ser::to_string(&extrapolation_desc()).unwrap();
        let parsed = DenseModelDesc::from_ron_bytes(text.as_bytes()).unwrap();
        assert_eq!(parsed, extrapolation_desc());

        let no_activation = r#"(
            name: "bias_only",
            sequence_length: 10,
            features: 2,
            layers: [(weights: [[0.0,0.0,0.0,0.0,0.0,0.0,0.0,0.0,0.0,0.0,0.0,0.0,0.0,0.0,0.0,0.0,0.0,0.0,0.0,0.0],
                                 [0.0,0.0,0.0,0.0,0.0,0.0,0.0,0.0,0.0,0.0,0.0,0.0,0.0,0.0,0.0,0.0,0.0,0.0,0.0,0.0]], bias: [1.5, -0.5])],
        )"#;
        let desc = DenseModelDesc::from_ron_bytes(no_activation.as_bytes()).unwrap();
        assert_eq!(desc.layers[0].activation, Activation::Linear);
        let mut model = DenseModel::new(desc).unwrap();
        assert_eq!(model.forward(&[9.0; TENSOR_LEN]).unwrap(), [1.5, -0.5]);
    }
}
