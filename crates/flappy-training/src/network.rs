use flappy_engine::{Controller, SENSOR_COUNT, SensorInputs};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::weights;

/// Number of hidden neurons of [`NeuralController`].
pub const HIDDEN_COUNT: usize = 6;

/// Length of the flattened weight vector of [`NeuralController`].
pub const WEIGHT_COUNT: usize = HIDDEN_COUNT * (SENSOR_COUNT + 1) + HIDDEN_COUNT + 1;

const OUTPUT_OFFSET: usize = HIDDEN_COUNT * (SENSOR_COUNT + 1);

/// Error returned when a weight vector has the wrong length.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("neural controller needs {WEIGHT_COUNT} weights, got {actual}")]
pub struct WeightCountError {
    pub actual: usize,
}

/// Fixed-topology feed-forward network.
///
/// Four sensor inputs, one hidden layer of [`HIDDEN_COUNT`] `tanh` neurons, one
/// sigmoid output in `(0, 1)`.
///
/// # Weight Layout
///
/// The network is stored as one flat vector of [`WEIGHT_COUNT`] weights, which
/// is also what the genetic operators work on:
///
/// ```text
/// [ h0: w0 w1 w2 w3 bias | h1: ... | ... | h5: ... | out: w0 .. w5 bias ]
/// ```
///
/// Serializes as that flat list of numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f32>", into = "Vec<f32>")]
pub struct NeuralController {
    weights: Vec<f32>,
}

impl NeuralController {
    /// Creates a network with weights uniformly distributed in `[-max_weight, max_weight]`.
    pub fn random<R>(rng: &mut R, max_weight: f32) -> Self
    where
        R: Rng + ?Sized,
    {
        Self {
            weights: weights::random(rng, max_weight, WEIGHT_COUNT),
        }
    }

    pub fn from_weights(weights: Vec<f32>) -> Result<Self, WeightCountError> {
        if weights.len() != WEIGHT_COUNT {
            return Err(WeightCountError {
                actual: weights.len(),
            });
        }
        Ok(Self { weights })
    }

    /// Flattened weights, see [Weight Layout](Self#weight-layout).
    #[must_use]
    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    /// Network with the same topology and new weights produced by the genetic operators.
    pub(crate) fn with_weights(weights: Vec<f32>) -> Self {
        debug_assert_eq!(weights.len(), WEIGHT_COUNT);
        Self { weights }
    }
}

impl Controller for NeuralController {
    fn evaluate(&self, inputs: &SensorInputs) -> f32 {
        let (hidden_weights, output_weights) = self.weights.split_at(OUTPUT_OFFSET);
        let mut output = output_weights[HIDDEN_COUNT];
        for (neuron, out_weight) in hidden_weights
            .chunks_exact(SENSOR_COUNT + 1)
            .zip(output_weights)
        {
            let (weights, bias) = neuron.split_at(SENSOR_COUNT);
            let activation = weights
                .iter()
                .zip(inputs.as_array())
                .fold(bias[0], |sum, (w, x)| sum + w * x);
            output += out_weight * activation.tanh();
        }
        sigmoid(output)
    }
}

impl TryFrom<Vec<f32>> for NeuralController {
    type Error = WeightCountError;

    fn try_from(weights: Vec<f32>) -> Result<Self, Self::Error> {
        Self::from_weights(weights)
    }
}

impl From<NeuralController> for Vec<f32> {
    fn from(controller: NeuralController) -> Self {
        controller.weights
    }
}

fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    #[test]
    fn test_weight_count() {
        assert_eq!(WEIGHT_COUNT, 37);
        let mut rng = Pcg32::seed_from_u64(0);
        let net = NeuralController::random(&mut rng, 1.0);
        assert_eq!(net.weights().len(), WEIGHT_COUNT);
        assert!(net.weights().iter().all(|w| (-1.0..=1.0).contains(w)));
    }

    #[test]
    fn test_zero_network_outputs_one_half() {
        let net = NeuralController::from_weights(vec![0.0; WEIGHT_COUNT]).unwrap();
        let inputs = SensorInputs([1.0, 2.0, 3.0, 4.0]);
        assert_eq!(net.evaluate(&inputs), 0.5);
        assert!(!net.wants_impulse(&inputs));
    }

    #[test]
    fn test_output_bias_drives_decision() {
        let mut weights = vec![0.0; WEIGHT_COUNT];
        weights[WEIGHT_COUNT - 1] = 2.0;
        let net = NeuralController::from_weights(weights).unwrap();
        let inputs = SensorInputs([0.0; SENSOR_COUNT]);
        assert!((net.evaluate(&inputs) - sigmoid(2.0)).abs() < 1e-7);
        assert!(net.wants_impulse(&inputs));
    }

    #[test]
    fn test_single_hidden_path() {
        // hidden neuron 0 reads input 1 with weight 0.5, output reads neuron 0 with weight 3
        let mut weights = vec![0.0; WEIGHT_COUNT];
        weights[1] = 0.5;
        weights[OUTPUT_OFFSET] = 3.0;
        let net = NeuralController::from_weights(weights).unwrap();
        let inputs = SensorInputs([9.0, 2.0, 9.0, 9.0]);
        let expected = sigmoid(3.0 * 1.0_f32.tanh());
        assert!((net.evaluate(&inputs) - expected).abs() < 1e-6);
    }

    #[test]
    fn test_rejects_wrong_weight_count() {
        assert_eq!(
            NeuralController::from_weights(vec![0.0; 3]),
            Err(WeightCountError { actual: 3 })
        );
        assert!(serde_json::from_str::<NeuralController>("[1.0, 2.0]").is_err());
    }

    #[test]
    fn test_json_round_trip_is_exact() {
        let mut rng = Pcg32::seed_from_u64(17);
        let net = NeuralController::random(&mut rng, 4.0);
        let json = serde_json::to_string(&net).unwrap();
        let loaded: NeuralController = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded, net);

        let inputs = SensorInputs([1.5, 0.25, 0.7, 0.8]);
        assert_eq!(
            loaded.evaluate(&inputs).to_bits(),
            net.evaluate(&inputs).to_bits()
        );
    }
}
