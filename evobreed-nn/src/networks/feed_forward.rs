use super::{ThresholdFunction, TopologyError};

use serde::{Deserialize, Serialize};

/// A dense, layered feed-forward neural network.
///
/// Layer `0` is the input layer and the last layer is the output
/// layer; every neuron of a layer is connected to every neuron of
/// the next one. Each non-input neuron has a threshold function
/// and a threshold value. The topology is fixed at construction.
///
/// Coordinates passed to the unchecked accessors must be valid;
/// they panic otherwise. The `get_*` accessors return `None` instead.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeedForwardNetwork {
    neurons_per_layer: Vec<usize>,
    // Indexed by `layer - 1`: the input layer has no threshold state.
    thresholds: Vec<Vec<ThresholdFunction>>,
    threshold_values: Vec<Vec<f64>>,
    // weights[layer][from][to], from `layer` into `layer + 1`.
    weights: Vec<Vec<Vec<f64>>>,
}

impl FeedForwardNetwork {
    /// Creates a network with the given shape. All weights and
    /// threshold values are zero and every neuron uses the
    /// [`Step`] function.
    ///
    /// # Errors
    /// Returns an error if any layer would be empty.
    ///
    /// # Examples
    /// ```
    /// use evobreed_nn::networks::FeedForwardNetwork;
    ///
    /// let network = FeedForwardNetwork::new(3, &[4, 2], 1).unwrap();
    /// assert_eq!(network.hidden_layer_count(), 2);
    /// assert_eq!(network.neurons_per_layer(), [3, 4, 2, 1]);
    ///
    /// assert!(FeedForwardNetwork::new(3, &[0], 1).is_err());
    /// ```
    ///
    /// [`Step`]: ThresholdFunction::Step
    pub fn new(
        input_count: usize,
        hidden_layer_sizes: &[usize],
        output_count: usize,
    ) -> Result<FeedForwardNetwork, TopologyError> {
        let mut sizes = Vec::with_capacity(hidden_layer_sizes.len() + 2);
        sizes.push(input_count);
        sizes.extend_from_slice(hidden_layer_sizes);
        sizes.push(output_count);
        FeedForwardNetwork::from_layer_sizes(&sizes)
    }

    /// Creates a zeroed network from the sizes of all its
    /// layers, input layer first and output layer last.
    ///
    /// # Errors
    /// Returns an error if fewer than two sizes are given
    /// or any of them is zero.
    pub fn from_layer_sizes(sizes: &[usize]) -> Result<FeedForwardNetwork, TopologyError> {
        validate_layer_sizes(sizes)?;
        Ok(FeedForwardNetwork {
            neurons_per_layer: sizes.to_vec(),
            thresholds: sizes[1..]
                .iter()
                .map(|&n| vec![ThresholdFunction::Step; n])
                .collect(),
            threshold_values: sizes[1..].iter().map(|&n| vec![0.0; n]).collect(),
            weights: sizes
                .windows(2)
                .map(|pair| vec![vec![0.0; pair[1]]; pair[0]])
                .collect(),
        })
    }

    /// Assembles a network from already-shaped parts.
    /// All neurons use the [`Step`] function.
    ///
    /// [`Step`]: ThresholdFunction::Step
    pub(crate) fn from_parts(
        neurons_per_layer: Vec<usize>,
        threshold_values: Vec<Vec<f64>>,
        weights: Vec<Vec<Vec<f64>>>,
    ) -> FeedForwardNetwork {
        debug_assert_eq!(threshold_values.len() + 1, neurons_per_layer.len());
        debug_assert_eq!(weights.len() + 1, neurons_per_layer.len());
        FeedForwardNetwork {
            thresholds: neurons_per_layer[1..]
                .iter()
                .map(|&n| vec![ThresholdFunction::Step; n])
                .collect(),
            neurons_per_layer,
            threshold_values,
            weights,
        }
    }

    /// Returns a zeroed network with the same topology.
    pub(crate) fn zeroed_like(&self) -> FeedForwardNetwork {
        let sizes = &self.neurons_per_layer;
        FeedForwardNetwork::from_parts(
            sizes.clone(),
            sizes[1..].iter().map(|&n| vec![0.0; n]).collect(),
            sizes
                .windows(2)
                .map(|pair| vec![vec![0.0; pair[1]]; pair[0]])
                .collect(),
        )
    }

    /// Propagates `inputs` through the network and returns
    /// the activations of the output layer.
    ///
    /// The weighted sum at neuron `j` of layer `i` is
    /// `Σₖ weight(i-1, k, j) · activation(i-1, k)`, which is
    /// then passed, with the neuron's threshold value, through
    /// the neuron's threshold function.
    ///
    /// # Panics
    /// Panics if `inputs` does not hold exactly one
    /// value per input neuron.
    ///
    /// # Examples
    /// ```
    /// use evobreed_nn::networks::{FeedForwardNetwork, ThresholdFunction};
    ///
    /// // out = step(0.5·a + 0.5·b, 1.0), an AND gate.
    /// let mut network = FeedForwardNetwork::new(2, &[], 1).unwrap();
    /// network.set_weight(0, 0, 0, 0.5);
    /// network.set_weight(0, 1, 0, 0.5);
    /// network.set_threshold_value(1, 0, 1.0);
    ///
    /// assert_eq!(network.run(&[1.0, 1.0]), [1.0]);
    /// assert_eq!(network.run(&[1.0, 0.0]), [0.0]);
    ///
    /// network.set_threshold(1, 0, ThresholdFunction::Identity);
    /// assert_eq!(network.run(&[1.0, 0.0]), [0.5]);
    /// ```
    pub fn run(&self, inputs: &[f64]) -> Vec<f64> {
        assert_eq!(
            inputs.len(),
            self.input_count(),
            "network run with {} inputs, expected {}",
            inputs.len(),
            self.input_count()
        );

        let mut activations = inputs.to_vec();
        for layer in 1..self.layer_count() {
            let mut sums = vec![0.0; self.neurons_per_layer[layer]];
            for (value, outbound) in activations.iter().zip(&self.weights[layer - 1]) {
                for (sum, weight) in sums.iter_mut().zip(outbound) {
                    *sum += weight * value;
                }
            }
            activations = sums
                .into_iter()
                .zip(&self.thresholds[layer - 1])
                .zip(&self.threshold_values[layer - 1])
                .map(|((sum, function), value)| function.apply(sum, *value))
                .collect();
        }
        activations
    }

    /// Returns the number of hidden layers.
    pub fn hidden_layer_count(&self) -> usize {
        self.neurons_per_layer.len() - 2
    }

    /// Returns the number of layers, input and output included.
    pub fn layer_count(&self) -> usize {
        self.neurons_per_layer.len()
    }

    /// Returns the number of neurons in `layer`.
    pub fn neurons_in_layer(&self, layer: usize) -> usize {
        self.neurons_per_layer[layer]
    }

    /// Returns the number of neurons in every layer,
    /// input layer first.
    pub fn neurons_per_layer(&self) -> &[usize] {
        &self.neurons_per_layer
    }

    pub fn input_count(&self) -> usize {
        self.neurons_per_layer[0]
    }

    pub fn output_count(&self) -> usize {
        self.neurons_per_layer[self.neurons_per_layer.len() - 1]
    }

    /// Returns whether both networks have identical topologies,
    /// the requirement for crossing them.
    ///
    /// # Examples
    /// ```
    /// use evobreed_nn::networks::FeedForwardNetwork;
    ///
    /// let a = FeedForwardNetwork::new(3, &[2], 1).unwrap();
    /// let b = FeedForwardNetwork::new(3, &[2], 1).unwrap();
    /// let c = FeedForwardNetwork::new(3, &[2, 2], 1).unwrap();
    /// assert!(a.is_compatible_with(&b));
    /// assert!(!a.is_compatible_with(&c));
    /// ```
    pub fn is_compatible_with(&self, other: &FeedForwardNetwork) -> bool {
        self.neurons_per_layer == other.neurons_per_layer
    }

    /// Returns the threshold function of a non-input neuron.
    ///
    /// # Panics
    /// Panics if `layer` is the input layer or
    /// the coordinates are out of range.
    pub fn threshold(&self, layer: usize, neuron: usize) -> ThresholdFunction {
        self.thresholds[layer - 1][neuron]
    }

    /// Sets the threshold function of a non-input neuron.
    ///
    /// # Panics
    /// Panics if `layer` is the input layer or
    /// the coordinates are out of range.
    pub fn set_threshold(&mut self, layer: usize, neuron: usize, function: ThresholdFunction) {
        self.thresholds[layer - 1][neuron] = function;
    }

    /// Returns the threshold value of a non-input neuron.
    ///
    /// # Panics
    /// Panics if `layer` is the input layer or
    /// the coordinates are out of range.
    pub fn threshold_value(&self, layer: usize, neuron: usize) -> f64 {
        self.threshold_values[layer - 1][neuron]
    }

    /// Sets the threshold value of a non-input neuron.
    ///
    /// # Panics
    /// Panics if `layer` is the input layer or
    /// the coordinates are out of range.
    pub fn set_threshold_value(&mut self, layer: usize, neuron: usize, value: f64) {
        self.threshold_values[layer - 1][neuron] = value;
    }

    /// Returns the weight of the edge from neuron `from` of
    /// `layer` to neuron `to` of `layer + 1`.
    ///
    /// # Panics
    /// Panics if `layer` is the output layer or
    /// the coordinates are out of range.
    pub fn weight(&self, layer: usize, from: usize, to: usize) -> f64 {
        self.weights[layer][from][to]
    }

    /// Sets the weight of the edge from neuron `from` of
    /// `layer` to neuron `to` of `layer + 1`.
    ///
    /// # Panics
    /// Panics if `layer` is the output layer or
    /// the coordinates are out of range.
    pub fn set_weight(&mut self, layer: usize, from: usize, to: usize, weight: f64) {
        self.weights[layer][from][to] = weight;
    }

    /// Returns the weights of all edges leaving
    /// neuron `neuron` of `layer`.
    ///
    /// # Panics
    /// Panics if `layer` is the output layer or
    /// the coordinates are out of range.
    pub fn outbound_weights(&self, layer: usize, neuron: usize) -> &[f64] {
        &self.weights[layer][neuron]
    }

    /// Mutable version of [`outbound_weights`].
    ///
    /// [`outbound_weights`]: FeedForwardNetwork::outbound_weights
    pub fn outbound_weights_mut(&mut self, layer: usize, neuron: usize) -> &mut [f64] {
        &mut self.weights[layer][neuron]
    }

    /// Checked version of [`threshold_value`].
    ///
    /// # Examples
    /// ```
    /// use evobreed_nn::networks::FeedForwardNetwork;
    ///
    /// let network = FeedForwardNetwork::new(2, &[3], 1).unwrap();
    /// assert_eq!(network.get_threshold_value(1, 2), Some(0.0));
    /// assert_eq!(network.get_threshold_value(0, 0), None);
    /// assert_eq!(network.get_threshold_value(2, 1), None);
    /// ```
    ///
    /// [`threshold_value`]: FeedForwardNetwork::threshold_value
    pub fn get_threshold_value(&self, layer: usize, neuron: usize) -> Option<f64> {
        self.threshold_values
            .get(layer.checked_sub(1)?)?
            .get(neuron)
            .copied()
    }

    /// Checked version of [`weight`].
    ///
    /// # Examples
    /// ```
    /// use evobreed_nn::networks::FeedForwardNetwork;
    ///
    /// let network = FeedForwardNetwork::new(2, &[3], 1).unwrap();
    /// assert_eq!(network.get_weight(0, 1, 2), Some(0.0));
    /// assert_eq!(network.get_weight(1, 2, 1), None);
    /// assert_eq!(network.get_weight(2, 0, 0), None);
    /// ```
    ///
    /// [`weight`]: FeedForwardNetwork::weight
    pub fn get_weight(&self, layer: usize, from: usize, to: usize) -> Option<f64> {
        self.weights.get(layer)?.get(from)?.get(to).copied()
    }
}

/// Checks that `sizes` describes a network with at
/// least an input and an output layer and no empty layer.
pub(crate) fn validate_layer_sizes(sizes: &[usize]) -> Result<(), TopologyError> {
    if sizes.len() < 2 {
        return Err(TopologyError::MissingLayers(sizes.len()));
    }
    if sizes[0] == 0 {
        return Err(TopologyError::NoInputs);
    }
    if sizes[sizes.len() - 1] == 0 {
        return Err(TopologyError::NoOutputs);
    }
    match sizes[1..sizes.len() - 1].iter().position(|&n| n == 0) {
        Some(index) => Err(TopologyError::EmptyHiddenLayer(index)),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn xor_network() -> FeedForwardNetwork {
        // h0 = a OR b, h1 = a AND b, out = h0 AND NOT h1.
        let mut network = FeedForwardNetwork::new(2, &[2], 1).unwrap();
        for input in 0..2 {
            network.set_weight(0, input, 0, 1.0);
            network.set_weight(0, input, 1, 1.0);
        }
        network.set_threshold_value(1, 0, 1.0);
        network.set_threshold_value(1, 1, 2.0);
        network.set_weight(1, 0, 0, 1.0);
        network.set_weight(1, 1, 0, -1.0);
        network.set_threshold_value(2, 0, 1.0);
        network
    }

    #[test]
    fn new_zeroes_everything() {
        let network = FeedForwardNetwork::new(3, &[4, 5], 2).unwrap();
        assert_eq!(network.layer_count(), 4);
        assert_eq!(network.input_count(), 3);
        assert_eq!(network.output_count(), 2);
        for layer in 1..4 {
            for neuron in 0..network.neurons_in_layer(layer) {
                assert_eq!(network.threshold(layer, neuron), ThresholdFunction::Step);
                assert_eq!(network.threshold_value(layer, neuron), 0.0);
            }
        }
        for layer in 0..3 {
            for from in 0..network.neurons_in_layer(layer) {
                assert_eq!(
                    network.outbound_weights(layer, from),
                    vec![0.0; network.neurons_in_layer(layer + 1)].as_slice()
                );
            }
        }
    }

    #[test]
    fn invalid_topologies() {
        assert_eq!(
            FeedForwardNetwork::new(0, &[2], 1),
            Err(TopologyError::NoInputs)
        );
        assert_eq!(
            FeedForwardNetwork::new(2, &[2], 0),
            Err(TopologyError::NoOutputs)
        );
        assert_eq!(
            FeedForwardNetwork::new(2, &[2, 3, 0], 1),
            Err(TopologyError::EmptyHiddenLayer(2))
        );
        assert_eq!(
            FeedForwardNetwork::from_layer_sizes(&[4]),
            Err(TopologyError::MissingLayers(1))
        );
    }

    #[test]
    fn zeroed_step_network_fires() {
        // Sum 0 is not below threshold 0.
        let network = FeedForwardNetwork::new(3, &[2], 2).unwrap();
        assert_eq!(network.run(&[0.3, -7.0, 1.0]), [1.0, 1.0]);
    }

    #[test]
    fn run_xor() {
        let network = xor_network();
        assert_eq!(network.run(&[0.0, 0.0]), [0.0]);
        assert_eq!(network.run(&[0.0, 1.0]), [1.0]);
        assert_eq!(network.run(&[1.0, 0.0]), [1.0]);
        assert_eq!(network.run(&[1.0, 1.0]), [0.0]);
    }

    #[test]
    fn run_identity_is_linear() {
        let mut network = FeedForwardNetwork::new(2, &[2], 1).unwrap();
        for layer in 1..3 {
            for neuron in 0..network.neurons_in_layer(layer) {
                network.set_threshold(layer, neuron, ThresholdFunction::Identity);
            }
        }
        network.set_weight(0, 0, 0, 2.0);
        network.set_weight(0, 1, 0, -1.0);
        network.set_weight(0, 1, 1, 0.5);
        network.set_weight(1, 0, 0, 1.0);
        network.set_weight(1, 1, 0, 4.0);
        // h0 = 2a - b, h1 = b / 2, out = h0 + 4·h1 = 2a + b.
        assert_eq!(network.run(&[1.5, 3.0]), [6.0]);
    }

    #[test]
    fn run_leaves_network_untouched() {
        let network = xor_network();
        let copy = network.clone();
        network.run(&[1.0, 0.0]);
        assert_eq!(network, copy);
    }

    #[test]
    #[should_panic]
    fn run_with_wrong_input_count() {
        xor_network().run(&[1.0]);
    }

    #[test]
    fn checked_accessors() {
        let network = xor_network();
        assert_eq!(network.get_weight(1, 1, 0), Some(-1.0));
        assert_eq!(network.get_weight(0, 2, 0), None);
        assert_eq!(network.get_threshold_value(1, 1), Some(2.0));
        assert_eq!(network.get_threshold_value(3, 0), None);
    }

    #[test]
    fn serde_round_trip() {
        let mut network = xor_network();
        network.set_threshold(2, 0, ThresholdFunction::Identity);
        let text = serde_json::to_string(&network).unwrap();
        let copy: FeedForwardNetwork = serde_json::from_str(&text).unwrap();
        assert_eq!(network, copy);
    }
}
