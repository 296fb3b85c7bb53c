//! Networks that can be crossed and mutated, and the
//! eight recombination strategies used to cross them.

mod crossing;
mod errors;
mod methods;
mod ranges;

pub use errors::{CrossbreedError, UnknownCrossbreedingMethod};
pub use methods::CrossbreedingMethod;
pub use ranges::ValueRange;

use crate::networks::format::{read_text, Tokens};
use crate::networks::{FeedForwardNetwork, SerializationError, TopologyError};

use evobreed::{offspring_generation, Crossbreedable, RandomSource};
use serde::{Deserialize, Serialize};

use std::io::{Read, Write};

/// A feed-forward network extended with everything
/// needed to breed it: a crossbreeding method, a generation
/// count, and the ranges that bound its mutations.
///
/// Suports Serde for convenient network saving and loading,
/// as well as the plain text form of [`write_to`].
///
/// [`write_to`]: BreedableNetwork::write_to
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BreedableNetwork {
    network: FeedForwardNetwork,
    generation: u32,
    crossbreeding_method: CrossbreedingMethod,
    weight_range: ValueRange,
    // Indexed by `layer - 1`.
    threshold_ranges: Vec<ValueRange>,
}

impl BreedableNetwork {
    /// Creates a zeroed breedable network with the given shape.
    ///
    /// Weights are mutated within `[-1, 1]`, and the threshold
    /// values of each layer within `[-n, n]`, where `n` is the
    /// size of the previous layer: the largest sum a neuron can
    /// receive from step-activated neurons with unit weights.
    ///
    /// # Errors
    /// Returns an error if any layer would be empty.
    ///
    /// # Examples
    /// ```
    /// use evobreed::Crossbreedable;
    /// use evobreed_nn::breeding::{BreedableNetwork, CrossbreedingMethod, ValueRange};
    ///
    /// let network = BreedableNetwork::new(3, &[5], 1).unwrap();
    /// assert_eq!(network.generation(), 0);
    /// assert_eq!(network.crossbreeding_method(), CrossbreedingMethod::ForwardPath);
    /// assert_eq!(network.weight_range(), ValueRange::new(-1.0, 1.0));
    /// assert_eq!(network.threshold_range(1), ValueRange::new(-3.0, 3.0));
    /// assert_eq!(network.threshold_range(2), ValueRange::new(-5.0, 5.0));
    /// ```
    pub fn new(
        input_count: usize,
        hidden_layer_sizes: &[usize],
        output_count: usize,
    ) -> Result<BreedableNetwork, TopologyError> {
        FeedForwardNetwork::new(input_count, hidden_layer_sizes, output_count)
            .map(BreedableNetwork::from)
    }

    /// Returns the underlying network.
    pub fn network(&self) -> &FeedForwardNetwork {
        &self.network
    }

    /// Returns the underlying network, for setting
    /// weights, thresholds and threshold values.
    pub fn network_mut(&mut self) -> &mut FeedForwardNetwork {
        &mut self.network
    }

    pub fn into_network(self) -> FeedForwardNetwork {
        self.network
    }

    /// Shorthand for [`FeedForwardNetwork::run`].
    pub fn run(&self, inputs: &[f64]) -> Vec<f64> {
        self.network.run(inputs)
    }

    pub fn crossbreeding_method(&self) -> CrossbreedingMethod {
        self.crossbreeding_method
    }

    /// Sets the method used when this network is the one
    /// crossbreed is called on. Offspring inherit it.
    pub fn set_crossbreeding_method(&mut self, method: CrossbreedingMethod) {
        self.crossbreeding_method = method;
    }

    /// Returns the range all weights are mutated within.
    pub fn weight_range(&self) -> ValueRange {
        self.weight_range
    }

    pub fn set_weight_range(&mut self, range: ValueRange) {
        self.weight_range = range;
    }

    /// Returns the range the threshold values
    /// of `layer` are mutated within.
    ///
    /// # Panics
    /// Panics if `layer` is the input layer or out of range.
    pub fn threshold_range(&self, layer: usize) -> ValueRange {
        self.threshold_ranges[layer - 1]
    }

    /// Sets the range the threshold values
    /// of `layer` are mutated within.
    ///
    /// # Panics
    /// Panics if `layer` is the input layer or out of range.
    pub fn set_threshold_range(&mut self, layer: usize, range: ValueRange) {
        self.threshold_ranges[layer - 1] = range;
    }

    /// Writes the network in text form: its generation, the
    /// network body (see [`FeedForwardNetwork::write_to`]), the
    /// maximum and minimum weight, then the maximum and minimum
    /// threshold value of every non-input layer.
    ///
    /// Neither the crossbreeding method nor the threshold
    /// functions are written.
    ///
    /// # Errors
    /// Returns an error if writing to the stream fails.
    ///
    /// # Examples
    /// ```
    /// use evobreed_nn::breeding::{BreedableNetwork, ValueRange};
    ///
    /// let mut network = BreedableNetwork::new(2, &[2], 1).unwrap();
    /// network.network_mut().set_weight(1, 1, 0, 0.75);
    /// network.set_weight_range(ValueRange::new(-4.0, 2.5));
    ///
    /// let mut text = Vec::new();
    /// network.write_to(&mut text).unwrap();
    /// assert_eq!(BreedableNetwork::read_from(text.as_slice()).unwrap(), network);
    /// ```
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<(), SerializationError> {
        writeln!(writer, "{}", self.generation)?;
        self.network.write_to(writer)?;
        writeln!(writer, "{}", self.weight_range.max)?;
        writeln!(writer, "{}", self.weight_range.min)?;
        for range in &self.threshold_ranges {
            writeln!(writer, "{}", range.max)?;
            writeln!(writer, "{}", range.min)?;
        }
        writeln!(writer)?;
        Ok(())
    }

    /// Reads a network written by [`write_to`]. The result uses
    /// the default crossbreeding method and [`Step`] functions.
    ///
    /// # Errors
    /// Returns an error if the stream fails, ends early,
    /// holds an unparsable token or describes an invalid
    /// topology.
    ///
    /// [`write_to`]: BreedableNetwork::write_to
    /// [`Step`]: crate::networks::ThresholdFunction::Step
    pub fn read_from<R: Read>(reader: R) -> Result<BreedableNetwork, SerializationError> {
        let text = read_text(reader)?;
        let mut tokens = Tokens::new(&text);

        let generation = tokens.next("generation")?;
        let network = FeedForwardNetwork::parse_tokens(&mut tokens)?;
        let weight_max = tokens.next("maximum weight")?;
        let weight_min = tokens.next("minimum weight")?;
        let mut threshold_ranges = Vec::with_capacity(network.layer_count() - 1);
        for _ in 1..network.layer_count() {
            let max = tokens.next("maximum threshold value")?;
            let min = tokens.next("minimum threshold value")?;
            threshold_ranges.push(ValueRange::new(min, max));
        }

        Ok(BreedableNetwork {
            network,
            generation,
            crossbreeding_method: CrossbreedingMethod::default(),
            weight_range: ValueRange::new(weight_min, weight_max),
            threshold_ranges,
        })
    }
}

impl From<FeedForwardNetwork> for BreedableNetwork {
    /// Wraps a network as a generation 0 breedable
    /// network with the default ranges and method.
    fn from(network: FeedForwardNetwork) -> BreedableNetwork {
        let threshold_ranges = network.neurons_per_layer()[..network.layer_count() - 1]
            .iter()
            .map(|&previous| ValueRange::symmetric(previous as f64))
            .collect();
        BreedableNetwork {
            network,
            generation: 0,
            crossbreeding_method: CrossbreedingMethod::default(),
            weight_range: ValueRange::new(-1.0, 1.0),
            threshold_ranges,
        }
    }
}

impl Crossbreedable for BreedableNetwork {
    type Error = CrossbreedError;

    /// Crosses `self` with `other` using `self`'s crossbreeding
    /// method, which the offspring inherits. The offspring's
    /// ranges are the unions of its parents' ranges.
    ///
    /// Except with [`BitString`], the offspring is then
    /// mutated with the given parameters and its generation
    /// set to one more than its parents' greatest.
    ///
    /// # Errors
    /// Returns an error if the parents' topologies differ.
    ///
    /// # Examples
    /// ```
    /// use evobreed::{Crossbreedable, RngSource};
    /// use evobreed_nn::breeding::BreedableNetwork;
    ///
    /// let mut rng = RngSource::seeded(3);
    /// let a = BreedableNetwork::new(2, &[3], 1).unwrap();
    /// let b = BreedableNetwork::new(2, &[3], 1).unwrap();
    /// let c = BreedableNetwork::new(2, &[4], 1).unwrap();
    ///
    /// let offspring = a.crossbreed(&b, 0.5, 0.1, 0.5, &mut rng).unwrap();
    /// assert_eq!(offspring.generation(), 1);
    /// assert!(a.crossbreed(&c, 0.5, 0.1, 0.5, &mut rng).is_err());
    /// ```
    ///
    /// [`BitString`]: CrossbreedingMethod::BitString
    fn crossbreed<R: RandomSource + ?Sized>(
        &self,
        other: &BreedableNetwork,
        fraction_other: f64,
        mutation_prob: f64,
        max_mutation_magnitude: f64,
        rng: &mut R,
    ) -> Result<BreedableNetwork, CrossbreedError> {
        if !self.network.is_compatible_with(&other.network) {
            return Err(CrossbreedError::IncompatibleTopology {
                expected: self.network.neurons_per_layer().to_vec(),
                found: other.network.neurons_per_layer().to_vec(),
            });
        }

        let mut offspring = BreedableNetwork {
            network: self.network.zeroed_like(),
            generation: 0,
            crossbreeding_method: self.crossbreeding_method,
            weight_range: self.weight_range.union(other.weight_range),
            threshold_ranges: self
                .threshold_ranges
                .iter()
                .zip(&other.threshold_ranges)
                .map(|(a, b)| a.union(*b))
                .collect(),
        };

        let (child, this, that) = (&mut offspring.network, &self.network, &other.network);
        match self.crossbreeding_method {
            CrossbreedingMethod::OneParent => {
                crossing::one_parent(child, this, that, fraction_other, rng)
            }
            CrossbreedingMethod::ForwardPath => {
                crossing::forward_path(child, this, that, fraction_other, rng)
            }
            CrossbreedingMethod::RandomAtom => {
                crossing::random_atom(child, this, that, fraction_other, rng)
            }
            CrossbreedingMethod::Half => crossing::half(child, this, that, fraction_other),
            CrossbreedingMethod::RandomHalf => {
                crossing::random_half(child, this, that, fraction_other, rng)
            }
            CrossbreedingMethod::Random => crossing::random(child, this, that, fraction_other, rng),
            CrossbreedingMethod::Averaging => {
                crossing::averaging(child, this, that, fraction_other, rng)
            }
            CrossbreedingMethod::BitString => {
                crossing::bit_string(child, this, that, fraction_other, mutation_prob, rng);
                // Bits were already flipped at the mutation rate.
                return Ok(offspring);
            }
        }

        offspring.mutate(mutation_prob, max_mutation_magnitude, rng);
        offspring.generation = offspring_generation(self.generation, other.generation);
        Ok(offspring)
    }

    /// Mutates every threshold value and weight independently
    /// with probability `mutation_prob`, moving it toward a
    /// fresh draw from its range (see [`ValueRange::mutate`]).
    ///
    /// Does nothing, and draws nothing, when both
    /// arguments are zero.
    ///
    /// # Examples
    /// ```
    /// use evobreed::{Crossbreedable, RngSource};
    /// use evobreed_nn::breeding::BreedableNetwork;
    ///
    /// let mut rng = RngSource::seeded(11);
    /// let mut network = BreedableNetwork::new(4, &[4], 2).unwrap();
    /// network.mutate(1.0, 1.0, &mut rng);
    ///
    /// let weights = network.network().outbound_weights(0, 0);
    /// assert!(weights.iter().all(|w| (-1.0..=1.0).contains(w)));
    /// assert!(weights.iter().any(|w| *w != 0.0));
    /// ```
    fn mutate<R: RandomSource + ?Sized>(
        &mut self,
        mutation_prob: f64,
        max_mutation_magnitude: f64,
        rng: &mut R,
    ) {
        if mutation_prob == 0.0 && max_mutation_magnitude == 0.0 {
            return;
        }

        let layer_count = self.network.layer_count();
        let weight_range = self.weight_range;
        for layer in 0..layer_count {
            for neuron in 0..self.network.neurons_in_layer(layer) {
                if layer > 0 && rng.next_float() <= mutation_prob {
                    let value = self.network.threshold_value(layer, neuron);
                    let mutated = self.threshold_ranges[layer - 1].mutate(
                        value,
                        max_mutation_magnitude,
                        rng,
                    );
                    self.network.set_threshold_value(layer, neuron, mutated);
                }
                if layer + 1 < layer_count {
                    for weight in self.network.outbound_weights_mut(layer, neuron) {
                        if rng.next_float() <= mutation_prob {
                            *weight = weight_range.mutate(*weight, max_mutation_magnitude, rng);
                        }
                    }
                }
            }
        }
    }

    fn generation(&self) -> u32 {
        self.generation
    }
}
