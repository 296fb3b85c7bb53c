//! The recombination step of each [`CrossbreedingMethod`].
//!
//! Every function fills `offspring`, a zeroed network with the
//! parents' topology, from `this` (the network crossbreed was
//! called on) and `other`. Random draws are made in a fixed
//! order, so a seeded source reproduces a cross exactly.
//!
//! [`CrossbreedingMethod`]: super::CrossbreedingMethod
use crate::networks::FeedForwardNetwork;

use evobreed::RandomSource;

/// Coin flip: `other` with probability `fraction_other`.
fn pick_parent<'a, R: RandomSource + ?Sized>(
    this: &'a FeedForwardNetwork,
    other: &'a FeedForwardNetwork,
    fraction_other: f64,
    rng: &mut R,
) -> &'a FeedForwardNetwork {
    if rng.next_float() > fraction_other {
        this
    } else {
        other
    }
}

/// Copies a neuron's threshold function, threshold value
/// and outbound weights, whichever it has.
fn copy_neuron(
    offspring: &mut FeedForwardNetwork,
    parent: &FeedForwardNetwork,
    layer: usize,
    neuron: usize,
) {
    if layer > 0 {
        offspring.set_threshold(layer, neuron, parent.threshold(layer, neuron));
        offspring.set_threshold_value(layer, neuron, parent.threshold_value(layer, neuron));
    }
    if layer + 1 < parent.layer_count() {
        offspring
            .outbound_weights_mut(layer, neuron)
            .copy_from_slice(parent.outbound_weights(layer, neuron));
    }
}

/// Picks a random unmarked slot: a uniform start index
/// in `[0, len - 1)`, then a forward scan with wrap-around.
/// A start index is drawn even if every slot is marked.
fn pick_unmarked<R: RandomSource + ?Sized>(marks: &[bool], rng: &mut R) -> Option<usize> {
    let len = marks.len();
    let start = (rng.next_float() * len.saturating_sub(1) as f64) as usize;
    (0..len).map(|i| (start + i) % len).find(|&i| !marks[i])
}

/// Returns the unmarked slot with the largest nonzero weight
/// magnitude, the first one on ties.
fn strongest_unmarked(marks: &[bool], weights: &[f64]) -> Option<usize> {
    let mut strongest = None;
    let mut max_magnitude = 0.0;
    for (i, (&marked, weight)) in marks.iter().zip(weights).enumerate() {
        if !marked && weight.abs() > max_magnitude {
            max_magnitude = weight.abs();
            strongest = Some(i);
        }
    }
    strongest
}

pub(super) fn one_parent<R: RandomSource + ?Sized>(
    offspring: &mut FeedForwardNetwork,
    this: &FeedForwardNetwork,
    other: &FeedForwardNetwork,
    fraction_other: f64,
    rng: &mut R,
) {
    offspring.clone_from(pick_parent(this, other, fraction_other, rng));
}

pub(super) fn forward_path<R: RandomSource + ?Sized>(
    offspring: &mut FeedForwardNetwork,
    this: &FeedForwardNetwork,
    other: &FeedForwardNetwork,
    fraction_other: f64,
    rng: &mut R,
) {
    let layer_count = this.layer_count();
    let mut marks: Vec<Vec<bool>> = this
        .neurons_per_layer()
        .iter()
        .map(|&n| vec![false; n])
        .collect();

    while let Some(input) = pick_unmarked(&marks[0], rng) {
        marks[0][input] = true;
        let parent = pick_parent(this, other, fraction_other, rng);

        let mut current = input;
        for layer in 1..layer_count {
            let outbound = parent.outbound_weights(layer - 1, current);
            offspring
                .outbound_weights_mut(layer - 1, current)
                .copy_from_slice(outbound);

            // A path ends early once every neuron
            // it could follow is taken.
            let next = match strongest_unmarked(&marks[layer], outbound) {
                Some(next) => next,
                None => break,
            };
            marks[layer][next] = true;
            offspring.set_threshold(layer, next, parent.threshold(layer, next));
            offspring.set_threshold_value(layer, next, parent.threshold_value(layer, next));
            current = next;
        }
    }

    for layer in 1..layer_count {
        while let Some(neuron) = pick_unmarked(&marks[layer], rng) {
            marks[layer][neuron] = true;
            let parent = pick_parent(this, other, fraction_other, rng);
            copy_neuron(offspring, parent, layer, neuron);
        }
    }
}

pub(super) fn random_atom<R: RandomSource + ?Sized>(
    offspring: &mut FeedForwardNetwork,
    this: &FeedForwardNetwork,
    other: &FeedForwardNetwork,
    fraction_other: f64,
    rng: &mut R,
) {
    for layer in 0..this.layer_count() {
        for neuron in 0..this.neurons_in_layer(layer) {
            let parent = pick_parent(this, other, fraction_other, rng);
            copy_neuron(offspring, parent, layer, neuron);
        }
    }
}

pub(super) fn half(
    offspring: &mut FeedForwardNetwork,
    this: &FeedForwardNetwork,
    other: &FeedForwardNetwork,
    fraction_other: f64,
) {
    for layer in 0..this.layer_count() {
        let size = this.neurons_in_layer(layer) as f64;
        for neuron in 0..this.neurons_in_layer(layer) {
            let parent = if neuron as f64 > fraction_other * size {
                this
            } else {
                other
            };
            copy_neuron(offspring, parent, layer, neuron);
        }
    }
}

pub(super) fn random_half<R: RandomSource + ?Sized>(
    offspring: &mut FeedForwardNetwork,
    this: &FeedForwardNetwork,
    other: &FeedForwardNetwork,
    fraction_other: f64,
    rng: &mut R,
) {
    let start = rng.next_float() * fraction_other;
    let end = start + (1.0 - fraction_other);

    for layer in 0..this.layer_count() {
        // A whole-layer coin is still flipped, but the window
        // alone decides each neuron's parent.
        let _ = pick_parent(this, other, fraction_other, rng);

        let size = this.neurons_in_layer(layer) as f64;
        for neuron in 0..this.neurons_in_layer(layer) {
            let position = neuron as f64;
            let parent = if position < start * size || position > end * size {
                other
            } else {
                this
            };
            copy_neuron(offspring, parent, layer, neuron);
        }
    }
}

pub(super) fn random<R: RandomSource + ?Sized>(
    offspring: &mut FeedForwardNetwork,
    this: &FeedForwardNetwork,
    other: &FeedForwardNetwork,
    fraction_other: f64,
    rng: &mut R,
) {
    let layer_count = this.layer_count();
    for layer in 0..layer_count {
        for neuron in 0..this.neurons_in_layer(layer) {
            let parent = pick_parent(this, other, fraction_other, rng);
            if layer > 0 {
                offspring.set_threshold(layer, neuron, parent.threshold(layer, neuron));
                offspring.set_threshold_value(layer, neuron, parent.threshold_value(layer, neuron));
            }
            if layer + 1 < layer_count {
                for to in 0..this.neurons_in_layer(layer + 1) {
                    let parent = pick_parent(this, other, fraction_other, rng);
                    offspring.set_weight(layer, neuron, to, parent.weight(layer, neuron, to));
                }
            }
        }
    }
}

pub(super) fn averaging<R: RandomSource + ?Sized>(
    offspring: &mut FeedForwardNetwork,
    this: &FeedForwardNetwork,
    other: &FeedForwardNetwork,
    fraction_other: f64,
    rng: &mut R,
) {
    let blend = |own: f64, others: f64| (1.0 - fraction_other) * own + fraction_other * others;
    let layer_count = this.layer_count();
    for layer in 0..layer_count {
        for neuron in 0..this.neurons_in_layer(layer) {
            let parent = pick_parent(this, other, fraction_other, rng);
            if layer > 0 {
                offspring.set_threshold(layer, neuron, parent.threshold(layer, neuron));
                offspring.set_threshold_value(
                    layer,
                    neuron,
                    blend(
                        this.threshold_value(layer, neuron),
                        other.threshold_value(layer, neuron),
                    ),
                );
            }
            if layer + 1 < layer_count {
                let weights = offspring.outbound_weights_mut(layer, neuron);
                let own = this.outbound_weights(layer, neuron);
                let others = other.outbound_weights(layer, neuron);
                for ((weight, &a), &b) in weights.iter_mut().zip(own).zip(others) {
                    *weight = blend(a, b);
                }
            }
        }
    }
}

/// Lays out every threshold value and weight of `network` as
/// little-endian IEEE-754 bytes, layer by layer and neuron by
/// neuron, each neuron's threshold value before its outbound
/// weights.
fn flatten(network: &FeedForwardNetwork) -> Vec<u8> {
    let layer_count = network.layer_count();
    let mut bytes = Vec::new();
    for layer in 0..layer_count {
        for neuron in 0..network.neurons_in_layer(layer) {
            if layer > 0 {
                bytes.extend_from_slice(&network.threshold_value(layer, neuron).to_le_bytes());
            }
            if layer + 1 < layer_count {
                for weight in network.outbound_weights(layer, neuron) {
                    bytes.extend_from_slice(&weight.to_le_bytes());
                }
            }
        }
    }
    bytes
}

pub(super) fn bit_string<R: RandomSource + ?Sized>(
    offspring: &mut FeedForwardNetwork,
    this: &FeedForwardNetwork,
    other: &FeedForwardNetwork,
    fraction_other: f64,
    mutation_prob: f64,
    rng: &mut R,
) {
    let own = flatten(this);
    let mut bytes = flatten(other);

    let start = rng.next_float() * fraction_other;
    let end = start + (1.0 - fraction_other);
    let len = bytes.len();
    let start_byte = ((start * len as f64) as usize).min(len);
    let end_byte = ((end * len as f64) as usize).clamp(start_byte, len);
    bytes[start_byte..end_byte].copy_from_slice(&own[start_byte..end_byte]);

    for byte in bytes.iter_mut() {
        for bit in 0..8 {
            if rng.next_float() <= mutation_prob {
                *byte ^= 1 << bit;
            }
        }
    }

    let values: Vec<f64> = bytes
        .chunks_exact(8)
        .map(|chunk| {
            let mut raw = [0; 8];
            raw.copy_from_slice(chunk);
            f64::from_le_bytes(raw)
        })
        .collect();

    let layer_count = this.layer_count();
    let mut next = 0;
    for layer in 0..layer_count {
        for neuron in 0..this.neurons_in_layer(layer) {
            let parent = pick_parent(this, other, fraction_other, rng);
            if layer > 0 {
                offspring.set_threshold(layer, neuron, parent.threshold(layer, neuron));
                offspring.set_threshold_value(layer, neuron, values[next]);
                next += 1;
            }
            if layer + 1 < layer_count {
                for weight in offspring.outbound_weights_mut(layer, neuron) {
                    *weight = values[next];
                    next += 1;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Replays a fixed sequence of draws.
    struct Script(Vec<f64>, usize);

    impl RandomSource for Script {
        fn next_float(&mut self) -> f64 {
            let value = self.0[self.1 % self.0.len()];
            self.1 += 1;
            value
        }
    }

    #[test]
    fn pick_unmarked_wraps_around() {
        let mut marks = vec![false, true, true, false];
        // Start index floor(0.5 · 3) = 1, marked; 2 marked; 3 free.
        assert_eq!(pick_unmarked(&marks, &mut Script(vec![0.5], 0)), Some(3));
        marks[3] = true;
        assert_eq!(pick_unmarked(&marks, &mut Script(vec![0.5], 0)), Some(0));
        marks[0] = true;
        let mut rng = Script(vec![0.5], 0);
        assert_eq!(pick_unmarked(&marks, &mut rng), None);
        assert_eq!(rng.1, 1);
    }

    #[test]
    fn pick_unmarked_single_slot() {
        assert_eq!(pick_unmarked(&[false], &mut Script(vec![0.99], 0)), Some(0));
        assert_eq!(pick_unmarked(&[true], &mut Script(vec![0.99], 0)), None);
    }

    #[test]
    fn strongest_unmarked_uses_magnitude() {
        let weights = [0.5, -2.0, 2.0, 1.0];
        assert_eq!(strongest_unmarked(&[false; 4], &weights), Some(1));
        assert_eq!(
            strongest_unmarked(&[false, true, false, false], &weights),
            Some(2)
        );
        assert_eq!(strongest_unmarked(&[false; 3], &[0.0, 0.0, 0.0]), None);
        assert_eq!(strongest_unmarked(&[true, true], &[1.0, 1.0]), None);
    }

    fn filled(sizes: &[usize], offset: f64) -> FeedForwardNetwork {
        let mut network = FeedForwardNetwork::from_layer_sizes(sizes).unwrap();
        let mut value = offset;
        for layer in 0..sizes.len() {
            for neuron in 0..sizes[layer] {
                if layer > 0 {
                    network.set_threshold_value(layer, neuron, value);
                    value += 1.0;
                }
                if layer + 1 < sizes.len() {
                    for weight in network.outbound_weights_mut(layer, neuron) {
                        *weight = value;
                        value += 1.0;
                    }
                }
            }
        }
        network
    }

    #[test]
    fn flatten_order() {
        let network = filled(&[1, 2, 1], 0.0);
        let values: Vec<f64> = flatten(&network)
            .chunks_exact(8)
            .map(|c| f64::from_le_bytes([c[0], c[1], c[2], c[3], c[4], c[5], c[6], c[7]]))
            .collect();
        assert_eq!(values, [0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(network.weight(1, 0, 0), 3.0);
        assert_eq!(network.threshold_value(1, 1), 4.0);
    }

    #[test]
    fn half_splits_deterministically() {
        let sizes = [4, 4, 1];
        let (this, other) = (filled(&sizes, 0.0), filled(&sizes, 100.0));
        let mut offspring = this.zeroed_like();
        half(&mut offspring, &this, &other, 0.5);
        // Positions 0, 1 and 2 (≤ 0.5 · 4) come from `other`.
        for neuron in 0..4 {
            let parent = if neuron > 2 { &this } else { &other };
            assert_eq!(
                offspring.outbound_weights(0, neuron),
                parent.outbound_weights(0, neuron)
            );
            assert_eq!(
                offspring.threshold_value(1, neuron),
                parent.threshold_value(1, neuron)
            );
        }
        // The single output sits at position 0.
        assert_eq!(offspring.threshold_value(2, 0), other.threshold_value(2, 0));
    }

    #[test]
    fn random_half_window() {
        let sizes = [8, 1];
        let (this, other) = (filled(&sizes, 0.0), filled(&sizes, 100.0));
        let mut offspring = this.zeroed_like();
        // start = 0.5 · 0.5 = 0.25, end = 0.25 + 0.5 = 0.75.
        let mut rng = Script(vec![0.5], 0);
        random_half(&mut offspring, &this, &other, 0.5, &mut rng);
        for neuron in 0..8 {
            let parent = if (2..=6).contains(&neuron) { &this } else { &other };
            assert_eq!(
                offspring.outbound_weights(0, neuron),
                parent.outbound_weights(0, neuron),
                "neuron {}",
                neuron
            );
        }
        // Window draw plus one dead coin per layer.
        assert_eq!(rng.1, 3);
    }

    #[test]
    fn forward_path_follows_strongest_edges() {
        // 2 inputs, 2 hidden, 1 output.
        let mut this = FeedForwardNetwork::new(2, &[2], 1).unwrap();
        this.set_weight(0, 0, 1, 5.0);
        this.set_weight(0, 1, 0, -3.0);
        this.set_weight(1, 0, 0, 7.0);
        this.set_weight(1, 1, 0, 9.0);
        this.set_threshold_value(1, 0, 0.25);
        this.set_threshold_value(1, 1, 0.5);
        this.set_threshold_value(2, 0, 0.75);
        let other = filled(&[2, 2, 1], 100.0);

        let mut offspring = this.zeroed_like();
        // Every coin (0.9 > 0) picks `this`.
        let mut rng = Script(vec![0.9], 0);
        forward_path(&mut offspring, &this, &other, 0.0, &mut rng);

        assert_eq!(offspring, this);
    }

    #[test]
    fn averaging_interpolates() {
        let sizes = [3, 2, 1];
        let (this, other) = (filled(&sizes, 0.0), filled(&sizes, 10.0));
        let mut offspring = this.zeroed_like();
        averaging(&mut offspring, &this, &other, 0.25, &mut Script(vec![0.1], 0));
        for (layer, from, to) in [(0, 0, 0), (0, 2, 1), (1, 1, 0)] {
            assert_eq!(
                offspring.weight(layer, from, to),
                0.75 * this.weight(layer, from, to) + 0.25 * other.weight(layer, from, to)
            );
        }
        assert_eq!(
            offspring.threshold_value(2, 0),
            0.75 * this.threshold_value(2, 0) + 0.25 * other.threshold_value(2, 0)
        );
    }

    #[test]
    fn bit_string_without_mutation_is_a_byte_window() {
        let sizes = [2, 2, 1];
        let (this, other) = (filled(&sizes, 0.0), filled(&sizes, 50.0));
        let mut offspring = this.zeroed_like();
        // The window starts at byte 0 and, with a fraction
        // of 0.5, covers the first half of the bytes.
        let mut rng = Script(vec![0.0], 0);
        bit_string(&mut offspring, &this, &other, 0.5, -1.0, &mut rng);

        let own = flatten(&this);
        let mut expected = flatten(&other);
        expected[..own.len() / 2].copy_from_slice(&own[..own.len() / 2]);
        assert_eq!(flatten(&offspring), expected);
    }
}
