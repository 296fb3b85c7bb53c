use crate::RandomSource;

use std::error::Error;

/// An interface for individuals that can be bred
/// by the population routines of this crate.
pub trait Crossbreedable: Sized {
    /// Returned when two individuals cannot be crossed.
    type Error: Error;

    /// Combines `self` with `other` and returns the offspring.
    ///
    /// `fraction_other` is the share of `other`'s characteristics,
    /// in `[0, 1]`, that should end up in the offspring.
    /// `mutation_prob` is the chance of a mutation at each attribute
    /// of the offspring, and `max_mutation_magnitude`, in `[0, 1]`,
    /// bounds the severity of each individual mutation.
    fn crossbreed<R: RandomSource + ?Sized>(
        &self,
        other: &Self,
        fraction_other: f64,
        mutation_prob: f64,
        max_mutation_magnitude: f64,
        rng: &mut R,
    ) -> Result<Self, Self::Error>;

    /// Mutates `self` in place.
    fn mutate<R: RandomSource + ?Sized>(
        &mut self,
        mutation_prob: f64,
        max_mutation_magnitude: f64,
        rng: &mut R,
    );

    /// Returns the number of breeding events in the individual's
    /// ancestry. Freshly created individuals are generation 0.
    fn generation(&self) -> u32;
}

/// Returns the generation of an offspring of two
/// parents of the given generations.
///
/// # Examples
/// ```
/// use evobreed::offspring_generation;
///
/// assert_eq!(offspring_generation(0, 0), 1);
/// assert_eq!(offspring_generation(3, 7), 8);
/// assert_eq!(offspring_generation(u32::MAX, 2), u32::MAX);
/// ```
pub fn offspring_generation(parent_a: u32, parent_b: u32) -> u32 {
    parent_a.max(parent_b).saturating_add(1)
}
