//! A small engine for evolving fixed-size populations by
//! tournament breeding: each round, the population is sorted
//! by error, and its worst members are replaced by offspring
//! of its best members, pairwise.
//!
//! The crate is generic over what is being bred. Anything that
//! implements [`Crossbreedable`] can be sorted, bred and logged.
//! A feed-forward neural network implementation, together with an
//! example-based trainer, is supplied by the `evobreed-nn` crate.
//!
//! All randomness is drawn from a single [`RandomSource`], passed
//! down by mutable reference, so seeded runs are reproducible.
//!
//! # Example usage: evolving a number toward a target
//! ```
//! use evobreed::{
//!     breed_population, offspring_generation, sort_population, Crossbreedable, RandomSource,
//!     RngSource, SortOrder,
//! };
//! use std::convert::Infallible;
//!
//! #[derive(Clone, Debug)]
//! struct Guess {
//!     value: f64,
//!     generation: u32,
//! }
//!
//! impl Crossbreedable for Guess {
//!     type Error = Infallible;
//!
//!     fn crossbreed<R: RandomSource + ?Sized>(
//!         &self,
//!         other: &Guess,
//!         fraction_other: f64,
//!         mutation_prob: f64,
//!         max_mutation_magnitude: f64,
//!         rng: &mut R,
//!     ) -> Result<Guess, Infallible> {
//!         let mut offspring = Guess {
//!             value: (1.0 - fraction_other) * self.value + fraction_other * other.value,
//!             generation: offspring_generation(self.generation, other.generation),
//!         };
//!         offspring.mutate(mutation_prob, max_mutation_magnitude, rng);
//!         Ok(offspring)
//!     }
//!
//!     fn mutate<R: RandomSource + ?Sized>(&mut self, prob: f64, magnitude: f64, rng: &mut R) {
//!         if rng.next_float() <= prob {
//!             let fresh = rng.next_float() * 200.0 - 100.0;
//!             self.value = magnitude * fresh + (1.0 - magnitude) * self.value;
//!         }
//!     }
//!
//!     fn generation(&self) -> u32 {
//!         self.generation
//!     }
//! }
//!
//! const TARGET: f64 = 42.0;
//!
//! let mut rng = RngSource::seeded(7);
//! let mut population: Vec<Guess> = (0..15)
//!     .map(|i| Guess { value: i as f64 * 10.0 - 70.0, generation: 0 })
//!     .collect();
//! let mut scores = vec![0.0; population.len()];
//!
//! for _ in 0..50 {
//!     for (score, guess) in scores.iter_mut().zip(&population) {
//!         *score = (guess.value - TARGET).abs();
//!     }
//!     sort_population(&mut population, &mut scores, SortOrder::Ascending);
//!     breed_population(&mut population, 0.2, 0.1, &mut rng).unwrap();
//! }
//!
//! // Elites are never replaced, so the best error never grows.
//! assert!(scores[0] <= 2.0);
//! ```

mod crossbreedable;
mod populations;
mod rng;

pub use crossbreedable::{offspring_generation, Crossbreedable};
pub use populations::logging;
pub use populations::{
    breed_population, sort_population, BreedingPlan, SortOrder, BREEDING_FRACTION_OTHER,
};
pub use rng::{RandomSource, RngSource};
