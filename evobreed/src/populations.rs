//! A population is a fixed-size array of individuals
//! together with a parallel array of scores. Scores are
//! error magnitudes: lower is better unless a caller
//! explicitly sorts in descending order.
//!
//! Each round, the population is sorted best-first and the
//! worst slots are replaced by the offspring of the best
//! members, pairwise (see [`breed_population`]).
mod breeding;
pub mod logging;
mod sorting;

pub use breeding::{breed_population, BreedingPlan, BREEDING_FRACTION_OTHER};
pub use sorting::{sort_population, SortOrder};
