use crate::{Crossbreedable, RandomSource};

use log::debug;
use serde::{Deserialize, Serialize};

use std::ops::Range;

/// Share of the second parent passed to [`Crossbreedable::crossbreed`]
/// during tournament breeding. Fixed, independently of any
/// mutation parameters.
pub const BREEDING_FRACTION_OTHER: f64 = 0.5;

/// How a population of a given size is split
/// during one round of tournament breeding.
///
/// The top `group_size` members breed with each other
/// pairwise, once per pair. The first `elite_count` members
/// survive untouched and the remaining `offspring_count`
/// slots receive the offspring, in pair order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreedingPlan {
    /// Number of top members that take part in breeding.
    pub group_size: usize,
    /// Number of leading members kept as-is.
    pub elite_count: usize,
    /// Number of trailing members replaced by offspring.
    pub offspring_count: usize,
}

impl BreedingPlan {
    /// Computes the plan for a population of `size` members.
    ///
    /// The breeding group is the largest `m` with
    /// `m(m+1)/2 ≤ size`. The `size - m(m+1)/2` leftover members
    /// are added to the `m` elites, leaving `m(m-1)/2` slots,
    /// exactly one per breeding pair.
    ///
    /// # Examples
    /// ```
    /// use evobreed::BreedingPlan;
    ///
    /// let plan = BreedingPlan::for_population_size(10);
    /// assert_eq!(plan.group_size, 4);
    /// assert_eq!(plan.elite_count, 4);
    /// assert_eq!(plan.offspring_count, 6);
    ///
    /// let plan = BreedingPlan::for_population_size(12);
    /// assert_eq!(plan.group_size, 4);
    /// assert_eq!(plan.elite_count, 6);
    /// assert_eq!(plan.offspring_count, 6);
    /// ```
    pub fn for_population_size(size: usize) -> BreedingPlan {
        let mut group_size = (((1.0 + 8.0 * size as f64).sqrt() - 1.0) * 0.5) as usize;
        // Guard against rounding in the square root for large sizes.
        while triangular(group_size) > size {
            group_size -= 1;
        }
        while triangular(group_size + 1) <= size {
            group_size += 1;
        }
        let remainder = size - triangular(group_size);

        BreedingPlan {
            group_size,
            elite_count: group_size + remainder,
            offspring_count: triangular(group_size.saturating_sub(1)),
        }
    }

    /// Returns the breeding pairs `(a, b)`, `a < b`, in the
    /// order in which their offspring fill the replaced slots.
    ///
    /// # Examples
    /// ```
    /// use evobreed::BreedingPlan;
    ///
    /// let plan = BreedingPlan::for_population_size(6);
    /// assert_eq!(plan.pairs().collect::<Vec<_>>(), [(0, 1), (0, 2), (1, 2)]);
    /// ```
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> {
        let group_size = self.group_size;
        (0..group_size).flat_map(move |a| (a + 1..group_size).map(move |b| (a, b)))
    }

    /// Returns the indices of the slots replaced by offspring.
    pub fn replaced_slots(&self) -> Range<usize> {
        self.elite_count..self.elite_count + self.offspring_count
    }
}

/// `n(n+1)/2`
fn triangular(n: usize) -> usize {
    n * (n + 1) / 2
}

/// Breeds a population that is already sorted best-first,
/// replacing its worst members with offspring of its best.
///
/// Each pair `(a, b)` of the [plan] is crossed as
/// `population[a].crossbreed(&population[b], 0.5, ...)`, and the
/// offspring overwrites the next replaced slot. Parents always
/// lie within the elite, so no parent is replaced mid-round.
///
/// # Errors
/// Returns the first crossbreeding error encountered. Slots filled
/// before the failure keep their new offspring; no slot is skipped.
///
/// [plan]: BreedingPlan
pub fn breed_population<C, R>(
    population: &mut [C],
    mutation_prob: f64,
    max_mutation_magnitude: f64,
    rng: &mut R,
) -> Result<BreedingPlan, C::Error>
where
    C: Crossbreedable,
    R: RandomSource + ?Sized,
{
    let plan = BreedingPlan::for_population_size(population.len());
    debug!(
        "breeding population of {}: group size {}, {} elites, {} offspring",
        population.len(),
        plan.group_size,
        plan.elite_count,
        plan.offspring_count
    );

    for (slot, (a, b)) in plan.replaced_slots().zip(plan.pairs()) {
        let offspring = population[a].crossbreed(
            &population[b],
            BREEDING_FRACTION_OTHER,
            mutation_prob,
            max_mutation_magnitude,
            rng,
        )?;
        population[slot] = offspring;
    }

    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::offspring_generation;

    use std::fmt;

    /// Minimal individual: remembers its parents.
    #[derive(Clone, Debug, PartialEq)]
    struct Tagged {
        id: usize,
        parents: Option<(usize, usize)>,
        generation: u32,
        kind: u8,
    }

    impl Tagged {
        fn new(id: usize) -> Tagged {
            Tagged {
                id,
                parents: None,
                generation: 0,
                kind: 0,
            }
        }
    }

    #[derive(Debug)]
    struct KindMismatch;

    impl fmt::Display for KindMismatch {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "kind mismatch")
        }
    }

    impl std::error::Error for KindMismatch {}

    impl Crossbreedable for Tagged {
        type Error = KindMismatch;

        fn crossbreed<R: RandomSource + ?Sized>(
            &self,
            other: &Tagged,
            fraction_other: f64,
            _mutation_prob: f64,
            _max_mutation_magnitude: f64,
            rng: &mut R,
        ) -> Result<Tagged, KindMismatch> {
            assert_eq!(fraction_other, BREEDING_FRACTION_OTHER);
            if self.kind != other.kind {
                return Err(KindMismatch);
            }
            rng.next_float();
            Ok(Tagged {
                id: 1000 + self.id * 100 + other.id,
                parents: Some((self.id, other.id)),
                generation: offspring_generation(self.generation, other.generation),
                kind: self.kind,
            })
        }

        fn mutate<R: RandomSource + ?Sized>(&mut self, _: f64, _: f64, _: &mut R) {}

        fn generation(&self) -> u32 {
            self.generation
        }
    }

    struct Constant;

    impl RandomSource for Constant {
        fn next_float(&mut self) -> f64 {
            0.25
        }
    }

    #[test]
    fn plan_bounds_hold_for_all_sizes() {
        for n in 1..2000 {
            let plan = BreedingPlan::for_population_size(n);
            let m = plan.group_size;
            assert!(m * (m + 1) / 2 <= n, "n = {}", n);
            assert!(n < (m + 1) * (m + 2) / 2, "n = {}", n);
            assert_eq!(plan.offspring_count, m * (m - 1) / 2, "n = {}", n);
            assert_eq!(plan.elite_count, n - m * (m - 1) / 2, "n = {}", n);
            assert_eq!(plan.elite_count + plan.offspring_count, n);
            assert_eq!(plan.pairs().count(), plan.offspring_count);
        }
    }

    #[test]
    fn plan_for_empty_population() {
        let plan = BreedingPlan::for_population_size(0);
        assert_eq!(plan.group_size, 0);
        assert_eq!(plan.elite_count, 0);
        assert_eq!(plan.offspring_count, 0);
    }

    #[test]
    fn population_of_ten_replaces_last_six() {
        let mut population: Vec<Tagged> = (0..10).map(Tagged::new).collect();
        let original = population.clone();

        let plan = breed_population(&mut population, 0.1, 0.1, &mut Constant).unwrap();

        assert_eq!(plan.replaced_slots(), 4..10);
        assert_eq!(&population[..4], &original[..4]);
        let parents: Vec<_> = population[4..].iter().map(|t| t.parents.unwrap()).collect();
        assert_eq!(parents, [(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)]);
        assert!(population[4..].iter().all(|t| t.generation == 1));
    }

    #[test]
    fn leftover_members_are_elites() {
        // 8 = 3·4/2 + 2: three breed, five survive, three are replaced.
        let mut population: Vec<Tagged> = (0..8).map(Tagged::new).collect();
        let original = population.clone();

        breed_population(&mut population, 0.0, 0.0, &mut Constant).unwrap();

        assert_eq!(&population[..5], &original[..5]);
        assert!(population[5..].iter().all(|t| t.parents.is_some()));
    }

    #[test]
    fn tiny_populations_are_untouched() {
        for n in 0..3 {
            let mut population: Vec<Tagged> = (0..n).map(Tagged::new).collect();
            let original = population.clone();
            breed_population(&mut population, 1.0, 1.0, &mut Constant).unwrap();
            assert_eq!(population, original);
        }
    }

    #[test]
    fn crossbreeding_failure_is_propagated() {
        let mut population: Vec<Tagged> = (0..6).map(Tagged::new).collect();
        population[2].kind = 1;

        let result = breed_population(&mut population, 0.0, 0.0, &mut Constant);

        assert!(result.is_err());
        // Pair (0, 1) was bred into slot 3 before pair (0, 2) failed.
        assert_eq!(population[3].parents, Some((0, 1)));
        assert_eq!(population[4], Tagged::new(4));
    }
}
