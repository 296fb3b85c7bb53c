use serde::{Deserialize, Serialize};

/// Direction in which a population is sorted by score.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    /// Lowest score first. The convention for error scores.
    Ascending,
    /// Highest score first.
    Descending,
}

impl Default for SortOrder {
    fn default() -> SortOrder {
        SortOrder::Ascending
    }
}

impl SortOrder {
    /// Whether `candidate` should come before `current` in this order.
    /// NaN scores rank last in both orders.
    fn precedes(self, candidate: f64, current: f64) -> bool {
        if current.is_nan() {
            return !candidate.is_nan();
        }
        match self {
            SortOrder::Ascending => candidate < current,
            SortOrder::Descending => candidate > current,
        }
    }
}

/// Sorts `population` and `scores` together by score.
///
/// This is a selection sort: each pass takes the first extreme
/// score found in the unsorted tail, so ties are not guaranteed
/// to keep their relative order. Populations are expected to be
/// small (tens to low hundreds), which makes the `O(n²)` cost
/// irrelevant next to evaluation.
///
/// NaN scores are sorted after every other score, whatever
/// the order, so an unscorable member never ranks first.
///
/// # Panics
/// This function panics if the two slices differ in length.
///
/// # Examples
/// ```
/// use evobreed::{sort_population, SortOrder};
///
/// let mut population = vec!["c", "a", "b"];
/// let mut scores = vec![3.0, 1.0, 2.0];
///
/// sort_population(&mut population, &mut scores, SortOrder::Ascending);
/// assert_eq!(population, ["a", "b", "c"]);
/// assert_eq!(scores, [1.0, 2.0, 3.0]);
///
/// sort_population(&mut population, &mut scores, SortOrder::Descending);
/// assert_eq!(population, ["c", "b", "a"]);
/// ```
pub fn sort_population<T>(population: &mut [T], scores: &mut [f64], order: SortOrder) {
    assert_eq!(
        population.len(),
        scores.len(),
        "population and score arrays differ in length"
    );

    for i in 0..scores.len() {
        let mut extreme = i;
        for j in i + 1..scores.len() {
            if order.precedes(scores[j], scores[extreme]) {
                extreme = j;
            }
        }
        if extreme != i {
            scores.swap(i, extreme);
            population.swap(i, extreme);
        }
    }
}
