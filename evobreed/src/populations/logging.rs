use crate::Crossbreedable;

use serde::{Deserialize, Serialize};

use std::fmt;

/// Defines different possible reporting levels for logging.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportingLevel {
    /// Clones the best member of each round.
    Champion,
    /// Clones no members.
    NoMembers,
}

impl Default for ReportingLevel {
    fn default() -> ReportingLevel {
        ReportingLevel::NoMembers
    }
}

/// A snapshot of one scored and sorted round.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RoundLog<C> {
    pub round: usize,
    pub best_error: f64,
    pub best_generation: u32,
    pub score_stats: Stats,
    pub champion: Option<C>,
}

impl<C> fmt::Display for RoundLog<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RoundLog {{\n\
            \tround: {:?}\n\
            \tbest_error: {:?}\n\
            \tbest_generation: {:?}\n\
            \tscores: {:?}\n\
            }}",
            self.round, self.best_error, self.best_generation, self.score_stats,
        )
    }
}

/// A struct for reporting basic statistical data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    pub maximum: f64,
    pub minimum: f64,
    pub mean: f64,
    pub median: f64,
}

impl Stats {
    /// Returns statistics about numbers in a sequence.
    ///
    /// # Panics
    /// Panics if the sequence is empty.
    ///
    /// # Examples
    /// ```
    /// use evobreed::logging::Stats;
    ///
    /// let stats = Stats::from([-2.0, -1.0, 0.5, 1.0, 1.5].iter().copied());
    /// assert_eq!(stats.maximum, 1.5);
    /// assert_eq!(stats.minimum, -2.0);
    /// assert_eq!(stats.mean, 0.0);
    /// assert_eq!(stats.median, 0.5);
    /// ```
    pub fn from(data: impl Iterator<Item = f64>) -> Stats {
        let mut data: Vec<f64> = data.collect();
        assert!(!data.is_empty(), "statistics of an empty sequence");
        let mid = data.len() / 2;
        let (mut max, mut min, mut sum) = (f64::MIN, f64::MAX, 0.0);
        for d in &data {
            max = d.max(max);
            min = d.min(min);
            sum += d;
        }
        let mean = sum / data.len() as f64;
        let mut median = *data.select_nth_unstable_by(mid, f64::total_cmp).1;
        if data.len() % 2 == 0 {
            // After selection, everything below `mid` is ≤ the median.
            let lower = data[..mid]
                .iter()
                .copied()
                .max_by(f64::total_cmp)
                .unwrap_or(median);
            median = (median + lower) / 2.0;
        }
        Stats {
            maximum: max,
            minimum: min,
            mean,
            median,
        }
    }
}

/// A log of a training run, one entry per round.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EvolutionLogger<C> {
    reporting_level: ReportingLevel,
    logs: Vec<RoundLog<C>>,
}

impl<C: Crossbreedable + Clone> EvolutionLogger<C> {
    /// Returns a logger with the appropiate reporting level.
    pub fn new(reporting_level: ReportingLevel) -> EvolutionLogger<C> {
        EvolutionLogger {
            reporting_level,
            logs: vec![],
        }
    }

    /// Stores a snapshot of a population sorted best-first,
    /// with `scores` parallel to `population`.
    ///
    /// # Panics
    /// Panics if the population is empty or the slices
    /// differ in length.
    pub fn log(&mut self, round: usize, population: &[C], scores: &[f64]) {
        assert_eq!(
            population.len(),
            scores.len(),
            "population and score arrays differ in length"
        );
        let best = &population[0];
        self.logs.push(RoundLog {
            round,
            best_error: scores[0],
            best_generation: best.generation(),
            score_stats: Stats::from(scores.iter().copied()),
            champion: match self.reporting_level {
                ReportingLevel::Champion => Some(best.clone()),
                ReportingLevel::NoMembers => None,
            },
        });
    }

    /// Iterate over all logged snapshots.
    pub fn iter(&self) -> impl Iterator<Item = &RoundLog<C>> {
        self.logs.iter()
    }

    /// Returns the most recent snapshot.
    pub fn last(&self) -> Option<&RoundLog<C>> {
        self.logs.last()
    }

    /// Returns the best error of every logged round, in order.
    pub fn best_errors(&self) -> Vec<f64> {
        self.logs.iter().map(|l| l.best_error).collect()
    }

    /// Discards all snapshots.
    pub fn clear(&mut self) {
        self.logs.clear();
    }

    pub fn reporting_level(&self) -> ReportingLevel {
        self.reporting_level
    }
}
