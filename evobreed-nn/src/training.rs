//! Training of breedable network populations
//! against a fixed set of examples.

mod config;
mod errors;
mod evaluation;
mod examples;

pub use config::TrainingConfig;
pub use errors::TrainingError;
pub use evaluation::{ErrorEvaluator, L1ErrorEvaluator};
pub use examples::TrainingExample;

use crate::breeding::BreedableNetwork;

use evobreed::logging::EvolutionLogger;
use evobreed::{breed_population, sort_population, Crossbreedable, RandomSource, SortOrder};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

/// How a call to [`ExampleTrainer::train`] ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrainingOutcome {
    /// The best error of the given round (0-based)
    /// reached the training rigor.
    Converged { round: usize },
    /// Every allowed round ran without converging.
    RoundLimitReached,
}

/// Evolves a population of networks toward a set of examples.
///
/// Each round, every member is run on every example and scored
/// by the evaluator, comparing the first output of each example
/// with the first output of the member. The population is then
/// sorted by ascending error and, unless the best error reaches
/// the training rigor, tournament-bred (see [`breed_population`]).
///
/// # Examples
/// ```
/// use evobreed::RngSource;
/// use evobreed_nn::breeding::BreedableNetwork;
/// use evobreed_nn::training::{ExampleTrainer, TrainingConfig, TrainingExample, TrainingOutcome};
///
/// // Learn OR on two inputs.
/// let examples = vec![
///     TrainingExample::new([0.0, 0.0], [0.0]),
///     TrainingExample::new([0.0, 1.0], [1.0]),
///     TrainingExample::new([1.0, 0.0], [1.0]),
///     TrainingExample::new([1.0, 1.0], [1.0]),
/// ];
/// let population = (0..21)
///     .map(|_| BreedableNetwork::new(2, &[], 1))
///     .collect::<Result<Vec<_>, _>>()
///     .unwrap();
/// let config = TrainingConfig {
///     training_rigor: 0.0,
///     ..TrainingConfig::default()
/// };
///
/// let mut trainer = ExampleTrainer::new(population, examples, config).unwrap();
/// let mut rng = RngSource::seeded(1);
/// let outcome = trainer.train(500, 0.2, 0.5, &mut rng).unwrap();
///
/// if let TrainingOutcome::Converged { round } = outcome {
///     assert_eq!(trainer.error_history()[round], 0.0);
///     assert_eq!(trainer.champion().run(&[0.0, 1.0]), [1.0]);
/// }
/// ```
pub struct ExampleTrainer<E = L1ErrorEvaluator> {
    population: Vec<BreedableNetwork>,
    scores: Vec<f64>,
    examples: Vec<TrainingExample>,
    evaluator: E,
    config: TrainingConfig,
    logger: EvolutionLogger<BreedableNetwork>,
}

impl ExampleTrainer<L1ErrorEvaluator> {
    /// Returns a trainer scoring members by the
    /// sum of absolute errors over all examples.
    ///
    /// # Errors
    /// See [`ExampleTrainer::with_evaluator`].
    pub fn new(
        population: Vec<BreedableNetwork>,
        examples: Vec<TrainingExample>,
        config: TrainingConfig,
    ) -> Result<ExampleTrainer<L1ErrorEvaluator>, TrainingError> {
        ExampleTrainer::with_evaluator(population, examples, L1ErrorEvaluator, config)
    }
}

impl<E: ErrorEvaluator> ExampleTrainer<E> {
    /// Returns a trainer using a custom error metric.
    ///
    /// # Errors
    /// Returns an error if the population or the example
    /// set is empty, or if any example does not fit any
    /// member: its input count must equal the member's,
    /// and so must its output count, which cannot be zero.
    pub fn with_evaluator(
        population: Vec<BreedableNetwork>,
        examples: Vec<TrainingExample>,
        evaluator: E,
        config: TrainingConfig,
    ) -> Result<ExampleTrainer<E>, TrainingError> {
        validate(&population, &examples)?;
        Ok(ExampleTrainer {
            scores: vec![f64::NAN; population.len()],
            logger: EvolutionLogger::new(config.reporting_level),
            population,
            examples,
            evaluator,
            config,
        })
    }

    /// Runs at most `max_rounds` training rounds, breeding
    /// with the given mutation parameters. Calling it again
    /// resumes training, and round numbers carry on from
    /// the last logged round.
    ///
    /// # Errors
    /// Returns an error if breeding fails, which only happens
    /// when population members have different topologies.
    pub fn train<R: RandomSource + ?Sized>(
        &mut self,
        max_rounds: usize,
        mutation_prob: f64,
        max_mutation_magnitude: f64,
        rng: &mut R,
    ) -> Result<TrainingOutcome, TrainingError> {
        let first_round = self.logger.last().map_or(0, |log| log.round + 1);
        for round in first_round..first_round + max_rounds {
            self.score_population();
            sort_population(&mut self.population, &mut self.scores, SortOrder::Ascending);

            let best_error = self.scores[0];
            self.logger.log(round, &self.population, &self.scores);

            let interval = self.config.report_interval;
            if interval > 0 && round % interval == 0 {
                info!(
                    "Round {}, top member (generation {}) error = {}",
                    round,
                    self.population[0].generation(),
                    best_error
                );
            }

            if best_error <= self.config.training_rigor {
                info!("training converged at round {} with error {}", round, best_error);
                return Ok(TrainingOutcome::Converged { round });
            }

            let plan = breed_population(
                &mut self.population,
                mutation_prob,
                max_mutation_magnitude,
                rng,
            )?;
            // Offspring have not been scored yet.
            for slot in plan.replaced_slots() {
                self.scores[slot] = f64::NAN;
            }
        }

        warn!(
            "training stopped after {} rounds without converging, best error {:?}",
            max_rounds,
            self.logger.last().map(|log| log.best_error)
        );
        Ok(TrainingOutcome::RoundLimitReached)
    }

    /// Scores every member over the whole example set.
    fn score_population(&mut self) {
        let correct: Vec<f64> = self.examples.iter().map(|e| e.outputs[0]).collect();
        for (score, member) in self.scores.iter_mut().zip(&self.population) {
            let predicted: Vec<f64> = self
                .examples
                .iter()
                .map(|e| member.run(&e.inputs)[0])
                .collect();
            *score = self.evaluator.evaluate(&correct, &predicted);
        }
        debug!("scored {} members", self.population.len());
    }

    /// Returns the population. After a round it
    /// is sorted best-first, then partly replaced
    /// if the round bred.
    pub fn population(&self) -> &[BreedableNetwork] {
        &self.population
    }

    /// Returns the scores of the population, in population
    /// order. Members that have not been scored yet, such as
    /// offspring of the last round, have a NaN score.
    pub fn scores(&self) -> &[f64] {
        &self.scores
    }

    /// Returns the first member of the population,
    /// the best one of the last scored round.
    pub fn champion(&self) -> &BreedableNetwork {
        &self.population[0]
    }

    pub fn examples(&self) -> &[TrainingExample] {
        &self.examples
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Returns the best error of every round trained so far,
    /// indexed by round.
    pub fn error_history(&self) -> Vec<f64> {
        self.logger.best_errors()
    }

    /// Returns the per-round training log.
    pub fn logger(&self) -> &EvolutionLogger<BreedableNetwork> {
        &self.logger
    }

    /// Consumes the trainer, returning its population.
    pub fn into_population(self) -> Vec<BreedableNetwork> {
        self.population
    }
}

/// Checks that every example fits every member.
fn validate(
    population: &[BreedableNetwork],
    examples: &[TrainingExample],
) -> Result<(), TrainingError> {
    if population.is_empty() {
        return Err(TrainingError::EmptyPopulation);
    }
    if examples.is_empty() {
        return Err(TrainingError::EmptyExampleSet);
    }
    for (index, example) in examples.iter().enumerate() {
        if example.outputs.is_empty() {
            return Err(TrainingError::MissingExampleOutput { example: index });
        }
        for member in population {
            let network = member.network();
            if example.inputs.len() != network.input_count() {
                return Err(TrainingError::ExampleInputMismatch {
                    example: index,
                    expected: network.input_count(),
                    found: example.inputs.len(),
                });
            }
            if example.outputs.len() != network.output_count() {
                return Err(TrainingError::OutputCountMismatch {
                    example: index,
                    expected: network.output_count(),
                    found: example.outputs.len(),
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::breeding::CrossbreedError;

    use evobreed::RngSource;

    fn population(size: usize, sizes: (usize, &[usize], usize)) -> Vec<BreedableNetwork> {
        (0..size)
            .map(|_| BreedableNetwork::new(sizes.0, sizes.1, sizes.2).unwrap())
            .collect()
    }

    fn and_examples() -> Vec<TrainingExample> {
        vec![
            TrainingExample::new([0.0, 0.0], [0.0]),
            TrainingExample::new([0.0, 1.0], [0.0]),
            TrainingExample::new([1.0, 0.0], [0.0]),
            TrainingExample::new([1.0, 1.0], [1.0]),
        ]
    }

    #[test]
    fn construction_errors() {
        let config = TrainingConfig::zero();
        assert!(matches!(
            ExampleTrainer::new(vec![], and_examples(), config.clone()),
            Err(TrainingError::EmptyPopulation)
        ));
        assert!(matches!(
            ExampleTrainer::new(population(3, (2, &[], 1)), vec![], config.clone()),
            Err(TrainingError::EmptyExampleSet)
        ));

        let mut examples = and_examples();
        examples[2].inputs.push(1.0);
        assert!(matches!(
            ExampleTrainer::new(population(3, (2, &[], 1)), examples, config.clone()),
            Err(TrainingError::ExampleInputMismatch {
                example: 2,
                expected: 2,
                found: 3
            })
        ));

        let mut examples = and_examples();
        examples[1].outputs.clear();
        assert!(matches!(
            ExampleTrainer::new(population(3, (2, &[], 1)), examples, config.clone()),
            Err(TrainingError::MissingExampleOutput { example: 1 })
        ));

        assert!(matches!(
            ExampleTrainer::new(population(3, (2, &[], 2)), and_examples(), config),
            Err(TrainingError::OutputCountMismatch {
                example: 0,
                expected: 2,
                found: 1
            })
        ));
    }

    #[test]
    fn converges_at_round_zero_when_rigor_is_loose() {
        // Zeroed step networks output 1 everywhere: L1 error 3.
        let config = TrainingConfig {
            training_rigor: 3.5,
            ..TrainingConfig::zero()
        };
        let mut trainer = ExampleTrainer::new(population(6, (2, &[2], 1)), and_examples(), config).unwrap();
        let outcome = trainer.train(10, 0.5, 0.5, &mut RngSource::seeded(0)).unwrap();

        assert_eq!(outcome, TrainingOutcome::Converged { round: 0 });
        assert_eq!(trainer.error_history(), [3.0]);
        assert!(trainer.scores().iter().all(|&s| s == 3.0));
        assert!(trainer.population().iter().all(|m| m.generation() == 0));
    }

    #[test]
    fn round_limit() {
        let config = TrainingConfig {
            training_rigor: -1.0,
            ..TrainingConfig::default()
        };
        let mut trainer = ExampleTrainer::new(population(10, (2, &[2], 1)), and_examples(), config).unwrap();
        let outcome = trainer.train(5, 0.3, 0.5, &mut RngSource::seeded(3)).unwrap();

        assert_eq!(outcome, TrainingOutcome::RoundLimitReached);
        assert_eq!(trainer.error_history().len(), 5);
        assert_eq!(trainer.logger().iter().count(), 5);
        // Elites survive, so the best error never grows.
        assert!(trainer.error_history().windows(2).all(|w| w[1] <= w[0]));
        // The last round replaced slots 4..10.
        assert!(trainer.scores()[..4].iter().all(|s| !s.is_nan()));
        assert!(trainer.scores()[4..].iter().all(|s| s.is_nan()));
        assert!(trainer.population()[4..].iter().all(|m| m.generation() >= 1));
    }

    #[test]
    fn zero_rounds() {
        let mut trainer = ExampleTrainer::new(
            population(3, (2, &[], 1)),
            and_examples(),
            TrainingConfig::zero(),
        )
        .unwrap();
        let outcome = trainer.train(0, 0.1, 0.1, &mut RngSource::seeded(0)).unwrap();
        assert_eq!(outcome, TrainingOutcome::RoundLimitReached);
        assert!(trainer.error_history().is_empty());
    }

    #[test]
    fn custom_evaluator() {
        // Count exact hits instead of measuring distance.
        let misses = |correct: &[f64], predicted: &[f64]| -> f64 {
            correct.iter().zip(predicted).filter(|(c, p)| c != p).count() as f64
        };
        let config = TrainingConfig {
            training_rigor: 3.0,
            ..TrainingConfig::zero()
        };
        let mut trainer =
            ExampleTrainer::with_evaluator(population(3, (2, &[], 1)), and_examples(), misses, config)
                .unwrap();
        let outcome = trainer.train(1, 0.0, 0.0, &mut RngSource::seeded(0)).unwrap();
        assert_eq!(outcome, TrainingOutcome::Converged { round: 0 });
        assert_eq!(trainer.scores()[0], 3.0);
    }

    #[test]
    fn incompatible_members_fail_breeding() {
        // Every member scores 3, so the sort keeps the odd one first.
        let mut members = vec![BreedableNetwork::new(2, &[3], 1).unwrap()];
        members.extend(population(3, (2, &[2], 1)));
        let config = TrainingConfig {
            training_rigor: -1.0,
            ..TrainingConfig::zero()
        };
        let mut trainer = ExampleTrainer::new(members, and_examples(), config).unwrap();
        let result = trainer.train(3, 0.0, 0.0, &mut RngSource::seeded(0));

        assert_eq!(
            result,
            Err(TrainingError::Breeding(CrossbreedError::IncompatibleTopology {
                expected: vec![2, 3, 1],
                found: vec![2, 2, 1],
            }))
        );
        assert_eq!(trainer.error_history(), [3.0]);
    }

    #[test]
    fn keeps_champions_when_asked() {
        let config = TrainingConfig {
            training_rigor: -1.0,
            reporting_level: evobreed::logging::ReportingLevel::Champion,
            ..TrainingConfig::zero()
        };
        let mut trainer = ExampleTrainer::new(population(6, (2, &[], 1)), and_examples(), config).unwrap();
        trainer.train(2, 0.5, 1.0, &mut RngSource::seeded(8)).unwrap();
        assert!(trainer.logger().iter().all(|l| l.champion.is_some()));
        assert_eq!(trainer.logger().iter().count(), 2);
    }

    #[test]
    fn resumed_training_continues_round_numbers() {
        let config = TrainingConfig {
            training_rigor: -1.0,
            ..TrainingConfig::zero()
        };
        let mut trainer = ExampleTrainer::new(population(6, (2, &[1], 1)), and_examples(), config).unwrap();
        let mut rng = RngSource::seeded(2);
        trainer.train(3, 0.3, 0.5, &mut rng).unwrap();
        trainer.train(2, 0.3, 0.5, &mut rng).unwrap();

        let rounds: Vec<usize> = trainer.logger().iter().map(|l| l.round).collect();
        assert_eq!(rounds, [0, 1, 2, 3, 4]);
        assert_eq!(trainer.error_history().len(), 5);

        // Convergence reports the continued round number.
        trainer.config.training_rigor = 10.0;
        let outcome = trainer.train(4, 0.3, 0.5, &mut rng).unwrap();
        assert_eq!(outcome, TrainingOutcome::Converged { round: 5 });
        assert_eq!(trainer.error_history().len(), 6);
    }

    #[test]
    fn unscorable_member_never_becomes_champion() {
        // AND: fires only when both unit-weighted inputs are on.
        let mut and = BreedableNetwork::new(2, &[], 1).unwrap();
        and.network_mut().set_weight(0, 0, 0, 1.0);
        and.network_mut().set_weight(0, 1, 0, 1.0);
        and.network_mut().set_threshold_value(1, 0, 2.0);

        // A NaN weight into an identity output makes every output NaN.
        let mut broken = BreedableNetwork::new(2, &[], 1).unwrap();
        broken
            .network_mut()
            .set_threshold(1, 0, crate::networks::ThresholdFunction::Identity);
        broken.network_mut().set_weight(0, 0, 0, f64::NAN);

        let mut members = vec![broken];
        members.extend(std::iter::repeat(and.clone()).take(5));
        let mut trainer = ExampleTrainer::new(members, and_examples(), TrainingConfig::zero()).unwrap();
        let outcome = trainer.train(5, 0.1, 0.1, &mut RngSource::seeded(0)).unwrap();

        assert_eq!(outcome, TrainingOutcome::Converged { round: 0 });
        assert_eq!(trainer.champion(), &and);
        assert_eq!(trainer.error_history(), [0.0]);
        assert!(trainer.scores()[5].is_nan());
    }
}
