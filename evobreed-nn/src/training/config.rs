use evobreed::logging::ReportingLevel;

use serde::{Deserialize, Serialize};

/// Configuration data for an [`ExampleTrainer`].
///
/// [`ExampleTrainer`]: crate::training::ExampleTrainer
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Training converges once the best error
    /// of a round is at most this value.
    pub training_rigor: f64,
    /// A progress record is logged every this many
    /// rounds, starting with round 0. 0 disables them.
    pub report_interval: usize,
    /// Whether the best network of every round
    /// is kept in the training log.
    pub reporting_level: ReportingLevel,
}

impl TrainingConfig {
    /// Returns a "zero-valued" configuration:
    /// training only converges on a perfect score,
    /// and no progress records are logged.
    ///
    /// # Examples
    /// ```
    /// use evobreed_nn::training::TrainingConfig;
    ///
    /// let config = TrainingConfig {
    ///     training_rigor: 0.5,
    ///     ..TrainingConfig::zero()
    /// };
    /// assert_eq!(config.report_interval, 0);
    /// ```
    pub const fn zero() -> TrainingConfig {
        TrainingConfig {
            training_rigor: 0.0,
            report_interval: 0,
            reporting_level: ReportingLevel::NoMembers,
        }
    }
}

impl Default for TrainingConfig {
    /// Like [`TrainingConfig::zero`], but
    /// reporting every 10 rounds.
    fn default() -> TrainingConfig {
        TrainingConfig {
            report_interval: 10,
            ..TrainingConfig::zero()
        }
    }
}
