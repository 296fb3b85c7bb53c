use serde::{Deserialize, Serialize};

/// An interface for error metrics over a whole example set.
///
/// Implementors must be pure: the error depends only on the
/// two sequences, which always have equal length, in order.
/// Any `Fn(&[f64], &[f64]) -> f64` closure is an evaluator.
pub trait ErrorEvaluator {
    /// Returns the error of `predicted` against `correct`.
    fn evaluate(&self, correct: &[f64], predicted: &[f64]) -> f64;
}

impl<F> ErrorEvaluator for F
where
    F: Fn(&[f64], &[f64]) -> f64,
{
    fn evaluate(&self, correct: &[f64], predicted: &[f64]) -> f64 {
        self(correct, predicted)
    }
}

/// The sum of absolute differences.
///
/// # Examples
/// ```
/// use evobreed_nn::training::{ErrorEvaluator, L1ErrorEvaluator};
///
/// let error = L1ErrorEvaluator.evaluate(&[1.0, 0.0, -2.0], &[0.5, 0.0, 1.0]);
/// assert_eq!(error, 3.5);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct L1ErrorEvaluator;

impl ErrorEvaluator for L1ErrorEvaluator {
    fn evaluate(&self, correct: &[f64], predicted: &[f64]) -> f64 {
        correct
            .iter()
            .zip(predicted)
            .map(|(c, p)| (c - p).abs())
            .sum()
    }
}
