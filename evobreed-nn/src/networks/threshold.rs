use serde::{Deserialize, Serialize};

/// A ThresholdFunction maps the weighted input sum
/// of a neuron, together with the neuron's threshold
/// value, to the neuron's activation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThresholdFunction {
    // 0   if sum < threshold
    // 1   otherwise
    Step,
    // sum
    Identity,
}

impl Default for ThresholdFunction {
    fn default() -> ThresholdFunction {
        ThresholdFunction::Step
    }
}

impl ThresholdFunction {
    /// Applies the function to a neuron's weighted input sum.
    ///
    /// # Examples
    /// ```
    /// use evobreed_nn::networks::ThresholdFunction;
    ///
    /// assert_eq!(ThresholdFunction::Step.apply(0.49, 0.5), 0.0);
    /// assert_eq!(ThresholdFunction::Step.apply(0.5, 0.5), 1.0);
    /// // The threshold value is ignored.
    /// assert_eq!(ThresholdFunction::Identity.apply(-3.25, 10.0), -3.25);
    /// ```
    pub fn apply(self, sum: f64, threshold_value: f64) -> f64 {
        match self {
            ThresholdFunction::Step => {
                if sum < threshold_value {
                    0.0
                } else {
                    1.0
                }
            }
            ThresholdFunction::Identity => sum,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_is_closed_at_threshold() {
        let step = ThresholdFunction::Step;
        assert_eq!(step.apply(-1.0, -1.0), 1.0);
        assert_eq!(step.apply(-1.0 - f64::EPSILON, -1.0), 0.0);
        assert_eq!(step.apply(100.0, 0.0), 1.0);
    }

    #[test]
    fn default_is_step() {
        assert_eq!(ThresholdFunction::default(), ThresholdFunction::Step);
    }
}
