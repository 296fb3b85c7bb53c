use serde::{Deserialize, Serialize};

/// An input vector paired with the output
/// a network should produce for it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrainingExample {
    pub inputs: Vec<f64>,
    pub outputs: Vec<f64>,
}

impl TrainingExample {
    /// # Examples
    /// ```
    /// use evobreed_nn::training::TrainingExample;
    ///
    /// let example = TrainingExample::new([1.0, 0.0], [1.0]);
    /// assert_eq!(example.inputs, [1.0, 0.0]);
    /// ```
    pub fn new(inputs: impl Into<Vec<f64>>, outputs: impl Into<Vec<f64>>) -> TrainingExample {
        TrainingExample {
            inputs: inputs.into(),
            outputs: outputs.into(),
        }
    }
}
