use crate::breeding::CrossbreedError;

use std::error::Error;
use std::fmt;

/// An error type indicating that training
/// cannot start or cannot go on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TrainingError {
    /// The population has no members.
    EmptyPopulation,
    /// There are no training examples.
    EmptyExampleSet,
    /// An example's input count differs from
    /// the input count of a population member.
    ExampleInputMismatch {
        example: usize,
        expected: usize,
        found: usize,
    },
    /// An example has no output to score against.
    MissingExampleOutput { example: usize },
    /// An example's output count differs from
    /// the output count of a population member.
    OutputCountMismatch {
        example: usize,
        expected: usize,
        found: usize,
    },
    /// Two population members could not be crossed.
    Breeding(CrossbreedError),
}

impl fmt::Display for TrainingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPopulation => write!(f, "training of an empty population"),
            Self::EmptyExampleSet => write!(f, "training without examples"),
            Self::ExampleInputMismatch {
                example,
                expected,
                found,
            } => write!(
                f,
                "example {} has {} inputs, network expects {}",
                example, found, expected
            ),
            Self::MissingExampleOutput { example } => {
                write!(f, "example {} has no output", example)
            }
            Self::OutputCountMismatch {
                example,
                expected,
                found,
            } => write!(
                f,
                "example {} has {} outputs, network produces {}",
                example, found, expected
            ),
            Self::Breeding(e) => write!(f, "population breeding failed: {}", e),
        }
    }
}

impl Error for TrainingError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Breeding(e) => Some(e),
            _ => None,
        }
    }
}

impl From<CrossbreedError> for TrainingError {
    fn from(e: CrossbreedError) -> TrainingError {
        TrainingError::Breeding(e)
    }
}
