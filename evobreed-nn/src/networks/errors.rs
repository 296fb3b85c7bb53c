use std::error::Error;
use std::fmt;
use std::io;

/// An error type indicating that a requested
/// network shape cannot be built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TopologyError {
    /// The network would have no input neurons.
    NoInputs,
    /// The network would have no output neurons.
    NoOutputs,
    /// The hidden layer at the given index (0-based,
    /// among hidden layers) would have no neurons.
    EmptyHiddenLayer(usize),
    /// Fewer than two layers (input and output) were given.
    MissingLayers(usize),
}

/// An error type indicating a failure to read
/// or write a network in text form.
#[derive(Debug)]
pub enum SerializationError {
    /// The underlying stream failed.
    Io(io::Error),
    /// The stream ended before the named item was read.
    UnexpectedEnd(&'static str),
    /// A token could not be parsed as the named item.
    InvalidToken {
        token: String,
        expected: &'static str,
    },
    /// The layer sizes read describe no valid network.
    InvalidTopology(TopologyError),
}

impl fmt::Display for TopologyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoInputs => write!(f, "network without input neurons"),
            Self::NoOutputs => write!(f, "network without output neurons"),
            Self::EmptyHiddenLayer(index) => write!(f, "hidden layer {} has no neurons", index),
            Self::MissingLayers(count) => write!(
                f,
                "network with {} layer(s), at least an input and an output layer are needed",
                count
            ),
        }
    }
}

impl fmt::Display for SerializationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "network stream failure: {}", e),
            Self::UnexpectedEnd(expected) => {
                write!(f, "network text ended while reading {}", expected)
            }
            Self::InvalidToken { token, expected } => {
                write!(f, "invalid token {:?} where {} was expected", token, expected)
            }
            Self::InvalidTopology(e) => write!(f, "invalid network text: {}", e),
        }
    }
}

impl Error for TopologyError {}

impl Error for SerializationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::InvalidTopology(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for SerializationError {
    fn from(e: io::Error) -> SerializationError {
        SerializationError::Io(e)
    }
}

impl From<TopologyError> for SerializationError {
    fn from(e: TopologyError) -> SerializationError {
        SerializationError::InvalidTopology(e)
    }
}
