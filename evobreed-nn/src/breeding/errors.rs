use std::error::Error;
use std::fmt;

/// An error type indicating a failure to cross two networks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CrossbreedError {
    /// The parents' layer sizes differ. Holds the layer sizes of
    /// the network crossbreed was called on, then those of the other.
    IncompatibleTopology {
        expected: Vec<usize>,
        found: Vec<usize>,
    },
}

/// An error type indicating a crossbreeding
/// method selector that matches no method.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UnknownCrossbreedingMethod {
    /// The selector was a name.
    Name(String),
    /// The selector was a numeric code.
    Code(u8),
}

impl fmt::Display for CrossbreedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IncompatibleTopology { expected, found } => write!(
                f,
                "crossbreeding of networks with layer sizes {:?} and {:?}",
                expected, found
            ),
        }
    }
}

impl fmt::Display for UnknownCrossbreedingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => write!(f, "unknown crossbreeding method {:?}", name),
            Self::Code(code) => write!(f, "unknown crossbreeding method code {}", code),
        }
    }
}

impl Error for CrossbreedError {}
impl Error for UnknownCrossbreedingMethod {}
