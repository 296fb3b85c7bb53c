//! Dense feed-forward networks and their
//! per-neuron threshold functions.

mod errors;
mod feed_forward;
pub(crate) mod format;
mod threshold;

pub use errors::{SerializationError, TopologyError};
pub use feed_forward::FeedForwardNetwork;
pub use threshold::ThresholdFunction;
