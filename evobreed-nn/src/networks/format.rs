//! Whitespace-delimited text form of a network:
//!
//! 1. the number of hidden layers,
//! 2. the number of neurons of every layer, input layer first,
//! 3. the threshold value of every non-input neuron, layer by layer,
//! 4. the weight of every edge, by layer, then source neuron,
//!    then target neuron.
//!
//! Threshold functions are not stored.
use super::feed_forward::validate_layer_sizes;
use super::{FeedForwardNetwork, SerializationError};

use std::io::{Read, Write};
use std::str::{FromStr, SplitWhitespace};

/// Reads an entire stream as text.
pub(crate) fn read_text<R: Read>(mut reader: R) -> Result<String, SerializationError> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    Ok(text)
}

/// A cursor over the whitespace-separated tokens of a text.
pub(crate) struct Tokens<'a> {
    inner: SplitWhitespace<'a>,
}

impl<'a> Tokens<'a> {
    pub(crate) fn new(text: &'a str) -> Tokens<'a> {
        Tokens {
            inner: text.split_whitespace(),
        }
    }

    /// Parses the next token as a `T`, naming
    /// the item being read in case of failure.
    pub(crate) fn next<T: FromStr>(&mut self, expected: &'static str) -> Result<T, SerializationError> {
        let token = self
            .inner
            .next()
            .ok_or(SerializationError::UnexpectedEnd(expected))?;
        token.parse().map_err(|_| SerializationError::InvalidToken {
            token: token.to_owned(),
            expected,
        })
    }
}

impl FeedForwardNetwork {
    /// Writes the network in text form. Values are written
    /// in shortest round-trip form, so reading them back
    /// restores them exactly.
    ///
    /// # Errors
    /// Returns an error if writing to the stream fails.
    /// Partial output may have been written.
    ///
    /// # Examples
    /// ```
    /// use evobreed_nn::networks::FeedForwardNetwork;
    ///
    /// let mut network = FeedForwardNetwork::new(2, &[], 1).unwrap();
    /// network.set_weight(0, 1, 0, -0.25);
    ///
    /// let mut text = Vec::new();
    /// network.write_to(&mut text).unwrap();
    /// let read = FeedForwardNetwork::read_from(text.as_slice()).unwrap();
    /// assert_eq!(read, network);
    /// ```
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<(), SerializationError> {
        writeln!(writer, "{}", self.hidden_layer_count())?;
        for size in self.neurons_per_layer() {
            writeln!(writer, "{}", size)?;
        }
        writeln!(writer)?;

        for layer in 1..self.layer_count() {
            for neuron in 0..self.neurons_in_layer(layer) {
                writeln!(writer, "{}", self.threshold_value(layer, neuron))?;
            }
        }
        writeln!(writer)?;

        for layer in 0..self.layer_count() - 1 {
            for from in 0..self.neurons_in_layer(layer) {
                for weight in self.outbound_weights(layer, from) {
                    writeln!(writer, "{}", weight)?;
                }
                writeln!(writer)?;
            }
        }
        Ok(())
    }

    /// Reads a network written by [`write_to`]. Every
    /// neuron of the result uses the [`Step`] function.
    ///
    /// # Errors
    /// Returns an error if the stream fails, ends early,
    /// holds an unparsable token or describes an invalid
    /// topology.
    ///
    /// [`write_to`]: FeedForwardNetwork::write_to
    /// [`Step`]: super::ThresholdFunction::Step
    pub fn read_from<R: Read>(reader: R) -> Result<FeedForwardNetwork, SerializationError> {
        let text = read_text(reader)?;
        FeedForwardNetwork::parse_tokens(&mut Tokens::new(&text))
    }

    /// Parses a network body, leaving the cursor
    /// just after its last weight.
    pub(crate) fn parse_tokens(tokens: &mut Tokens) -> Result<FeedForwardNetwork, SerializationError> {
        let hidden_layer_count: usize = tokens.next("hidden layer count")?;
        let mut sizes = Vec::new();
        for _ in 0..hidden_layer_count.saturating_add(2) {
            sizes.push(tokens.next::<usize>("layer size")?);
        }
        validate_layer_sizes(&sizes)?;

        // Values are pushed as they are read, so a truncated
        // text is rejected before any large allocation.
        let mut threshold_values = Vec::with_capacity(sizes.len() - 1);
        for &size in &sizes[1..] {
            let mut layer = Vec::new();
            for _ in 0..size {
                layer.push(tokens.next::<f64>("threshold value")?);
            }
            threshold_values.push(layer);
        }

        let mut weights = Vec::with_capacity(sizes.len() - 1);
        for pair in sizes.windows(2) {
            let mut layer = Vec::new();
            for _ in 0..pair[0] {
                let mut outbound = Vec::new();
                for _ in 0..pair[1] {
                    outbound.push(tokens.next::<f64>("weight")?);
                }
                layer.push(outbound);
            }
            weights.push(layer);
        }

        Ok(FeedForwardNetwork::from_parts(
            sizes,
            threshold_values,
            weights,
        ))
    }
}
