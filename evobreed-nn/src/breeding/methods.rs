use super::UnknownCrossbreedingMethod;

use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

/// The recombination strategy used when crossing two networks.
///
/// Each method has a stable numeric code (its position
/// in [`CrossbreedingMethod::ALL`]) and a case-insensitive name.
///
/// In every description below, a _coin flip_ picks the other
/// parent with probability `fraction_other`, and the network
/// crossbreed is called on otherwise.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CrossbreedingMethod {
    /// One coin flip picks a parent, which is copied whole.
    OneParent,
    /// Follows the strongest outbound edge from each input
    /// neuron, copying the whole path from one parent, then
    /// fills the neurons no path reached one by one.
    ForwardPath,
    /// One coin flip per neuron picks the parent its threshold
    /// and outbound weights are copied from.
    RandomAtom,
    /// Splits every layer at position `fraction_other · size`,
    /// taking the lower part from the other parent. Uses no
    /// randomness.
    Half,
    /// Like [`Half`], but the part taken from the network
    /// crossbreed is called on is a window placed at random.
    ///
    /// [`Half`]: CrossbreedingMethod::Half
    RandomHalf,
    /// One coin flip per neuron for its threshold, and one
    /// per weight.
    Random,
    /// Interpolates threshold values and weights by
    /// `fraction_other`; threshold functions, which cannot
    /// be interpolated, are picked by coin flip per neuron.
    Averaging,
    /// Crosses the raw bytes of both networks' values at a
    /// random window and mutates the result bit by bit. The
    /// usual mutation pass and generation count are skipped.
    BitString,
}

impl Default for CrossbreedingMethod {
    fn default() -> CrossbreedingMethod {
        CrossbreedingMethod::ForwardPath
    }
}

impl CrossbreedingMethod {
    /// All methods, ordered by code.
    pub const ALL: [CrossbreedingMethod; 8] = [
        CrossbreedingMethod::OneParent,
        CrossbreedingMethod::ForwardPath,
        CrossbreedingMethod::RandomAtom,
        CrossbreedingMethod::Half,
        CrossbreedingMethod::RandomHalf,
        CrossbreedingMethod::Random,
        CrossbreedingMethod::Averaging,
        CrossbreedingMethod::BitString,
    ];

    /// Returns the numeric code of the method.
    pub fn code(self) -> u8 {
        match self {
            CrossbreedingMethod::OneParent => 0,
            CrossbreedingMethod::ForwardPath => 1,
            CrossbreedingMethod::RandomAtom => 2,
            CrossbreedingMethod::Half => 3,
            CrossbreedingMethod::RandomHalf => 4,
            CrossbreedingMethod::Random => 5,
            CrossbreedingMethod::Averaging => 6,
            CrossbreedingMethod::BitString => 7,
        }
    }

    /// Returns the name the method is parsed from.
    pub fn name(self) -> &'static str {
        match self {
            CrossbreedingMethod::OneParent => "oneparent",
            CrossbreedingMethod::ForwardPath => "forward",
            CrossbreedingMethod::RandomAtom => "randomatom",
            CrossbreedingMethod::Half => "half",
            CrossbreedingMethod::RandomHalf => "randomhalf",
            CrossbreedingMethod::Random => "random",
            CrossbreedingMethod::Averaging => "averaging",
            CrossbreedingMethod::BitString => "bitstring",
        }
    }
}

impl fmt::Display for CrossbreedingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for CrossbreedingMethod {
    type Err = UnknownCrossbreedingMethod;

    /// Parses a method name, ignoring ASCII case.
    ///
    /// # Examples
    /// ```
    /// use evobreed_nn::breeding::CrossbreedingMethod;
    ///
    /// assert_eq!("RandomHalf".parse(), Ok(CrossbreedingMethod::RandomHalf));
    /// assert!("sideways".parse::<CrossbreedingMethod>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<CrossbreedingMethod, UnknownCrossbreedingMethod> {
        CrossbreedingMethod::ALL
            .iter()
            .copied()
            .find(|method| method.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownCrossbreedingMethod::Name(s.to_owned()))
    }
}

impl TryFrom<u8> for CrossbreedingMethod {
    type Error = UnknownCrossbreedingMethod;

    /// Looks a method up by code.
    ///
    /// # Examples
    /// ```
    /// use evobreed_nn::breeding::CrossbreedingMethod;
    ///
    /// assert_eq!(CrossbreedingMethod::try_from(6), Ok(CrossbreedingMethod::Averaging));
    /// assert!(CrossbreedingMethod::try_from(8).is_err());
    /// ```
    fn try_from(code: u8) -> Result<CrossbreedingMethod, UnknownCrossbreedingMethod> {
        CrossbreedingMethod::ALL
            .get(code as usize)
            .copied()
            .ok_or(UnknownCrossbreedingMethod::Code(code))
    }
}
