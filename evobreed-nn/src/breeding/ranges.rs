use evobreed::RandomSource;

use serde::{Deserialize, Serialize};

/// A closed range `[min, max]` that bounds the values
/// drawn when mutating a weight or threshold value.
///
/// Ranges bound mutation only: values set directly, or
/// produced by crossing, may lie outside of them.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    /// Returns the range `[min, max]`.
    pub const fn new(min: f64, max: f64) -> ValueRange {
        ValueRange { min, max }
    }

    /// Returns the range `[0, 0]`.
    pub const fn zero() -> ValueRange {
        ValueRange { min: 0.0, max: 0.0 }
    }

    /// Returns the range `[-magnitude, magnitude]`.
    pub fn symmetric(magnitude: f64) -> ValueRange {
        ValueRange {
            min: -magnitude,
            max: magnitude,
        }
    }

    /// Returns the smallest range covering both ranges.
    ///
    /// # Examples
    /// ```
    /// use evobreed_nn::breeding::ValueRange;
    ///
    /// let union = ValueRange::new(-1.0, 0.5).union(ValueRange::new(-0.5, 2.0));
    /// assert_eq!(union, ValueRange::new(-1.0, 2.0));
    /// ```
    pub fn union(self, other: ValueRange) -> ValueRange {
        ValueRange {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    pub fn contains(self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }

    /// Moves `value` toward a fresh uniform draw from
    /// this range: `magnitude · fresh + (1 - magnitude) · value`.
    /// A magnitude of 1 replaces the value outright.
    pub fn mutate<R: RandomSource + ?Sized>(self, value: f64, magnitude: f64, rng: &mut R) -> f64 {
        let fresh = rng.next_float() * (self.max - self.min) + self.min;
        magnitude * fresh + (1.0 - magnitude) * value
    }
}
