//! Half-open numeric ranges that transforms sample their magnitudes from.
//!
//! Both range types reject `max <= min` when constructed, including when
//! they are deserialized from a pipeline document, so `sample` never sees
//! an empty interval.

use rand::{Rng, RngExt};
use serde::{Deserialize, Serialize};

use crate::error::AugmentError;

/// An integer range `[min, max)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawRange<i32>")]
pub struct IntRange {
    min: i32,
    max: i32,
}

impl IntRange {
    /// Creates a new range, failing if it contains no values.
    pub fn new(min: i32, max: i32) -> Result<Self, AugmentError> {
        if max <= min {
            return Err(AugmentError::InvalidRange {
                min: min.to_string(),
                max: max.to_string(),
            });
        }
        Ok(Self { min, max })
    }

    /// The range `[1, 2)`.
    pub const ONE: IntRange = IntRange { min: 1, max: 2 };

    /// The range holding exactly `value`.
    ///
    /// `i32::MAX` has no exclusive upper bound and is rejected.
    pub fn exactly(value: i32) -> Result<Self, AugmentError> {
        Self::new(value, value.saturating_add(1))
    }

    #[inline]
    pub fn min(&self) -> i32 {
        self.min
    }

    #[inline]
    pub fn max(&self) -> i32 {
        self.max
    }

    /// Draws a value uniformly from `[min, max)`.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> i32 {
        rng.random_range(self.min..self.max)
    }
}

/// A real range `[min, max)`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawRange<f64>")]
pub struct FloatRange {
    min: f64,
    max: f64,
}

impl FloatRange {
    /// Creates a new range, failing if it is empty or has non-finite bounds.
    pub fn new(min: f64, max: f64) -> Result<Self, AugmentError> {
        if !(min.is_finite() && max.is_finite()) || max <= min {
            return Err(AugmentError::InvalidRange {
                min: min.to_string(),
                max: max.to_string(),
            });
        }
        Ok(Self { min, max })
    }

    #[inline]
    pub fn min(&self) -> f64 {
        self.min
    }

    #[inline]
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Draws a value uniformly from `[min, max)`.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.min + rng.random::<f64>() * (self.max - self.min)
    }
}

#[derive(Deserialize)]
struct RawRange<T> {
    min: T,
    max: T,
}

impl TryFrom<RawRange<i32>> for IntRange {
    type Error = AugmentError;

    fn try_from(raw: RawRange<i32>) -> Result<Self, Self::Error> {
        IntRange::new(raw.min, raw.max)
    }
}

impl TryFrom<RawRange<f64>> for FloatRange {
    type Error = AugmentError;

    fn try_from(raw: RawRange<f64>) -> Result<Self, Self::Error> {
        FloatRange::new(raw.min, raw.max)
    }
}
