//! Exponential smoothing factor

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Weight given to the newest input of an exponential moving average
///
/// Validated on construction to lie in `(0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct SmoothingFactor(f64);

impl SmoothingFactor {
    /// Create a new SmoothingFactor with validation
    ///
    /// # Errors
    /// Returns `DomainError::InvalidSmoothingFactor` if the value is not in `(0, 1]`
    pub fn new(value: f64) -> Result<Self, DomainError> {
        if !(value > 0.0 && value <= 1.0) {
            return Err(DomainError::InvalidSmoothingFactor(value));
        }
        Ok(Self(value))
    }

    pub(crate) const fn new_unchecked(value: f64) -> Self {
        Self(value)
    }

    #[inline]
    pub const fn value(&self) -> f64 {
        self.0
    }

    /// Blend `input` into `previous`
    #[inline]
    pub fn blend(&self, input: f64, previous: f64) -> f64 {
        self.0 * input + (1.0 - self.0) * previous
    }
}

impl fmt::Display for SmoothingFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<f64> for SmoothingFactor {
    type Error = DomainError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SmoothingFactor> for f64 {
    fn from(factor: SmoothingFactor) -> Self {
        factor.0
    }
}
