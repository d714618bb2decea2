//! Noise severity domain types
//!
//! Provides the ordered severity levels and the validated thresholds used to
//! derive them.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Noise severity level
///
/// Totally ordered: `Ok < Regular < Elevated < Critical`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
#[derive(Default)]
pub enum Severity {
    /// At or near the ambient baseline
    #[default]
    Ok,
    /// Noticeably above ambient
    Regular,
    /// High enough to start the sustained-elevation timer
    Elevated,
    /// Far above ambient
    Critical,
}

impl Severity {
    /// All levels in ascending order
    pub const ALL: [Severity; 4] = [
        Severity::Ok,
        Severity::Regular,
        Severity::Elevated,
        Severity::Critical,
    ];

    /// Numeric category (0-3) as reported to display and API collaborators
    #[inline]
    pub const fn as_index(&self) -> u8 {
        *self as u8
    }

    /// Whether this level counts as elevated for alerting
    #[inline]
    pub fn is_elevated(&self) -> bool {
        *self >= Severity::Elevated
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ok => write!(f, "OK"),
            Self::Regular => write!(f, "REGULAR"),
            Self::Elevated => write!(f, "ELEVATED"),
            Self::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// How the smoothed value is compared against the thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum ClassificationMode {
    /// Compare `current / baseline` against multipliers
    #[default]
    Ratio,
    /// Compare `current` against absolute level boundaries
    Absolute,
}

impl fmt::Display for ClassificationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ratio => write!(f, "ratio"),
            Self::Absolute => write!(f, "absolute"),
        }
    }
}

/// Three ascending severity boundaries
///
/// Validated on construction: every boundary is positive and finite, and
/// `regular < high < toxic`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawThresholds")]
pub struct Thresholds {
    regular: f64,
    high: f64,
    toxic: f64,
}

#[derive(Deserialize)]
struct RawThresholds {
    regular: f64,
    high: f64,
    toxic: f64,
}

impl TryFrom<RawThresholds> for Thresholds {
    type Error = DomainError;

    fn try_from(raw: RawThresholds) -> Result<Self, Self::Error> {
        Self::new(raw.regular, raw.high, raw.toxic)
    }
}

impl Thresholds {
    /// Create validated thresholds
    ///
    /// # Errors
    /// Returns `DomainError::NonPositiveThreshold` for zero, negative or
    /// non-finite values and `DomainError::UnorderedThresholds` unless
    /// `regular < high < toxic`.
    pub fn new(regular: f64, high: f64, toxic: f64) -> Result<Self, DomainError> {
        for value in [regular, high, toxic] {
            if !value.is_finite() || value <= 0.0 {
                return Err(DomainError::NonPositiveThreshold(value));
            }
        }

        if !(regular < high && high < toxic) {
            return Err(DomainError::UnorderedThresholds {
                regular,
                high,
                toxic,
            });
        }

        Ok(Self {
            regular,
            high,
            toxic,
        })
    }

    /// Lower bound of [`Severity::Regular`]
    #[inline]
    pub fn regular(&self) -> f64 {
        self.regular
    }

    /// Lower bound of [`Severity::Elevated`]
    #[inline]
    pub fn high(&self) -> f64 {
        self.high
    }

    /// Lower bound of [`Severity::Critical`]
    #[inline]
    pub fn toxic(&self) -> f64 {
        self.toxic
    }

    /// Map a compared quantity onto a severity level
    pub fn level_for(&self, value: f64) -> Severity {
        if value < self.regular {
            Severity::Ok
        } else if value < self.high {
            Severity::Regular
        } else if value < self.toxic {
            Severity::Elevated
        } else {
            Severity::Critical
        }
    }
}

impl Thresholds {
    /// Raw ADC-scale boundaries for absolute classification
    pub fn absolute_default() -> Self {
        Self {
            regular: 300.0,
            high: 600.0,
            toxic: 1000.0,
        }
    }
}

/// Ratio multipliers over the baseline
impl Default for Thresholds {
    fn default() -> Self {
        Self {
            regular: 1.2,
            high: 1.5,
            toxic: 2.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Ok < Severity::Regular);
        assert!(Severity::Regular < Severity::Elevated);
        assert!(Severity::Elevated < Severity::Critical);
    }

    #[test]
    fn test_severity_is_elevated() {
        assert!(!Severity::Ok.is_elevated());
        assert!(!Severity::Regular.is_elevated());
        assert!(Severity::Elevated.is_elevated());
        assert!(Severity::Critical.is_elevated());
    }

    #[test]
    fn test_severity_index_and_display() {
        assert_eq!(Severity::Ok.as_index(), 0);
        assert_eq!(Severity::Critical.as_index(), 3);
        assert_eq!(Severity::Elevated.to_string(), "ELEVATED");
    }

    #[test]
    fn test_thresholds_valid() {
        let t = Thresholds::new(1.2, 1.5, 2.0).unwrap();
        assert_eq!(t.regular(), 1.2);
        assert_eq!(t.high(), 1.5);
        assert_eq!(t.toxic(), 2.0);
    }

    #[test]
    fn test_thresholds_unordered() {
        assert!(matches!(
            Thresholds::new(1.5, 1.2, 2.0),
            Err(DomainError::UnorderedThresholds { .. })
        ));
        assert!(matches!(
            Thresholds::new(1.2, 1.2, 2.0),
            Err(DomainError::UnorderedThresholds { .. })
        ));
    }

    #[test]
    fn test_thresholds_non_positive() {
        assert!(matches!(
            Thresholds::new(0.0, 1.5, 2.0),
            Err(DomainError::NonPositiveThreshold(_))
        ));
        assert!(Thresholds::new(1.0, f64::NAN, 2.0).is_err());
    }

    #[test]
    fn test_level_boundaries() {
        let t = Thresholds::default();
        assert_eq!(t.level_for(1.0), Severity::Ok);
        assert_eq!(t.level_for(1.2), Severity::Regular);
        assert_eq!(t.level_for(1.49), Severity::Regular);
        assert_eq!(t.level_for(1.5), Severity::Elevated);
        assert_eq!(t.level_for(2.0), Severity::Critical);
        assert_eq!(t.level_for(10.0), Severity::Critical);
    }

    #[test]
    fn test_absolute_defaults_are_valid() {
        let t = Thresholds::absolute_default();
        assert!(Thresholds::new(t.regular(), t.high(), t.toxic()).is_ok());
        assert_eq!(t.level_for(100.0), Severity::Ok);
        assert_eq!(t.level_for(650.0), Severity::Elevated);
    }

    #[test]
    fn test_thresholds_deserialize_validates() {
        let ok: Thresholds = toml::from_str("regular = 1.1\nhigh = 1.6\ntoxic = 2.5").unwrap();
        assert_eq!(ok.high(), 1.6);

        let bad: Result<Thresholds, _> = toml::from_str("regular = 2.0\nhigh = 1.6\ntoxic = 2.5");
        assert!(bad.is_err());
    }
}
