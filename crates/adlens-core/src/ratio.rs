//! Ratio metrics whose denominator may legitimately be zero.

use serde::{Serialize, Serializer};

/// The result of dividing one aggregate by another.
///
/// A zero denominator (or any non-finite quotient) yields
/// [`Ratio::Undefined`], never a clamped `0.0`. Callers match on the
/// variant to decide how to present it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Ratio {
    Defined(f64),
    Undefined,
}

impl Ratio {
    /// `numerator / denominator`.
    #[must_use]
    pub fn of(numerator: f64, denominator: f64) -> Self {
        if denominator == 0.0 {
            return Self::Undefined;
        }
        Self::from_value(numerator / denominator)
    }

    /// `numerator / denominator * 100`, scaled before dividing so that
    /// whole-number percentages come out exact.
    #[must_use]
    pub fn percent(numerator: f64, denominator: f64) -> Self {
        Self::of(numerator * 100.0, denominator)
    }

    /// Wraps a raw float, mapping NaN and infinities to `Undefined`.
    #[must_use]
    pub fn from_value(value: f64) -> Self {
        if value.is_finite() {
            Self::Defined(value)
        } else {
            Self::Undefined
        }
    }

    #[must_use]
    pub fn value(self) -> Option<f64> {
        match self {
            Self::Defined(v) => Some(v),
            Self::Undefined => None,
        }
    }

    #[must_use]
    pub fn is_defined(self) -> bool {
        matches!(self, Self::Defined(_))
    }
}

/// Undefined ratios serialize as `null`.
impl Serialize for Ratio {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Defined(v) => serializer.serialize_some(v),
            Self::Undefined => serializer.serialize_none(),
        }
    }
}
