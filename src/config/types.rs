//! Value types shared by the planner (Immutable Blueprints)

use serde::{Deserialize, Serialize};

/// A per-share price. Anything negative, NaN or infinite collapses to 0 ("unset").
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Price(f64);

impl Price {
    pub const UNSET: Self = Self(0.0);

    pub const fn new(val: f64) -> Self {
        if val.is_finite() && val > 0.0 {
            Self(val)
        } else {
            Self::UNSET
        }
    }

    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }

    /// A price only takes part in lot maths once it is strictly positive.
    #[inline]
    pub fn is_set(self) -> bool {
        self.0 > 0.0
    }

    /// Cost of one board lot at this price.
    #[inline]
    pub fn lot_cost(self, lot_size: u64) -> f64 {
        self.0 * lot_size as f64
    }

    /// Returns `self` when set, otherwise `fallback`.
    #[inline]
    pub fn or(self, fallback: Price) -> Price {
        if self.is_set() { self } else { fallback }
    }
}

impl From<f64> for Price {
    fn from(val: f64) -> Self {
        Self::new(val)
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Coerces user-supplied amounts (capital, weights, percentages) to a safe, non-negative value.
#[inline]
pub fn non_negative(val: f64) -> f64 {
    if val.is_finite() && val > 0.0 { val } else { 0.0 }
}
