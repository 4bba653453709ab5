//! Closed rational intervals.
//!
//! The box step of adaptive sign evaluation only needs inclusion-monotone
//! add/mul/neg over exact endpoints, so this stays deliberately small: no
//! division, no open/half-open variants.

use num_rational::BigRational;
use num_traits::{Signed, Zero};

/// A closed interval `[lo, hi]` with exact rational endpoints.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Interval {
    lo: BigRational,
    hi: BigRational,
}

impl Interval {
    pub fn new(lo: BigRational, hi: BigRational) -> Self {
        debug_assert!(lo <= hi);
        Interval { lo, hi }
    }

    /// The degenerate interval `[v, v]`.
    pub fn point(v: BigRational) -> Self {
        Interval { lo: v.clone(), hi: v }
    }

    pub fn lo(&self) -> &BigRational {
        &self.lo
    }

    pub fn hi(&self) -> &BigRational {
        &self.hi
    }

    pub fn width(&self) -> BigRational {
        &self.hi - &self.lo
    }

    pub fn add(&self, rhs: &Interval) -> Interval {
        Interval {
            lo: &self.lo + &rhs.lo,
            hi: &self.hi + &rhs.hi,
        }
    }

    pub fn neg(&self) -> Interval {
        Interval {
            lo: -&self.hi,
            hi: -&self.lo,
        }
    }

    /// Product by the min/max rule over the four endpoint products.
    pub fn mul(&self, rhs: &Interval) -> Interval {
        let mut products = [
            &self.lo * &rhs.lo,
            &self.lo * &rhs.hi,
            &self.hi * &rhs.lo,
            &self.hi * &rhs.hi,
        ];
        products.sort();
        let [lo, .., hi] = products;
        Interval { lo, hi }
    }

    /// `Some(sign)` when the interval is strictly one-signed or is exactly
    /// the point zero; `None` when it straddles.
    pub fn certain_sign(&self) -> Option<i32> {
        if self.lo.is_positive() {
            Some(1)
        } else if self.hi.is_negative() {
            Some(-1)
        } else if self.lo.is_zero() && self.hi.is_zero() {
            Some(0)
        } else {
            None
        }
    }
}
