//! Points on curves.

use std::fmt;

use curvex_math::AlgebraicReal;

use crate::curve::Curve;

/// A point on a curve: the `arcno`-th branch (counted from below) of the
/// supporting curve over the vertical line at `x`.
///
/// The y-coordinate is never stored; it is materialized on demand through
/// the topology oracle, which owns the fiber roots, and refined in place.
#[derive(Clone)]
pub struct CurvePoint {
    x: AlgebraicReal,
    curve: Curve,
    arcno: usize,
}

impl CurvePoint {
    pub(crate) fn new(x: AlgebraicReal, curve: Curve, arcno: usize) -> Self {
        CurvePoint { x, curve, arcno }
    }

    pub fn x(&self) -> &AlgebraicReal {
        &self.x
    }

    pub fn curve(&self) -> &Curve {
        &self.curve
    }

    pub fn arcno(&self) -> usize {
        self.arcno
    }
}

impl fmt::Debug for CurvePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CurvePoint(x in [{}, {}], curve #{}, arc {})",
            self.x.low(),
            self.x.high(),
            self.curve.id(),
            self.arcno
        )
    }
}
