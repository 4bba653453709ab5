//! Identity wrappers for cached curves and curve pairs.
//!
//! A [`Curve`] is a shared handle over a canonical defining polynomial plus a
//! kernel-assigned id; equality and hashing go through the id, so comparing
//! cached curves is O(1). Handles are produced only by the kernel's caches.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use curvex_math::Poly2;

/// A plane algebraic curve: a canonical square-free-or-not defining
/// polynomial with a cache identity.
#[derive(Clone)]
pub struct Curve {
    rep: Rc<CurveRep>,
}

struct CurveRep {
    poly: Poly2,
    id: u64,
}

impl Curve {
    pub(crate) fn new(poly: Poly2, id: u64) -> Self {
        Curve {
            rep: Rc::new(CurveRep { poly, id }),
        }
    }

    /// The canonical defining polynomial.
    pub fn polynomial(&self) -> &Poly2 {
        &self.rep.poly
    }

    pub fn id(&self) -> u64 {
        self.rep.id
    }

    pub fn total_degree(&self) -> usize {
        self.rep.poly.total_degree()
    }
}

impl PartialEq for Curve {
    fn eq(&self, other: &Self) -> bool {
        self.rep.id == other.rep.id
    }
}

impl Eq for Curve {}

impl Hash for Curve {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rep.id.hash(state);
    }
}

impl fmt::Debug for Curve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Curve#{}[{}]", self.rep.id, self.rep.poly)
    }
}

/// An ordered pair of distinct cached curves.
///
/// The two curves are stored in the fixed total order of their canonical
/// polynomials, so `(A, B)` and `(B, A)` resolve to the same pair.
#[derive(Clone)]
pub struct CurvePair {
    rep: Rc<PairRep>,
}

struct PairRep {
    first: Curve,
    second: Curve,
    id: u64,
}

impl CurvePair {
    pub(crate) fn new(first: Curve, second: Curve, id: u64) -> Self {
        debug_assert!(first.polynomial() <= second.polynomial());
        CurvePair {
            rep: Rc::new(PairRep { first, second, id }),
        }
    }

    pub fn first(&self) -> &Curve {
        &self.rep.first
    }

    pub fn second(&self) -> &Curve {
        &self.rep.second
    }

    pub fn id(&self) -> u64 {
        self.rep.id
    }

    /// Position (0 or 1) of a member curve, by id.
    pub fn position_of(&self, curve: &Curve) -> Option<usize> {
        if curve == &self.rep.first {
            Some(0)
        } else if curve == &self.rep.second {
            Some(1)
        } else {
            None
        }
    }
}

impl PartialEq for CurvePair {
    fn eq(&self, other: &Self) -> bool {
        self.rep.id == other.rep.id
    }
}

impl Eq for CurvePair {}

impl Hash for CurvePair {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rep.id.hash(state);
    }
}

impl fmt::Debug for CurvePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CurvePair#{}({}, {})",
            self.rep.id,
            self.rep.first.id(),
            self.rep.second.id()
        )
    }
}
