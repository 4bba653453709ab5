//! Refinable real algebraic numbers.
//!
//! An [`AlgebraicReal`] is an isolated real root of a square-free univariate
//! polynomial, held as a shared interior-mutable isolating interval. Clones
//! share the interval, so refinement through any handle is visible to every
//! holder. Comparison is exact: intervals are refined until they separate,
//! with a gcd certificate deciding equality in finite time.

use std::cell::RefCell;
use std::cmp::Ordering;
use std::rc::Rc;

use num_rational::BigRational;

use crate::isolate::{self, Isolation};
use crate::poly1::Poly1;

/// An isolated real root of a square-free polynomial.
///
/// Exact rational values are the degenerate case `[r, r]`. For non-exact
/// values the invariant holds that neither interval endpoint is a root of the
/// defining polynomial, so the sign of the polynomial at `low` stays fixed
/// under refinement.
#[derive(Clone, Debug)]
pub struct AlgebraicReal {
    poly: Rc<Poly1>,
    state: Rc<RefCell<Isolation>>,
}

impl AlgebraicReal {
    pub fn from_rational(r: BigRational) -> Self {
        AlgebraicReal {
            poly: Rc::new(Poly1::new(vec![-&r, num_traits::One::one()])),
            state: Rc::new(RefCell::new(Isolation {
                lo: r.clone(),
                hi: r,
                sign_lo: 0,
            })),
        }
    }

    /// All real roots of `p`, ascending. `p` is made square-free internally;
    /// a constant (or zero) polynomial has no isolated roots.
    pub fn roots_of(p: &Poly1) -> Vec<AlgebraicReal> {
        if p.is_constant() {
            return Vec::new();
        }
        let sq = p.squarefree_part();
        let poly = Rc::new(sq.clone());
        isolate::isolate(&sq)
            .into_iter()
            .map(|iso| AlgebraicReal {
                poly: Rc::clone(&poly),
                state: Rc::new(RefCell::new(iso)),
            })
            .collect()
    }

    /// The square-free defining polynomial.
    pub fn poly(&self) -> &Poly1 {
        &self.poly
    }

    pub fn low(&self) -> BigRational {
        self.state.borrow().lo.clone()
    }

    pub fn high(&self) -> BigRational {
        self.state.borrow().hi.clone()
    }

    pub fn width(&self) -> BigRational {
        let s = self.state.borrow();
        &s.hi - &s.lo
    }

    pub fn is_exact(&self) -> bool {
        self.state.borrow().is_exact()
    }

    /// `Some(r)` when the value is known to be exactly the rational `r`.
    pub fn rational_value(&self) -> Option<BigRational> {
        let s = self.state.borrow();
        if s.is_exact() {
            Some(s.lo.clone())
        } else {
            None
        }
    }

    /// One bisection step; exact values are already as tight as possible.
    pub fn refine(&self) {
        let mut s = self.state.borrow_mut();
        if s.is_exact() {
            return;
        }
        let mid = (&s.lo + &s.hi) / BigRational::from_integer(2.into());
        match self.poly.sign_at(&mid) {
            0 => {
                s.lo = mid.clone();
                s.hi = mid;
                s.sign_lo = 0;
            }
            sign if sign == s.sign_lo => s.lo = mid,
            _ => s.hi = mid,
        }
    }

    /// Refines until the width drops below `initial_width / 2^k`.
    pub fn refine_to(&self, k: u32) {
        if self.is_exact() {
            return;
        }
        let mut target = self.width();
        for _ in 0..k {
            target = target / BigRational::from_integer(2.into());
        }
        while !self.is_exact() && self.width() >= target {
            self.refine();
        }
    }

    /// Whether `r` lies in the current isolating interval (closed).
    pub fn contains(&self, r: &BigRational) -> bool {
        let s = self.state.borrow();
        &s.lo <= r && r <= &s.hi
    }

    /// Exact test whether this number is a root of `q`.
    pub fn is_root_of(&self, q: &Poly1) -> bool {
        if q.is_zero() {
            return true;
        }
        let s = self.state.borrow();
        if s.is_exact() {
            return q.sign_at(&s.lo) == 0;
        }
        // any shared root is a root of gcd(poly, q); endpoints are not roots
        // of poly, hence not of the gcd
        let g = self.poly.gcd(q);
        if g.is_constant() {
            return false;
        }
        isolate::count_roots_in(&g, &s.lo, &s.hi) > 0
    }

    /// Exact comparison by interval separation with a gcd equality
    /// certificate.
    pub fn compare(&self, other: &AlgebraicReal) -> Ordering {
        if Rc::ptr_eq(&self.state, &other.state) {
            return Ordering::Equal;
        }
        loop {
            let (exact_a, exact_b) = (self.is_exact(), other.is_exact());
            if exact_a && exact_b {
                return self.low().cmp(&other.low());
            }
            if exact_a {
                return match other.compare_with_rational(&self.low()) {
                    Ordering::Less => Ordering::Greater,
                    Ordering::Greater => Ordering::Less,
                    Ordering::Equal => Ordering::Equal,
                };
            }
            if exact_b {
                return self.compare_with_rational(&other.low());
            }
            // both open: endpoints are non-roots, so touching intervals
            // still order strictly
            if self.high() <= other.low() {
                return Ordering::Less;
            }
            if other.high() <= self.low() {
                return Ordering::Greater;
            }
            if self.equal_by_certificate(other) {
                return Ordering::Equal;
            }
            // provably distinct; refinement separates in finitely many steps
            self.refine();
            other.refine();
        }
    }

    /// Compares against an exact rational.
    pub fn compare_with_rational(&self, r: &BigRational) -> Ordering {
        loop {
            let s = self.state.borrow();
            if s.is_exact() {
                return s.lo.cmp(r);
            }
            if r <= &s.lo {
                return Ordering::Greater;
            }
            if r >= &s.hi {
                return Ordering::Less;
            }
            drop(s);
            if self.poly.sign_at(r) == 0 {
                return Ordering::Equal;
            }
            self.refine();
        }
    }

    fn equal_by_certificate(&self, other: &AlgebraicReal) -> bool {
        let g = self.poly.gcd(&other.poly);
        if g.is_constant() {
            return false;
        }
        let lo = self.low().max(other.low());
        let hi = self.high().min(other.high());
        if lo >= hi {
            return false;
        }
        // overlap endpoints come from one of the two isolating intervals, so
        // they are non-roots of the respective polynomial and of the gcd
        isolate::count_roots_in(&g, &lo, &hi) > 0
    }

    /// A rational strictly between two provably distinct values.
    pub fn separating_rational(a: &AlgebraicReal, b: &AlgebraicReal) -> BigRational {
        match a.compare(b) {
            Ordering::Less => {}
            Ordering::Greater => return Self::separating_rational(b, a),
            Ordering::Equal => {
                debug_assert!(false, "separating_rational on equal values");
                return a.low();
            }
        }
        while a.high() >= b.low() {
            a.refine();
            b.refine();
        }
        (a.high() + b.low()) / BigRational::from_integer(2.into())
    }
}

impl PartialEq for AlgebraicReal {
    fn eq(&self, other: &Self) -> bool {
        self.compare(other) == Ordering::Equal
    }
}

impl Eq for AlgebraicReal {}

impl PartialOrd for AlgebraicReal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.compare(other))
    }
}

impl Ord for AlgebraicReal {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigInt;

    fn rat(n: i64, d: i64) -> BigRational {
        BigRational::new(BigInt::from(n), BigInt::from(d))
    }

    fn sqrt2() -> AlgebraicReal {
        let roots = AlgebraicReal::roots_of(&Poly1::from_ints(&[-2, 0, 1]));
        roots.into_iter().nth(1).unwrap()
    }

    #[test]
    fn rational_roots_are_exact() {
        let roots = AlgebraicReal::roots_of(&Poly1::from_ints(&[-1, 0, 1]));
        assert_eq!(roots.len(), 2);
        assert_eq!(roots[0].rational_value(), Some(rat(-1, 1)));
        assert_eq!(roots[1].rational_value(), Some(rat(1, 1)));
    }

    #[test]
    fn refinement_is_shared_between_clones() {
        let a = sqrt2();
        let b = a.clone();
        let before = a.width();
        b.refine();
        assert!(a.width() < before);
    }

    #[test]
    fn refine_to_halves_relative_width() {
        let a = sqrt2();
        let w = a.width();
        a.refine_to(10);
        let bound = w / BigRational::from_integer(1024.into());
        assert!(a.width() < bound);
    }

    #[test]
    fn compares_against_rationals() {
        let a = sqrt2();
        assert_eq!(a.compare_with_rational(&rat(1, 1)), Ordering::Greater);
        assert_eq!(a.compare_with_rational(&rat(3, 2)), Ordering::Less);
        assert_eq!(a.compare_with_rational(&rat(17, 12)), Ordering::Less);
        assert_eq!(a.compare_with_rational(&rat(41, 29)), Ordering::Greater);
    }

    #[test]
    fn equal_roots_of_different_polynomials() {
        // sqrt(2) as a root of x^2 - 2 and of x^4 - 4
        let a = sqrt2();
        let quartic = AlgebraicReal::roots_of(&Poly1::from_ints(&[-4, 0, 0, 0, 1]));
        assert_eq!(quartic.len(), 2);
        assert_eq!(a.compare(&quartic[1]), Ordering::Equal);
        assert_eq!(a.compare(&quartic[0]), Ordering::Greater);
    }

    #[test]
    fn orders_close_irrationals() {
        // sqrt(2) = 1.4142..., golden ratio = 1.6180...
        let a = sqrt2();
        let golden = AlgebraicReal::roots_of(&Poly1::from_ints(&[-1, -1, 1]))
            .into_iter()
            .nth(1)
            .unwrap();
        assert_eq!(a.compare(&golden), Ordering::Less);
        let sep = AlgebraicReal::separating_rational(&a, &golden);
        assert_eq!(a.compare_with_rational(&sep), Ordering::Less);
        assert_eq!(golden.compare_with_rational(&sep), Ordering::Greater);
    }

    #[test]
    fn root_membership_certificates() {
        let a = sqrt2();
        assert!(a.is_root_of(&Poly1::from_ints(&[-4, 0, 0, 0, 1])));
        assert!(!a.is_root_of(&Poly1::from_ints(&[-3, 0, 1])));
        let half = AlgebraicReal::from_rational(rat(1, 2));
        assert!(half.is_root_of(&Poly1::from_ints(&[-1, 2])));
    }
}
