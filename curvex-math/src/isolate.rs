//! Sturm-based isolation of the real roots of a square-free polynomial.
//!
//! ## Algorithm
//!
//! 1. Build the Sturm sequence of `p` (negated-remainder chain).
//! 2. Bound all real roots inside `[-B, B]` with the Cauchy bound.
//! 3. Bisect; a subinterval whose sign-variation difference is one isolates a
//!    single root. A bisection point that is itself a root is carved out as a
//!    degenerate exact interval with a verified root-free gap around it.
//! 4. Identify rational roots exactly: the canonical form has integer
//!    coefficients, so any rational root has denominator dividing the leading
//!    coefficient `L`; two such rationals differ by at least `1/L^2`.
//!    Refining below that width leaves at most one candidate, the simplest
//!    rational in the interval (Stern-Brocot descent), which a single exact
//!    evaluation confirms or rules out.
//!
//! Intervals are returned ascending; non-degenerate ones have endpoints that
//! are provably not roots.
//!
//! ## References
//!
//! - Basu, Pollack, Roy, "Algorithms in Real Algebraic Geometry", ch. 2
//! - Yap, "Fundamental Problems of Algorithmic Algebra", ch. 7

use num_rational::BigRational;
use num_traits::{One, Signed, Zero};

use crate::poly1::Poly1;

/// One isolated real root: either an open interval `(lo, hi)` containing
/// exactly one root of the defining polynomial (`lo < hi`, neither endpoint a
/// root, `sign_lo` the sign of the polynomial at `lo`), or an exact rational
/// root (`lo == hi`, `sign_lo == 0`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Isolation {
    pub lo: BigRational,
    pub hi: BigRational,
    pub sign_lo: i32,
}

impl Isolation {
    pub fn is_exact(&self) -> bool {
        self.lo == self.hi
    }
}

/// Sturm sequence: `p`, `p'`, then negated Euclidean remainders until zero.
pub fn sturm_sequence(p: &Poly1) -> Vec<Poly1> {
    let mut seq = vec![p.clone(), p.derivative()];
    while !seq.last().map_or(true, Poly1::is_zero) {
        let n = seq.len();
        let r = seq[n - 2].rem(&seq[n - 1]);
        seq.push(-&r);
    }
    seq.pop();
    seq
}

/// Number of sign changes in the sequence evaluated at `x`, zeros skipped.
pub fn sign_variations_at(seq: &[Poly1], x: &BigRational) -> usize {
    let mut variations = 0;
    let mut prev = 0;
    for s in seq {
        let sign = s.sign_at(x);
        if sign == 0 {
            continue;
        }
        if prev != 0 && sign != prev {
            variations += 1;
        }
        prev = sign;
    }
    variations
}

/// Cauchy bound: every real root lies strictly inside `[-B, B]`.
pub fn cauchy_bound(p: &Poly1) -> BigRational {
    let lead = p.leading_coeff();
    let mut max = BigRational::zero();
    let d = p.degree();
    for c in &p.coeffs()[..d] {
        let ratio = (c / &lead).abs();
        if ratio > max {
            max = ratio;
        }
    }
    BigRational::one() + max
}

/// Distinct real roots of `p` in the open interval `(lo, hi)`; neither
/// endpoint may be a root.
pub fn count_roots_in(p: &Poly1, lo: &BigRational, hi: &BigRational) -> usize {
    if p.is_constant() {
        return 0;
    }
    debug_assert!(p.sign_at(lo) != 0 && p.sign_at(hi) != 0);
    let seq = sturm_sequence(p);
    sign_variations_at(&seq, lo) - sign_variations_at(&seq, hi)
}

/// Isolates all real roots of a square-free `p`, ascending.
pub fn isolate(p: &Poly1) -> Vec<Isolation> {
    let p = p.canonicalize();
    debug_assert!(p.is_squarefree());
    if p.is_constant() {
        return Vec::new();
    }
    let seq = sturm_sequence(&p);
    let bound = cauchy_bound(&p);
    let lo = -&bound;
    let vlo = sign_variations_at(&seq, &lo);
    let vhi = sign_variations_at(&seq, &bound);
    let mut out = Vec::new();
    subdivide(&p, &seq, &lo, &bound, vlo, vhi, &mut out);
    identify_rational_roots(&p, &mut out);
    out
}

fn subdivide(
    p: &Poly1,
    seq: &[Poly1],
    lo: &BigRational,
    hi: &BigRational,
    vlo: usize,
    vhi: usize,
    out: &mut Vec<Isolation>,
) {
    let roots = vlo - vhi;
    if roots == 0 {
        return;
    }
    if roots == 1 {
        let sign_lo = p.sign_at(lo);
        debug_assert!(sign_lo != 0);
        out.push(Isolation {
            lo: lo.clone(),
            hi: hi.clone(),
            sign_lo,
        });
        return;
    }
    let mid = (lo + hi) / BigRational::from_integer(2.into());
    if p.sign_at(&mid) == 0 {
        // the bisection point is itself a root; shrink a symmetric gap until
        // it provably contains no other root and its endpoints are root-free
        let mut delta = (hi - lo) / BigRational::from_integer(4.into());
        loop {
            let a = &mid - &delta;
            let b = &mid + &delta;
            if p.sign_at(&a) != 0
                && p.sign_at(&b) != 0
                && sign_variations_at(seq, &a) - sign_variations_at(seq, &b) == 1
            {
                let va = sign_variations_at(seq, &a);
                let vb = sign_variations_at(seq, &b);
                subdivide(p, seq, lo, &a, vlo, va, out);
                out.push(Isolation {
                    lo: mid.clone(),
                    hi: mid.clone(),
                    sign_lo: 0,
                });
                subdivide(p, seq, &b, hi, vb, vhi, out);
                return;
            }
            delta = delta / BigRational::from_integer(2.into());
        }
    }
    let vmid = sign_variations_at(seq, &mid);
    subdivide(p, seq, lo, &mid, vlo, vmid, out);
    subdivide(p, seq, &mid, hi, vmid, vhi, out);
}

/// Collapses the isolating intervals that actually contain a rational root to
/// exact form. `p` must be canonical (integer coefficients, content 1).
fn identify_rational_roots(p: &Poly1, out: &mut [Isolation]) {
    let lead = p.leading_coeff();
    let gap = (&lead * &lead).recip();
    let two = BigRational::from_integer(2.into());
    for iso in out.iter_mut() {
        if iso.is_exact() {
            continue;
        }
        while &iso.hi - &iso.lo >= gap {
            let mid = (&iso.lo + &iso.hi) / &two;
            match p.sign_at(&mid) {
                0 => {
                    iso.lo = mid.clone();
                    iso.hi = mid;
                    iso.sign_lo = 0;
                    break;
                }
                s if s == iso.sign_lo => iso.lo = mid,
                _ => iso.hi = mid,
            }
        }
        if !iso.is_exact() {
            let candidate = simplest_in(&iso.lo, &iso.hi);
            if p.sign_at(&candidate) == 0 {
                iso.lo = candidate.clone();
                iso.hi = candidate;
                iso.sign_lo = 0;
            }
        }
    }
}

/// The rational with the smallest denominator in the closed interval
/// `[lo, hi]` (Stern-Brocot descent).
pub fn simplest_in(lo: &BigRational, hi: &BigRational) -> BigRational {
    debug_assert!(lo <= hi);
    if !lo.is_positive() && !hi.is_negative() {
        return BigRational::zero();
    }
    if hi.is_negative() {
        return -simplest_positive(&-hi, &-lo);
    }
    simplest_positive(lo, hi)
}

fn simplest_positive(lo: &BigRational, hi: &BigRational) -> BigRational {
    let ceil = lo.ceil();
    if &ceil <= hi {
        return ceil;
    }
    let floor = lo.floor();
    let inner = simplest_positive(&(hi - &floor).recip(), &(lo - &floor).recip());
    floor + inner.recip()
}
