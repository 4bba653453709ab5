//! Dense univariate polynomials over arbitrary-precision rationals.
//!
//! Coefficients are stored in ascending order with trailing zeros trimmed, so
//! every value has exactly one representation and the derived `Eq`/`Ord`/
//! `Hash` are total and consistent. The zero polynomial is the empty vector.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};

use crate::interval::Interval;

/// A dense univariate polynomial with `BigRational` coefficients.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Poly1 {
    coeffs: Vec<BigRational>,
}

impl Poly1 {
    /// Builds a polynomial from ascending coefficients, trimming trailing
    /// zeros.
    pub fn new(mut coeffs: Vec<BigRational>) -> Self {
        while coeffs.last().map_or(false, Zero::is_zero) {
            coeffs.pop();
        }
        Poly1 { coeffs }
    }

    /// Convenience constructor from integer coefficients, ascending.
    pub fn from_ints(coeffs: &[i64]) -> Self {
        Poly1::new(
            coeffs
                .iter()
                .map(|&c| BigRational::from_integer(BigInt::from(c)))
                .collect(),
        )
    }

    pub fn zero() -> Self {
        Poly1 { coeffs: Vec::new() }
    }

    pub fn one() -> Self {
        Poly1::constant(BigRational::one())
    }

    pub fn constant(c: BigRational) -> Self {
        Poly1::new(vec![c])
    }

    /// The monomial `c * x^k`.
    pub fn monomial(c: BigRational, k: usize) -> Self {
        if c.is_zero() {
            return Poly1::zero();
        }
        let mut coeffs = vec![BigRational::zero(); k + 1];
        coeffs[k] = c;
        Poly1 { coeffs }
    }

    pub fn is_zero(&self) -> bool {
        self.coeffs.is_empty()
    }

    pub fn is_constant(&self) -> bool {
        self.coeffs.len() <= 1
    }

    /// Degree, with the convention that the zero polynomial has degree 0.
    pub fn degree(&self) -> usize {
        self.coeffs.len().saturating_sub(1)
    }

    pub fn coeffs(&self) -> &[BigRational] {
        &self.coeffs
    }

    /// Coefficient of `x^k` (zero beyond the degree).
    pub fn coeff(&self, k: usize) -> BigRational {
        self.coeffs.get(k).cloned().unwrap_or_else(BigRational::zero)
    }

    /// Leading coefficient; zero for the zero polynomial.
    pub fn leading_coeff(&self) -> BigRational {
        self.coeffs.last().cloned().unwrap_or_else(BigRational::zero)
    }

    /// Horner evaluation.
    pub fn evaluate(&self, x: &BigRational) -> BigRational {
        let mut acc = BigRational::zero();
        for c in self.coeffs.iter().rev() {
            acc = acc * x + c;
        }
        acc
    }

    /// Horner evaluation over a closed rational interval.
    pub fn evaluate_interval(&self, x: &Interval) -> Interval {
        let mut acc = Interval::point(BigRational::zero());
        for c in self.coeffs.iter().rev() {
            acc = acc.mul(x).add(&Interval::point(c.clone()));
        }
        acc
    }

    /// Sign of the value at `x`: -1, 0 or 1.
    pub fn sign_at(&self, x: &BigRational) -> i32 {
        let v = self.evaluate(x);
        if v.is_zero() {
            0
        } else if v.is_positive() {
            1
        } else {
            -1
        }
    }

    pub fn derivative(&self) -> Poly1 {
        if self.coeffs.len() <= 1 {
            return Poly1::zero();
        }
        let coeffs = self
            .coeffs
            .iter()
            .enumerate()
            .skip(1)
            .map(|(i, c)| c * BigRational::from_integer(BigInt::from(i)))
            .collect();
        Poly1::new(coeffs)
    }

    pub fn scale(&self, s: &BigRational) -> Poly1 {
        if s.is_zero() {
            return Poly1::zero();
        }
        Poly1 {
            coeffs: self.coeffs.iter().map(|c| c * s).collect(),
        }
    }

    /// Multiplies by `x^k`.
    pub fn shift(&self, k: usize) -> Poly1 {
        if self.is_zero() || k == 0 {
            return self.clone();
        }
        let mut coeffs = vec![BigRational::zero(); k];
        coeffs.extend(self.coeffs.iter().cloned());
        Poly1 { coeffs }
    }

    /// Euclidean division by a nonzero divisor: `self = q * div + r` with
    /// `deg r < deg div`.
    pub fn div_rem(&self, div: &Poly1) -> (Poly1, Poly1) {
        debug_assert!(!div.is_zero());
        let dd = div.degree();
        let lead = div.leading_coeff();
        let mut rem = self.clone();
        let mut q = vec![BigRational::zero(); self.coeffs.len().saturating_sub(dd)];
        while !rem.is_zero() && rem.degree() >= dd {
            let dr = rem.degree();
            let c = rem.leading_coeff() / &lead;
            q[dr - dd] = c.clone();
            rem = &rem - &Poly1::monomial(c, dr - dd).mul(div);
        }
        (Poly1::new(q), rem)
    }

    /// Remainder of Euclidean division.
    pub fn rem(&self, div: &Poly1) -> Poly1 {
        self.div_rem(div).1
    }

    /// Exact division; the divisor must divide without remainder.
    pub fn div_exact(&self, div: &Poly1) -> Poly1 {
        let (q, r) = self.div_rem(div);
        debug_assert!(r.is_zero());
        q
    }

    /// Monic gcd-free normalization is not enough for hashing; the canonical
    /// form scales to integer coefficients with content 1 and a positive
    /// leading coefficient. Proportional polynomials canonicalize identically.
    pub fn canonicalize(&self) -> Poly1 {
        if self.is_zero() {
            return Poly1::zero();
        }
        let s = integer_scale(self.coeffs.iter());
        let mut p = self.scale(&s);
        if p.leading_coeff().is_negative() {
            p = -&p;
        }
        p
    }

    /// Euclidean gcd, returned in canonical form.
    pub fn gcd(&self, other: &Poly1) -> Poly1 {
        let mut a = self.clone();
        let mut b = other.clone();
        while !b.is_zero() {
            let r = a.rem(&b);
            a = b;
            b = r;
        }
        a.canonicalize()
    }

    /// Square-free part: `self / gcd(self, self')`, canonical.
    pub fn squarefree_part(&self) -> Poly1 {
        if self.is_constant() {
            return self.canonicalize();
        }
        let g = self.gcd(&self.derivative());
        if g.is_constant() {
            return self.canonicalize();
        }
        self.div_exact(&g).canonicalize()
    }

    pub fn is_squarefree(&self) -> bool {
        self.is_constant() || self.gcd(&self.derivative()).is_constant()
    }

    /// Composition with a linear argument: `self(a + b*x)`.
    pub fn compose_linear(&self, a: &BigRational, b: &BigRational) -> Poly1 {
        let lin = Poly1::new(vec![a.clone(), b.clone()]);
        let mut acc = Poly1::zero();
        for c in self.coeffs.iter().rev() {
            acc = &(&acc * &lin) + &Poly1::constant(c.clone());
        }
        acc
    }

    /// Lagrange interpolation through pairwise-distinct sample abscissas.
    pub fn interpolate(samples: &[(BigRational, BigRational)]) -> Poly1 {
        let mut result = Poly1::zero();
        for (i, (xi, yi)) in samples.iter().enumerate() {
            if yi.is_zero() {
                continue;
            }
            let mut basis = Poly1::one();
            let mut denom = BigRational::one();
            for (j, (xj, _)) in samples.iter().enumerate() {
                if i == j {
                    continue;
                }
                basis = &basis * &Poly1::new(vec![-xj.clone(), BigRational::one()]);
                denom *= xi - xj;
            }
            result = &result + &basis.scale(&(yi / denom));
        }
        result
    }
}

/// Positive rational `s` such that scaling the given coefficients by `s`
/// yields integers with trivial common content. Returns 1 when all
/// coefficients are zero.
pub(crate) fn integer_scale<'a, I>(coeffs: I) -> BigRational
where
    I: Iterator<Item = &'a BigRational> + Clone,
{
    let mut denom_lcm = BigInt::one();
    for c in coeffs.clone() {
        if !c.is_zero() {
            denom_lcm = denom_lcm.lcm(c.denom());
        }
    }
    let mut numer_gcd = BigInt::zero();
    for c in coeffs {
        if !c.is_zero() {
            let scaled = (c * BigRational::from_integer(denom_lcm.clone())).to_integer();
            numer_gcd = numer_gcd.gcd(&scaled);
        }
    }
    if numer_gcd.is_zero() {
        return BigRational::one();
    }
    BigRational::new(denom_lcm, numer_gcd)
}

/// `base^exp` by repeated squaring.
pub(crate) fn rational_pow(base: &BigRational, mut exp: usize) -> BigRational {
    let mut acc = BigRational::one();
    let mut sq = base.clone();
    while exp > 0 {
        if exp & 1 == 1 {
            acc *= &sq;
        }
        exp >>= 1;
        if exp > 0 {
            sq = &sq * &sq;
        }
    }
    acc
}

impl Add for &Poly1 {
    type Output = Poly1;

    fn add(self, rhs: &Poly1) -> Poly1 {
        let n = self.coeffs.len().max(rhs.coeffs.len());
        let mut coeffs = Vec::with_capacity(n);
        for i in 0..n {
            let a = self.coeffs.get(i).cloned().unwrap_or_else(BigRational::zero);
            let b = rhs.coeffs.get(i).cloned().unwrap_or_else(BigRational::zero);
            coeffs.push(a + b);
        }
        Poly1::new(coeffs)
    }
}

impl Sub for &Poly1 {
    type Output = Poly1;

    fn sub(self, rhs: &Poly1) -> Poly1 {
        let n = self.coeffs.len().max(rhs.coeffs.len());
        let mut coeffs = Vec::with_capacity(n);
        for i in 0..n {
            let a = self.coeffs.get(i).cloned().unwrap_or_else(BigRational::zero);
            let b = rhs.coeffs.get(i).cloned().unwrap_or_else(BigRational::zero);
            coeffs.push(a - b);
        }
        Poly1::new(coeffs)
    }
}

impl Mul for &Poly1 {
    type Output = Poly1;

    fn mul(self, rhs: &Poly1) -> Poly1 {
        if self.is_zero() || rhs.is_zero() {
            return Poly1::zero();
        }
        let mut coeffs = vec![BigRational::zero(); self.coeffs.len() + rhs.coeffs.len() - 1];
        for (i, a) in self.coeffs.iter().enumerate() {
            if a.is_zero() {
                continue;
            }
            for (j, b) in rhs.coeffs.iter().enumerate() {
                coeffs[i + j] += a * b;
            }
        }
        Poly1::new(coeffs)
    }
}

impl Neg for &Poly1 {
    type Output = Poly1;

    fn neg(self) -> Poly1 {
        Poly1 {
            coeffs: self.coeffs.iter().map(|c| -c).collect(),
        }
    }
}

impl fmt::Display for Poly1 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }
        let mut first = true;
        for (i, c) in self.coeffs.iter().enumerate().rev() {
            if c.is_zero() {
                continue;
            }
            if !first {
                write!(f, " {} ", if c.is_negative() { "-" } else { "+" })?;
            } else if c.is_negative() {
                write!(f, "-")?;
            }
            let a = c.abs();
            match i {
                0 => write!(f, "{a}")?,
                1 if a.is_one() => write!(f, "x")?,
                1 => write!(f, "{a}*x")?,
                _ if a.is_one() => write!(f, "x^{i}")?,
                _ => write!(f, "{a}*x^{i}")?,
            }
            first = false;
        }
        Ok(())
    }
}
