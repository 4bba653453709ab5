//! Dense bivariate polynomials with y as the outer variable.
//!
//! A [`Poly2`] is a vector of [`Poly1`] coefficients in x: entry `i` is the
//! polynomial multiplying `y^i`. The canonical form scales by a positive
//! rational so that all coefficients are integers with trivial content and
//! the leading coefficient of the leading y-coefficient is positive; two
//! polynomials differing by a nonzero rational factor canonicalize
//! identically.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};

use crate::interval::Interval;
use crate::poly1::{integer_scale, Poly1};

/// A dense bivariate polynomial over `BigRational`, y outer.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Poly2 {
    coeffs: Vec<Poly1>,
}

impl Poly2 {
    /// Builds from ascending y-coefficients, trimming trailing zeros.
    pub fn new(mut coeffs: Vec<Poly1>) -> Self {
        while coeffs.last().map_or(false, Poly1::is_zero) {
            coeffs.pop();
        }
        Poly2 { coeffs }
    }

    /// Convenience constructor: one slice of integer x-coefficients per
    /// y-power, ascending.
    pub fn from_ints(rows: &[&[i64]]) -> Self {
        Poly2::new(rows.iter().map(|r| Poly1::from_ints(r)).collect())
    }

    pub fn zero() -> Self {
        Poly2 { coeffs: Vec::new() }
    }

    pub fn one() -> Self {
        Poly2::from_poly1(Poly1::one())
    }

    /// Embeds a polynomial in x alone.
    pub fn from_poly1(p: Poly1) -> Self {
        Poly2::new(vec![p])
    }

    pub fn is_zero(&self) -> bool {
        self.coeffs.is_empty()
    }

    pub fn coeffs(&self) -> &[Poly1] {
        &self.coeffs
    }

    /// Coefficient of `y^k`.
    pub fn coeff(&self, k: usize) -> Poly1 {
        self.coeffs.get(k).cloned().unwrap_or_else(Poly1::zero)
    }

    /// Degree in y (zero polynomial: 0).
    pub fn degree_y(&self) -> usize {
        self.coeffs.len().saturating_sub(1)
    }

    /// Degree in x: the maximum over the y-coefficients.
    pub fn degree_x(&self) -> usize {
        self.coeffs.iter().map(Poly1::degree).max().unwrap_or(0)
    }

    pub fn total_degree(&self) -> usize {
        self.coeffs
            .iter()
            .enumerate()
            .filter(|(_, c)| !c.is_zero())
            .map(|(i, c)| i + c.degree())
            .max()
            .unwrap_or(0)
    }

    /// Leading y-coefficient; zero for the zero polynomial.
    pub fn leading_y(&self) -> Poly1 {
        self.coeffs.last().cloned().unwrap_or_else(Poly1::zero)
    }

    /// The univariate fiber polynomial `self(x0, y)`.
    pub fn substitute_x(&self, x0: &BigRational) -> Poly1 {
        Poly1::new(self.coeffs.iter().map(|c| c.evaluate(x0)).collect())
    }

    /// Exact value at a rational point.
    pub fn evaluate(&self, x0: &BigRational, y0: &BigRational) -> BigRational {
        self.substitute_x(x0).evaluate(y0)
    }

    /// Nested interval Horner over a box: y outer, x inner.
    pub fn evaluate_box(&self, x: &Interval, y: &Interval) -> Interval {
        let mut acc = Interval::point(BigRational::zero());
        for c in self.coeffs.iter().rev() {
            acc = acc.mul(y).add(&c.evaluate_interval(x));
        }
        acc
    }

    pub fn derivative_y(&self) -> Poly2 {
        if self.coeffs.len() <= 1 {
            return Poly2::zero();
        }
        let coeffs = self
            .coeffs
            .iter()
            .enumerate()
            .skip(1)
            .map(|(i, c)| c.scale(&BigRational::from_integer(BigInt::from(i))))
            .collect();
        Poly2::new(coeffs)
    }

    pub fn derivative_x(&self) -> Poly2 {
        Poly2::new(self.coeffs.iter().map(Poly1::derivative).collect())
    }

    /// The shear `self(x + s*y, y)`: an invertible change of coordinates that
    /// tilts vertical lines, preserving degrees, gcds and square-freeness.
    pub fn shear(&self, s: &BigRational) -> Poly2 {
        let t = Poly2::new(vec![
            Poly1::monomial(BigRational::one(), 1),
            Poly1::constant(s.clone()),
        ]);
        let mut out = Poly2::zero();
        for row in self.coeffs.iter().rev() {
            let mut sub = Poly2::zero();
            for c in row.coeffs().iter().rev() {
                sub = &(&sub * &t) + &Poly2::from_poly1(Poly1::constant(c.clone()));
            }
            out = &out.shift_y(1) + &sub;
        }
        out
    }

    /// Swaps the roles of x and y (transposes the coefficient matrix).
    pub fn swap_xy(&self) -> Poly2 {
        let rows = self.degree_x() + 1;
        let mut out = vec![vec![BigRational::zero(); self.coeffs.len()]; rows];
        for (i, c) in self.coeffs.iter().enumerate() {
            for (j, a) in c.coeffs().iter().enumerate() {
                out[j][i] = a.clone();
            }
        }
        Poly2::new(out.into_iter().map(Poly1::new).collect())
    }

    pub fn scale(&self, s: &BigRational) -> Poly2 {
        if s.is_zero() {
            return Poly2::zero();
        }
        Poly2 {
            coeffs: self.coeffs.iter().map(|c| c.scale(s)).collect(),
        }
    }

    /// Multiplies by `y^k`.
    pub fn shift_y(&self, k: usize) -> Poly2 {
        if self.is_zero() || k == 0 {
            return self.clone();
        }
        let mut coeffs = vec![Poly1::zero(); k];
        coeffs.extend(self.coeffs.iter().cloned());
        Poly2 { coeffs }
    }

    /// Multiplies every y-coefficient by `p`.
    pub fn mul_poly1(&self, p: &Poly1) -> Poly2 {
        Poly2::new(self.coeffs.iter().map(|c| c * p).collect())
    }

    /// Divides every y-coefficient by `p` exactly.
    pub fn div_poly1_exact(&self, p: &Poly1) -> Poly2 {
        Poly2::new(self.coeffs.iter().map(|c| c.div_exact(p)).collect())
    }

    /// Content with respect to x: the (canonical) gcd of the y-coefficients.
    /// Zero polynomial: zero.
    pub fn content_x(&self) -> Poly1 {
        let mut g = Poly1::zero();
        for c in &self.coeffs {
            g = g.gcd(c);
            if !g.is_zero() && g.is_constant() {
                break;
            }
        }
        g
    }

    /// The primitive part `self / content_x(self)`.
    pub fn primitive_part(&self) -> Poly2 {
        if self.is_zero() {
            return Poly2::zero();
        }
        self.div_poly1_exact(&self.content_x())
    }

    /// Exact division by a divisor of `self` (long division in y).
    pub fn div_exact(&self, div: &Poly2) -> Poly2 {
        debug_assert!(!div.is_zero());
        if div.degree_y() == 0 {
            return self.div_poly1_exact(&div.coeff(0));
        }
        let dd = div.degree_y();
        let lead = div.leading_y();
        let mut rem = self.clone();
        let mut q = vec![Poly1::zero(); self.coeffs.len().saturating_sub(dd)];
        while !rem.is_zero() && rem.degree_y() >= dd {
            let dr = rem.degree_y();
            let c = rem.leading_y().div_exact(&lead);
            q[dr - dd] = c.clone();
            rem = &rem - &div.mul_poly1(&c).shift_y(dr - dd);
        }
        debug_assert!(rem.is_zero());
        Poly2::new(q)
    }

    /// Canonical form: integer coefficients with trivial content and a
    /// positive leading coefficient of the leading y-coefficient.
    pub fn canonicalize(&self) -> Poly2 {
        if self.is_zero() {
            return Poly2::zero();
        }
        let s = integer_scale(self.coeffs.iter().flat_map(|c| c.coeffs().iter()));
        let mut p = self.scale(&s);
        if p.leading_y().leading_coeff().is_negative() {
            p = -&p;
        }
        p
    }
}

impl Add for &Poly2 {
    type Output = Poly2;

    fn add(self, rhs: &Poly2) -> Poly2 {
        let n = self.coeffs.len().max(rhs.coeffs.len());
        let mut coeffs = Vec::with_capacity(n);
        for i in 0..n {
            let a = self.coeffs.get(i).cloned().unwrap_or_else(Poly1::zero);
            let b = rhs.coeffs.get(i).cloned().unwrap_or_else(Poly1::zero);
            coeffs.push(&a + &b);
        }
        Poly2::new(coeffs)
    }
}

impl Sub for &Poly2 {
    type Output = Poly2;

    fn sub(self, rhs: &Poly2) -> Poly2 {
        let n = self.coeffs.len().max(rhs.coeffs.len());
        let mut coeffs = Vec::with_capacity(n);
        for i in 0..n {
            let a = self.coeffs.get(i).cloned().unwrap_or_else(Poly1::zero);
            let b = rhs.coeffs.get(i).cloned().unwrap_or_else(Poly1::zero);
            coeffs.push(&a - &b);
        }
        Poly2::new(coeffs)
    }
}

impl Mul for &Poly2 {
    type Output = Poly2;

    fn mul(self, rhs: &Poly2) -> Poly2 {
        if self.is_zero() || rhs.is_zero() {
            return Poly2::zero();
        }
        let mut coeffs = vec![Poly1::zero(); self.coeffs.len() + rhs.coeffs.len() - 1];
        for (i, a) in self.coeffs.iter().enumerate() {
            if a.is_zero() {
                continue;
            }
            for (j, b) in rhs.coeffs.iter().enumerate() {
                coeffs[i + j] = &coeffs[i + j] + &(a * b);
            }
        }
        Poly2::new(coeffs)
    }
}

impl Neg for &Poly2 {
    type Output = Poly2;

    fn neg(self) -> Poly2 {
        Poly2 {
            coeffs: self.coeffs.iter().map(|c| -c).collect(),
        }
    }
}

impl fmt::Display for Poly2 {
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
                write!(f, " + ")?;
            }
            match i {
                0 => write!(f, "({c})")?,
                1 => write!(f, "({c})*y")?,
                _ => write!(f, "({c})*y^{i}")?,
            }
            first = false;
        }
        Ok(())
    }
}
