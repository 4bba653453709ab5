//! Bivariate resultants by exact evaluation and interpolation.
//!
//! `Res_y(f, g)` is computed by specializing x at enough integer sample
//! points, taking univariate Euclidean resultants there, and Lagrange
//! interpolation up to the Bezout bound
//! `deg_x(f) * deg_y(g) + deg_x(g) * deg_y(f)`. Sample points where either
//! leading y-coefficient vanishes are skipped, so each specialized resultant
//! equals the specialization of the resultant.
//!
//! ## References
//!
//! - von zur Gathen, Gerhard, "Modern Computer Algebra", ch. 6
//! - Basu, Pollack, Roy, "Algorithms in Real Algebraic Geometry", ch. 4

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Zero};

use crate::poly1::{rational_pow, Poly1};
use crate::poly2::Poly2;

/// Resultant of two univariate polynomials via the Euclidean remainder
/// sequence with multiplier bookkeeping.
pub fn resultant_univariate(f: &Poly1, g: &Poly1) -> BigRational {
    if f.is_zero() || g.is_zero() {
        return BigRational::zero();
    }
    let mut a = f.clone();
    let mut b = g.clone();
    let mut acc = BigRational::one();
    let mut negate = false;
    loop {
        if b.is_constant() {
            acc *= rational_pow(&b.leading_coeff(), a.degree());
            break;
        }
        let r = a.rem(&b);
        if r.is_zero() {
            return BigRational::zero();
        }
        if (a.degree() * b.degree()) % 2 == 1 {
            negate = !negate;
        }
        acc *= rational_pow(&b.leading_coeff(), a.degree() - r.degree());
        a = b;
        b = r;
    }
    if negate {
        -acc
    } else {
        acc
    }
}

/// `Res_y(f, g)` as a polynomial in x: eliminates the outer variable.
///
/// Zero exactly when f and g share a factor of positive y-degree (or one of
/// them is zero); vanishes at `x0` iff the fibers at `x0` share a root or
/// both leading y-coefficients vanish there.
pub fn resultant_y(f: &Poly2, g: &Poly2) -> Poly1 {
    if f.is_zero() || g.is_zero() {
        return Poly1::zero();
    }
    let m = f.degree_y();
    let n = g.degree_y();
    if m == 0 && n == 0 {
        return Poly1::one();
    }
    if m == 0 {
        return power_poly(&f.coeff(0), n);
    }
    if n == 0 {
        return power_poly(&g.coeff(0), m);
    }
    let bound = f.degree_x() * n + g.degree_x() * m;
    let lead_f = f.leading_y();
    let lead_g = g.leading_y();
    let mut samples = Vec::with_capacity(bound + 1);
    let mut k: i64 = 0;
    while samples.len() <= bound {
        for t in sample_pair(k) {
            if samples.len() > bound {
                break;
            }
            let x0 = BigRational::from_integer(BigInt::from(t));
            if lead_f.sign_at(&x0) == 0 || lead_g.sign_at(&x0) == 0 {
                continue;
            }
            let value = resultant_univariate(&f.substitute_x(&x0), &g.substitute_x(&x0));
            samples.push((x0, value));
        }
        k += 1;
    }
    Poly1::interpolate(&samples)
}

/// `Res_x(f, g)` as a polynomial in y, by eliminating after a variable swap.
pub fn resultant_x(f: &Poly2, g: &Poly2) -> Poly1 {
    resultant_y(&f.swap_xy(), &g.swap_xy())
}

fn power_poly(base: &Poly1, exp: usize) -> Poly1 {
    let mut acc = Poly1::one();
    for _ in 0..exp {
        acc = &acc * base;
    }
    acc
}

fn sample_pair(k: i64) -> impl Iterator<Item = i64> {
    if k == 0 {
        vec![0].into_iter()
    } else {
        vec![k, -k].into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn univariate_resultant_of_coprime_quadratics() {
        // res(x^2 - 2, x^2 - 3) = 1
        let f = Poly1::from_ints(&[-2, 0, 1]);
        let g = Poly1::from_ints(&[-3, 0, 1]);
        assert_eq!(
            resultant_univariate(&f, &g),
            BigRational::from_integer(1.into())
        );
    }

    #[test]
    fn univariate_resultant_detects_common_roots() {
        let f = &Poly1::from_ints(&[-1, 1]) * &Poly1::from_ints(&[-2, 1]);
        let g = &Poly1::from_ints(&[-1, 1]) * &Poly1::from_ints(&[5, 1]);
        assert!(resultant_univariate(&f, &g).is_zero());
    }

    #[test]
    fn circle_and_vertical_line() {
        // Res_y(x^2 + y^2 - 1, x) = x^2
        let circle = Poly2::from_ints(&[&[-1, 0, 1], &[], &[1]]);
        let line = Poly2::from_ints(&[&[0, 1]]);
        assert_eq!(resultant_y(&circle, &line), Poly1::from_ints(&[0, 0, 1]));
    }

    #[test]
    fn parabola_and_horizontal_axis() {
        // Res_y(y - x^2, y) = x^2 up to sign
        let parabola = Poly2::from_ints(&[&[0, 0, -1], &[1]]);
        let axis = Poly2::from_ints(&[&[], &[1]]);
        let r = resultant_y(&parabola, &axis).canonicalize();
        assert_eq!(r, Poly1::from_ints(&[0, 0, 1]));
    }

    #[test]
    fn circle_projection_onto_x() {
        // Res_y(x^2 + y^2 - 1, 2y) vanishes at x = +-1 only
        let circle = Poly2::from_ints(&[&[-1, 0, 1], &[], &[1]]);
        let axis = Poly2::from_ints(&[&[], &[2]]);
        let r = resultant_y(&circle, &axis).canonicalize();
        assert_eq!(r, Poly1::from_ints(&[-1, 0, 1]));
    }

    #[test]
    fn swap_based_elimination_of_x() {
        // Res_x(y - x^2, y) in y is y, up to sign and squaring bookkeeping:
        // eliminating x from {y = x^2, y = 0} leaves y^2 (double contact)
        let parabola = Poly2::from_ints(&[&[0, 0, -1], &[1]]);
        let axis = Poly2::from_ints(&[&[], &[1]]);
        let r = resultant_x(&parabola, &axis).canonicalize();
        assert_eq!(r, Poly1::from_ints(&[0, 0, 1]));
    }

    #[test]
    fn shared_component_gives_zero_resultant() {
        let a = Poly2::from_ints(&[&[0, 0, -1], &[1]]); // y - x^2
        let b = Poly2::from_ints(&[&[3], &[1]]); // y + 3
        let prod = &a * &b;
        assert!(resultant_y(&prod, &a).is_zero());
    }
}
