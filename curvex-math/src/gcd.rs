//! Bivariate gcd via content/primitive split and a primitive
//! pseudo-remainder sequence in y.
//!
//! Gauss: `gcd(f, g) = gcd(cont(f), cont(g)) * gcd(pp(f), pp(g))`, where the
//! content is taken over the y-coefficients (a polynomial in x). The
//! primitive-part gcd runs a pseudo-remainder chain, re-normalizing each
//! remainder to its primitive part so coefficient growth stays contained.
//! The result is canonical.

use crate::poly2::Poly2;

/// Canonical gcd of two bivariate polynomials.
pub fn gcd(f: &Poly2, g: &Poly2) -> Poly2 {
    if f.is_zero() {
        return g.canonicalize();
    }
    if g.is_zero() {
        return f.canonicalize();
    }
    let content = f.content_x().gcd(&g.content_x());
    let pf = f.primitive_part();
    let pg = g.primitive_part();
    let pp = primitive_gcd(pf, pg);
    pp.mul_poly1(&content).canonicalize()
}

/// Whether the gcd is a constant.
pub fn coprime(f: &Poly2, g: &Poly2) -> bool {
    gcd(f, g).total_degree() == 0
}

/// Gcd of two x-primitive polynomials by the primitive PRS.
fn primitive_gcd(f: Poly2, g: Poly2) -> Poly2 {
    let (mut a, mut b) = if f.degree_y() >= g.degree_y() {
        (f, g)
    } else {
        (g, f)
    };
    loop {
        if b.is_zero() {
            break;
        }
        if b.degree_y() == 0 {
            // primitive and free of y: a unit
            return Poly2::one();
        }
        let r = pseudo_rem_y(&a, &b);
        a = b;
        b = if r.is_zero() { r } else { r.primitive_part() };
    }
    if a.degree_y() == 0 {
        return Poly2::one();
    }
    a.canonicalize()
}

/// A pseudo-remainder of `a` by `b` in y: the result has y-degree below
/// `deg_y(b)` and differs from the Euclidean remainder by a power of the
/// leading y-coefficient of `b`. Returns `a` unchanged when its y-degree is
/// already smaller.
fn pseudo_rem_y(a: &Poly2, b: &Poly2) -> Poly2 {
    let db = b.degree_y();
    let lead = b.leading_y();
    let mut r = a.clone();
    while !r.is_zero() && r.degree_y() >= db {
        let dr = r.degree_y();
        let top = r.leading_y();
        r = &r.mul_poly1(&lead) - &b.mul_poly1(&top).shift_y(dr - db);
    }
    r
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::poly1::Poly1;

    fn parabola() -> Poly2 {
        Poly2::from_ints(&[&[0, 0, -1], &[1]]) // y - x^2
    }

    #[test]
    fn gcd_recovers_shared_factor() {
        let other = Poly2::from_ints(&[&[3], &[1]]); // y + 3
        let a = &parabola() * &other;
        let b = &parabola() * &Poly2::from_ints(&[&[0, 1], &[2]]); // x + 2y
        assert_eq!(gcd(&a, &b), parabola().canonicalize());
    }

    #[test]
    fn coprime_curves() {
        let circle = Poly2::from_ints(&[&[-1, 0, 1], &[], &[1]]);
        assert!(coprime(&circle, &parabola()));
        assert!(!coprime(&circle, &circle));
    }

    #[test]
    fn content_factors_are_found() {
        // x * (y - x^2) and x * (y + 1) share the vertical line x = 0
        let a = parabola().mul_poly1(&Poly1::from_ints(&[0, 1]));
        let b = Poly2::from_ints(&[&[1], &[1]]).mul_poly1(&Poly1::from_ints(&[0, 1]));
        assert_eq!(gcd(&a, &b), Poly2::from_ints(&[&[0, 1]]));
    }

    #[test]
    fn gcd_with_zero_is_canonical_other() {
        let p = parabola().scale(&num_rational::BigRational::new(3.into(), 7.into()));
        assert_eq!(gcd(&p, &Poly2::zero()), parabola());
        assert_eq!(gcd(&Poly2::zero(), &p), parabola());
    }

    #[test]
    fn mixed_degree_orders() {
        // gcd(y - x^2, y^2 - x^2 y + y - x^2) where the second factors as
        // (y + 1)(y - x^2)
        let a = parabola();
        let b = &parabola() * &Poly2::from_ints(&[&[1], &[1]]);
        assert_eq!(gcd(&b, &a), parabola().canonicalize());
        assert_eq!(gcd(&a, &b), parabola().canonicalize());
    }
}
