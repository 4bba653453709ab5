//! Square-free machinery: Yun factorization and square-free parts, univariate
//! and bivariate.
//!
//! The bivariate routines split off the x-content first (pure-x factors live
//! there and are invisible to y-derivatives) and run Yun separately on the
//! content and on the primitive part. Emitted factors are canonical, pairwise
//! coprime and square-free, paired with their multiplicities.
//!
//! ## References
//!
//! - Yun, "On squarefree decomposition algorithms", SYMSAC '76

use crate::gcd;
use crate::poly1::Poly1;
use crate::poly2::Poly2;

/// Yun square-free factorization of a non-constant univariate polynomial.
pub fn yun_univariate(p: &Poly1) -> Vec<(Poly1, usize)> {
    let p = p.canonicalize();
    if p.is_constant() {
        return Vec::new();
    }
    let g = p.gcd(&p.derivative());
    if g.is_constant() {
        return vec![(p, 1)];
    }
    let mut c = p.div_exact(&g);
    let mut d = &p.derivative().div_exact(&g) - &c.derivative();
    let mut out = Vec::new();
    let mut multiplicity = 1;
    while !c.is_constant() {
        let a = c.gcd(&d);
        if !a.is_constant() {
            out.push((a.clone(), multiplicity));
        }
        c = c.div_exact(&a);
        d = &d.div_exact(&a) - &c.derivative();
        multiplicity += 1;
    }
    out
}

/// Yun square-free factorization of a nonzero bivariate polynomial:
/// canonical, pairwise-coprime square-free factors with multiplicities.
pub fn yun_bivariate(p: &Poly2) -> Vec<(Poly2, usize)> {
    debug_assert!(!p.is_zero());
    let p = p.canonicalize();
    let content = p.content_x();
    let primitive = p.div_poly1_exact(&content);
    let mut out: Vec<(Poly2, usize)> = yun_univariate(&content)
        .into_iter()
        .map(|(f, m)| (Poly2::from_poly1(f), m))
        .collect();
    if primitive.degree_y() == 0 {
        return out;
    }
    let dy = primitive.derivative_y();
    let g = gcd::gcd(&primitive, &dy);
    if g.total_degree() == 0 {
        out.push((primitive.canonicalize(), 1));
        return out;
    }
    let mut c = primitive.div_exact(&g);
    let mut d = &dy.div_exact(&g) - &c.derivative_y();
    let mut multiplicity = 1;
    while c.degree_y() > 0 {
        let a = gcd::gcd(&c, &d);
        if a.total_degree() > 0 {
            out.push((a.clone(), multiplicity));
        }
        c = c.div_exact(&a);
        d = &d.div_exact(&a) - &c.derivative_y();
        multiplicity += 1;
    }
    out
}

/// Square-free part: the product of the distinct irreducible factors, in
/// canonical form. Content and primitive part are handled separately so
/// pure-x factors survive.
pub fn squarefree_part(p: &Poly2) -> Poly2 {
    debug_assert!(!p.is_zero());
    let p = p.canonicalize();
    let content = p.content_x();
    let primitive = p.div_poly1_exact(&content);
    let content_sf = content.squarefree_part();
    if primitive.degree_y() == 0 {
        return Poly2::from_poly1(content_sf).canonicalize();
    }
    let g = gcd::gcd(&primitive, &primitive.derivative_y());
    let primitive_sf = if g.total_degree() == 0 {
        primitive
    } else {
        primitive.div_exact(&g)
    };
    primitive_sf.mul_poly1(&content_sf).canonicalize()
}

/// Whether a nonzero polynomial has no repeated factor.
pub fn is_squarefree(p: &Poly2) -> bool {
    debug_assert!(!p.is_zero());
    let p = p.canonicalize();
    let content = p.content_x();
    if !content.is_squarefree() {
        return false;
    }
    let primitive = p.div_poly1_exact(&content);
    primitive.degree_y() == 0 || gcd::coprime(&primitive, &primitive.derivative_y())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(a: i64, b: i64, c: i64) -> Poly2 {
        // a*x + b*y + c
        Poly2::from_ints(&[&[c, a], &[b]])
    }

    #[test]
    fn univariate_yun_splits_multiplicities() {
        // (x - 1)^2 (x + 2)
        let f = Poly1::from_ints(&[-1, 1]);
        let g = Poly1::from_ints(&[2, 1]);
        let p = &(&f * &f) * &g;
        let factors = yun_univariate(&p);
        assert_eq!(factors, vec![(g, 1), (f, 2)]);
    }

    #[test]
    fn squarefree_input_passes_through() {
        let p = Poly1::from_ints(&[-2, 0, 1]);
        assert_eq!(yun_univariate(&p), vec![(p, 1)]);
    }

    #[test]
    fn bivariate_yun_with_content_factor() {
        // x^2 * (y - x^2): the doubled vertical line lives in the content
        let p = Poly2::from_ints(&[&[0, 0, -1], &[1]])
            .mul_poly1(&Poly1::from_ints(&[0, 0, 1]));
        let factors = yun_bivariate(&p);
        assert_eq!(
            factors,
            vec![
                (Poly2::from_ints(&[&[0, 1]]), 2),
                (Poly2::from_ints(&[&[0, 0, -1], &[1]]), 1),
            ]
        );
    }

    #[test]
    fn bivariate_yun_squared_curve() {
        let l = line(1, 1, 0); // x + y
        let p = &(&l * &l) * &line(1, 1, 2);
        let factors = yun_bivariate(&p);
        assert_eq!(factors, vec![(line(1, 1, 2), 1), (l, 2)]);
    }

    #[test]
    fn squarefree_part_keeps_pure_x_factors() {
        // x^2 (y - x^2) -> x (y - x^2)
        let p = Poly2::from_ints(&[&[0, 0, -1], &[1]])
            .mul_poly1(&Poly1::from_ints(&[0, 0, 1]));
        let sf = squarefree_part(&p);
        let expected = Poly2::from_ints(&[&[0, 0, -1], &[1]])
            .mul_poly1(&Poly1::from_ints(&[0, 1]))
            .canonicalize();
        assert_eq!(sf, expected);
        assert!(is_squarefree(&sf));
    }

    #[test]
    fn squarefree_part_is_idempotent() {
        let l = line(2, 3, -1);
        let p = &(&l * &l) * &line(0, 1, 5);
        let once = squarefree_part(&p);
        assert_eq!(squarefree_part(&once), once);
        assert!(!is_squarefree(&p));
        assert!(is_squarefree(&once));
    }
}
