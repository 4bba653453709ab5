//! End-to-end kernel scenarios: solving, sign evaluation, decomposition,
//! cache identity, refinement and critical points.

use std::cmp::Ordering;

use curvex_kernel::{CurveKernel, CurveTopology, KernelError, Sign};
use curvex_math::{AlgebraicReal, BigRational, Poly1, Poly2};

fn rat(n: i64, d: i64) -> BigRational {
    BigRational::new(n.into(), d.into())
}

/// x^2 + y^2 - 1
fn circle() -> Poly2 {
    Poly2::from_ints(&[&[-1, 0, 1], &[], &[1]])
}

/// y - x^2
fn parabola() -> Poly2 {
    Poly2::from_ints(&[&[0, 0, -1], &[1]])
}

/// x - c
fn vertical(c: i64) -> Poly2 {
    Poly2::from_ints(&[&[-c, 1]])
}

/// y^2 - x
fn sideways_parabola() -> Poly2 {
    Poly2::from_ints(&[&[0, -1], &[], &[1]])
}

#[test]
fn circle_meets_y_axis_in_two_transversal_points() {
    let kernel = CurveKernel::new();
    let (points, mults) = kernel.solve(&circle(), &vertical(0)).unwrap();
    assert_eq!(points.len(), 2);
    assert_eq!(mults, vec![1, 1]);
    for (p, expected_y) in points.iter().zip([rat(-1, 1), rat(1, 1)]) {
        assert_eq!(kernel.lower_boundary_x(p), rat(0, 1));
        assert_eq!(kernel.upper_boundary_x(p), rat(0, 1));
        let y = kernel.point_y(p).unwrap();
        assert_eq!(y.rational_value(), Some(expected_y));
    }
    // the vertical line cannot carry arc numbers at its own x; the circle does
    assert_eq!(points[0].curve().polynomial(), &circle());
}

#[test]
fn parabola_is_tangent_to_its_axis() {
    let kernel = CurveKernel::new();
    let axis = Poly2::from_ints(&[&[], &[1]]); // y
    let (points, mults) = kernel.solve(&parabola(), &axis).unwrap();
    assert_eq!(points.len(), 1);
    assert_eq!(mults, vec![2]);
    let p = &points[0];
    assert_eq!(p.x().rational_value(), Some(rat(0, 1)));
    let y = kernel.point_y(p).unwrap();
    assert_eq!(y.rational_value(), Some(rat(0, 1)));
    // the tangent line has the lower degree and carries the point
    assert_eq!(p.curve().polynomial(), &axis.canonicalize());
}

#[test]
fn symmetric_intersections_share_vertical_lines() {
    let kernel = CurveKernel::new();
    // y^2 - 1 meets x^2 + y^2 - x - 1 at (0, +-1) and (1, +-1), all
    // transversal; each event line carries two intersections whose mirrored
    // y-values recur on the other line
    let horizontals = Poly2::from_ints(&[&[-1], &[], &[1]]);
    let conic = Poly2::from_ints(&[&[-1, -1, 1], &[], &[1]]);
    let (points, mults) = kernel.solve(&horizontals, &conic).unwrap();
    assert_eq!(points.len(), 4);
    assert_eq!(mults, vec![1, 1, 1, 1]);
    let expected = [
        (rat(0, 1), rat(-1, 1)),
        (rat(0, 1), rat(1, 1)),
        (rat(1, 1), rat(-1, 1)),
        (rat(1, 1), rat(1, 1)),
    ];
    for (p, (x, y)) in points.iter().zip(expected) {
        assert_eq!(p.x().rational_value(), Some(x));
        assert_eq!(kernel.point_y(p).unwrap().rational_value(), Some(y));
    }
}

#[test]
fn disjoint_curves_solve_to_nothing() {
    let kernel = CurveKernel::new();
    let (points, mults) = kernel.solve(&circle(), &vertical(3)).unwrap();
    assert!(points.is_empty());
    assert!(mults.is_empty());
}

#[test]
fn solving_overlapping_curves_is_an_error() {
    let kernel = CurveKernel::new();
    let bigger = &parabola() * &Poly2::from_ints(&[&[3], &[1]]); // (y - x^2)(y + 3)
    let err = kernel.solve(&parabola(), &bigger).unwrap_err();
    assert_eq!(err, KernelError::OverlappingCurves);
}

#[test]
fn irrational_event_lines_are_reported_not_guessed() {
    let kernel = CurveKernel::new();
    // circle and parabola meet over x^4 + x^2 - 1 = 0, an irrational abscissa
    let err = kernel.solve(&circle(), &parabola()).unwrap_err();
    assert_eq!(err, KernelError::UnsupportedFiber);
}

#[test]
fn sign_evaluation_around_an_irrational_point() {
    let kernel = CurveKernel::new();
    // y^2 = x at x = 2: points (2, -sqrt2) and (2, sqrt2)
    let (points, mults) = kernel.solve(&sideways_parabola(), &vertical(2)).unwrap();
    assert_eq!(points.len(), 2);
    assert_eq!(mults, vec![1, 1]);
    let lower = &points[0];
    let upper = &points[1];

    let y_minus_one = Poly2::from_ints(&[&[-1], &[1]]);
    assert_eq!(kernel.sign_at(&y_minus_one, upper).unwrap(), Sign::Positive);
    assert_eq!(kernel.sign_at(&y_minus_one, lower).unwrap(), Sign::Negative);

    // the supporting curve itself: identity fast path
    assert_eq!(
        kernel.sign_at(&sideways_parabola(), upper).unwrap(),
        Sign::Zero
    );
    // a vertical line through the point: exact box evaluation
    assert_eq!(kernel.sign_at(&vertical(2), upper).unwrap(), Sign::Zero);
    // x*y^2 - 4 vanishes at (2, sqrt2) without sharing a component:
    // only the structural zero test can certify this
    let curve_through = Poly2::from_ints(&[&[-4], &[], &[0, 1]]);
    assert_eq!(kernel.sign_at(&curve_through, upper).unwrap(), Sign::Zero);
    assert_eq!(kernel.sign_at(&curve_through, lower).unwrap(), Sign::Zero);
    // and a nearby curve keeps its sign
    let off = Poly2::from_ints(&[&[-5], &[], &[0, 1]]); // x*y^2 - 5
    assert_eq!(kernel.sign_at(&off, upper).unwrap(), Sign::Negative);
}

#[test]
fn refinement_tightens_shared_intervals() {
    let kernel = CurveKernel::new();
    let (points, _) = kernel.solve(&sideways_parabola(), &vertical(2)).unwrap();
    let upper = &points[1];

    // x is exact, refinement is a no-op there
    kernel.refine_x_to(upper, 8);
    assert_eq!(kernel.lower_boundary_x(upper), rat(2, 1));
    assert_eq!(kernel.upper_boundary_x(upper), rat(2, 1));

    kernel.refine_y_to(upper, 5).unwrap();
    let lb = kernel.lower_boundary_y(upper).unwrap();
    let ub = kernel.upper_boundary_y(upper).unwrap();
    // still brackets sqrt2 ...
    assert!(&lb * &lb < rat(2, 1));
    assert!(&ub * &ub > rat(2, 1));
    // ... and is now tight: the initial bracket has width 3/4
    assert!(&ub - &lb < rat(3, 128));

    // a clone handed out earlier sees the refinement
    let y = kernel.point_y(upper).unwrap();
    assert_eq!(y.low(), lb);
    assert_eq!(y.high(), ub);
}

#[test]
fn point_comparisons_and_separating_boundaries() {
    let kernel = CurveKernel::new();
    let (points, _) = kernel.solve(&circle(), &vertical(0)).unwrap();
    let (bottom, top) = (&points[0], &points[1]);

    assert_eq!(kernel.compare_x(bottom, top), Ordering::Equal);
    assert_eq!(kernel.compare_y(bottom, top).unwrap(), Ordering::Less);
    assert_eq!(kernel.compare_xy(bottom, top, false).unwrap(), Ordering::Less);
    assert_eq!(kernel.compare_xy(bottom, top, true).unwrap(), Ordering::Less);
    assert_eq!(kernel.compare_xy(top, bottom, false).unwrap(), Ordering::Greater);
    assert_eq!(kernel.compare_xy(top, top, false).unwrap(), Ordering::Equal);

    assert_eq!(kernel.boundary_between_y(bottom, top).unwrap(), rat(0, 1));

    let (far, _) = kernel.solve(&sideways_parabola(), &vertical(2)).unwrap();
    let sep = kernel.boundary_between_x(top, &far[0]);
    assert!(rat(0, 1) < sep && sep < rat(2, 1));
}

#[test]
fn curve_cache_shares_identities() {
    let kernel = CurveKernel::new();
    let a = kernel.construct_curve(&circle()).unwrap();
    let scaled = circle().scale(&rat(-3, 7));
    let b = kernel.construct_curve(&scaled).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.id(), b.id());
    assert_eq!(kernel.curve_cache_stats().hits, 1);
    assert_eq!(kernel.curve_cache_stats().misses, 1);

    let c = kernel.construct_curve(&parabola()).unwrap();
    let p1 = kernel.construct_curve_pair(&a, &c);
    let p2 = kernel.construct_curve_pair(&c, &b);
    assert_eq!(p1.id(), p2.id());

    assert_eq!(
        kernel.construct_curve(&Poly2::zero()).unwrap_err(),
        KernelError::ZeroPolynomial
    );
}

#[test]
fn squarefree_decomposition_of_a_degenerate_curve() {
    let kernel = CurveKernel::new();
    // x * (y - x^2)^2 * (y + 3)
    let p = &(&parabola() * &parabola()) * &Poly2::from_ints(&[&[3], &[1]]);
    let p = p.mul_poly1(&Poly1::from_ints(&[0, 1]));

    assert!(!kernel.has_finite_self_intersections(&p).unwrap());
    assert!(kernel.has_finite_self_intersections(&circle()).unwrap());

    let sf = kernel.squarefree_part(&p).unwrap();
    let expected = (&parabola() * &Poly2::from_ints(&[&[3], &[1]]))
        .mul_poly1(&Poly1::from_ints(&[0, 1]));
    assert_eq!(sf, expected.canonicalize());

    let curve = kernel.construct_curve(&p).unwrap();
    let (factors, mults) = kernel.decompose_curve(&curve).unwrap();
    assert_eq!(mults, vec![1, 1, 2]);
    assert_eq!(factors[0].polynomial(), &Poly2::from_ints(&[&[0, 1]]));
    assert_eq!(factors[1].polynomial(), &Poly2::from_ints(&[&[3], &[1]]));
    assert_eq!(factors[2].polynomial(), &parabola());
}

#[test]
fn pair_decomposition_splits_off_the_common_component() {
    let kernel = CurveKernel::new();
    let shared = parabola();
    let a = kernel
        .construct_curve(&(&shared * &Poly2::from_ints(&[&[3], &[1]])))
        .unwrap();
    let b = kernel
        .construct_curve(&(&shared * &Poly2::from_ints(&[&[0, 1], &[2]])))
        .unwrap();

    assert!(!kernel.has_finite_intersections(&a, &b));
    let split = kernel.decompose_pair(&a, &b).unwrap();
    assert!(split.found());
    assert_eq!(split.common.unwrap().polynomial(), &shared);
    assert_eq!(split.remainder1.len(), 1);
    assert_eq!(
        split.remainder1[0].polynomial(),
        &Poly2::from_ints(&[&[3], &[1]])
    );
    assert_eq!(
        split.remainder2[0].polynomial(),
        &Poly2::from_ints(&[&[0, 1], &[2]])
    );
}

#[test]
fn coprime_pairs_pass_through_decomposition() {
    let kernel = CurveKernel::new();
    let a = kernel.construct_curve(&circle()).unwrap();
    let b = kernel.construct_curve(&parabola()).unwrap();
    assert!(kernel.has_finite_intersections(&a, &b));

    let split = kernel.decompose_pair(&a, &b).unwrap();
    assert!(!split.found());
    assert_eq!(split.remainder1, vec![a.clone()]);
    assert_eq!(split.remainder2, vec![b.clone()]);

    // identical curves share everything
    assert!(!kernel.has_finite_intersections(&a, &a));
    let same = kernel.decompose_pair(&a, &a).unwrap();
    assert!(same.found());
    assert_eq!(same.common.unwrap(), a);
    assert!(same.remainder1.is_empty());
    assert!(same.remainder2.is_empty());
}

#[test]
fn critical_points_of_the_circle() {
    let kernel = CurveKernel::new();

    // vertical tangents at (-1, 0) and (1, 0)
    let xc = kernel.x_critical_points(&circle()).unwrap();
    assert_eq!(xc.len(), 2);
    for (p, expected_x) in xc.iter().zip([rat(-1, 1), rat(1, 1)]) {
        assert_eq!(p.x().rational_value(), Some(expected_x));
        let y = kernel.point_y(p).unwrap();
        assert_eq!(y.rational_value(), Some(rat(0, 1)));
    }
    assert_eq!(
        kernel.x_critical_point(&circle(), 1).unwrap().x().rational_value(),
        Some(rat(1, 1))
    );

    // horizontal tangents at (0, -1) and (0, 1)
    let yc = kernel.y_critical_points(&circle()).unwrap();
    assert_eq!(yc.len(), 2);
    for (p, expected_y) in yc.iter().zip([rat(-1, 1), rat(1, 1)]) {
        assert_eq!(p.x().rational_value(), Some(rat(0, 1)));
        let y = kernel.point_y(p).unwrap();
        assert_eq!(y.rational_value(), Some(expected_y));
    }
}

#[test]
fn critical_points_of_the_parabola() {
    let kernel = CurveKernel::new();
    // dy/dy of y - x^2 is constant: no x-critical points
    assert!(kernel.x_critical_points(&parabola()).unwrap().is_empty());
    // the vertex is the unique y-critical point
    let yc = kernel.y_critical_points(&parabola()).unwrap();
    assert_eq!(yc.len(), 1);
    assert_eq!(yc[0].x().rational_value(), Some(rat(0, 1)));
    let y = kernel.point_y(&yc[0]).unwrap();
    assert_eq!(y.rational_value(), Some(rat(0, 1)));
}

#[test]
fn vertical_component_shows_up_as_covered_line() {
    let kernel = CurveKernel::new();
    // x * (y - x^2): contains the whole y-axis
    let p = parabola().mul_poly1(&Poly1::from_ints(&[0, 1]));
    let curve = kernel.construct_curve(&p).unwrap();
    let topo = kernel.curve_topology(&curve).unwrap();
    let x0 = AlgebraicReal::from_rational(rat(0, 1));
    let line = topo.line_at(&x0).unwrap();
    assert!(line.covers_line());
    assert_eq!(line.branch_count(), 0);

    let x1 = AlgebraicReal::from_rational(rat(1, 1));
    let line = topo.line_at(&x1).unwrap();
    assert!(!line.covers_line());
    assert_eq!(line.branch_count(), 1);
    assert_eq!(
        line.y_root(0).unwrap().rational_value(),
        Some(rat(1, 1))
    );
}
