//! The kernel: cached object construction, adaptive sign evaluation, common
//! root solving, decomposition and point accessors.
//!
//! All construction funnels through per-kernel canonicalizing caches, so
//! proportional defining polynomials resolve to the identical [`Curve`]
//! handle and every topology analysis is built at most once per canonical
//! key. The kernel itself never analyzes topology; it consumes status lines
//! through the [`TopologyProvider`] seam (the bundled default is the fiber
//! oracle).

use std::cell::{Cell, RefCell};
use std::cmp::Ordering;
use std::rc::Rc;

use curvex_math::{gcd, squarefree, AlgebraicReal, BigRational, Interval, Poly2};
use tracing::{debug, trace};

use crate::cache::{CacheConfig, CacheStats, CanonicalCache};
use crate::curve::{Curve, CurvePair};
use crate::error::{KernelError, KernelResult};
use crate::fiber::FiberOracle;
use crate::point::CurvePoint;
use crate::topology::{CurvePairTopology, CurveTopology, Sign, TopologyProvider};

/// Kernel tuning knobs.
#[derive(Clone, Debug)]
pub struct KernelConfig {
    /// Sizing shared by the four object caches.
    pub cache: CacheConfig,
    /// Interval width below which the sign evaluator runs its one-shot exact
    /// zero test.
    pub sign_tolerance: BigRational,
}

impl Default for KernelConfig {
    fn default() -> Self {
        KernelConfig {
            cache: CacheConfig::default(),
            sign_tolerance: BigRational::new(1.into(), 10000.into()),
        }
    }
}

/// Result of [`CurveKernel::decompose_pair`].
#[derive(Clone, Debug)]
pub struct CoprimeSplit {
    /// The shared component, when one exists.
    pub common: Option<Curve>,
    /// Non-trivial cofactor of the first curve (its identity when the gcd is
    /// trivial).
    pub remainder1: Vec<Curve>,
    /// Likewise for the second curve.
    pub remainder2: Vec<Curve>,
}

impl CoprimeSplit {
    /// Whether a common component was found.
    pub fn found(&self) -> bool {
        self.common.is_some()
    }
}

/// The exact kernel for real algebraic plane curves.
///
/// Single-threaded by construction (interior mutability throughout);
/// concurrent deployments wrap the kernel in a lock.
pub struct CurveKernel<P: TopologyProvider = FiberOracle> {
    provider: P,
    config: KernelConfig,
    curves: RefCell<CanonicalCache<Poly2, Curve>>,
    pairs: RefCell<CanonicalCache<(u64, u64), CurvePair>>,
    curve_topologies: RefCell<CanonicalCache<u64, Rc<dyn CurveTopology>>>,
    pair_topologies: RefCell<CanonicalCache<u64, Rc<dyn CurvePairTopology>>>,
    next_id: Cell<u64>,
}

impl CurveKernel<FiberOracle> {
    pub fn new() -> Self {
        Self::with_config(KernelConfig::default())
    }

    pub fn with_config(config: KernelConfig) -> Self {
        Self::with_provider(FiberOracle, config)
    }
}

impl Default for CurveKernel<FiberOracle> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: TopologyProvider> CurveKernel<P> {
    /// Builds a kernel around an external topology provider.
    pub fn with_provider(provider: P, config: KernelConfig) -> Self {
        CurveKernel {
            provider,
            curves: RefCell::new(CanonicalCache::new(config.cache.clone())),
            pairs: RefCell::new(CanonicalCache::new(config.cache.clone())),
            curve_topologies: RefCell::new(CanonicalCache::new(config.cache.clone())),
            pair_topologies: RefCell::new(CanonicalCache::new(config.cache.clone())),
            config,
            next_id: Cell::new(0),
        }
    }

    fn fresh_id(&self) -> u64 {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        id
    }

    /// Counters of the curve cache (hits prove handle sharing).
    pub fn curve_cache_stats(&self) -> CacheStats {
        self.curves.borrow().stats().clone()
    }

    /// The cached curve defined by `p`; proportional polynomials yield the
    /// identical handle.
    pub fn construct_curve(&self, p: &Poly2) -> KernelResult<Curve> {
        if p.is_zero() {
            return Err(KernelError::ZeroPolynomial);
        }
        Ok(self.curves.borrow_mut().obtain(
            p.clone(),
            |p| p.canonicalize(),
            |canonical| {
                let id = self.fresh_id();
                trace!(id, "new curve");
                Curve::new(canonical.clone(), id)
            },
        ))
    }

    /// The cached pair of two curves; `(a, b)` and `(b, a)` resolve to the
    /// same pair.
    pub fn construct_curve_pair(&self, a: &Curve, b: &Curve) -> CurvePair {
        let (first, second) = if a.polynomial() <= b.polynomial() {
            (a, b)
        } else {
            (b, a)
        };
        self.pairs.borrow_mut().obtain(
            (first.id(), second.id()),
            |key| key,
            |_| {
                let id = self.fresh_id();
                trace!(id, "new curve pair");
                CurvePair::new(first.clone(), second.clone(), id)
            },
        )
    }

    /// The (cached) topology analysis of a curve.
    pub fn curve_topology(&self, curve: &Curve) -> KernelResult<Rc<dyn CurveTopology>> {
        self.curve_topologies.borrow_mut().try_obtain(
            curve.id(),
            |id| id,
            |_| self.provider.curve_topology(curve),
        )
    }

    /// The (cached) topology analysis of a pair.
    pub fn pair_topology(&self, pair: &CurvePair) -> KernelResult<Rc<dyn CurvePairTopology>> {
        self.pair_topologies.borrow_mut().try_obtain(
            pair.id(),
            |id| id,
            |_| self.provider.pair_topology(pair),
        )
    }

    // ----- point accessors and refinement -------------------------------

    /// The y-coordinate of a point, materialized through the oracle. The
    /// returned handle shares its interval with the oracle's fiber, so
    /// refinement is visible everywhere.
    pub fn point_y(&self, r: &CurvePoint) -> KernelResult<AlgebraicReal> {
        let topo = self.curve_topology(r.curve())?;
        let line = topo.line_at(r.x())?;
        if line.covers_line() {
            // a vertical-line branch has no discrete y-position
            return Err(KernelError::UnsupportedFiber);
        }
        line.y_root(r.arcno())
    }

    pub fn refine_x(&self, r: &CurvePoint) {
        r.x().refine();
    }

    /// Halves the x-interval until its width is below `initial / 2^k`.
    pub fn refine_x_to(&self, r: &CurvePoint, k: u32) {
        r.x().refine_to(k);
    }

    pub fn refine_y(&self, r: &CurvePoint) -> KernelResult<()> {
        self.point_y(r)?.refine();
        Ok(())
    }

    pub fn refine_y_to(&self, r: &CurvePoint, k: u32) -> KernelResult<()> {
        self.point_y(r)?.refine_to(k);
        Ok(())
    }

    pub fn lower_boundary_x(&self, r: &CurvePoint) -> BigRational {
        r.x().low()
    }

    pub fn upper_boundary_x(&self, r: &CurvePoint) -> BigRational {
        r.x().high()
    }

    pub fn lower_boundary_y(&self, r: &CurvePoint) -> KernelResult<BigRational> {
        Ok(self.point_y(r)?.low())
    }

    pub fn upper_boundary_y(&self, r: &CurvePoint) -> KernelResult<BigRational> {
        Ok(self.point_y(r)?.high())
    }

    /// A rational strictly between the x-coordinates of two points with
    /// provably distinct x.
    pub fn boundary_between_x(&self, r1: &CurvePoint, r2: &CurvePoint) -> BigRational {
        AlgebraicReal::separating_rational(r1.x(), r2.x())
    }

    /// A rational strictly between two provably distinct y-coordinates.
    pub fn boundary_between_y(
        &self,
        r1: &CurvePoint,
        r2: &CurvePoint,
    ) -> KernelResult<BigRational> {
        let y1 = self.point_y(r1)?;
        let y2 = self.point_y(r2)?;
        Ok(AlgebraicReal::separating_rational(&y1, &y2))
    }

    pub fn compare_x(&self, r1: &CurvePoint, r2: &CurvePoint) -> Ordering {
        r1.x().compare(r2.x())
    }

    pub fn compare_y(&self, r1: &CurvePoint, r2: &CurvePoint) -> KernelResult<Ordering> {
        let y1 = self.point_y(r1)?;
        let y2 = self.point_y(r2)?;
        Ok(y1.compare(&y2))
    }

    /// Lexicographic comparison; `equal_x` lets the caller assert the x
    /// comparison has already come out equal.
    pub fn compare_xy(
        &self,
        r1: &CurvePoint,
        r2: &CurvePoint,
        equal_x: bool,
    ) -> KernelResult<Ordering> {
        if !equal_x {
            match self.compare_x(r1, r2) {
                Ordering::Equal => {}
                ord => return Ok(ord),
            }
        }
        // same arc of the same curve over the same line
        if r1.curve() == r2.curve() && r1.arcno() == r2.arcno() {
            return Ok(Ordering::Equal);
        }
        self.compare_y(r1, r2)
    }

    // ----- sign evaluation ----------------------------------------------

    /// Sign of `p` at a point, by adaptive interval evaluation with a
    /// one-shot exact zero test once the box is tight.
    pub fn sign_at(&self, p: &Poly2, r: &CurvePoint) -> KernelResult<Sign> {
        let curve = self.construct_curve(p)?;
        if &curve == r.curve() || curve.polynomial() == r.curve().polynomial() {
            return Ok(Sign::Zero);
        }
        let y = self.point_y(r)?;
        let eps = &self.config.sign_tolerance;
        let mut zero_tested = false;
        loop {
            let bx = Interval::new(r.x().low(), r.x().high());
            let by = Interval::new(y.low(), y.high());
            let value = p.evaluate_box(&bx, &by);
            if let Some(sign) = value.certain_sign() {
                return Ok(Sign::from_int(sign));
            }
            let wx = bx.width();
            let wy = by.width();
            if !zero_tested && (&wx < eps || &wy < eps) {
                zero_tested = true;
                if self.is_structural_zero(&curve, r)? {
                    return Ok(Sign::Zero);
                }
            }
            trace!("sign_at refinement step");
            // refine the wider interval; a straddling box always has one of
            // positive width
            if wx >= wy {
                self.refine_x(r);
            } else {
                y.refine();
            }
        }
    }

    /// Exact test whether the point lies on the curve: vertical-line
    /// coincidence, else a two-curve intersection event at the point's x
    /// involving the point's arc.
    fn is_structural_zero(&self, curve: &Curve, r: &CurvePoint) -> KernelResult<bool> {
        let topo = self.curve_topology(curve)?;
        if topo.covers_line_at(r.x()) {
            return Ok(true);
        }
        let pair = self.construct_curve_pair(curve, r.curve());
        let pair_topo = self.pair_topology(&pair)?;
        let line = pair_topo.line_at(r.x())?;
        if !line.is_intersection() {
            return Ok(false);
        }
        let which = pair
            .position_of(r.curve())
            .ok_or(KernelError::AmbiguousTopology)?;
        match line.event_of_curve(which, r.arcno()) {
            Some(j) => Ok(line.event(j)?.is_intersection()),
            None => Ok(false),
        }
    }

    // ----- solving ------------------------------------------------------

    /// Common points of two square-free, coprime curves with intersection
    /// multiplicities, grouped ascending in x (and in y within a line).
    pub fn solve(&self, p1: &Poly2, p2: &Poly2) -> KernelResult<(Vec<CurvePoint>, Vec<usize>)> {
        let c1 = self.construct_curve(p1)?;
        let c2 = self.construct_curve(p2)?;
        self.solve_curves(&c1, &c2)
    }

    /// [`solve`](Self::solve) over already-constructed curves.
    pub fn solve_curves(
        &self,
        c1: &Curve,
        c2: &Curve,
    ) -> KernelResult<(Vec<CurvePoint>, Vec<usize>)> {
        debug_assert!(squarefree::is_squarefree(c1.polynomial()));
        debug_assert!(squarefree::is_squarefree(c2.polynomial()));
        if c1 == c2 || c1.polynomial() == c2.polynomial() {
            debug_assert!(false, "solve requires distinct coprime curves");
            return Err(KernelError::OverlappingCurves);
        }
        let pair = self.construct_curve_pair(c1, c2);
        let topo = self.pair_topology(&pair)?;
        // the lower-degree curve carries the output points, chosen once
        let preferred = if c1.total_degree() <= c2.total_degree() {
            c1
        } else {
            c2
        };
        let other = if preferred == c1 { c2 } else { c1 };
        let mut points = Vec::new();
        let mut multiplicities = Vec::new();
        for i in 0..topo.event_line_count() {
            let line = topo.event_line(i)?;
            if !line.is_intersection() {
                continue;
            }
            // a curve that covers this line is vertical here and cannot
            // provide arc numbers
            let carrier = match pair.position_of(preferred) {
                Some(pos) if !line.covers_curve(pos) => preferred,
                _ => other,
            };
            let carrier_pos = pair
                .position_of(carrier)
                .ok_or(KernelError::AmbiguousTopology)?;
            for j in 0..line.event_count() {
                let event = line.event(j)?;
                if !event.is_intersection() {
                    continue;
                }
                let arc = event.arcs[carrier_pos].ok_or(KernelError::AmbiguousTopology)?;
                let m = event
                    .multiplicity
                    .ok_or(KernelError::AmbiguousTopology)?;
                points.push(CurvePoint::new(line.x().clone(), carrier.clone(), arc));
                multiplicities.push(m);
            }
        }
        debug!(points = points.len(), "solved curve pair");
        Ok((points, multiplicities))
    }

    // ----- decomposition ------------------------------------------------

    /// Square-free part of a nonzero polynomial, canonical.
    pub fn squarefree_part(&self, p: &Poly2) -> KernelResult<Poly2> {
        if p.is_zero() {
            return Err(KernelError::ZeroPolynomial);
        }
        Ok(squarefree::squarefree_part(p))
    }

    /// Square-free factorization into pairwise-coprime cached curves with
    /// multiplicities, in lock-step.
    pub fn decompose_curve(&self, c: &Curve) -> KernelResult<(Vec<Curve>, Vec<usize>)> {
        let mut curves = Vec::new();
        let mut multiplicities = Vec::new();
        for (factor, m) in squarefree::yun_bivariate(c.polynomial()) {
            curves.push(self.construct_curve(&factor)?);
            multiplicities.push(m);
        }
        Ok((curves, multiplicities))
    }

    /// Splits two curves into a possible common component and coprime
    /// remainders.
    pub fn decompose_pair(&self, c1: &Curve, c2: &Curve) -> KernelResult<CoprimeSplit> {
        if c1 == c2 || c1.polynomial() == c2.polynomial() {
            return Ok(CoprimeSplit {
                common: Some(c1.clone()),
                remainder1: Vec::new(),
                remainder2: Vec::new(),
            });
        }
        let g = gcd::gcd(c1.polynomial(), c2.polynomial());
        if g.total_degree() == 0 {
            // coprime: pass both through with their identities
            return Ok(CoprimeSplit {
                common: None,
                remainder1: vec![c1.clone()],
                remainder2: vec![c2.clone()],
            });
        }
        let mut split = CoprimeSplit {
            common: Some(self.construct_curve(&g)?),
            remainder1: Vec::new(),
            remainder2: Vec::new(),
        };
        let r1 = c1.polynomial().div_exact(&g);
        if r1.total_degree() > 0 {
            split.remainder1.push(self.construct_curve(&r1)?);
        }
        let r2 = c2.polynomial().div_exact(&g);
        if r2.total_degree() > 0 {
            split.remainder2.push(self.construct_curve(&r2)?);
        }
        Ok(split)
    }

    // ----- predicates ---------------------------------------------------

    /// Whether the curve of `p` has finitely many self-intersections, i.e.
    /// `p` is square-free.
    pub fn has_finite_self_intersections(&self, p: &Poly2) -> KernelResult<bool> {
        if p.is_zero() {
            return Err(KernelError::ZeroPolynomial);
        }
        Ok(squarefree::is_squarefree(p))
    }

    /// Whether two curves meet in finitely many points, i.e. their defining
    /// polynomials are coprime. Identical curves share a component.
    pub fn has_finite_intersections(&self, c1: &Curve, c2: &Curve) -> bool {
        if c1 == c2 || c1.polynomial() == c2.polynomial() {
            return false;
        }
        gcd::coprime(c1.polynomial(), c2.polynomial())
    }

    // ----- critical points ----------------------------------------------

    /// Points with `f = df/dy = 0` (vertical tangents and singularities),
    /// ascending. Vertical-line components are excluded: every point of one
    /// is x-critical.
    pub fn x_critical_points(&self, p: &Poly2) -> KernelResult<Vec<CurvePoint>> {
        if p.is_zero() {
            return Err(KernelError::ZeroPolynomial);
        }
        let sf = squarefree::squarefree_part(p);
        let content = sf.content_x();
        if content.degree() > 0 {
            debug!("vertical-line components excluded from x-critical enumeration");
        }
        let primitive = sf.div_poly1_exact(&content);
        if primitive.degree_y() == 0 {
            return Ok(Vec::new());
        }
        self.critical_points_of(&primitive, &primitive.derivative_y())
    }

    pub fn x_critical_point(&self, p: &Poly2, i: usize) -> KernelResult<CurvePoint> {
        let mut points = self.x_critical_points(p)?;
        debug_assert!(i < points.len());
        if i >= points.len() {
            return Err(KernelError::IndexOutOfRange(i));
        }
        Ok(points.swap_remove(i))
    }

    /// Points with `f = df/dx = 0` (horizontal tangents and singularities),
    /// ascending. Horizontal-line components are excluded analogously.
    pub fn y_critical_points(&self, p: &Poly2) -> KernelResult<Vec<CurvePoint>> {
        if p.is_zero() {
            return Err(KernelError::ZeroPolynomial);
        }
        let sf = squarefree::squarefree_part(p);
        let primitive = sf.div_poly1_exact(&sf.content_x());
        if primitive.degree_x() == 0 {
            debug!("horizontal-line curve excluded from y-critical enumeration");
            return Ok(Vec::new());
        }
        let dx = primitive.derivative_x();
        // pure-y components divide the derivative too; strip them, every
        // point of one is y-critical
        let shared = gcd::gcd(&primitive, &dx);
        let carrier = if shared.total_degree() > 0 {
            debug!("horizontal-line components excluded from y-critical enumeration");
            primitive.div_exact(&shared)
        } else {
            primitive
        };
        if carrier.total_degree() == 0 {
            return Ok(Vec::new());
        }
        self.critical_points_of(&carrier, &dx)
    }

    pub fn y_critical_point(&self, p: &Poly2, i: usize) -> KernelResult<CurvePoint> {
        let mut points = self.y_critical_points(p)?;
        debug_assert!(i < points.len());
        if i >= points.len() {
            return Err(KernelError::IndexOutOfRange(i));
        }
        Ok(points.swap_remove(i))
    }

    /// Common points of a curve and one of its partial derivatives; the
    /// curve always carries the output points.
    fn critical_points_of(
        &self,
        carrier_poly: &Poly2,
        derivative: &Poly2,
    ) -> KernelResult<Vec<CurvePoint>> {
        if derivative.total_degree() == 0 {
            // a nonzero constant derivative never vanishes
            return Ok(Vec::new());
        }
        let curve = self.construct_curve(carrier_poly)?;
        let dcurve = self.construct_curve(derivative)?;
        let pair = self.construct_curve_pair(&curve, &dcurve);
        let topo = self.pair_topology(&pair)?;
        let pos = pair
            .position_of(&curve)
            .ok_or(KernelError::AmbiguousTopology)?;
        let mut points = Vec::new();
        for i in 0..topo.event_line_count() {
            let line = topo.event_line(i)?;
            for j in 0..line.event_count() {
                let event = line.event(j)?;
                if !event.is_intersection() {
                    continue;
                }
                let arc = event.arcs[pos].ok_or(KernelError::AmbiguousTopology)?;
                points.push(CurvePoint::new(line.x().clone(), curve.clone(), arc));
            }
        }
        Ok(points)
    }
}
