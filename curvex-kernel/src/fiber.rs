//! The bundled fiber oracle: a reference [`TopologyProvider`].
//!
//! Event x-coordinates come from exact resultants; per-line structure comes
//! from isolating the roots of the univariate fiber polynomials. Fibers are
//! materialized only at *rational* abscissas: everything decidable without
//! a fiber (covers-line, "no event at this x") is answered exactly for every
//! algebraic x, and a question that would need an irrational fiber returns
//! [`KernelError::UnsupportedFiber`] instead of an uncertified answer.
//!
//! A line's intersection multiplicities sum to the multiplicity of its
//! abscissa in the x-resultant; a sole intersection inherits that total
//! directly. Several intersections on one line are separated by shearing the
//! coordinates (`x -> x + k*y`), so each point gets its own abscissa in the
//! sheared resultant; a shear is accepted only when its parts account for the
//! whole line total. When no shear certifies the distribution the error is
//! [`KernelError::AmbiguousTopology`], never a guess.

use std::cell::RefCell;
use std::cmp::Ordering;
use std::rc::Rc;

use curvex_math::poly1::Poly1;
use curvex_math::resultant::resultant_y;
use curvex_math::squarefree::{squarefree_part, yun_univariate};
use curvex_math::{gcd, AlgebraicReal, BigRational, Poly2};
use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::curve::{Curve, CurvePair};
use crate::error::{KernelError, KernelResult};
use crate::topology::{
    CurvePairTopology, CurveStatusLine, CurveTopology, PairEvent, PairStatusLine,
    TopologyProvider,
};

/// Stateless provider handing out fiber-based analyses.
#[derive(Clone, Copy, Debug, Default)]
pub struct FiberOracle;

impl TopologyProvider for FiberOracle {
    fn curve_topology(&self, curve: &Curve) -> KernelResult<Rc<dyn CurveTopology>> {
        Ok(Rc::new(CurveFibers::new(curve)?))
    }

    fn pair_topology(&self, pair: &CurvePair) -> KernelResult<Rc<dyn CurvePairTopology>> {
        Ok(Rc::new(PairFibers::new(pair)?))
    }
}

/// Fiber analysis of a single curve.
struct CurveFibers {
    /// Square-free part of the defining polynomial (same zero set).
    squarefree: Poly2,
    /// Pure-x factors: roots are the vertical-line components.
    content: Poly1,
    /// Critical x-coordinates, ascending.
    events: Vec<AlgebraicReal>,
    lines: RefCell<FxHashMap<BigRational, Rc<CurveStatusLine>>>,
}

impl CurveFibers {
    fn new(curve: &Curve) -> KernelResult<Self> {
        let squarefree = squarefree_part(curve.polynomial());
        let content = squarefree.content_x();
        let primitive = squarefree.div_poly1_exact(&content);
        // events: vertical lines, discriminant roots, leading-coefficient
        // drops of the primitive part
        let event_poly = if primitive.degree_y() > 0 {
            let disc = resultant_y(&primitive, &primitive.derivative_y());
            &(&disc * &content) * &primitive.leading_y()
        } else {
            content.clone()
        };
        let events = AlgebraicReal::roots_of(&event_poly);
        debug!(
            curve = curve.id(),
            events = events.len(),
            "curve fiber analysis constructed"
        );
        Ok(CurveFibers {
            squarefree,
            content,
            events,
            lines: RefCell::new(FxHashMap::default()),
        })
    }
}

impl CurveTopology for CurveFibers {
    fn event_line_count(&self) -> usize {
        self.events.len()
    }

    fn event_line(&self, i: usize) -> KernelResult<Rc<CurveStatusLine>> {
        let x = self
            .events
            .get(i)
            .ok_or(KernelError::IndexOutOfRange(i))?;
        self.line_at(x)
    }

    fn line_at(&self, x: &AlgebraicReal) -> KernelResult<Rc<CurveStatusLine>> {
        if self.covers_line_at(x) {
            return Ok(Rc::new(CurveStatusLine::new(
                x.clone(),
                true,
                Vec::new(),
                true,
            )));
        }
        let Some(r) = x.rational_value() else {
            return Err(KernelError::UnsupportedFiber);
        };
        if let Some(line) = self.lines.borrow().get(&r) {
            return Ok(Rc::clone(line));
        }
        let fiber = self.squarefree.substitute_x(&r);
        let y_roots = AlgebraicReal::roots_of(&fiber);
        let is_event = self
            .events
            .iter()
            .any(|e| e.compare_with_rational(&r) == Ordering::Equal);
        let line = Rc::new(CurveStatusLine::new(x.clone(), false, y_roots, is_event));
        self.lines.borrow_mut().insert(r, Rc::clone(&line));
        Ok(line)
    }

    fn covers_line_at(&self, x: &AlgebraicReal) -> bool {
        x.is_root_of(&self.content)
    }
}

/// Fiber analysis of a coprime curve pair.
struct PairFibers {
    /// Square-free parts, in pair order.
    sf: [Poly2; 2],
    /// Event abscissas with their x-resultant multiplicity, ascending.
    events: Vec<(AlgebraicReal, usize)>,
    lines: RefCell<FxHashMap<BigRational, Rc<PairStatusLine>>>,
}

impl PairFibers {
    fn new(pair: &CurvePair) -> KernelResult<Self> {
        let sf = [
            squarefree_part(pair.first().polynomial()),
            squarefree_part(pair.second().polynomial()),
        ];
        if gcd::gcd(&sf[0], &sf[1]).total_degree() > 0 {
            return Err(KernelError::OverlappingCurves);
        }
        let res_x = resultant_y(&sf[0], &sf[1]);
        let mut events = Vec::new();
        for (factor, multiplicity) in yun_univariate(&res_x) {
            for root in AlgebraicReal::roots_of(&factor) {
                events.push((root, multiplicity));
            }
        }
        events.sort_by(|a, b| a.0.compare(&b.0));
        debug!(
            pair = pair.id(),
            events = events.len(),
            "pair fiber analysis constructed"
        );
        Ok(PairFibers {
            sf,
            events,
            lines: RefCell::new(FxHashMap::default()),
        })
    }

    fn event_index_at(&self, x: &AlgebraicReal) -> Option<usize> {
        self.events
            .iter()
            .position(|(e, _)| e.compare(x) == Ordering::Equal)
    }

    /// Fills in the multiplicities of the two-curve events on the line at the
    /// rational abscissa `r`.
    fn assign_multiplicities(
        &self,
        events: &mut [PairEvent],
        ys: &[AlgebraicReal],
        event_idx: Option<usize>,
        r: &BigRational,
    ) -> KernelResult<()> {
        let commons: Vec<usize> = events
            .iter()
            .enumerate()
            .filter(|(_, e)| e.is_intersection())
            .map(|(j, _)| j)
            .collect();
        if commons.is_empty() {
            return Ok(());
        }
        // a genuine intersection forces a root of the x-resultant
        let total = match event_idx {
            Some(i) => self.events[i].1,
            None => return Err(KernelError::AmbiguousTopology),
        };
        if commons.len() == 1 {
            events[commons[0]].multiplicity = Some(total);
            return Ok(());
        }
        // several intersections share this line; a shear gives each point
        // its own abscissa in the sheared resultant. A sheared part is never
        // below the point's multiplicity, so a slope whose parts sum to the
        // line total distributes it exactly. Only finitely many slopes
        // collide points or drop leading coefficients.
        for k in 1i64..=16 {
            let slope = BigRational::from_integer(k.into());
            if let Some(parts) = self.sheared_parts(&commons, ys, r, &slope, total) {
                for (&j, m) in commons.iter().zip(parts) {
                    events[j].multiplicity = Some(m);
                }
                return Ok(());
            }
            trace!(slope = k, "shear rejected, multiplicities unaccounted");
        }
        Err(KernelError::AmbiguousTopology)
    }

    /// Per-point multiplicities of the commons at `(r, ys[j])` under the
    /// shear `x -> x + slope*y`, or `None` when they fail to account for the
    /// line total.
    fn sheared_parts(
        &self,
        commons: &[usize],
        ys: &[AlgebraicReal],
        r: &BigRational,
        slope: &BigRational,
        total: usize,
    ) -> Option<Vec<usize>> {
        let res = resultant_y(&self.sf[0].shear(slope), &self.sf[1].shear(slope));
        let factors = yun_univariate(&res);
        let mut parts = Vec::with_capacity(commons.len());
        for &j in commons {
            // (r, y) shears to the abscissa r - slope*y, a root of the factor
            // q exactly when y is a root of q(r - slope*y)
            let m = factors
                .iter()
                .find(|(q, _)| ys[j].is_root_of(&q.compose_linear(r, &-slope)))
                .map(|(_, m)| *m)?;
            parts.push(m);
        }
        if parts.iter().sum::<usize>() == total {
            Some(parts)
        } else {
            None
        }
    }
}

impl CurvePairTopology for PairFibers {
    fn event_line_count(&self) -> usize {
        self.events.len()
    }

    fn event_line(&self, i: usize) -> KernelResult<Rc<PairStatusLine>> {
        let x = self
            .events
            .get(i)
            .map(|(x, _)| x.clone())
            .ok_or(KernelError::IndexOutOfRange(i))?;
        self.line_at(&x)
    }

    fn line_at(&self, x: &AlgebraicReal) -> KernelResult<Rc<PairStatusLine>> {
        let event_idx = self.event_index_at(x);
        let Some(r) = x.rational_value() else {
            if event_idx.is_none() {
                // no event line here: provably no intersection, nothing to
                // enumerate even without a fiber
                return Ok(Rc::new(PairStatusLine::new(
                    x.clone(),
                    false,
                    false,
                    [false, false],
                    Vec::new(),
                )));
            }
            return Err(KernelError::UnsupportedFiber);
        };
        if let Some(line) = self.lines.borrow().get(&r) {
            return Ok(Rc::clone(line));
        }
        let fibers = [self.sf[0].substitute_x(&r), self.sf[1].substitute_x(&r)];
        let covers = [fibers[0].is_zero(), fibers[1].is_zero()];
        debug_assert!(!(covers[0] && covers[1]), "coprime curves share a line");
        let (mut events, ys) = if covers[0] || covers[1] {
            // one curve owns the whole line; every branch of the other curve
            // is a common point
            let other = if covers[0] { &fibers[1] } else { &fibers[0] };
            let roots = AlgebraicReal::roots_of(other);
            let events: Vec<PairEvent> = (0..roots.len())
                .map(|j| PairEvent {
                    arcs: [Some(j), Some(j)],
                    multiplicity: None,
                })
                .collect();
            (events, roots)
        } else {
            merge_fibers(
                AlgebraicReal::roots_of(&fibers[0]),
                AlgebraicReal::roots_of(&fibers[1]),
            )
        };
        self.assign_multiplicities(&mut events, &ys, event_idx, &r)?;
        let is_intersection = events.iter().any(PairEvent::is_intersection);
        let line = Rc::new(PairStatusLine::new(
            x.clone(),
            event_idx.is_some(),
            is_intersection,
            covers,
            events,
        ));
        self.lines.borrow_mut().insert(r, Rc::clone(&line));
        Ok(line)
    }
}

/// Merges two ascending fiber-root lists into the event list of one line,
/// matching equal y-positions exactly.
fn merge_fibers(
    roots0: Vec<AlgebraicReal>,
    roots1: Vec<AlgebraicReal>,
) -> (Vec<PairEvent>, Vec<AlgebraicReal>) {
    let mut events = Vec::with_capacity(roots0.len() + roots1.len());
    let mut ys = Vec::with_capacity(roots0.len() + roots1.len());
    let (mut i, mut j) = (0, 0);
    while i < roots0.len() && j < roots1.len() {
        match roots0[i].compare(&roots1[j]) {
            Ordering::Less => {
                events.push(PairEvent {
                    arcs: [Some(i), None],
                    multiplicity: None,
                });
                ys.push(roots0[i].clone());
                i += 1;
            }
            Ordering::Greater => {
                events.push(PairEvent {
                    arcs: [None, Some(j)],
                    multiplicity: None,
                });
                ys.push(roots1[j].clone());
                j += 1;
            }
            Ordering::Equal => {
                events.push(PairEvent {
                    arcs: [Some(i), Some(j)],
                    multiplicity: None,
                });
                ys.push(roots0[i].clone());
                i += 1;
                j += 1;
            }
        }
    }
    while i < roots0.len() {
        events.push(PairEvent {
            arcs: [Some(i), None],
            multiplicity: None,
        });
        ys.push(roots0[i].clone());
        i += 1;
    }
    while j < roots1.len() {
        events.push(PairEvent {
            arcs: [None, Some(j)],
            multiplicity: None,
        });
        ys.push(roots1[j].clone());
        j += 1;
    }
    (events, ys)
}
