//! The topology-oracle seam.
//!
//! The kernel never analyzes curve topology itself; it consumes *status
//! lines*, the combinatorial description of a curve (or a pair of curves)
//! over one vertical line, through the traits below. The crate ships one
//! reference provider ([`crate::fiber::FiberOracle`]); a full topology engine
//! plugs in by implementing [`TopologyProvider`].

use std::rc::Rc;

use curvex_math::AlgebraicReal;

use crate::curve::{Curve, CurvePair};
use crate::error::{KernelError, KernelResult};

/// Sign of a polynomial value, as certified by exact evaluation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sign {
    Negative,
    Zero,
    Positive,
}

impl Sign {
    pub(crate) fn from_int(s: i32) -> Sign {
        match s.cmp(&0) {
            std::cmp::Ordering::Less => Sign::Negative,
            std::cmp::Ordering::Equal => Sign::Zero,
            std::cmp::Ordering::Greater => Sign::Positive,
        }
    }
}

/// The fiber structure of one curve over one vertical line.
#[derive(Clone, Debug)]
pub struct CurveStatusLine {
    x: AlgebraicReal,
    covers_line: bool,
    y_roots: Vec<AlgebraicReal>,
    is_event: bool,
}

impl CurveStatusLine {
    pub fn new(
        x: AlgebraicReal,
        covers_line: bool,
        y_roots: Vec<AlgebraicReal>,
        is_event: bool,
    ) -> Self {
        CurveStatusLine {
            x,
            covers_line,
            y_roots,
            is_event,
        }
    }

    pub fn x(&self) -> &AlgebraicReal {
        &self.x
    }

    /// Whether the curve contains this whole vertical line.
    pub fn covers_line(&self) -> bool {
        self.covers_line
    }

    pub fn is_event(&self) -> bool {
        self.is_event
    }

    /// Number of branches crossing the line (zero when it covers the line).
    pub fn branch_count(&self) -> usize {
        self.y_roots.len()
    }

    /// The y-position of the `arcno`-th branch, counted from below. The
    /// returned handle shares its interval with the oracle, so refinement is
    /// visible to every holder.
    pub fn y_root(&self, arcno: usize) -> KernelResult<AlgebraicReal> {
        self.y_roots
            .get(arcno)
            .cloned()
            .ok_or(KernelError::IndexOutOfRange(arcno))
    }
}

/// One event on a pair status line: a y-position where at least one of the
/// two curves has a branch.
#[derive(Clone, Debug)]
pub struct PairEvent {
    /// Arc index of each curve at this y (pair order); `None` = not involved.
    pub arcs: [Option<usize>; 2],
    /// Intersection multiplicity, populated for two-curve events.
    pub multiplicity: Option<usize>,
}

impl PairEvent {
    pub fn is_intersection(&self) -> bool {
        self.arcs[0].is_some() && self.arcs[1].is_some()
    }
}

/// The merged fiber structure of a curve pair over one vertical line,
/// events ascending in y.
#[derive(Clone, Debug)]
pub struct PairStatusLine {
    x: AlgebraicReal,
    is_event: bool,
    is_intersection: bool,
    covers: [bool; 2],
    events: Vec<PairEvent>,
}

impl PairStatusLine {
    pub fn new(
        x: AlgebraicReal,
        is_event: bool,
        is_intersection: bool,
        covers: [bool; 2],
        events: Vec<PairEvent>,
    ) -> Self {
        PairStatusLine {
            x,
            is_event,
            is_intersection,
            covers,
            events,
        }
    }

    pub fn x(&self) -> &AlgebraicReal {
        &self.x
    }

    /// Whether this line is an event line of the pair.
    pub fn is_event(&self) -> bool {
        self.is_event
    }

    /// Whether the curves meet somewhere on this line.
    pub fn is_intersection(&self) -> bool {
        self.is_intersection
    }

    /// Whether either curve contains the whole line.
    pub fn covers_line(&self) -> bool {
        self.covers[0] || self.covers[1]
    }

    /// Whether the member curve at pair position `which` covers the line.
    pub fn covers_curve(&self, which: usize) -> bool {
        self.covers[which]
    }

    pub fn event_count(&self) -> usize {
        self.events.len()
    }

    pub fn event(&self, j: usize) -> KernelResult<&PairEvent> {
        self.events.get(j).ok_or(KernelError::IndexOutOfRange(j))
    }

    /// Arc indices of both curves at event `j` (pair order).
    pub fn curves_at_event(&self, j: usize) -> KernelResult<[Option<usize>; 2]> {
        Ok(self.event(j)?.arcs)
    }

    /// Intersection multiplicity at event `j`, when the event is a two-curve
    /// event and the oracle determined it.
    pub fn multiplicity_of_intersection(&self, j: usize) -> KernelResult<Option<usize>> {
        Ok(self.event(j)?.multiplicity)
    }

    /// The event (if any) involving arc `arcno` of the member curve at pair
    /// position `which`.
    pub fn event_of_curve(&self, which: usize, arcno: usize) -> Option<usize> {
        self.events
            .iter()
            .position(|e| e.arcs[which] == Some(arcno))
    }
}

/// Per-curve topology: event lines and fibers.
pub trait CurveTopology {
    /// Number of event lines (critical x-coordinates), ascending.
    fn event_line_count(&self) -> usize;

    /// The `i`-th event line.
    fn event_line(&self, i: usize) -> KernelResult<Rc<CurveStatusLine>>;

    /// The status line at an arbitrary x.
    fn line_at(&self, x: &AlgebraicReal) -> KernelResult<Rc<CurveStatusLine>>;

    /// Whether the curve contains the vertical line at `x` (exact for every
    /// algebraic x).
    fn covers_line_at(&self, x: &AlgebraicReal) -> bool;
}

/// Per-pair topology: merged event lines of two coprime curves.
pub trait CurvePairTopology {
    fn event_line_count(&self) -> usize;

    fn event_line(&self, i: usize) -> KernelResult<Rc<PairStatusLine>>;

    fn line_at(&self, x: &AlgebraicReal) -> KernelResult<Rc<PairStatusLine>>;
}

/// Factory for topology analyses; the kernel constructs at most one analysis
/// per canonical curve (or pair) through its caches.
pub trait TopologyProvider {
    fn curve_topology(&self, curve: &Curve) -> KernelResult<Rc<dyn CurveTopology>>;

    fn pair_topology(&self, pair: &CurvePair) -> KernelResult<Rc<dyn CurvePairTopology>>;
}
