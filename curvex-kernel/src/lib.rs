//! An exact geometric kernel for real algebraic plane curves.
//!
//! Curves are the zero sets of bivariate polynomials over arbitrary-precision
//! rationals. The kernel answers certified questions about them: where two
//! curves meet and with what multiplicity, and what sign an auxiliary
//! polynomial takes at an intersection point, all without rounding. Interval
//! arithmetic adapts precision, and every zero is confirmed by an exact
//! structural argument.
//!
//! ## Architecture
//!
//! - [`cache`]: canonicalizing LRU caches; all object construction funnels
//!   through them, so proportional polynomials share one [`Curve`] handle.
//! - [`topology`]: the oracle seam. Curve and pair topology are consumed as
//!   *status lines* through traits; [`fiber::FiberOracle`] is the bundled
//!   reference provider (exact fibers at rational abscissas).
//! - [`kernel::CurveKernel`]: sign evaluation, the common-root solver,
//!   square-free/coprime decomposition, point refinement and comparison.
//!
//! ```
//! use curvex_kernel::CurveKernel;
//! use curvex_math::Poly2;
//!
//! let kernel = CurveKernel::new();
//! let circle = Poly2::from_ints(&[&[-1, 0, 1], &[], &[1]]); // x^2 + y^2 - 1
//! let line = Poly2::from_ints(&[&[0, 1]]); // x
//! let (points, mults) = kernel.solve(&circle, &line).unwrap();
//! assert_eq!(points.len(), 2);
//! assert_eq!(mults, vec![1, 1]);
//! ```

pub mod cache;
pub mod curve;
pub mod error;
pub mod fiber;
pub mod kernel;
pub mod point;
pub mod topology;

pub use cache::{CacheConfig, CacheStats};
pub use curve::{Curve, CurvePair};
pub use error::{KernelError, KernelResult};
pub use fiber::FiberOracle;
pub use kernel::{CoprimeSplit, CurveKernel, KernelConfig};
pub use point::CurvePoint;
pub use topology::{
    CurvePairTopology, CurveStatusLine, CurveTopology, PairEvent, PairStatusLine, Sign,
    TopologyProvider,
};
