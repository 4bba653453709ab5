//! Kernel error type.

use thiserror::Error;

/// Errors surfaced by kernel operations.
///
/// Contract violations (non-square-free solver input, out-of-contract
/// indices) are debug-asserted rather than reported; everything here is a
/// condition a correct caller can run into.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KernelError {
    /// The zero polynomial defines the whole plane, not a curve.
    #[error("the zero polynomial does not define a curve")]
    ZeroPolynomial,

    /// Two-curve analysis requires coprime curves; a shared component means
    /// infinitely many common points.
    #[error("curves share a one-dimensional component")]
    OverlappingCurves,

    /// The bundled oracle materializes fibers only at rational abscissas.
    #[error("status line requires a fiber at a non-rational x-coordinate")]
    UnsupportedFiber,

    /// The oracle's data is internally contradictory (an intersection line
    /// without a two-curve event, or multiplicities the resultants cannot
    /// account for). Fatal, never silently resolved.
    #[error("topology data is ambiguous at an event line")]
    AmbiguousTopology,

    /// An arc or event index beyond the status line's range.
    #[error("index {0} out of range")]
    IndexOutOfRange(usize),
}

pub type KernelResult<T> = Result<T, KernelError>;
