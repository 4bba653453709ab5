//! Exact polynomial and algebraic-number arithmetic for certified curve
//! analysis.
//!
//! Everything in this crate is exact: coefficients are arbitrary-precision
//! rationals, roots are isolated with Sturm sequences, and comparisons are
//! decided with gcd certificates rather than precision heuristics.
//!
//! ## Layout
//!
//! - [`Poly1`] / [`Poly2`]: dense univariate and bivariate polynomials over
//!   `BigRational` (y is the outer variable of `Poly2`).
//! - [`Interval`]: closed rational intervals with the arithmetic needed for
//!   box evaluation.
//! - [`isolate`]: Sturm-based real-root isolation with exact rational-root
//!   identification.
//! - [`AlgebraicReal`]: a refinable, shareable isolated real root.
//! - [`resultant`], [`gcd`], [`squarefree`]: elimination and decomposition
//!   machinery for the bivariate layer.

pub mod algebraic;
pub mod gcd;
pub mod interval;
pub mod isolate;
pub mod poly1;
pub mod poly2;
pub mod resultant;
pub mod squarefree;

pub use algebraic::AlgebraicReal;
pub use interval::Interval;
pub use poly1::Poly1;
pub use poly2::Poly2;

pub use num_bigint::BigInt;
pub use num_rational::BigRational;
