//! Finite dimensional quotient rings C[x_1, ..., x_n]/I of zero-dimensional
//! ideals, given by a Gröbner basis of I.
//!
//! [`RootFinder`] builds the monomial basis of the quotient, maps reduced
//! polynomials to coordinate vectors, and builds the matrices of the
//! multiplication operators, whose eigenvalues are the coordinates of the
//! points of the variety of I.

pub mod config;
pub mod error;
pub mod field;
pub mod groebner;
pub mod matrix;
pub mod polynomial;
pub mod quotient;

mod ordered_ops;

pub use config::RootFinderConfig;
pub use error::QuotientError;
pub use quotient::RootFinder;
