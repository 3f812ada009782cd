//! Interfaces to the Gröbner basis machinery this crate does not implement.
//!
//! Computing a Gröbner basis is left to a [`GroebnerCollaborator`]. Reducing a
//! polynomial modulo a basis is a [`Reducer`], and [`DivisionReducer`] is the
//! multivariate division of this crate.

use crate::{
    error::QuotientError,
    field::Scalar,
    polynomial::{
        division::DEFAULT_ZERO_TOLERANCE, monomial_ordering::Ordering, Exponent, Polynomial,
    },
};

pub trait Reducer<O, C, E> {
    /// The canonical remainder of poly modulo the ideal spanned by basis.
    fn reduce(&self, poly: Polynomial<O, C, E>, basis: &[Polynomial<O, C, E>])
        -> Polynomial<O, C, E>;
}

pub trait GroebnerCollaborator<O, C, E>: Reducer<O, C, E> {
    /// Computes a Gröbner basis of the ideal generated by polynomials.
    fn groebner_basis(
        &self,
        polynomials: Vec<Polynomial<O, C, E>>,
    ) -> Result<Vec<Polynomial<O, C, E>>, QuotientError>;
}

/// Reduces by multivariate division, flushing coefficients below `tolerance`
/// to zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DivisionReducer {
    pub tolerance: f64,
}

impl DivisionReducer {
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }
}

impl Default for DivisionReducer {
    fn default() -> Self {
        Self::new(DEFAULT_ZERO_TOLERANCE)
    }
}

impl<O, C, E> Reducer<O, C, E> for DivisionReducer
where
    O: Ordering,
    C: Scalar,
    E: Exponent,
{
    fn reduce(
        &self,
        poly: Polynomial<O, C, E>,
        basis: &[Polynomial<O, C, E>],
    ) -> Polynomial<O, C, E> {
        poly.reduce_by(basis, self.tolerance).remainder
    }
}
