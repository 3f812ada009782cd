use log::trace;

use crate::field::Scalar;

use super::{monomial_ordering::Ordering, Exponent, Polynomial, Term};

/// Coefficients smaller than this are taken as floating point noise.
pub const DEFAULT_ZERO_TOLERANCE: f64 = 1e-10;

/// Outcome of dividing a polynomial by a set of polynomials.
#[derive(Debug, Clone)]
pub struct Reduction<O, C, E> {
    /// No monomial of the remainder is divisible by a leading monomial of the
    /// divisors.
    pub remainder: Polynomial<O, C, E>,
    /// How many leading terms were eliminated.
    pub steps: usize,
}

impl<O, C, E> Polynomial<O, C, E>
where
    O: Ordering,
    C: Scalar,
    E: Exponent,
{
    /// Multivariate division of self by the basis polynomials.
    ///
    /// Each elimination subtracts a multiple of the first basis polynomial
    /// whose leading monomial divides the current leading monomial. After every
    /// elimination, coefficients whose magnitude is below `tolerance` are
    /// flushed to zero. Zero polynomials in the basis are ignored.
    pub fn reduce_by(self, basis: &[Self], tolerance: f64) -> Reduction<O, C, E> {
        let mut remainder = Vec::new();
        let mut steps = 0usize;
        let mut work = self.terms;

        'outer: loop {
            let mut iter = work.into_iter();
            while let Some(t) = iter.next() {
                if let Some((factor, divisor)) = elimination_factor(&t, basis) {
                    // The leading terms cancel by construction, so t is
                    // dropped and only the tail of divisor is added.
                    let difference = divisor.terms[1..]
                        .iter()
                        .map(|d| factor.clone() * d.clone());

                    let mut next = Vec::new();
                    Polynomial::sum_terms(iter, difference, &mut next);
                    next.retain(|t| !t.coefficient.is_negligible(tolerance));

                    work = next;
                    steps += 1;
                    continue 'outer;
                } else {
                    // Nothing divides this term, so it belongs to the
                    // remainder, and the search goes on with the smaller ones.
                    remainder.push(t);
                }
            }

            break;
        }

        trace!(
            "reduction finished after {} steps with {} remainder terms",
            steps,
            remainder.len()
        );

        Reduction {
            remainder: Polynomial { terms: remainder },
            steps,
        }
    }
}

/// Finds the first basis polynomial whose leading monomial divides the monomial
/// of t, and the term that multiplied by it eliminates t.
fn elimination_factor<'a, O, C, E>(
    t: &Term<O, C, E>,
    basis: &'a [Polynomial<O, C, E>],
) -> Option<(Term<O, C, E>, &'a Polynomial<O, C, E>)>
where
    O: Ordering,
    C: Scalar,
    E: Exponent,
{
    basis.iter().find_map(|g| {
        let lt = g.terms.first()?;
        let monomial = t.monomial.clone().whole_division(&lt.monomial)?;
        let lt_inv = num_traits::Inv::inv(lt.coefficient.clone());

        Some((
            Term {
                coefficient: t.coefficient.clone().elimination_factor(&lt_inv),
                monomial,
            },
            g,
        ))
    })
}

/// The remainder of poly divided by basis.
pub fn reduce<O, C, E>(
    poly: Polynomial<O, C, E>,
    basis: &[Polynomial<O, C, E>],
    tolerance: f64,
) -> Polynomial<O, C, E>
where
    O: Ordering,
    C: Scalar,
    E: Exponent,
{
    poly.reduce_by(basis, tolerance).remainder
}
