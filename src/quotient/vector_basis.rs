use itertools::Itertools;
use log::debug;

use crate::{
    config::RootFinderConfig,
    error::QuotientError,
    polynomial::{monomial_ordering::Ordering, Exponent, Monomial},
};

/// Builds the monomial basis of C[x]/I from the leading monomials of a
/// Gröbner basis of I.
///
/// The basis is made of the monomials not divisible by any leading monomial.
/// They are searched for in the box spanned by the biggest exponent of each
/// variable among the leading monomials, and returned in the order the box is
/// enumerated, with the last variable changing fastest.
pub fn build_vector_basis<O, E>(
    leading_terms: &[&Monomial<O, E>],
    config: &RootFinderConfig,
) -> Result<Vec<Monomial<O, E>>, QuotientError>
where
    O: Ordering,
    E: Exponent,
{
    let num_vars = leading_terms
        .first()
        .ok_or(QuotientError::EmptyBasis)?
        .num_vars();

    if let Some(lt) = leading_terms.iter().find(|lt| lt.num_vars() != num_vars) {
        return Err(QuotientError::VariableCountMismatch {
            expected: num_vars,
            found: lt.num_vars(),
        });
    }

    // Without a pure power of some variable among the leading monomials, all
    // powers of that variable are independent in the quotient.
    if let Some(variable) =
        (0..num_vars).find(|&var| !leading_terms.iter().any(|lt| lt.is_pure_power_of(var)))
    {
        return Err(QuotientError::NonFiniteIdeal { variable });
    }

    if num_vars == 0 {
        // The only monomial is 1, and it is a leading monomial.
        return Ok(Vec::new());
    }

    let bounds: Vec<usize> = (0..num_vars)
        .map(|var| {
            leading_terms
                .iter()
                .map(|lt| lt.exponent(var))
                .max()
                .and_then(|e| e.to_usize())
                .unwrap_or(0)
        })
        .collect();

    let candidates = bounds
        .iter()
        .try_fold(1usize, |acc, b| acc.checked_mul(*b))
        .unwrap_or(usize::MAX);
    debug!(
        "enumerating {} candidate monomials in the box {:?}",
        candidates, bounds
    );

    if let Some(limit) = config.max_candidates {
        if candidates > limit {
            return Err(QuotientError::CandidateLimitExceeded { candidates, limit });
        }
    }

    let mut basis = Vec::new();
    for exponents in bounds.iter().map(|&b| 0..b).multi_cartesian_product() {
        let candidate = Monomial::new(
            exponents
                .into_iter()
                .map(|e| <E as num_traits::NumCast>::from(e).unwrap_or_else(E::max_value))
                .collect(),
        );

        if !leading_terms.iter().any(|lt| lt.divides(&candidate)) {
            basis.push(candidate);
        }
    }

    debug!("quotient vector space has dimension {}", basis.len());

    Ok(basis)
}
