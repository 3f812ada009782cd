use crate::polynomial::division::DEFAULT_ZERO_TOLERANCE;

/// Tunables of a [`RootFinder`](crate::quotient::RootFinder).
///
/// The monomial ordering is not here: it is the `O` type parameter of the
/// polynomials.
#[derive(Debug, Clone, PartialEq)]
pub struct RootFinderConfig {
    /// Coefficients with smaller magnitude are flushed to zero during
    /// reduction.
    pub zero_tolerance: f64,

    /// Upper limit on the number of candidate monomials enumerated while
    /// building the vector basis. No limit if None.
    pub max_candidates: Option<usize>,
}

impl Default for RootFinderConfig {
    fn default() -> Self {
        Self {
            zero_tolerance: DEFAULT_ZERO_TOLERANCE,
            max_candidates: None,
        }
    }
}

impl RootFinderConfig {
    pub fn with_zero_tolerance(mut self, zero_tolerance: f64) -> Self {
        self.zero_tolerance = zero_tolerance;
        self
    }

    pub fn with_max_candidates(mut self, max_candidates: usize) -> Self {
        self.max_candidates = Some(max_candidates);
        self
    }
}
