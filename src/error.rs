use thiserror::Error;

/// Failures of the quotient ring machinery.
///
/// None of these are worth retrying: they either mean the ideal has no finite
/// quotient, or that the caller broke a precondition.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum QuotientError {
    #[error("Gröbner basis has no nonzero polynomial, so the quotient is not finite")]
    EmptyBasis,

    #[error("ideal is not zero-dimensional: no leading term is a pure power of x{variable}")]
    NonFiniteIdeal { variable: usize },

    #[error("monomial {monomial} is not in the vector basis; was the polynomial reduced?")]
    CoordinateOutOfBasis { monomial: String },

    #[error("expected {expected} variables, found {found}")]
    VariableCountMismatch { expected: usize, found: usize },

    #[error("exponent overflow multiplying {left} by {right}")]
    ExponentOverflow { left: String, right: String },

    #[error("row {row} has {found} entries, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("{candidates} candidate monomials exceed the limit of {limit}")]
    CandidateLimitExceeded { candidates: usize, limit: usize },

    #[error("Gröbner basis computation failed: {0}")]
    BasisComputation(String),

    #[error("parsing failed: {0}")]
    Parse(String),
}

impl QuotientError {
    /// Tells if the error means the ideal has infinitely many cosets.
    pub fn is_non_finite(&self) -> bool {
        matches!(
            self,
            QuotientError::EmptyBasis | QuotientError::NonFiniteIdeal { .. }
        )
    }
}
