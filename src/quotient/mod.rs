//! The quotient ring A = C[x_1, ..., x_n]/I seen as a finite dimensional
//! vector space, where I is generated by a Gröbner basis.
//!
//! The monomials not divisible by any leading monomial of the basis are a
//! basis of A. Every polynomial reduced by the Gröbner basis is a combination
//! of them, so it has a coordinate vector. Multiplication by a fixed
//! polynomial is a linear map on A, and the eigenvalues of the map for x_k are
//! the k-th coordinates of the points of the variety.

mod vector_basis;

pub use vector_basis::build_vector_basis;

use std::collections::HashMap;

use log::debug;

use crate::{
    config::RootFinderConfig,
    error::QuotientError,
    field::Scalar,
    groebner::{DivisionReducer, GroebnerCollaborator, Reducer},
    matrix::DenseMatrix,
    polynomial::{monomial_ordering::Ordering, Exponent, Monomial, Polynomial},
};

pub struct RootFinder<O, C, E, R = DivisionReducer> {
    groebner_basis: Vec<Polynomial<O, C, E>>,
    vector_basis: Vec<Monomial<O, E>>,
    /// Position of each vector basis monomial.
    index: HashMap<Monomial<O, E>, usize>,
    num_vars: usize,
    reducer: R,
    config: RootFinderConfig,
}

impl<O, C, E> RootFinder<O, C, E, DivisionReducer>
where
    O: Ordering,
    C: Scalar,
    E: Exponent,
{
    /// Uses the given polynomials as a Gröbner basis, reducing with the
    /// multivariate division of this crate.
    pub fn from_basis(
        groebner_basis: Vec<Polynomial<O, C, E>>,
        config: RootFinderConfig,
    ) -> Result<Self, QuotientError> {
        let reducer = DivisionReducer::new(config.zero_tolerance);
        Self::from_basis_with_reducer(groebner_basis, reducer, config)
    }
}

impl<O, C, E, R> RootFinder<O, C, E, R>
where
    O: Ordering,
    C: Scalar,
    E: Exponent,
    R: Reducer<O, C, E>,
{
    /// Uses the given polynomials as a Gröbner basis, reducing with reducer.
    pub fn from_basis_with_reducer(
        groebner_basis: Vec<Polynomial<O, C, E>>,
        reducer: R,
        config: RootFinderConfig,
    ) -> Result<Self, QuotientError> {
        let leading_terms: Vec<_> = groebner_basis
            .iter()
            .filter_map(Polynomial::leading_term)
            .collect();
        let vector_basis = build_vector_basis(&leading_terms, &config)?;
        let num_vars = leading_terms[0].num_vars();
        for poly in groebner_basis.iter() {
            check_num_vars(poly, num_vars)?;
        }

        let index = vector_basis
            .iter()
            .enumerate()
            .map(|(idx, monomial)| (monomial.clone(), idx))
            .collect();

        Ok(Self {
            groebner_basis,
            vector_basis,
            index,
            num_vars,
            reducer,
            config,
        })
    }

    /// Hands polynomials to collaborator for the Gröbner basis computation,
    /// which also becomes the reducer.
    pub fn from_polynomial_list(
        polynomials: Vec<Polynomial<O, C, E>>,
        collaborator: R,
        config: RootFinderConfig,
    ) -> Result<Self, QuotientError>
    where
        R: GroebnerCollaborator<O, C, E>,
    {
        let groebner_basis = collaborator.groebner_basis(polynomials)?;
        debug!(
            "collaborator returned a Gröbner basis with {} polynomials",
            groebner_basis.len()
        );
        Self::from_basis_with_reducer(groebner_basis, collaborator, config)
    }

    pub fn groebner_basis(&self) -> &[Polynomial<O, C, E>] {
        &self.groebner_basis[..]
    }

    /// Monomial basis of the quotient, in the order of the coordinate axes.
    pub fn vector_basis(&self) -> &[Monomial<O, E>] {
        &self.vector_basis[..]
    }

    pub fn dimension(&self) -> usize {
        self.vector_basis.len()
    }

    pub fn num_vars(&self) -> usize {
        self.num_vars
    }

    pub fn config(&self) -> &RootFinderConfig {
        &self.config
    }

    /// Position of monomial in the vector basis.
    pub fn index_of(&self, monomial: &Monomial<O, E>) -> Option<usize> {
        self.index.get(monomial).copied()
    }

    /// The canonical representative of the coset of poly.
    pub fn remainder(&self, poly: Polynomial<O, C, E>) -> Polynomial<O, C, E> {
        self.reducer.reduce(poly, &self.groebner_basis)
    }

    /// Coordinate vector of the coset of an already reduced polynomial.
    ///
    /// Fails if some monomial of reduced_poly is not in the vector basis,
    /// which means the polynomial was not reduced.
    pub fn coordinates_of(
        &self,
        reduced_poly: &Polynomial<O, C, E>,
    ) -> Result<Vec<C>, QuotientError> {
        let mut coordinates = vec![C::zero(); self.dimension()];
        for term in reduced_poly.get_terms() {
            let idx = self.index_of(term.get_monomial()).ok_or_else(|| {
                QuotientError::CoordinateOutOfBasis {
                    monomial: term.get_monomial().to_string(),
                }
            })?;
            coordinates[idx] = term.get_coefficient().clone();
        }

        Ok(coordinates)
    }

    /// Matrix of the linear map "multiply by poly, then reduce" on the
    /// quotient. Column i is the coordinate vector of poly times the i-th
    /// vector basis monomial.
    pub fn multiplication_matrix(
        &self,
        poly: &Polynomial<O, C, E>,
    ) -> Result<DenseMatrix<C>, QuotientError> {
        check_num_vars(poly, self.num_vars)?;

        let dim = self.dimension();
        let mut matrix = DenseMatrix::zeros(dim, dim);

        for (i, monomial) in self.vector_basis.iter().enumerate() {
            let product = poly
                .checked_multiply_by_monomial(monomial)
                .ok_or_else(|| exponent_overflow(poly, monomial))?;
            let product = self.remainder(product);
            matrix.set_col(i, self.coordinates_of(&product)?);
        }

        debug!(
            "built {}x{} multiplication matrix of a polynomial with {} terms",
            dim,
            dim,
            poly.get_terms().len()
        );

        Ok(matrix)
    }

    /// One multiplication matrix per variable, in variable order.
    pub fn multiplication_matrices(&self) -> Result<Vec<DenseMatrix<C>>, QuotientError> {
        Polynomial::new_variables(self.num_vars)
            .iter()
            .map(|x| self.multiplication_matrix(x))
            .collect()
    }
}

/// Fails if some term of poly is not in a ring of num_vars variables.
fn check_num_vars<O, C, E>(
    poly: &Polynomial<O, C, E>,
    num_vars: usize,
) -> Result<(), QuotientError>
where
    O: Ordering,
    C: Scalar,
    E: Exponent,
{
    match poly
        .monomials_descending()
        .map(Monomial::num_vars)
        .find(|&n| n != num_vars)
    {
        Some(found) => Err(QuotientError::VariableCountMismatch {
            expected: num_vars,
            found,
        }),
        None => Ok(()),
    }
}

fn exponent_overflow<O, C, E>(
    poly: &Polynomial<O, C, E>,
    monomial: &Monomial<O, E>,
) -> QuotientError
where
    O: Ordering,
    C: Scalar,
    E: Exponent,
{
    let left = poly
        .monomials_descending()
        .find(|m| m.checked_mul(monomial).is_none())
        .map_or_else(String::new, ToString::to_string);

    QuotientError::ExponentOverflow {
        left,
        right: monomial.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use num_complex::Complex64;
    use num_rational::Rational64;
    use num_traits::Zero;

    use super::*;
    use crate::{
        field::{CommutativeRing, Field},
        polynomial::{
            monomial_ordering::{Grevlex, Lex},
            parser::parse_system,
        },
    };

    type Poly = Polynomial<Grevlex, f64, u32>;
    type Finder = RootFinder<Grevlex, f64, u32>;

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn m(exponents: &[u32]) -> Monomial<Grevlex, u32> {
        Monomial::new(exponents.to_vec())
    }

    fn finder(texts: &[&str], vars: &[&str]) -> Finder {
        init_logger();
        let basis = parse_system(texts, vars).unwrap();
        RootFinder::from_basis(basis, RootFinderConfig::default()).unwrap()
    }

    fn matrix(rows: &[&[f64]]) -> DenseMatrix<f64> {
        DenseMatrix::from_rows(rows.iter().map(|r| r.to_vec()).collect()).unwrap()
    }

    #[test]
    fn two_squares() {
        let rf = finder(&["x^2", "y^2"], &["x", "y"]);

        assert_eq!(rf.dimension(), 4);
        assert_eq!(rf.num_vars(), 2);
        assert_eq!(
            rf.vector_basis(),
            &[m(&[0, 0]), m(&[0, 1]), m(&[1, 0]), m(&[1, 1])]
        );

        // x maps 1 -> x, y -> x*y, and kills x and x*y.
        let mx = rf.multiplication_matrices().unwrap().remove(0);
        println!("M_x =\n{}", mx);
        assert_eq!(
            mx,
            matrix(&[
                &[0.0, 0.0, 0.0, 0.0],
                &[0.0, 0.0, 0.0, 0.0],
                &[1.0, 0.0, 0.0, 0.0],
                &[0.0, 1.0, 0.0, 0.0],
            ])
        );
    }

    #[test]
    fn two_point_variety() {
        // Roots (1, 1) and (2, 2).
        let rf = finder(&["y^2 - 3*y + 2", "x - y"], &["x", "y"]);

        assert_eq!(rf.vector_basis(), &[m(&[0, 0]), m(&[0, 1])]);

        let matrices = rf.multiplication_matrices().unwrap();
        let expected = matrix(&[&[0.0, -2.0], &[1.0, 3.0]]);
        assert_eq!(matrices[0], expected);
        assert_eq!(matrices[1], expected);

        // The eigenvalues are 1 and 2, so M^2 = 3M - 2.
        let mx = &matrices[0];
        assert_eq!(mx.trace(), 3.0);
        let mut rhs = DenseMatrix::zeros(2, 2);
        for i in 0..2 {
            for j in 0..2 {
                rhs[(i, j)] = 3.0 * mx[(i, j)];
            }
            rhs[(i, i)] -= 2.0;
        }
        assert!(mx.mm(mx).approx_eq(&rhs, 1e-12));
    }

    #[test]
    fn lex_shape_basis() {
        // x = y^2 - 1, y^3 = y: the variety is (-1, 0), (0, 1), (0, -1).
        let basis =
            parse_system::<Lex, f64, u32>(&["x - y^2 + 1", "y^3 - y"], &["x", "y"]).unwrap();
        let rf = RootFinder::from_basis(basis, RootFinderConfig::default()).unwrap();

        assert_eq!(rf.dimension(), 3);
        let matrices = rf.multiplication_matrices().unwrap();

        // Traces are the sums of the root coordinates.
        assert_eq!(matrices[0].trace(), -1.0);
        assert_eq!(matrices[1].trace(), 0.0);

        assert_eq!(
            matrices[0],
            matrix(&[&[-1.0, 0.0, 0.0], &[0.0, 0.0, 0.0], &[1.0, 0.0, 0.0]])
        );
    }

    #[test]
    fn coordinates_of_basis_monomials_are_unit_vectors() {
        // The cube roots of unity, with y = x^2.
        let rf = finder(&["x^2 - y", "x*y - 1", "y^2 - x"], &["x", "y"]);
        let dim = rf.dimension();
        assert_eq!(dim, 3);

        for (i, monomial) in rf.vector_basis().iter().enumerate() {
            let reduced = rf.remainder(Poly::new_monomial_term(1.0, monomial.clone()));
            let coordinates = rf.coordinates_of(&reduced).unwrap();

            let mut unit = vec![0.0; dim];
            unit[i] = 1.0;
            assert_eq!(coordinates, unit);
            assert_eq!(rf.index_of(monomial), Some(i));
        }
        assert_eq!(rf.index_of(&m(&[1, 1])), None);

        let matrices = rf.multiplication_matrices().unwrap();
        assert_eq!(matrices[0].trace(), 0.0);
        assert_eq!(matrices[1].trace(), 0.0);
    }

    #[test]
    fn columns_are_reduced_products() {
        let rf = finder(&["y^2 - 3*y + 2", "x - y"], &["x", "y"]);
        let p = parse_system::<Grevlex, f64, u32>(&["2*x*y - x + 5"], &["x", "y"])
            .unwrap()
            .remove(0);

        let mp = rf.multiplication_matrix(&p).unwrap();
        for (i, monomial) in rf.vector_basis().iter().enumerate() {
            let column = rf
                .coordinates_of(&rf.remainder(p.multiply_by_monomial(monomial)))
                .unwrap();
            assert_eq!(mp.col(i), column);
        }

        // p(1, 1) = 6 and p(2, 2) = 11.
        assert_eq!(mp.trace(), 17.0);
    }

    #[test]
    fn multiplication_matrices_commute() {
        // Basis of an ideal of four points: x^2 = 1, y^2 = y + 2 (roots y = 2, y = -1).
        let rf = finder(&["x^2 - 1", "y^2 - y - 2"], &["x", "y"]);
        assert_eq!(rf.dimension(), 4);

        let matrices = rf.multiplication_matrices().unwrap();
        let xy = matrices[0].mm(&matrices[1]);
        let yx = matrices[1].mm(&matrices[0]);
        assert!(xy.approx_eq(&yx, 1e-12));

        // Product of the operators is the operator of the product.
        let [x, y]: [Poly; 2] = Poly::new_variables(2).try_into().unwrap();
        let m_xy = rf.multiplication_matrix(&(x * y)).unwrap();
        assert!(m_xy.approx_eq(&xy, 1e-12));

        // x in {1, -1}, y in {2, -1}, each x paired with each y.
        assert_eq!(matrices[0].trace(), 0.0);
        assert_eq!(matrices[1].trace(), 2.0);
    }

    #[test]
    fn multiplying_by_a_constant_scales_identity() {
        let rf = finder(&["x^2 - 1", "y^2 - y - 2"], &["x", "y"]);

        let three = Poly::new_constant(2, 3.0);
        let m = rf.multiplication_matrix(&three).unwrap();
        let mut expected = DenseMatrix::identity(4);
        for i in 0..4 {
            expected[(i, i)] = 3.0;
        }
        assert_eq!(m, expected);

        let zero = rf.multiplication_matrix(&Poly::zero()).unwrap();
        assert_eq!(zero, DenseMatrix::zeros(4, 4));
    }

    #[test]
    fn unreduced_polynomial_has_no_coordinates() {
        let rf = finder(&["x^2", "y^2"], &["x", "y"]);

        let p = Poly::new_monomial_term(1.0, m(&[2, 0]));
        let err = rf.coordinates_of(&p).unwrap_err();
        assert_eq!(
            err,
            QuotientError::CoordinateOutOfBasis {
                monomial: "x0^2".to_string()
            }
        );
        assert!(!err.is_non_finite());

        assert!(rf.coordinates_of(&rf.remainder(p)).unwrap().iter().all(|c| c.is_zero()));
    }

    #[test]
    fn wrong_ring() {
        let rf = finder(&["x^2", "y^2"], &["x", "y"]);
        let p = Poly::new_variables(3).remove(0);
        assert_eq!(
            rf.multiplication_matrix(&p).unwrap_err(),
            QuotientError::VariableCountMismatch {
                expected: 2,
                found: 3
            }
        );
    }

    #[test]
    fn every_term_must_belong_to_the_ring() {
        // y^2 + 1, with the constant written with three variables.
        let basis = vec![
            Poly::from_terms([(1.0, m(&[2, 0])), (-1.0, m(&[0, 0]))]),
            Poly::from_terms([(1.0, m(&[0, 2])), (1.0, m(&[0, 0, 0]))]),
        ];
        let err = Finder::from_basis(basis, RootFinderConfig::default())
            .err()
            .unwrap();
        assert_eq!(
            err,
            QuotientError::VariableCountMismatch {
                expected: 2,
                found: 3
            }
        );

        let rf = finder(&["x^2", "y^2"], &["x", "y"]);
        let mixed = Poly::from_terms([(1.0, m(&[1, 0])), (1.0, m(&[0]))]);
        assert_eq!(
            rf.multiplication_matrix(&mixed).unwrap_err(),
            QuotientError::VariableCountMismatch {
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn products_must_fit_the_exponent_type() {
        type NarrowPoly = Polynomial<Grevlex, f64, u8>;
        let basis = vec![NarrowPoly::from_terms([
            (1.0, Monomial::new(vec![2])),
            (-1.0, Monomial::new(vec![0])),
        ])];
        let rf = RootFinder::from_basis(basis, RootFinderConfig::default()).unwrap();

        let high = NarrowPoly::new_monomial_term(1.0, Monomial::new(vec![255]));
        assert_eq!(
            rf.multiplication_matrix(&high).unwrap_err(),
            QuotientError::ExponentOverflow {
                left: "x0^255".to_string(),
                right: "x0".to_string()
            }
        );

        // Modulo x^2 - 1, x^254 = 1 and x^255 = x.
        let fits = NarrowPoly::new_monomial_term(1.0, Monomial::new(vec![254]));
        assert_eq!(
            rf.multiplication_matrix(&fits).unwrap(),
            DenseMatrix::identity(2)
        );
    }

    #[test]
    fn non_finite_ideals_are_rejected() {
        init_logger();

        let basis = parse_system::<Grevlex, f64, u32>(&["x^2 - y", "x*y"], &["x", "y"]).unwrap();
        // Under grevlex the leading terms are x^2 and x*y: y is free.
        let err = Finder::from_basis(basis, RootFinderConfig::default())
            .err()
            .unwrap();
        assert_eq!(err, QuotientError::NonFiniteIdeal { variable: 1 });
        assert!(err.is_non_finite());

        let err = Finder::from_basis(vec![Poly::zero()], RootFinderConfig::default())
            .err()
            .unwrap();
        assert_eq!(err, QuotientError::EmptyBasis);

        let err = Finder::from_basis(Vec::new(), RootFinderConfig::default())
            .err()
            .unwrap();
        assert_eq!(err, QuotientError::EmptyBasis);
    }

    #[test]
    fn complex_coefficients() {
        // x^2 + 1 has roots i and -i.
        type CPoly = Polynomial<Grevlex, Complex64, u32>;
        let basis = vec![CPoly::from_terms([
            (Complex64::new(1.0, 0.0), m(&[2])),
            (Complex64::new(1.0, 0.0), m(&[0])),
        ])];
        let rf = RootFinder::from_basis(basis, RootFinderConfig::default()).unwrap();
        assert_eq!(rf.dimension(), 2);

        let i_x = CPoly::new_monomial_term(Complex64::new(0.0, 1.0), m(&[1]));
        let mat = rf.multiplication_matrix(&i_x).unwrap();

        // i*x * 1 = i*x, i*x * x = i*x^2 = -i
        assert_eq!(mat[(0, 0)], Complex64::zero());
        assert_eq!(mat[(1, 0)], Complex64::new(0.0, 1.0));
        assert_eq!(mat[(0, 1)], Complex64::new(0.0, -1.0));
        assert_eq!(mat[(1, 1)], Complex64::zero());
    }

    impl CommutativeRing for Rational64 {}
    impl Field for Rational64 {}
    impl Scalar for Rational64 {
        fn magnitude(&self) -> f64 {
            (*self.numer() as f64 / *self.denom() as f64).abs()
        }
    }

    #[test]
    fn exact_rational_coefficients() {
        type QPoly = Polynomial<Grevlex, Rational64, u32>;
        let r = |n, d| Rational64::new(n, d);

        // 3y^2 - 2 and x - y/2: roots (±sqrt(2/3)/2, ±sqrt(2/3)).
        let basis = vec![
            QPoly::from_terms([(r(3, 1), m(&[0, 2])), (r(-2, 1), m(&[0, 0]))]),
            QPoly::from_terms([(r(1, 1), m(&[1, 0])), (r(-1, 2), m(&[0, 1]))]),
        ];
        let rf = RootFinder::from_basis(basis, RootFinderConfig::default()).unwrap();

        let mx = rf.multiplication_matrix(&QPoly::new_variables(2)[0]).unwrap();
        // x * 1 = y/2, x * y = y^2/2 = 1/3
        assert_eq!(mx.col(0), vec![r(0, 1), r(1, 2)]);
        assert_eq!(mx.col(1), vec![r(1, 3), r(0, 1)]);
        assert_eq!(mx.trace(), r(0, 1));
    }

    /// Stands in for a real Gröbner basis engine: answers with a known basis.
    struct KnownAnswer {
        basis: Vec<Poly>,
        reducer: DivisionReducer,
    }

    impl Reducer<Grevlex, f64, u32> for KnownAnswer {
        fn reduce(&self, poly: Poly, basis: &[Poly]) -> Poly {
            self.reducer.reduce(poly, basis)
        }
    }

    impl GroebnerCollaborator<Grevlex, f64, u32> for KnownAnswer {
        fn groebner_basis(&self, polynomials: Vec<Poly>) -> Result<Vec<Poly>, QuotientError> {
            if polynomials.is_empty() {
                return Err(QuotientError::BasisComputation("no input".to_string()));
            }
            Ok(self.basis.clone())
        }
    }

    #[test]
    fn from_polynomial_list_uses_the_collaborator() {
        init_logger();

        // x^2 - 3x + 2 and x - y generate the same ideal as the basis below.
        let input: Vec<Poly> = parse_system(&["x^2 - 3*x + 2", "x - y"], &["x", "y"]).unwrap();
        let collaborator = KnownAnswer {
            basis: parse_system(&["y^2 - 3*y + 2", "x - y"], &["x", "y"]).unwrap(),
            reducer: DivisionReducer::default(),
        };

        let rf = RootFinder::from_polynomial_list(
            input.clone(),
            collaborator,
            RootFinderConfig::default(),
        )
        .unwrap();
        assert_eq!(rf.dimension(), 2);
        assert_eq!(rf.groebner_basis().len(), 2);

        // The input polynomials are in the ideal.
        for p in input {
            assert!(rf.remainder(p).is_zero());
        }

        let failing = KnownAnswer {
            basis: Vec::new(),
            reducer: DivisionReducer::default(),
        };
        let err = RootFinder::from_polynomial_list(
            Vec::<Poly>::new(),
            failing,
            RootFinderConfig::default(),
        )
        .err()
            .unwrap();
        assert_eq!(err, QuotientError::BasisComputation("no input".to_string()));
    }

    #[test]
    fn custom_tolerance_reaches_the_reducer() {
        let basis = parse_system::<Grevlex, f64, u32>(&["x^2 - 1"], &["x"]).unwrap();
        let config = RootFinderConfig::default().with_zero_tolerance(1e-3);
        let rf = RootFinder::from_basis(basis, config).unwrap();
        assert_eq!(rf.config().zero_tolerance, 1e-3);

        // x^2 + 0.0001*x - 1 differs from the basis by a term below tolerance.
        let p = Poly::from_terms([(1.0, m(&[2])), (1e-4, m(&[1])), (-1.0, m(&[0]))]);
        assert!(rf.remainder(p).is_zero());
    }
}
