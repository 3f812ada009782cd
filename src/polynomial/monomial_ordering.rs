use itertools::{EitherOrBoth, Itertools};

use super::{Exponent, Monomial};
use std::cmp::Ordering as CmpOrd;

/// A monomial ordering, used as a type parameter of monomials and polynomials.
///
/// Variable 0 is the most significant variable in every ordering here.
pub trait Ordering: core::fmt::Debug + Clone + Eq + Ord {
    fn ord<E>(a: &Monomial<Self, E>, b: &Monomial<Self, E>) -> CmpOrd
    where
        E: Exponent;
}

/// Compares exponent tuples position by position, where a missing position
/// counts as exponent zero.
fn lex_cmp<E: Exponent>(a: &[E], b: &[E]) -> CmpOrd {
    for pair in a.iter().zip_longest(b.iter()) {
        let var_cmp = match pair {
            EitherOrBoth::Both(a, b) => a.cmp(b),
            EitherOrBoth::Left(a) => a.cmp(&E::zero()),
            EitherOrBoth::Right(b) => E::zero().cmp(b),
        };
        if var_cmp != CmpOrd::Equal {
            return var_cmp;
        }
    }

    CmpOrd::Equal
}

/// Lexicographical ordering.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Lex;

impl Ordering for Lex {
    fn ord<E>(a: &Monomial<Self, E>, b: &Monomial<Self, E>) -> CmpOrd
    where
        E: Exponent,
    {
        lex_cmp(a.exponents(), b.exponents())
    }
}

/// Graded lexicographical ordering.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Grlex;

impl Ordering for Grlex {
    fn ord<E>(a: &Monomial<Self, E>, b: &Monomial<Self, E>) -> CmpOrd
    where
        E: Exponent,
    {
        a.total_degree()
            .cmp(&b.total_degree())
            .then_with(|| lex_cmp(a.exponents(), b.exponents()))
    }
}

/// Graded reverse lexicographical ordering.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Grevlex;

impl Ordering for Grevlex {
    fn ord<E>(a: &Monomial<Self, E>, b: &Monomial<Self, E>) -> CmpOrd
    where
        E: Exponent,
    {
        match a.total_degree().cmp(&b.total_degree()) {
            CmpOrd::Equal => (),
            cmp => {
                return cmp;
            }
        }

        // On a tie, the monomial with the smaller exponent in the last
        // differing variable is the bigger one.
        let len = a.num_vars().max(b.num_vars());
        for var in (0..len).rev() {
            let var_cmp = b.exponent(var).cmp(&a.exponent(var));
            if var_cmp != CmpOrd::Equal {
                return var_cmp;
            }
        }

        CmpOrd::Equal
    }
}
