pub mod division;
pub mod monomial_ordering;
pub mod parser;

use crate::{error::QuotientError, field::CommutativeRing, ordered_ops};
use monomial_ordering::Ordering;
use std::{cmp::Ordering as CmpOrd, fmt::Write, hash::Hash, marker::PhantomData};

pub trait Exponent:
    core::fmt::Debug + core::fmt::Display + Hash + num_traits::PrimInt + num_traits::Unsigned
{
}

impl<T> Exponent for T where
    T: core::fmt::Debug + core::fmt::Display + Hash + num_traits::PrimInt + num_traits::Unsigned
{
}

/// A product of variables, stored as one exponent per variable of the ring.
///
/// Variable 0 is the first entry of the exponent tuple. Two monomials are only
/// comparable if they belong to the same ring, i.e. have the same number of
/// variables.
#[derive(Debug)]
pub struct Monomial<O: ?Sized, E> {
    exponents: Vec<E>,
    total_degree: E,
    _phantom_ordering: PhantomData<O>,
}

impl<O, E: Exponent> Monomial<O, E> {
    /// Creates a monomial from its exponents. A total degree that does not
    /// fit in E saturates at E::max_value(), see [`Monomial::checked_new`].
    pub fn new(exponents: Vec<E>) -> Self {
        let total_degree = exponents
            .iter()
            .fold(E::zero(), |acc, e| acc.saturating_add(*e));
        Self {
            exponents,
            total_degree,
            _phantom_ordering: PhantomData,
        }
    }

    /// Like [`Monomial::new`], but None if the total degree overflows E.
    pub fn checked_new(exponents: Vec<E>) -> Option<Self> {
        let total_degree = exponents
            .iter()
            .try_fold(E::zero(), |acc, e| acc.checked_add(e))?;
        Some(Self {
            exponents,
            total_degree,
            _phantom_ordering: PhantomData,
        })
    }

    /// The constant monomial, with every exponent zero.
    pub fn one(num_vars: usize) -> Self {
        Self::new(vec![E::zero(); num_vars])
    }

    /// The monomial x_var^power in a ring of num_vars variables.
    ///
    /// # Panics
    ///
    /// Panics if var is not less than num_vars.
    pub fn variable(num_vars: usize, var: usize, power: E) -> Self {
        let mut exponents = vec![E::zero(); num_vars];
        exponents[var] = power;
        Self::new(exponents)
    }

    pub fn num_vars(&self) -> usize {
        self.exponents.len()
    }

    pub fn exponents(&self) -> &[E] {
        &self.exponents[..]
    }

    /// Exponent of the given variable, zero if the variable is not in the ring.
    pub fn exponent(&self, var: usize) -> E {
        self.exponents.get(var).copied().unwrap_or_else(E::zero)
    }

    pub fn total_degree(&self) -> E {
        self.total_degree
    }

    pub fn is_one(&self) -> bool {
        self.total_degree.is_zero()
    }

    /// Tells if self divides other, i.e. every exponent of other is at least
    /// the corresponding exponent of self.
    pub fn divides(&self, other: &Self) -> bool {
        self.exponents.len() == other.exponents.len()
            && self
                .exponents
                .iter()
                .zip(other.exponents.iter())
                .all(|(d, m)| d <= m)
    }

    /// Tells if no variable other than var has a nonzero exponent. The constant
    /// monomial is a pure power of every variable.
    pub fn is_pure_power_of(&self, var: usize) -> bool {
        self.exponents
            .iter()
            .enumerate()
            .all(|(idx, e)| idx == var || e.is_zero())
    }

    pub fn whole_division(mut self: Self, divisor: &Self) -> Option<Self> {
        if !divisor.divides(&self) {
            return None;
        }

        for (e, d) in self.exponents.iter_mut().zip(divisor.exponents.iter()) {
            *e = *e - *d;
        }

        Some(Self::new(self.exponents))
    }

    /// Product of two monomials of the same ring, None if some exponent or the
    /// total degree overflows E.
    pub fn checked_mul(&self, rhs: &Self) -> Option<Self> {
        if self.exponents.len() != rhs.exponents.len() {
            return None;
        }

        let exponents = self
            .exponents
            .iter()
            .zip(rhs.exponents.iter())
            .map(|(e, r)| e.checked_add(r))
            .collect::<Option<Vec<E>>>()?;
        Self::checked_new(exponents)
    }
}

/// Exponents saturate at E::max_value(). Use [`Monomial::checked_mul`] where
/// overflow must be detected.
impl<O, E: Exponent> std::ops::Mul<&Monomial<O, E>> for Monomial<O, E> {
    type Output = Self;

    fn mul(mut self, rhs: &Self) -> Self {
        debug_assert_eq!(self.exponents.len(), rhs.exponents.len());
        for (e, r) in self.exponents.iter_mut().zip(rhs.exponents.iter()) {
            *e = e.saturating_add(*r);
        }
        self.total_degree = self.total_degree.saturating_add(rhs.total_degree);
        self
    }
}

impl<O, E: Clone> Clone for Monomial<O, E> {
    fn clone(&self) -> Self {
        Self {
            exponents: self.exponents.clone(),
            total_degree: self.total_degree.clone(),
            _phantom_ordering: PhantomData,
        }
    }
}

// Not derived because total_degree is redundant, and the ordering marker must
// not take part in the comparison.
impl<O, E: PartialEq> PartialEq for Monomial<O, E> {
    fn eq(&self, other: &Self) -> bool {
        self.exponents == other.exponents
    }
}

impl<O, E: Eq> Eq for Monomial<O, E> {}

impl<O, E: Hash> Hash for Monomial<O, E> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.exponents.hash(state);
    }
}

impl<O, E> Ord for Monomial<O, E>
where
    O: Ordering,
    E: Exponent,
{
    fn cmp(&self, other: &Self) -> CmpOrd {
        O::ord(self, other)
    }
}

impl<O, E> PartialOrd for Monomial<O, E>
where
    O: Ordering,
    E: Exponent,
{
    fn partial_cmp(&self, other: &Self) -> Option<CmpOrd> {
        Some(O::ord(self, other))
    }
}

#[derive(Debug)]
pub struct Term<O, C, E> {
    coefficient: C,
    monomial: Monomial<O, E>,
}

impl<O, C, E> Term<O, C, E> {
    pub fn new(coefficient: C, monomial: Monomial<O, E>) -> Self {
        Self {
            coefficient,
            monomial,
        }
    }

    pub fn get_coefficient(&self) -> &C {
        &self.coefficient
    }

    pub fn get_monomial(&self) -> &Monomial<O, E> {
        &self.monomial
    }
}

impl<O, C: Clone, E: Clone> Clone for Term<O, C, E> {
    fn clone(&self) -> Self {
        Self {
            coefficient: self.coefficient.clone(),
            monomial: self.monomial.clone(),
        }
    }
}

impl<O, C: PartialEq, E: PartialEq> PartialEq for Term<O, C, E> {
    fn eq(&self, other: &Self) -> bool {
        self.coefficient == other.coefficient && self.monomial == other.monomial
    }
}

impl<O, C, E> std::ops::Mul for Term<O, C, E>
where
    C: CommutativeRing,
    E: Exponent,
{
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        let mut coefficient = self.coefficient;
        coefficient *= &rhs.coefficient;

        Self {
            coefficient,
            monomial: self.monomial * &rhs.monomial,
        }
    }
}

#[derive(Debug)]
pub struct Polynomial<O, C, E> {
    // Terms are sorted in decreasing order of monomials
    terms: Vec<Term<O, C, E>>,
}

impl<O, C, E> Polynomial<O, C, E>
where
    O: Ordering,
    C: CommutativeRing,
    E: Exponent,
{
    /// The polynomials x_0, ..., x_{n-1} of a ring with n variables.
    pub fn new_variables(num_vars: usize) -> Vec<Self> {
        (0..num_vars)
            .map(|var| {
                Self::new_monomial_term(C::one(), Monomial::variable(num_vars, var, E::one()))
            })
            .collect()
    }

    pub fn new_monomial_term(coefficient: C, monomial: Monomial<O, E>) -> Self {
        Self {
            terms: if coefficient.is_zero() {
                Vec::new()
            } else {
                vec![Term::new(coefficient, monomial)]
            },
        }
    }

    pub fn new_constant(num_vars: usize, value: C) -> Self {
        Self::new_monomial_term(value, Monomial::one(num_vars))
    }

    /// Builds a polynomial from terms in any order. Terms with the same
    /// monomial are added together, and zero terms are dropped.
    pub fn from_terms(terms: impl IntoIterator<Item = (C, Monomial<O, E>)>) -> Self {
        let mut collected = std::collections::BTreeMap::new();
        for (coefficient, monomial) in terms {
            accumulate(&mut collected, monomial, coefficient);
        }

        Self::from_sorted_map(collected)
    }

    fn from_sorted_map(map: std::collections::BTreeMap<Monomial<O, E>, C>) -> Self {
        let terms = map
            .into_iter()
            .rev()
            .map(|(monomial, coefficient)| Term {
                coefficient,
                monomial,
            })
            .collect();
        Self { terms }
    }

    pub fn get_terms(&self) -> &[Term<O, C, E>] {
        &self.terms[..]
    }

    /// The greatest monomial under the ordering, None for the zero polynomial.
    pub fn leading_term(&self) -> Option<&Monomial<O, E>> {
        self.terms.first().map(|t| &t.monomial)
    }

    pub fn leading_coefficient(&self) -> Option<&C> {
        self.terms.first().map(|t| &t.coefficient)
    }

    /// Coefficient of the given monomial, zero if it is not present.
    pub fn coefficient_of(&self, monomial: &Monomial<O, E>) -> C {
        match self.terms.binary_search_by(|t| monomial.cmp(&t.monomial)) {
            Ok(idx) => self.terms[idx].coefficient.clone(),
            Err(_) => C::zero(),
        }
    }

    pub fn monomials_descending(&self) -> impl Iterator<Item = &Monomial<O, E>> {
        self.terms.iter().map(|t| &t.monomial)
    }

    /// Number of variables of the ring, None for the zero polynomial.
    pub fn num_vars(&self) -> Option<usize> {
        self.leading_term().map(Monomial::num_vars)
    }

    pub fn multiply_by_monomial(&self, monomial: &Monomial<O, E>) -> Self {
        // Monomial orderings are compatible with multiplication, so the terms
        // stay sorted.
        Self {
            terms: self
                .terms
                .iter()
                .map(|t| Term {
                    coefficient: t.coefficient.clone(),
                    monomial: t.monomial.clone() * monomial,
                })
                .collect(),
        }
    }

    /// Like [`Polynomial::multiply_by_monomial`], but None if some product
    /// overflows the exponent type.
    pub fn checked_multiply_by_monomial(&self, monomial: &Monomial<O, E>) -> Option<Self> {
        let terms = self
            .terms
            .iter()
            .map(|t| {
                Some(Term {
                    coefficient: t.coefficient.clone(),
                    monomial: t.monomial.checked_mul(monomial)?,
                })
            })
            .collect::<Option<Vec<_>>>()?;
        Some(Self { terms })
    }

    pub fn is_constant(&self) -> bool {
        match self.terms.first() {
            None => true,
            Some(t) => t.monomial.is_one(),
        }
    }

    /// Evaluates the polynomial at the given point, one value per variable.
    pub fn evaluate(&self, point: &[C]) -> Result<C, QuotientError> {
        let mut sum = C::zero();
        for term in self.terms.iter() {
            if term.monomial.num_vars() != point.len() {
                return Err(QuotientError::VariableCountMismatch {
                    expected: point.len(),
                    found: term.monomial.num_vars(),
                });
            }

            let mut value = term.coefficient.clone();
            for (x, e) in point.iter().zip(term.monomial.exponents.iter()) {
                let mut e = *e;
                while !e.is_zero() {
                    value *= x;
                    e = e - E::one();
                }
            }
            sum += value;
        }

        Ok(sum)
    }

    pub(crate) fn sum_terms(
        a: impl Iterator<Item = Term<O, C, E>>,
        b: impl Iterator<Item = Term<O, C, E>>,
        output: &mut Vec<Term<O, C, E>>,
    ) {
        ordered_ops::sum(
            a,
            b,
            |x, y| y.monomial.cmp(&x.monomial),
            |mut x, y| {
                x.coefficient += y.coefficient;
                if x.coefficient.is_zero() {
                    None
                } else {
                    Some(x)
                }
            },
            output,
        )
    }
}

fn accumulate<O, C, E>(
    map: &mut std::collections::BTreeMap<Monomial<O, E>, C>,
    monomial: Monomial<O, E>,
    coefficient: C,
) where
    O: Ordering,
    C: CommutativeRing,
    E: Exponent,
{
    match map.entry(monomial) {
        std::collections::btree_map::Entry::Vacant(e) => {
            if !coefficient.is_zero() {
                e.insert(coefficient);
            }
        }
        std::collections::btree_map::Entry::Occupied(mut e) => {
            *e.get_mut() += coefficient;
            if e.get().is_zero() {
                e.remove();
            }
        }
    }
}

impl<O, C: Clone, E: Clone> Clone for Polynomial<O, C, E> {
    fn clone(&self) -> Self {
        Self {
            terms: self.terms.clone(),
        }
    }
}

impl<O, C: PartialEq, E: PartialEq> PartialEq for Polynomial<O, C, E> {
    fn eq(&self, rhs: &Self) -> bool {
        self.terms == rhs.terms
    }
}

impl<O, C: Eq, E: Eq> Eq for Polynomial<O, C, E> {}

impl<O, C, E> num_traits::Zero for Polynomial<O, C, E>
where
    O: Ordering,
    C: CommutativeRing,
    E: Exponent,
{
    fn zero() -> Self {
        Polynomial { terms: Vec::new() }
    }

    fn is_zero(&self) -> bool {
        // For safety, test the non-normalized case:
        self.terms.iter().all(|t| t.coefficient.is_zero())
    }
}

impl<O, C, E> std::ops::Add for Polynomial<O, C, E>
where
    O: Ordering,
    C: CommutativeRing,
    E: Exponent,
{
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        let mut terms = Vec::new();
        Self::sum_terms(self.terms.into_iter(), rhs.terms.into_iter(), &mut terms);
        Self { terms }
    }
}

impl<O, C, E> std::ops::Neg for Polynomial<O, C, E>
where
    C: CommutativeRing,
{
    type Output = Self;

    fn neg(mut self) -> Self {
        for term in self.terms.iter_mut() {
            let tmp = std::mem::replace(&mut term.coefficient, C::zero());
            term.coefficient -= tmp;
        }
        self
    }
}

impl<O, C, E> std::ops::Sub for Polynomial<O, C, E>
where
    O: Ordering,
    C: CommutativeRing,
    E: Exponent,
{
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self + (-rhs)
    }
}

impl<O, C, E> std::ops::Mul for &Polynomial<O, C, E>
where
    O: Ordering,
    C: CommutativeRing,
    E: Exponent,
{
    type Output = Polynomial<O, C, E>;

    fn mul(self, rhs: &Polynomial<O, C, E>) -> Self::Output {
        let mut new_terms = std::collections::BTreeMap::new();

        let (outer, inner) = if self.terms.len() > rhs.terms.len() {
            (&rhs.terms, &self.terms)
        } else {
            (&self.terms, &rhs.terms)
        };

        for a in outer {
            for b in inner {
                let new_term = a.clone() * b.clone();
                accumulate(&mut new_terms, new_term.monomial, new_term.coefficient);
            }
        }

        Polynomial::from_sorted_map(new_terms)
    }
}

impl<O, C, E> std::ops::Mul for Polynomial<O, C, E>
where
    O: Ordering,
    C: CommutativeRing,
    E: Exponent,
{
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        &self * &rhs
    }
}

impl<O, C, E> std::ops::Mul<C> for &Polynomial<O, C, E>
where
    O: Ordering,
    C: CommutativeRing,
    E: Exponent,
{
    type Output = Polynomial<O, C, E>;

    fn mul(self, rhs: C) -> Self::Output {
        if rhs.is_zero() {
            return Polynomial { terms: Vec::new() };
        }

        Polynomial {
            terms: self
                .terms
                .iter()
                .filter_map(|t| {
                    let mut coefficient = t.coefficient.clone();
                    coefficient *= &rhs;
                    (!coefficient.is_zero()).then(|| Term {
                        coefficient,
                        monomial: t.monomial.clone(),
                    })
                })
                .collect(),
        }
    }
}

impl<O, E: Exponent> std::fmt::Display for Monomial<O, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut vars = self
            .exponents
            .iter()
            .enumerate()
            .filter(|(_, e)| !e.is_zero());

        let mut v = match vars.next() {
            Some(v) => v,
            None => return f.write_char('1'),
        };
        loop {
            write!(f, "x{}", v.0)?;
            if !v.1.is_one() {
                write!(f, "^{}", v.1)?;
            }
            v = if let Some(v) = vars.next() {
                v
            } else {
                break;
            };
            f.write_char('*')?;
        }
        Ok(())
    }
}

impl<O, C, E> std::fmt::Display for Term<O, C, E>
where
    C: CommutativeRing + std::fmt::Display,
    E: Exponent,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.monomial.is_one() {
            return std::fmt::Display::fmt(&self.coefficient, f);
        }

        if !self.coefficient.is_one() {
            std::fmt::Display::fmt(&self.coefficient, f)?;
            f.write_char('*')?;
        }
        std::fmt::Display::fmt(&self.monomial, f)
    }
}

impl<O, C, E> std::fmt::Display for Polynomial<O, C, E>
where
    C: CommutativeRing + std::fmt::Display,
    E: Exponent,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut iter = self.terms.iter();
        match iter.next() {
            None => {
                f.write_char('0')?;
                return Ok(());
            }
            Some(t) => {
                std::fmt::Display::fmt(t, f)?;
            }
        }

        for t in iter {
            write!(f, " + {}", t)?;
        }

        Ok(())
    }
}
