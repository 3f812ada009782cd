//! Reads polynomials written in the usual infix notation, like
//! `x^2*y - 3*x + 2.5`.
//!
//! Terms are products of literals and variables, each optionally raised to a
//! natural power. Variables are mapped to ring variables by their position in
//! the variable list given by the caller.

use std::{fmt::Display, str::FromStr};

use pest::{iterators::Pair, Parser};
use pest_derive::Parser;

use super::{monomial_ordering::Ordering, Exponent, Monomial, Polynomial};
use crate::{error::QuotientError, field::CommutativeRing};

#[derive(Parser)]
#[grammar = "polynomial/polynomial.pest"]
struct PolynomialParser;

/// Parses a polynomial over the given variables.
pub fn parse_polynomial<O, C, E>(
    text: &str,
    variables: &[&str],
) -> Result<Polynomial<O, C, E>, QuotientError>
where
    O: Ordering,
    C: CommutativeRing + FromStr,
    <C as FromStr>::Err: Display,
    E: Exponent,
{
    let polynomial = PolynomialParser::parse(Rule::polynomial, text)
        .map_err(|err| QuotientError::Parse(err.to_string()))?
        .next()
        .ok_or_else(|| QuotientError::Parse(format!("no polynomial in \"{}\"", text)))?;

    let mut terms = Vec::new();
    let mut minus = false;
    for pair in polynomial.into_inner() {
        match pair.as_rule() {
            Rule::sign => {
                minus = pair.as_str() == "-";
            }
            Rule::term => {
                let (mut coef, monomial) = parse_term(variables, pair)?;
                if minus {
                    let tmp = std::mem::replace(&mut coef, C::zero());
                    coef -= tmp;
                }
                terms.push((coef, monomial));
                minus = false;
            }
            Rule::EOI => (),
            _ => unreachable!("invalid grammar"),
        }
    }

    Ok(Polynomial::from_terms(terms))
}

/// Parses one polynomial per text, all over the same variables.
pub fn parse_system<O, C, E>(
    texts: &[&str],
    variables: &[&str],
) -> Result<Vec<Polynomial<O, C, E>>, QuotientError>
where
    O: Ordering,
    C: CommutativeRing + FromStr,
    <C as FromStr>::Err: Display,
    E: Exponent,
{
    texts
        .iter()
        .map(|text| parse_polynomial(text, variables))
        .collect()
}

fn parse_term<O, C, E>(
    variables: &[&str],
    term: Pair<'_, Rule>,
) -> Result<(C, Monomial<O, E>), QuotientError>
where
    C: CommutativeRing + FromStr,
    <C as FromStr>::Err: Display,
    E: Exponent,
{
    let text = term.as_str();
    let mut coef = C::one();
    let mut exponents = vec![E::zero(); variables.len()];

    for factor in term.into_inner() {
        let mut inner = factor.into_inner();
        let (base, power) = match (inner.next(), inner.next()) {
            (Some(base), power) => (base, power),
            (None, _) => unreachable!("invalid grammar"),
        };

        let power: u32 = match power {
            Some(power) => power.as_str().parse().map_err(|_| {
                QuotientError::Parse(format!("power \"{}\" is too large", power.as_str()))
            })?,
            None => 1,
        };

        match base.as_rule() {
            Rule::literal => {
                let lit: C = base.as_str().parse().map_err(|err| {
                    QuotientError::Parse(format!("bad literal \"{}\": {}", base.as_str(), err))
                })?;
                for _ in 0..power {
                    coef *= &lit;
                }
            }
            Rule::var => {
                let idx = variables
                    .iter()
                    .position(|v| *v == base.as_str())
                    .ok_or_else(|| {
                        QuotientError::Parse(format!(
                            "variable \"{}\" not defined in the variable list",
                            base.as_str()
                        ))
                    })?;

                exponents[idx] = <E as num_traits::NumCast>::from(power)
                    .and_then(|p| exponents[idx].checked_add(&p))
                    .ok_or_else(|| {
                        QuotientError::Parse(format!(
                            "exponent of \"{}\" overflows",
                            base.as_str()
                        ))
                    })?;
            }
            _ => unreachable!("invalid grammar"),
        }
    }

    let monomial = Monomial::checked_new(exponents).ok_or_else(|| {
        QuotientError::Parse(format!("total degree of \"{}\" overflows", text))
    })?;

    Ok((coef, monomial))
}
