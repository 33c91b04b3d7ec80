//! A finite formal sum of `(Monomial, PrimeField coefficient)` pairs.

use std::collections::BTreeMap;
use std::fmt;

use anyhow::{ensure, Result};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::monomial::Monomial;
use crate::prime_field::PrimeField;

/// A multivariate Laurent polynomial over `GF(p)`.
///
/// Canonical form: no term with a zero coefficient, and identical monomials
/// coalesced. `Zero` is the empty term map; `One` is the single term
/// `(Monomial::one(), PrimeField::one(p))`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Polynomial {
    terms: BTreeMap<Monomial, PrimeField>,
    char: u64,
}

impl Polynomial {
    pub fn zero(char: u64) -> Self {
        Polynomial {
            terms: BTreeMap::new(),
            char,
        }
    }

    pub fn one(char: u64) -> Self {
        Self::constant(1, char)
    }

    /// A constant polynomial, reduced mod `char`.
    pub fn constant(value: i64, char: u64) -> Self {
        let coef = PrimeField::new(value, char).expect("constant: invalid characteristic");
        let mut terms = BTreeMap::new();
        if !coef.is_zero() {
            terms.insert(Monomial::one(), coef);
        }
        Polynomial { terms, char }
    }

    /// The bare symbol `sym` (coefficient `1`).
    pub fn symbol(sym: impl Into<String>, char: u64) -> Self {
        Self::from_monomial(Monomial::symbol(sym, 1), char)
    }

    /// `monomial` as a single-term polynomial with coefficient `1`.
    pub fn from_monomial(monomial: Monomial, char: u64) -> Self {
        Self::single_term(monomial, PrimeField::one(char))
    }

    /// A single `(monomial, coefficient)` term as a polynomial. Canonicalizes to
    /// `Zero` when `coef` is zero.
    pub fn single_term(monomial: Monomial, coef: PrimeField) -> Self {
        let char = coef.char();
        let mut terms = BTreeMap::new();
        if !coef.is_zero() {
            terms.insert(monomial, coef);
        }
        Polynomial { terms, char }
    }

    pub fn char(&self) -> u64 {
        self.char
    }

    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn is_one(&self) -> bool {
        self.terms.len() == 1 && self.terms.get(&Monomial::one()) == Some(&PrimeField::one(self.char))
    }

    /// The number of non-zero terms.
    pub fn num_terms(&self) -> usize {
        self.terms.len()
    }

    pub fn terms(&self) -> &BTreeMap<Monomial, PrimeField> {
        &self.terms
    }

    /// All symbols appearing in any term.
    pub fn symbols(&self) -> std::collections::BTreeSet<String> {
        self.terms
            .keys()
            .flat_map(|m| m.symbols().map(String::from))
            .collect()
    }

    pub fn compat(&self, other: &Self) -> Result<()> {
        ensure!(
            self.char == other.char,
            "incompatible characteristics: {} != {}",
            self.char,
            other.char
        );
        Ok(())
    }

    fn from_terms(terms: BTreeMap<Monomial, PrimeField>, char: u64) -> Self {
        let terms = terms.into_iter().filter(|(_, c)| !c.is_zero()).collect();
        Polynomial { terms, char }
    }

    pub fn add(&self, other: &Self) -> Result<Self> {
        self.compat(other)?;
        let mut terms = self.terms.clone();
        for (m, c) in &other.terms {
            let entry = terms
                .entry(m.clone())
                .or_insert_with(|| PrimeField::zero(self.char));
            *entry = *entry + *c;
        }
        Ok(Self::from_terms(terms, self.char))
    }

    pub fn neg(&self) -> Self {
        let terms = self.terms.iter().map(|(m, c)| (m.clone(), -*c)).collect();
        Polynomial {
            terms,
            char: self.char,
        }
    }

    pub fn sub(&self, other: &Self) -> Result<Self> {
        self.add(&other.neg())
    }

    pub fn mul(&self, other: &Self) -> Result<Self> {
        self.compat(other)?;
        let mut terms: BTreeMap<Monomial, PrimeField> = BTreeMap::new();
        for (lm, lc) in &self.terms {
            for (rm, rc) in &other.terms {
                let m = lm.mul(rm);
                let c = *lc * *rc;
                let entry = terms.entry(m).or_insert_with(|| PrimeField::zero(self.char));
                *entry = *entry + c;
            }
        }
        Ok(Self::from_terms(terms, self.char))
    }

    /// `self^k`. `k == 0` yields `One`. Negative `k` requires `self` to have
    /// exactly one term (otherwise a Laurent inverse doesn't exist in this ring).
    pub fn pow(&self, k: i64) -> Result<Self> {
        if k == 0 {
            return Ok(Self::one(self.char));
        }
        if k < 0 {
            ensure!(
                self.terms.len() == 1,
                "unsupported: negative power of a multi-term polynomial"
            );
            let (m, c) = self.terms.iter().next().unwrap();
            let mut terms = BTreeMap::new();
            terms.insert(m.pow(k), c.pow(k)?);
            return Ok(Polynomial {
                terms,
                char: self.char,
            });
        }
        let mut acc = Self::one(self.char);
        for _ in 0..k {
            acc = acc.mul(self)?;
        }
        Ok(acc)
    }

    /// Parses the grammar in the module docs, over `GF(char)`.
    ///
    /// ```text
    /// poly   := term ("+" term)*
    /// term   := factor ("*" factor)*
    /// factor := NUMBER | SYMBOL ["^" INTEGER]
    /// ```
    pub fn parse(text: &str, char: u64) -> Result<Self> {
        let mut terms: BTreeMap<Monomial, PrimeField> = BTreeMap::new();
        for term_str in text.split('+') {
            let term_str = term_str.trim();
            if term_str.is_empty() {
                continue;
            }
            let mut monomial = Monomial::one();
            let mut coef = PrimeField::one(char);
            for factor_str in term_str.split('*') {
                let factor_str = factor_str.trim();
                ensure!(!factor_str.is_empty(), "malformed polynomial: empty factor in {text:?}");
                if factor_str.chars().all(|c| c.is_ascii_digit()) {
                    coef = coef * PrimeField::from_str_radix(factor_str, char, 10)?;
                    continue;
                }
                let (sym, exp) = match factor_str.split_once('^') {
                    Some((sym, exp)) => (sym.trim(), exp.trim().parse::<i64>()?),
                    None => (factor_str, 1),
                };
                ensure!(
                    !sym.is_empty() && sym.chars().next().unwrap().is_alphabetic(),
                    "malformed polynomial: invalid symbol {sym:?} in {text:?}"
                );
                if exp != 0 {
                    monomial = monomial.mul(&Monomial::symbol(sym, exp));
                }
            }
            if coef.is_zero() {
                continue;
            }
            let entry = terms
                .entry(monomial)
                .or_insert_with(|| PrimeField::zero(char));
            *entry = *entry + coef;
        }
        Ok(Self::from_terms(terms, char))
    }

    /// Canonical rendering: terms sorted by their monomial's canonical string;
    /// coefficient `1` omitted on non-trivial monomials; `"0"` for the zero
    /// polynomial.
    pub fn render(&self) -> String {
        if self.terms.is_empty() {
            return "0".to_string();
        }
        let mut rendered: Vec<(String, &Monomial, &PrimeField)> = self
            .terms
            .iter()
            .map(|(m, c)| (m.render(), m, c))
            .collect();
        rendered.sort_by(|a, b| a.0.cmp(&b.0));
        rendered
            .into_iter()
            .map(|(rendered_m, m, c)| {
                if m.is_one() {
                    format!("{c}")
                } else if c.value() == 1 {
                    rendered_m
                } else {
                    format!("{c}*{rendered_m}")
                }
            })
            .join("+")
    }
}

impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_renders_as_zero() {
        assert_eq!(Polynomial::zero(2).render(), "0");
    }

    #[test]
    fn addition_over_gf2() {
        let a = Polynomial::parse("a+b", 2).unwrap();
        let b = Polynomial::parse("b+c", 2).unwrap();
        let sum = a.add(&b).unwrap();
        assert_eq!(sum.render(), "a+c");
    }

    #[test]
    fn multiplication_over_gf2() {
        let a = Polynomial::parse("a+b", 2).unwrap();
        let b = Polynomial::parse("b+c", 2).unwrap();
        let prod = a.mul(&b).unwrap();
        assert_eq!(prod.render(), "a*b+a*c+b*c+b^2");
    }

    #[test]
    fn symbol_times_its_inverse_is_one() {
        let a = Polynomial::parse("a", 2).unwrap();
        let a_inv = a.pow(-1).unwrap();
        assert_eq!(a.mul(&a_inv).unwrap().render(), "1");
    }

    #[test]
    fn literal_two_parses_to_zero_mod_two() {
        let p = Polynomial::parse("2", 2).unwrap();
        assert!(p.is_zero());
    }

    #[test]
    fn numeric_factor_scales_coefficient() {
        let p = Polynomial::parse("1*2*3+a^2", 11).unwrap();
        assert_eq!(p.render(), "6+a^2");
    }

    #[test]
    fn round_trips_through_render() {
        for text in ["a+b", "a*b+a*c+b*c+b^2", "6+a^2", "a^-1", "0", "1"] {
            let p = Polynomial::parse(text, 11).unwrap();
            let roundtripped = Polynomial::parse(&p.render(), 11).unwrap();
            assert_eq!(p, roundtripped);
        }
    }

    #[test]
    fn negative_power_of_multiterm_is_error() {
        let p = Polynomial::parse("a+b", 11).unwrap();
        assert!(p.pow(-1).is_err());
    }

    #[test]
    fn sub_self_is_zero() {
        let p = Polynomial::parse("a+b^2*c^-3", 11).unwrap();
        assert!(p.sub(&p).unwrap().is_zero());
    }

    #[test]
    fn mul_by_one_is_identity() {
        let p = Polynomial::parse("a+b^2", 11).unwrap();
        let one = Polynomial::one(11);
        assert_eq!(p.mul(&one).unwrap(), p);
    }

    #[test]
    fn incompatible_characteristics_rejected() {
        let a = Polynomial::one(2);
        let b = Polynomial::one(3);
        assert!(a.add(&b).is_err());
    }

    #[test]
    fn gf2_addition_and_multiplication_identities() {
        // (lhs, rhs, lhs+rhs, lhs*rhs) over GF(2).
        let cases: &[(&str, &str, &str, &str)] = &[
            ("0", "0", "0", "0"),
            ("0", "1", "1", "0"),
            ("1", "0", "1", "0"),
            ("1", "1", "0", "1"),
            ("0", "a", "a", "0"),
            ("a", "0", "a", "0"),
            ("1", "a", "1+a", "a"),
            ("a", "1", "1+a", "a"),
            ("a", "a", "0", "a^2"),
            ("a", "b", "a+b", "a*b"),
            ("a+b", "b+c", "a+c", "a*b+a*c+b*c+b^2"),
            ("a", "a^-1", "a^-1+a", "1"),
            ("a^2", "a^-2", "a^-2+a^2", "1"),
            ("a+b", "a+b", "0", "a^2+b^2"),
            ("a+b+c", "a+b+c", "0", "a^2+b^2+c^2"),
            (
                "a*b^2+c",
                "a+a*b*c+b^-3",
                "a+a*b*c+a*b^2+b^-3+c",
                "a*b*c^2+a*b^-1+a*c+a^2*b^2+a^2*b^3*c+c*b^-3",
            ),
        ];
        for (lhs, rhs, sum, product) in cases {
            let l = Polynomial::parse(lhs, 2).unwrap();
            let r = Polynomial::parse(rhs, 2).unwrap();
            let expected_sum = Polynomial::parse(sum, 2).unwrap();
            let expected_product = Polynomial::parse(product, 2).unwrap();
            assert_eq!(l.add(&r).unwrap(), expected_sum, "{lhs} + {rhs}");
            assert_eq!(l.mul(&r).unwrap(), expected_product, "{lhs} * {rhs}");
        }
    }
}
