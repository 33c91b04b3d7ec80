//! Canonical product of `symbol -> integer exponent` factors, with negative
//! exponents permitted (a Laurent monomial).

use std::collections::BTreeMap;
use std::fmt;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// A Laurent monomial: a finite product of symbols raised to integer powers.
///
/// Canonical form drops any factor whose exponent is `0`; the empty monomial is
/// the multiplicative identity `1`. Backed by a `BTreeMap` so factors are always
/// iterated/rendered/hashed in sorted key order without a separate sort step.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Monomial {
    factors: BTreeMap<String, i64>,
}

impl Monomial {
    /// The monomial `1`.
    pub fn one() -> Self {
        Monomial {
            factors: BTreeMap::new(),
        }
    }

    /// A single symbol raised to `exp`. Canonicalizes away an `exp == 0`.
    pub fn symbol(sym: impl Into<String>, exp: i64) -> Self {
        let mut factors = BTreeMap::new();
        if exp != 0 {
            factors.insert(sym.into(), exp);
        }
        Monomial { factors }
    }

    pub fn is_one(&self) -> bool {
        self.factors.is_empty()
    }

    pub fn factors(&self) -> &BTreeMap<String, i64> {
        &self.factors
    }

    /// Exponent of `sym` in this monomial (`0` if absent).
    pub fn exponent(&self, sym: &str) -> i64 {
        self.factors.get(sym).copied().unwrap_or(0)
    }

    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.factors.keys().map(String::as_str)
    }

    /// Merges exponents by addition, dropping any that sum to `0`.
    pub fn mul(&self, other: &Self) -> Self {
        let mut factors = self.factors.clone();
        for (sym, exp) in &other.factors {
            let entry = factors.entry(sym.clone()).or_insert(0);
            *entry += exp;
            if *entry == 0 {
                factors.remove(sym);
            }
        }
        Monomial { factors }
    }

    /// Multiplies every exponent by `k`. `pow(0)` yields `1`.
    pub fn pow(&self, k: i64) -> Self {
        if k == 0 {
            return Self::one();
        }
        let factors = self
            .factors
            .iter()
            .map(|(sym, exp)| (sym.clone(), exp * k))
            .collect();
        Monomial { factors }
    }

    /// `self / other`, i.e. multiplication by `other` with exponents negated.
    pub fn div(&self, other: &Self) -> Self {
        self.mul(&other.pow(-1))
    }

    /// Canonical rendering: factors in key order, `sym` when `exp == 1`, else
    /// `sym^exp`; `"1"` for the empty monomial.
    pub fn render(&self) -> String {
        if self.factors.is_empty() {
            return "1".to_string();
        }
        self.factors
            .iter()
            .map(|(sym, exp)| {
                if *exp == 1 {
                    sym.clone()
                } else {
                    format!("{sym}^{exp}")
                }
            })
            .join("*")
    }
}

impl fmt::Display for Monomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render())
    }
}
