//! Extracts the largest monomial dividing every term of a polynomial.
//!
//! Ported from `extract_common_factor` in `ievalg/common_factor.py`, which built
//! the factor from the per-symbol minimum exponent across all terms and divided
//! it out via `m2_pow(cf, -1)`; this is the same computation expressed directly
//! against [`Monomial`]/[`Polynomial`] instead of the raw tuple representation.

use anyhow::Result;

use crate::monomial::Monomial;
use crate::polynomial::Polynomial;

/// Returns `(cf, g)` with `cf` a single monomial (coefficient `1`) and `g` such
/// that `cf * g == f`. `cf == 1` whenever `f` is `0`, `1`, or has a single term.
pub fn extract_common_factor(f: &Polynomial) -> Result<(Polynomial, Polynomial)> {
    if f.is_zero() || f.is_one() || f.num_terms() == 1 {
        return Ok((Polynomial::one(f.char()), f.clone()));
    }

    let mut symbol_sets = f.terms().keys().map(|m| {
        m.factors().keys().cloned().collect::<std::collections::BTreeSet<_>>()
    });
    let common: std::collections::BTreeSet<String> = symbol_sets
        .next()
        .map(|first| {
            symbol_sets.fold(first, |acc, s| acc.intersection(&s).cloned().collect())
        })
        .unwrap_or_default();

    let mut cf = Monomial::one();
    for sym in &common {
        let min_exp = f
            .terms()
            .keys()
            .map(|m| m.exponent(sym))
            .min()
            .expect("f has at least one term here");
        cf = cf.mul(&Monomial::symbol(sym.clone(), min_exp));
    }

    let cf_poly = Polynomial::from_monomial(cf.clone(), f.char());
    let g = f.mul(&Polynomial::from_monomial(cf.pow(-1), f.char()))?;
    Ok((cf_poly, g))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cf(text: &str, char: u64) -> (String, String) {
        let p = Polynomial::parse(text, char).unwrap();
        let (cf, g) = extract_common_factor(&p).unwrap();
        (cf.render(), g.render())
    }

    #[test]
    fn zero_has_trivial_factor() {
        assert_eq!(cf("0", 2), ("1".to_string(), "0".to_string()));
    }

    #[test]
    fn no_common_symbol_is_trivial() {
        assert_eq!(cf("a^2+b^2", 2), ("1".to_string(), "a^2+b^2".to_string()));
    }

    #[test]
    fn extracts_shared_symbol() {
        assert_eq!(cf("a^2+a*b^2", 2), ("a".to_string(), "a+b^2".to_string()));
    }

    #[test]
    fn extracts_with_negative_exponents() {
        assert_eq!(
            cf("a^2*c^-5+a*b^2*c^3", 2),
            ("a*c^-5".to_string(), "a+b^2*c^8".to_string())
        );
    }

    #[test]
    fn recombines_to_original() {
        let p = Polynomial::parse("a^2*c^-5+a*b^2*c^3", 11).unwrap();
        let (cf, g) = extract_common_factor(&p).unwrap();
        assert_eq!(cf.mul(&g).unwrap(), p);
    }
}
