//! The three equation classifiers applied, in order, to the equation set: direct
//! isolation (`resolve_eq`), zero-group branching (`check_zero_group`), and
//! linear free-term branching (`check_linear`). §4.7.3.

use std::collections::BTreeMap;

use crate::error::MabError;
use crate::mab::symbol::is_variable;
use crate::monomial::Monomial;
use crate::polynomial::Polynomial;
use crate::prime_field::PrimeField;

/// Attempts direct isolation of `e`'s single variable. Returns:
/// - `Err(Contradiction)` if `e` has no variable symbol at all (it is then a
///   purely-constant non-zero equation, `0 != 0`);
/// - `Ok(None)` if more than one variable occurs, or the single variable occurs
///   with anything other than exactly one exponent-`1` term and no higher power;
/// - `Ok(Some((v, value)))` with the polynomial `v` is forced to take.
pub fn resolve_eq(e: &Polynomial) -> Result<Option<(String, Polynomial)>, MabError> {
    let variables: Vec<String> = e
        .symbols()
        .into_iter()
        .filter(|s| is_variable(s))
        .collect();

    if variables.is_empty() {
        return Err(MabError::Contradiction(format!(
            "equation `{e} = 0` has no variable to resolve"
        )));
    }
    if variables.len() > 1 {
        return Ok(None);
    }
    let v = &variables[0];

    let mut selected: Option<(Monomial, PrimeField)> = None;
    let mut exponent_one_count = 0;
    for (m, c) in e.terms() {
        match m.exponent(v) {
            0 => {}
            1 => {
                exponent_one_count += 1;
                selected = Some((m.clone(), *c));
            }
            _ => return Ok(None),
        }
    }
    if exponent_one_count != 1 {
        return Ok(None);
    }
    let (v_monomial, v_coef) = selected.expect("exponent_one_count == 1 implies a selected term");

    let v_term = Polynomial::single_term(v_monomial.clone(), v_coef);
    let rest = e
        .sub(&v_term)
        .expect("same characteristic by construction");
    let without_v = v_monomial.div(&Monomial::symbol(v.clone(), 1));
    let denom = Polynomial::single_term(without_v, v_coef);
    let denom_inv = denom
        .pow(-1)
        .expect("single-term polynomial always has a Laurent inverse");
    let value = rest
        .neg()
        .mul(&denom_inv)
        .expect("same characteristic by construction");

    Ok(Some((v.clone(), value)))
}

/// If `e` has exactly one term and that term names at least two variable
/// symbols, returns those symbols sorted.
pub fn check_zero_group(e: &Polynomial) -> Option<Vec<String>> {
    if e.num_terms() != 1 {
        return None;
    }
    let (monomial, _) = e.terms().iter().next().unwrap();
    let mut vars: Vec<String> = monomial
        .symbols()
        .filter(|s| is_variable(s))
        .map(String::from)
        .collect();
    if vars.len() < 2 {
        return None;
    }
    vars.sort();
    Some(vars)
}

/// A linear-branch candidate: `v` appears in term `t` with exponent exactly `1`
/// and is the only variable symbol in `t`; `free_members` are `e`'s terms that
/// contain no variable symbol at all.
pub struct LinearCandidate {
    pub var: String,
    pub free_members: Vec<Polynomial>,
}

/// One candidate per qualifying term of `e` (§4.7.3: "multiple terms may
/// qualify; one per term is produced").
pub fn check_linear(e: &Polynomial) -> Vec<LinearCandidate> {
    let free_members: Vec<Polynomial> = e
        .terms()
        .iter()
        .filter(|(m, _)| m.symbols().all(|s| !is_variable(s)))
        .map(|(m, c)| Polynomial::single_term(m.clone(), *c))
        .collect();

    let mut candidates = Vec::new();
    for (monomial, _) in e.terms() {
        let vars_in_term: Vec<&str> = monomial.symbols().filter(|s| is_variable(s)).collect();
        if vars_in_term.len() == 1 && monomial.exponent(vars_in_term[0]) == 1 {
            candidates.push(LinearCandidate {
                var: vars_in_term[0].to_string(),
                free_members: free_members.clone(),
            });
        }
    }
    candidates
}

/// Applies `resolve_eq` to every equation, batching the results. Raises
/// `Contradiction` if any single equation does, or if two equations propose
/// conflicting values for the same variable.
pub fn resolve_all(equations: &[Polynomial]) -> Result<BTreeMap<String, Polynomial>, MabError> {
    let mut resolved: BTreeMap<String, Polynomial> = BTreeMap::new();
    for e in equations {
        if let Some((v, value)) = resolve_eq(e)? {
            if let Some(existing) = resolved.get(&v) {
                if *existing != value {
                    return Err(MabError::Contradiction(format!(
                        "conflicting resolutions for {v}: {existing} vs {value}"
                    )));
                }
            } else {
                resolved.insert(v, value);
            }
        }
    }
    Ok(resolved)
}
