//! Generates and solves MAB problems: find unit upper-triangular `A`, `B` with
//! `A·A = I`, `B·B = I`, `A·B = M` for a prescribed sub-diagonal zero pattern.

mod classify;
mod equations;
mod state;
mod symbol;

use std::collections::{BTreeMap, BTreeSet};

use anyhow::{ensure, Result};
use log::{debug, info, trace};

use crate::error::{is_search_error, MabError};
use crate::polynomial::Polynomial;
use crate::subconj::subconj;
use crate::ut::UT;

pub use classify::{check_linear, check_zero_group, resolve_eq, LinearCandidate};
pub use state::SolverState;
pub use symbol::{classify, is_variable, SymbolClass};

/// Builds the abstract `M` (mask applied to the first sub-diagonal), derives
/// `L = subconj(M)`, and returns the `(P_zero, P_nz)` permission sets. §4.7.1.
///
/// `mask[i]` (`i = 0..rank-2`) sets `M[i+2, i+1]`: `false` forces that cell to
/// the polynomial `0`; `true` forces it to the polynomial `1` (not the free
/// symbol `m{i+2}{i+1}`) — this matches `ievalg.mab.gen_mab_problem` exactly and
/// is not a reinterpretation (spec.md §9).
pub fn gen_mab_problem(
    rank: usize,
    mask: &[bool],
    char: u64,
) -> Result<(BTreeSet<String>, BTreeSet<String>)> {
    ensure!(
        mask.len() == rank - 1,
        "mask length must be rank - 1 = {}, got {}",
        rank - 1,
        mask.len()
    );
    info!("generating MAB problem for rank {rank}, mask {mask:?}");

    let m = UT::new(rank, char, |i, j| {
        for (idx, &bit) in mask.iter().enumerate() {
            let (row, col) = (idx + 2, idx + 1);
            if (i, j) == (row, col) {
                return Polynomial::constant(bit as i64, char);
            }
        }
        Polynomial::symbol(format!("m{i}{j}"), char)
    })?;

    let l = subconj(&m)?;

    let mut p_zero = BTreeSet::new();
    let mut p_nz = BTreeSet::new();
    for (i, j) in l.lower_cells() {
        let v = l.get(i, j)?;
        let name = format!("m{i}{j}");
        if v.is_zero() {
            debug!("permission: {name} == 0");
            p_zero.insert(name);
        } else if i == j + 1 {
            debug!("permission: {name} != 0");
            p_nz.insert(name);
        }
    }
    Ok((p_zero, p_nz))
}

/// Cooperative cancellation hook polled between branch attempts.
pub trait ShouldStop {
    fn should_stop(&self) -> bool;
}

impl<F: Fn() -> bool> ShouldStop for F {
    fn should_stop(&self) -> bool {
        self()
    }
}

struct NeverStop;
impl ShouldStop for NeverStop {
    fn should_stop(&self) -> bool {
        false
    }
}

/// Explores the constraint tree for a witness `(A, B)`.
///
/// Classifiers are tried in the fixed order `resolve_eq` (batched, deterministic)
/// -> `check_zero_group` (branches on a zero-group, falling through to the next
/// strategy only once every group/variable in it has been exhausted) ->
/// `check_linear` (same). A leaf that exhausts all three raises
/// `MabError::CouldNotSolve`; `resolve_eq` observing an unresolvable equation
/// raises `MabError::Contradiction`. Both propagate to the top-level caller only
/// once every branch at the root has been exhausted.
pub fn mab_solve(
    rank: usize,
    char: u64,
    constraints: BTreeMap<String, Polynomial>,
    p_zero: BTreeSet<String>,
    p_nz: BTreeSet<String>,
    lastz_a: bool,
    free_const_idx: u64,
) -> Result<(UT, UT)> {
    mab_solve_cancellable(
        rank,
        char,
        constraints,
        p_zero,
        p_nz,
        lastz_a,
        free_const_idx,
        &NeverStop,
    )
}

/// As [`mab_solve`], but polls `should_stop` between branch attempts.
#[allow(clippy::too_many_arguments)]
pub fn mab_solve_cancellable(
    rank: usize,
    char: u64,
    constraints: BTreeMap<String, Polynomial>,
    p_zero: BTreeSet<String>,
    p_nz: BTreeSet<String>,
    lastz_a: bool,
    free_const_idx: u64,
    should_stop: &dyn ShouldStop,
) -> Result<(UT, UT)> {
    info!("mab_solve: rank = {rank}");
    for (l, r) in &constraints {
        debug!("constraint: {l} = {r}");
    }
    for p in &p_zero {
        debug!("permission: {p} == 0");
    }
    for p in &p_nz {
        debug!("permission: {p} != 0");
    }
    let state = SolverState::new(rank, char, constraints, p_zero, p_nz, lastz_a, free_const_idx);
    solve_recursive(&state, should_stop)
}

fn solve_recursive(state: &SolverState, should_stop: &dyn ShouldStop) -> Result<(UT, UT)> {
    let equations = equations::gen_equations(state)?;
    trace!("equations at this frame: {}", equations.len());

    if equations.is_empty() {
        let (a, b, _m) = equations::build_matrices(state)?;
        return Ok((a, b));
    }

    // 1. resolve_eq, batched: a single deterministic substitution step.
    let resolved = classify::resolve_all(&equations)?;
    if !resolved.is_empty() {
        for (v, value) in &resolved {
            debug!("resolved {v} = {value}");
        }
        let next = state.with_constraints(resolved);
        return solve_recursive(&next, should_stop);
    }

    // 2. check_zero_group: branch on each equation that is a single term naming
    // >= 2 variables, trying each variable in the group in turn.
    for e in &equations {
        if should_stop.should_stop() {
            return Err(MabError::CouldNotSolve("cancelled".to_string()).into());
        }
        if let Some(group) = classify::check_zero_group(e) {
            for v in &group {
                let lastz_a = v.starts_with('a');
                let next = state.with_zero(v, lastz_a);
                match solve_recursive(&next, should_stop) {
                    Ok(result) => return Ok(result),
                    Err(err) if is_search_error(&err) => continue,
                    Err(err) => return Err(err),
                }
            }
        }
    }

    // 3. check_linear: a term with exactly one exponent-1 variable symbol.
    let candidates: Vec<LinearCandidate> = equations.iter().flat_map(classify::check_linear).collect();

    for candidate in &candidates {
        for c in [0i64, 1] {
            if should_stop.should_stop() {
                return Err(MabError::CouldNotSolve("cancelled".to_string()).into());
            }
            let next = state.with_zero_binding(&candidate.var, Polynomial::constant(c, state.char));
            match solve_recursive(&next, should_stop) {
                Ok(result) => return Ok(result),
                Err(err) if is_search_error(&err) => continue,
                Err(err) => return Err(err),
            }
        }
    }
    for candidate in &candidates {
        for free_member in &candidate.free_members {
            if should_stop.should_stop() {
                return Err(MabError::CouldNotSolve("cancelled".to_string()).into());
            }
            let next = state.with_constraints([(candidate.var.clone(), free_member.clone())]);
            match solve_recursive(&next, should_stop) {
                Ok(result) => return Ok(result),
                Err(err) if is_search_error(&err) => continue,
                Err(err) => return Err(err),
            }
        }
    }

    Err(MabError::CouldNotSolve(format!(
        "exhausted resolve_eq, check_zero_group, and check_linear on {} equations",
        equations.len()
    ))
    .into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gen_mab_problem_rank3_all_ones() {
        // Scenario: rank=3, mask=(1,1) -> P_nz >= {m21, m32}; m31 (i-j=2) forced zero.
        let (p_zero, p_nz) = gen_mab_problem(3, &[true, true], 2).unwrap();
        assert!(p_nz.contains("m21"));
        assert!(p_nz.contains("m32"));
        assert!(p_zero.contains("m31"));
    }

    #[test]
    fn gen_mab_problem_rejects_wrong_mask_length() {
        assert!(gen_mab_problem(4, &[true, true], 2).is_err());
    }

    #[test]
    fn solves_rank3_all_zero_mask() {
        let rank = 3;
        let (p_zero, p_nz) = gen_mab_problem(rank, &[false, false], 2).unwrap();
        let (a, b) = mab_solve(rank, 2, BTreeMap::new(), p_zero, p_nz, true, 0).unwrap();
        let identity = UT::identity(rank, 2).unwrap();
        assert_eq!(a.matmul(&a).unwrap(), identity);
        assert_eq!(b.matmul(&b).unwrap(), identity);
    }

    #[test]
    fn solves_rank3_mixed_mask() {
        // mask = (1, 1): m21, m32 forced nonzero; subconj forces m31 to zero.
        let rank = 3;
        let (p_zero, p_nz) = gen_mab_problem(rank, &[true, true], 2).unwrap();
        assert!(p_nz.contains("m21") && p_nz.contains("m32"));
        assert!(p_zero.contains("m31"));
        let (a, b) = mab_solve(rank, 2, BTreeMap::new(), p_zero, p_nz, true, 0).unwrap();
        let identity = UT::identity(rank, 2).unwrap();
        assert_eq!(a.matmul(&a).unwrap(), identity);
        assert_eq!(b.matmul(&b).unwrap(), identity);
    }
}
