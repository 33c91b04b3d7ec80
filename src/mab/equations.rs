//! Builds `A`, `B`, `M` from the current solver state and collects the
//! equation set from `A·A`, `B·B`, `A·B - M`, per §4.7.2.

use anyhow::Result;
use log::trace;

use crate::common_factor::extract_common_factor;
use crate::mab::state::SolverState;
use crate::polynomial::Polynomial;
use crate::ut::UT;

/// Looks up `sym{row}{col}` in `constraints` (or the bare symbol if unbound),
/// then collapses to `0` if its canonical rendering is in `p_zero`.
fn gen_ab(state: &SolverState, sym: &str, row: usize, col: usize) -> Polynomial {
    let name = format!("{sym}{row}{col}");
    let val = state
        .constraints
        .get(&name)
        .cloned()
        .unwrap_or_else(|| Polynomial::symbol(name.clone(), state.char));
    if state.p_zero.contains(&val.render()) {
        Polynomial::zero(state.char)
    } else {
        val
    }
}

/// `m{row}{col}`, collapsed to `0` if its name is in `p_zero`.
fn gen_m(state: &SolverState, row: usize, col: usize) -> Polynomial {
    let name = format!("m{row}{col}");
    if state.p_zero.contains(&name) {
        Polynomial::zero(state.char)
    } else {
        Polynomial::symbol(name, state.char)
    }
}

pub fn build_matrices(state: &SolverState) -> Result<(UT, UT, UT)> {
    let a = UT::new(state.rank, state.char, |i, j| gen_ab(state, "a", i, j))?;
    let b = UT::new(state.rank, state.char, |i, j| gen_ab(state, "b", i, j))?;
    let m = UT::new(state.rank, state.char, |i, j| gen_m(state, i, j))?;
    Ok((a, b, m))
}

/// Generates the equation list `E` in row-major cell order, over
/// `morder = [BB, AA, ABM]` when `lastz_a`, else `[AA, BB, ABM]`. Each
/// non-zero cell contributes its common-factor cofactor.
pub fn gen_equations(state: &SolverState) -> Result<Vec<Polynomial>> {
    let (a, b, m) = build_matrices(state)?;
    let aa = a.matmul(&a)?;
    let bb = b.matmul(&b)?;
    let abm = a.matmul(&b)?.sub(&m)?;

    let named: Vec<(&str, &UT)> = if state.lastz_a {
        vec![("BB", &bb), ("AA", &aa), ("ABM", &abm)]
    } else {
        vec![("AA", &aa), ("BB", &bb), ("ABM", &abm)]
    };

    let mut equations = Vec::new();
    for (row, col) in a.lower_cells() {
        for (label, mat) in &named {
            let cell = mat.get(row, col)?;
            if !cell.is_zero() {
                let (_, g) = extract_common_factor(&cell)?;
                trace!("equation from {label}[{row},{col}] = {cell}: {g} = 0");
                equations.push(g);
            }
        }
    }
    Ok(equations)
}
