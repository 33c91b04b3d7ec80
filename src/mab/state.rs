//! The solver's recursion-frame state. Immutable within a frame: branches
//! produce a new state via `BTreeMap`/`BTreeSet` clones and are discarded on
//! backtrack. Only `free_const_idx` is threaded monotonically, and each branch
//! gets its own copy rooted at the parent's value so sibling increments never
//! leak across branches.

use std::collections::{BTreeMap, BTreeSet};

use crate::polynomial::Polynomial;

#[derive(Clone, Debug)]
pub struct SolverState {
    pub rank: usize,
    pub char: u64,
    pub constraints: BTreeMap<String, Polynomial>,
    pub p_zero: BTreeSet<String>,
    pub p_nz: BTreeSet<String>,
    pub lastz_a: bool,
    pub free_const_idx: u64,
}

impl SolverState {
    pub fn new(
        rank: usize,
        char: u64,
        constraints: BTreeMap<String, Polynomial>,
        p_zero: BTreeSet<String>,
        p_nz: BTreeSet<String>,
        lastz_a: bool,
        free_const_idx: u64,
    ) -> Self {
        SolverState {
            rank,
            char,
            constraints,
            p_zero,
            p_nz,
            lastz_a,
            free_const_idx,
        }
    }

    /// A copy with `extra` merged into `constraints`.
    pub fn with_constraints(&self, extra: impl IntoIterator<Item = (String, Polynomial)>) -> Self {
        let mut next = self.clone();
        next.constraints.extend(extra);
        next
    }

    /// A copy with `sym` added to `constraints`, `p_zero`, and `lastz_a` set.
    pub fn with_zero(&self, sym: &str, lastz_a: bool) -> Self {
        let mut next = self.clone();
        next.p_zero.insert(sym.to_string());
        next.lastz_a = lastz_a;
        next
    }

    /// A copy with `sym -> value` added to `constraints` and `sym` added to
    /// `p_zero` (the `check_linear` constant-branch: `v -> c`, `c in {0, 1}`).
    pub fn with_zero_binding(&self, sym: &str, value: Polynomial) -> Self {
        let mut next = self.clone();
        next.constraints.insert(sym.to_string(), value);
        next.p_zero.insert(sym.to_string());
        next
    }

    /// Issues a fresh free constant name `r{k}`, returning the updated state and
    /// the name. Reserved for future linear-branch expansion; not consumed by
    /// the currently active strategies.
    #[allow(dead_code)]
    pub fn fresh_free_const(&self) -> (Self, String) {
        let mut next = self.clone();
        let name = format!("r{}", next.free_const_idx);
        next.free_const_idx += 1;
        (next, name)
    }
}
