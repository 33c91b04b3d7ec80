//! Derives the zero-permission pattern from the first sub-diagonal run
//! structure of an `M`-mask, per `ievalg/subconj.py`.

use std::collections::BTreeSet;

use anyhow::Result;

use crate::polynomial::Polynomial;
use crate::ut::UT;

/// Returns a copy of `m` with every strictly-sub-sub-diagonal cell `(i, j)`,
/// `j + 1 < i`, forced to `0` whenever `(j + 1)` lies in a first-sub-diagonal
/// run, or `i` lies in a run while `j` is not that run's maximum. First
/// sub-diagonal entries themselves are never touched.
pub fn subconj(m: &UT) -> Result<UT> {
    let rank = m.rank();
    let char = m.char();
    let zero = Polynomial::zero(char);

    let mut runs: Vec<BTreeSet<usize>> = Vec::new();
    let mut in_run = false;
    for i in 2..=rank {
        if !m.get(i, i - 1)?.is_zero() {
            if !in_run {
                runs.push(BTreeSet::new());
                in_run = true;
            }
            runs.last_mut().unwrap().insert(i);
        } else {
            in_run = false;
        }
    }

    let maximals: BTreeSet<usize> = runs.iter().filter_map(|r| r.iter().max().copied()).collect();
    let union: BTreeSet<usize> = runs.iter().flatten().copied().collect();

    let subdiag_n = 1;
    let mut sc = m.clone();
    for i in (2 + subdiag_n)..=rank {
        for j in 1..(i - subdiag_n) {
            if union.contains(&(j + 1)) || (union.contains(&i) && !maximals.contains(&j)) {
                sc.set(i, j, zero.clone())?;
            }
        }
    }
    Ok(sc)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abstract_m(rank: usize, char: u64) -> UT {
        UT::new(rank, char, |i, j| Polynomial::symbol(format!("m{i}{j}"), char)).unwrap()
    }

    #[test]
    fn first_subdiagonal_is_never_zeroed() {
        let m = abstract_m(4, 2);
        let sc = subconj(&m).unwrap();
        for i in 2..=4 {
            assert_eq!(sc.get(i, i - 1).unwrap(), m.get(i, i - 1).unwrap());
        }
    }

    #[test]
    fn all_nonzero_subdiagonal_forces_everything_below_to_zero() {
        // rank 4: first subdiagonal all nonzero symbols -> a single run {2,3,4},
        // maximal = {4}, union = {2,3,4}. Cell (4,1): j+1=2 in union -> zero.
        let m = abstract_m(4, 2);
        let sc = subconj(&m).unwrap();
        assert!(sc.get(4, 1).unwrap().is_zero());
    }

    #[test]
    fn zero_subdiagonal_entry_breaks_the_run() {
        let mut m = abstract_m(5, 2);
        m.set(3, 2, Polynomial::zero(2)).unwrap();
        let sc = subconj(&m).unwrap();
        // run at i=2 (singleton, maximal={2}), run at i={4,5} (maximal={5}).
        // cell (5,3): j+1=4 not in union({2,4,5})? 4 is in union -> zero.
        assert!(sc.get(5, 3).unwrap().is_zero());
    }
}
