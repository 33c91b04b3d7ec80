//! End-to-end tests: build a MAB problem for a given rank/mask/characteristic,
//! solve it, and check the two universally-true soundness invariants
//! `A@A == I`, `B@B == I`. Matches this workspace's style of exercising the
//! public API as a black box rather than its internal module seams.

use std::collections::{BTreeMap, BTreeSet};

use ievalg::mab::{gen_mab_problem, mab_solve};
use ievalg::polynomial::Polynomial;
use ievalg::ut::UT;

fn assert_sound(a: &UT, b: &UT, rank: usize, char: u64) {
    let identity = UT::identity(rank, char).unwrap();
    assert_eq!(a.matmul(a).unwrap(), identity, "A@A != I");
    assert_eq!(b.matmul(b).unwrap(), identity, "B@B != I");
}

/// `A@B` must equal `M` on every cell the mask/`P_zero` actually constrains:
/// the first sub-diagonal (from `mask`) and every cell `P_zero` forces to `0`.
/// Cells left as free `m{i}{j}` symbols are not checked, per the solver's
/// contract of leaving unconstrained entries symbolic.
fn assert_ab_matches_m(a: &UT, b: &UT, char: u64, mask: &[bool], p_zero: &BTreeSet<String>) {
    let ab = a.matmul(b).unwrap();
    for (idx, &bit) in mask.iter().enumerate() {
        let (row, col) = (idx + 2, idx + 1);
        let expected = Polynomial::constant(bit as i64, char);
        assert_eq!(
            ab.get(row, col).unwrap(),
            expected,
            "A@B[{row},{col}] != M[{row},{col}]"
        );
    }
    for (row, col) in ab.lower_cells() {
        if p_zero.contains(&format!("m{row}{col}")) {
            assert!(
                ab.get(row, col).unwrap().is_zero(),
                "A@B[{row},{col}] should be 0 (in P_zero)"
            );
        }
    }
}

#[test]
fn rank3_all_zero_mask_gf2() {
    let _ = env_logger::builder().format_timestamp(None).try_init();
    let (rank, char) = (3, 2);
    let mask = [false, false];
    let (p_zero, p_nz) = gen_mab_problem(rank, &mask, char).unwrap();
    let (a, b) = mab_solve(rank, char, BTreeMap::new(), p_zero.clone(), p_nz, true, 0).unwrap();
    assert_sound(&a, &b, rank, char);
    assert_ab_matches_m(&a, &b, char, &mask, &p_zero);
}

#[test]
fn rank3_mixed_mask_gf2() {
    let _ = env_logger::builder().format_timestamp(None).try_init();
    let (rank, char) = (3, 2);
    let mask = [true, true];
    let (p_zero, p_nz) = gen_mab_problem(rank, &mask, char).unwrap();
    let (a, b) = mab_solve(rank, char, BTreeMap::new(), p_zero.clone(), p_nz, true, 0).unwrap();
    assert_sound(&a, &b, rank, char);
    assert_ab_matches_m(&a, &b, char, &mask, &p_zero);
}

#[test]
fn rank4_all_zero_mask_gf3() {
    let _ = env_logger::builder().format_timestamp(None).try_init();
    let (rank, char) = (4, 3);
    let mask = [false, false, false];
    let (p_zero, p_nz) = gen_mab_problem(rank, &mask, char).unwrap();
    let (a, b) = mab_solve(rank, char, BTreeMap::new(), p_zero.clone(), p_nz, true, 0).unwrap();
    assert_sound(&a, &b, rank, char);
    assert_ab_matches_m(&a, &b, char, &mask, &p_zero);
}

#[test]
fn rejects_mismatched_mask_length() {
    assert!(gen_mab_problem(5, &[true, true], 2).is_err());
}
