//! `ievalg`: a symbolic-algebra search engine for the MAB problem.
//!
//! Given a rank-`r` unit upper-triangular matrix `M` over `GF(p)` with a
//! prescribed sub-diagonal zero/non-zero pattern, [`mab::mab_solve`] searches
//! for unit upper-triangular `A`, `B` such that `A·A = I`, `B·B = I`, and
//! `A·B = M` (equalities on the strictly-lower-triangular block).
//!
//! The algebra stack underneath, from the bottom up:
//! - [`prime_field`]: arithmetic in `Z/pZ` for a runtime-chosen small prime `p`.
//! - [`monomial`]: canonical products of `symbol -> integer exponent` factors.
//! - [`polynomial`]: finite sums of `(Monomial, PrimeField)` terms, with a
//!   parser for the crate's text format.
//! - [`common_factor`]: extracting the largest monomial common to every term.
//! - [`ut`]: unit upper-triangular matrices of polynomials, with matrix
//!   multiplication.
//! - [`subconj`]: the sub-conjugate masking operator the MAB construction uses
//!   to derive its zero pattern.
//! - [`mab`]: problem generation and the recursive equation solver.

pub mod common_factor;
pub mod error;
pub mod mab;
pub mod monomial;
pub mod polynomial;
pub mod prime_field;
pub mod small_prime;
pub mod subconj;
pub mod ut;
