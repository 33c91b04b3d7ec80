//! The two named error kinds that surface to callers of [`crate::mab`].
//!
//! Everything else (invalid characteristic, incompatible characteristics, malformed
//! polynomial text, out-of-range matrix index, unsupported negative power of a
//! multi-term polynomial, inversion of zero) is a programmer error reported as a
//! plain `anyhow::Error` via `bail!`/`ensure!`, matching the rest of this crate.

use std::fmt;

/// A search-time failure the solver's branch loops catch and treat as
/// "try the next branch."
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MabError {
    /// `resolve_eq` reduced an equation to a nonzero constant, or two
    /// resolutions proposed conflicting values for the same symbol.
    Contradiction(String),
    /// A recursion frame exhausted `resolve_eq`, `check_zero_group`, and
    /// `check_linear` without making progress.
    CouldNotSolve(String),
}

impl fmt::Display for MabError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MabError::Contradiction(msg) => write!(f, "contradiction: {msg}"),
            MabError::CouldNotSolve(msg) => write!(f, "could not solve: {msg}"),
        }
    }
}

impl std::error::Error for MabError {}

/// True iff `err` is a [`MabError`] (of either kind), i.e. a search error that a
/// caller higher up the branch tree should treat as "try the next branch" rather
/// than as a programmer error.
pub fn is_search_error(err: &anyhow::Error) -> bool {
    err.downcast_ref::<MabError>().is_some()
}
