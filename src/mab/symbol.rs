//! Symbol classification per §3 of the design: a symbol is a `VARIABLE` iff it
//! begins with `a` or `b`, a `NONZERO_CONSTANT` iff forced non-zero by the
//! solver's permissions, and `CONSTANT` otherwise.

use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolClass {
    Variable,
    NonzeroConstant,
    Constant,
}

/// `true` iff `sym` is one of the solver's unknowns (`a{ij}` / `b{ij}`).
pub fn is_variable(sym: &str) -> bool {
    sym.starts_with('a') || sym.starts_with('b')
}

/// Classifies `sym` given the current non-zero permission set.
///
/// `NonzeroConstant` and `Constant` are currently treated identically by every
/// classifier strategy (no branch consults the distinction yet); the
/// classification is preserved as a future extension point rather than
/// collapsed into a single `Constant` case.
pub fn classify(sym: &str, p_nz: &BTreeSet<String>) -> SymbolClass {
    if is_variable(sym) {
        SymbolClass::Variable
    } else if p_nz.contains(sym) {
        SymbolClass::NonzeroConstant
    } else {
        SymbolClass::Constant
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a_and_b_prefixed_symbols_are_variables() {
        assert!(is_variable("a21"));
        assert!(is_variable("b43"));
        assert!(!is_variable("m21"));
        assert!(!is_variable("r0"));
    }

    #[test]
    fn classification_respects_nonzero_permission() {
        let mut p_nz = BTreeSet::new();
        p_nz.insert("m21".to_string());
        assert_eq!(classify("a21", &p_nz), SymbolClass::Variable);
        assert_eq!(classify("m21", &p_nz), SymbolClass::NonzeroConstant);
        assert_eq!(classify("m32", &p_nz), SymbolClass::Constant);
    }
}
