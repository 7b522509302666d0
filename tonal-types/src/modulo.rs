//! Canonical non-negative-residue modulo.
//!
//! Every circular wraparound in the engine (mode rotation, interval class,
//! pitch class) goes through here. Unlike `%`, the result is never negative.

use serde::{Deserialize, Serialize};

/// Why a modulo call could not produce a meaningful residue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModuloDiagnostic {
    /// The modulus was zero or negative.
    NonPositiveModulus(i64),
}

impl std::fmt::Display for ModuloDiagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonPositiveModulus(n) => write!(f, "modulus must be positive, got {}", n),
        }
    }
}

/// Result of a single modulo call: the residue plus an optional diagnostic.
///
/// A diagnostic means `value` is a degraded 0 and must not be trusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Residue {
    pub value: i64,
    pub diagnostic: Option<ModuloDiagnostic>,
}

/// Returns the unique `r` with `0 <= r < n` and `r ≡ a (mod n)`.
///
/// For `n <= 0` the value is 0 and the residue carries a diagnostic.
pub fn modulo(a: i64, n: i64) -> Residue {
    if n <= 0 {
        return Residue {
            value: 0,
            diagnostic: Some(ModuloDiagnostic::NonPositiveModulus(n)),
        };
    }
    Residue {
        value: a.rem_euclid(n),
        diagnostic: None,
    }
}

/// Residue mod 12 as a `u8` in 0..12.
pub fn modulo12(a: i32) -> u8 {
    a.rem_euclid(12) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn residue_in_range_and_congruent() {
        for n in 1..=25i64 {
            for a in -200..=200i64 {
                let r = modulo(a, n);
                assert!(r.diagnostic.is_none());
                assert!(r.value >= 0 && r.value < n, "modulo({}, {}) = {}", a, n, r.value);
                assert_eq!((a - r.value) % n, 0, "modulo({}, {}) not congruent", a, n);
            }
        }
    }

    #[test]
    fn negative_input_is_non_negative() {
        assert_eq!(modulo(-1, 12).value, 11);
        assert_eq!(modulo(-12, 12).value, 0);
        assert_eq!(modulo(-13, 12).value, 11);
    }

    #[test]
    fn zero_modulus_degrades_with_diagnostic() {
        let r = modulo(7, 0);
        assert_eq!(r.value, 0);
        assert_eq!(r.diagnostic, Some(ModuloDiagnostic::NonPositiveModulus(0)));
            }

    #[test]
    fn negative_modulus_degrades() {
        let r = modulo(7, -3);
        assert_eq!(r.value, 0);
        assert_eq!(r.diagnostic, Some(ModuloDiagnostic::NonPositiveModulus(-3)));
    }

    #[test]
    fn valid_call_after_misuse_has_no_diagnostic() {
        assert!(modulo(5, 0).diagnostic.is_some());
        let r = modulo(5, 3);
        assert_eq!(r.value, 2);
        assert!(r.diagnostic.is_none());
    }

    #[test]
    fn modulo12_matches_modulo() {
        for a in -300..300 {
            assert_eq!(modulo12(a) as i64, modulo(a as i64, 12).value);
        }
    }
}
