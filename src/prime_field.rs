//! Arithmetic in `Z/pZ` for a small prime `p` chosen at runtime.
//!
//! Unlike the const-generic fields in the teacher crate this characteristic is a
//! runtime value, since the MAB solver is parameterized over whichever small prime
//! the caller asks for. `p` is carried alongside every value and checked at the
//! boundary (`checked_add` &c.); once two `PrimeField`s are known compatible,
//! `std::ops` impls on them never fail.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use anyhow::{bail, ensure, Result};
use serde::{Deserialize, Serialize};

use crate::small_prime::is_small_prime;

/// An element of `Z/pZ`, `p` a small prime.
#[derive(Copy, Clone, Debug, Eq, Hash, Serialize, Deserialize)]
pub struct PrimeField {
    value: u64,
    char: u64,
}

impl PrimeField {
    /// Builds `value mod char`, validating `char` is a small prime.
    pub fn new(value: i64, char: u64) -> Result<Self> {
        ensure!(
            is_small_prime(char),
            "invalid characteristic: expected prime < 100, got {char}"
        );
        let reduced = value.rem_euclid(char as i64) as u64;
        Ok(PrimeField {
            value: reduced,
            char,
        })
    }

    /// Parses `text` as an integer in the given `base`, then reduces mod `char`.
    pub fn from_str_radix(text: &str, char: u64, base: u32) -> Result<Self> {
        let value = i64::from_str_radix(text.trim(), base)?;
        Self::new(value, char)
    }

    pub fn zero(char: u64) -> Self {
        PrimeField { value: 0, char }
    }

    pub fn one(char: u64) -> Self {
        PrimeField { value: 1, char }
    }

    pub fn value(&self) -> u64 {
        self.value
    }

    pub fn char(&self) -> u64 {
        self.char
    }

    pub fn is_zero(&self) -> bool {
        self.value == 0
    }

    /// Fails if `self` and `other` were built with different characteristics.
    pub fn compat(&self, other: &Self) -> Result<()> {
        ensure!(
            self.char == other.char,
            "incompatible characteristics: {} != {}",
            self.char,
            other.char
        );
        Ok(())
    }

    pub fn checked_add(&self, other: &Self) -> Result<Self> {
        self.compat(other)?;
        Ok(PrimeField {
            value: (self.value + other.value) % self.char,
            char: self.char,
        })
    }

    pub fn checked_sub(&self, other: &Self) -> Result<Self> {
        self.compat(other)?;
        Ok(*self + (-*other))
    }

    pub fn checked_mul(&self, other: &Self) -> Result<Self> {
        self.compat(other)?;
        Ok(PrimeField {
            value: (self.value * other.value) % self.char,
            char: self.char,
        })
    }

    /// `self^k`. Negative `k` invokes [`Self::inv`] first.
    pub fn pow(&self, k: i64) -> Result<Self> {
        if k >= 0 {
            Ok(self.pow_u64(k as u64))
        } else if k == -1 {
            self.inv()
        } else {
            self.inv()?.pow(-k)
        }
    }

    fn pow_u64(&self, mut k: u64) -> Self {
        let mut base = *self;
        let mut acc = Self::one(self.char);
        while k > 0 {
            if k & 1 == 1 {
                acc = acc * base;
            }
            base = base * base;
            k >>= 1;
        }
        acc
    }

    /// `self^(p-2)`, the Fermat inverse. Fails on zero.
    pub fn inv(&self) -> Result<Self> {
        if self.is_zero() {
            bail!("cannot invert zero in GF({})", self.char);
        }
        Ok(self.pow_u64(self.char - 2))
    }
}

impl PartialEq for PrimeField {
    fn eq(&self, other: &Self) -> bool {
        self.char == other.char && self.value == other.value
    }
}

impl PartialOrd for PrimeField {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.char != other.char {
            return None;
        }
        Some(self.value.cmp(&other.value))
    }
}

impl fmt::Display for PrimeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl Add for PrimeField {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        self.checked_add(&rhs)
            .expect("PrimeField::add requires matching characteristics")
    }
}

impl Sub for PrimeField {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        self.checked_sub(&rhs)
            .expect("PrimeField::sub requires matching characteristics")
    }
}

impl Mul for PrimeField {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        self.checked_mul(&rhs)
            .expect("PrimeField::mul requires matching characteristics")
    }
}

impl Neg for PrimeField {
    type Output = Self;
    fn neg(self) -> Self {
        PrimeField {
            value: (self.char - self.value) % self.char,
            char: self.char,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reduces_into_range() {
        assert_eq!(PrimeField::new(-1, 11).unwrap().value(), 10);
        assert_eq!(PrimeField::new(13, 11).unwrap().value(), 2);
    }

    #[test]
    fn rejects_non_prime_characteristic() {
        assert!(PrimeField::new(0, 4).is_err());
        assert!(PrimeField::new(0, 100).is_err());
    }

    #[test]
    fn inverse() {
        let x = PrimeField::new(3, 11).unwrap();
        assert_eq!(x.pow(-1).unwrap().value(), 4);
        assert_eq!((x * x.inv().unwrap()).value(), 1);
    }

    #[test]
    fn zero_has_no_inverse() {
        assert!(PrimeField::zero(11).inv().is_err());
    }

    #[test]
    fn characteristic_two_self_cancels() {
        let x = PrimeField::new(1, 2).unwrap();
        assert!((x + x).is_zero());
    }

    #[test]
    fn char_p_sum_is_zero() {
        let x = PrimeField::new(5, 11).unwrap();
        let mut acc = PrimeField::zero(11);
        for _ in 0..11 {
            acc = acc + x;
        }
        assert!(acc.is_zero());
    }

    #[test]
    fn ordering_is_by_representative() {
        let a = PrimeField::new(3, 11).unwrap();
        let b = PrimeField::new(4, 11).unwrap();
        assert!(a < b);
        assert!(b >= a);
    }

    #[test]
    fn incompatible_characteristics_error() {
        let a = PrimeField::new(1, 11).unwrap();
        let b = PrimeField::new(1, 13).unwrap();
        assert!(a.checked_add(&b).is_err());
    }

    #[test]
    fn parses_from_radix() {
        let x = PrimeField::from_str_radix("13", 11, 10).unwrap();
        assert_eq!(x.value(), 2);
    }
}
