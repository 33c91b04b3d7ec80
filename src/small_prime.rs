//! Table of the small primes this crate accepts as a field characteristic.

/// Primes below 100, the only characteristics this crate's arithmetic supports.
pub const SMALL_PRIMES: [u64; 25] = [
    2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89, 97,
];

/// Returns true iff `p` is one of [`SMALL_PRIMES`].
pub fn is_small_prime(p: u64) -> bool {
    SMALL_PRIMES.contains(&p)
}
