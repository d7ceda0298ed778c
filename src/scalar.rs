//! Modular arithmetic helpers over arbitrary-precision integers.
//!
//! Scalars are plain [`BigUint`] residues; every helper returns a new value
//! (value semantics, no in-place mutation) and keeps results canonical in
//! `[0, modulus)`.

use num_bigint::BigUint;
use num_traits::{One, Zero};

use crate::{Error, Result};

/// `(a + b) mod m`.
pub fn add_mod(a: &BigUint, b: &BigUint, m: &BigUint) -> BigUint {
    (a + b) % m
}

/// `(a - b) mod m` for canonical inputs (`a, b < m`).
pub fn sub_mod(a: &BigUint, b: &BigUint, m: &BigUint) -> BigUint {
    // a + m - b stays non-negative because b < m.
    ((a % m) + m - (b % m)) % m
}

/// `(a * b) mod m`.
pub fn mul_mod(a: &BigUint, b: &BigUint, m: &BigUint) -> BigUint {
    (a * b) % m
}

/// `(-a) mod m`.
pub fn neg_mod(a: &BigUint, m: &BigUint) -> BigUint {
    (m - (a % m)) % m
}

/// Multiplicative inverse mod a prime, via Fermat's little theorem.
///
/// The modulus must be prime (field moduli and group orders here all are);
/// zero has no inverse and fails with a domain error.
pub fn inv_mod(a: &BigUint, m: &BigUint) -> Result<BigUint> {
    let reduced = a % m;
    if reduced.is_zero() {
        return Err(Error::Domain("zero has no modular inverse".into()));
    }
    let exp = m - BigUint::from(2u8);
    Ok(reduced.modpow(&exp, m))
}

/// The vector `[1, base, base^2, ..., base^(count-1)] mod m`.
pub fn powers(base: &BigUint, count: usize, m: &BigUint) -> Vec<BigUint> {
    let mut out = Vec::with_capacity(count);
    let mut acc = BigUint::one();
    for _ in 0..count {
        out.push(acc.clone());
        acc = mul_mod(&acc, base, m);
    }
    out
}

/// Big-endian byte encoding padded to a fixed width.
pub fn to_bytes_fixed(n: &BigUint, width: usize) -> Vec<u8> {
    let raw = n.to_bytes_be();
    let mut out = vec![0u8; width.saturating_sub(raw.len())];
    out.extend_from_slice(&raw);
    out
}

/// The low `n` bits of `value`, least significant first, as 0/1 scalars.
pub fn bits_le(value: &BigUint, n: usize) -> Vec<BigUint> {
    (0..n as u64)
        .map(|i| {
            if value.bit(i) {
                BigUint::one()
            } else {
                BigUint::zero()
            }
        })
        .collect()
}
