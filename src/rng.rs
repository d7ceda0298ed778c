//! Cryptographically secure random number generation.

use num_bigint::BigUint;
use rand_core::{CryptoRng, OsRng, RngCore};

use crate::{Error, Result};

/// Number of extra bits sampled before modular reduction, so the reduced
/// scalar is statistically indistinguishable from uniform (128-bit margin).
const EXTRA_SECURITY_BITS: u64 = 128;

/// Cryptographically secure random number generator.
///
/// A thin wrapper around `OsRng` that provides a consistent interface for
/// cryptographic randomness throughout the library.
pub struct SecureRng(OsRng);

impl SecureRng {
    /// Creates a new cryptographically secure random number generator.
    pub fn new() -> Self {
        Self(OsRng)
    }
}

impl Default for SecureRng {
    fn default() -> Self {
        Self::new()
    }
}

impl RngCore for SecureRng {
    fn next_u32(&mut self) -> u32 {
        self.0.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.0.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.0.fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> core::result::Result<(), rand_core::Error> {
        self.0.try_fill_bytes(dest)
    }
}

impl CryptoRng for SecureRng {}

/// Samples a uniform scalar in `[0, order)`.
///
/// Draws `order.bits() + 128` bits and reduces, so the bias from reduction
/// is negligible. An unavailable entropy source surfaces as
/// [`Error::Randomness`] rather than a panic: blinding-factor reuse must
/// never happen silently.
pub fn random_scalar<R: RngCore>(rng: &mut R, order: &BigUint) -> Result<BigUint> {
    let byte_len = ((order.bits() + EXTRA_SECURITY_BITS) as usize).div_ceil(8);
    let mut buf = vec![0u8; byte_len];
    rng.try_fill_bytes(&mut buf)
        .map_err(|e| Error::Randomness(e.to_string()))?;

    Ok(BigUint::from_bytes_be(&buf) % order)
}
