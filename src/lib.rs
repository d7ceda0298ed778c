//! Bulletproofs range proofs over short-Weierstrass elliptic curves.
//!
//! A prover who has published a Pedersen commitment `V = G^v * H^r` can
//! convince anyone that `v` lies in `[0, 2^n)` without revealing `v` or
//! `r`, with a proof of only `O(log n)` size. The crate builds the whole
//! stack from first principles over arbitrary-precision integers:
//!
//! - [`field`]: modular finite-field arithmetic over a prime modulus
//! - [`curve`]: the short-Weierstrass group law, scalar multiplication and
//!   hash-to-curve point recovery
//! - [`vector`]: fixed-length big-integer vectors modulo a prime
//! - [`params`]: reproducible, trapdoor-free public parameters
//! - [`pedersen`]: scalar and vector Pedersen commitments
//! - [`inner_product`]: the recursive inner-product argument
//! - [`range_proof`]: the Bulletproofs protocol itself
//!
//! Challenges are derived from a merlin transcript (Fiat-Shamir), so
//! proofs are non-interactive and deterministic to verify.
//!
//! # Example
//!
//! ```
//! use bulletproofs_zkp::{Parameters, Prover, SecureRng, Verifier};
//! use num_bigint::BigUint;
//!
//! # fn main() -> bulletproofs_zkp::Result<()> {
//! let params = Parameters::secp256k1_with_bound(4, 1)?;
//! let mut rng = SecureRng::new();
//!
//! let value = BigUint::from(11u8);
//! let blinding = bulletproofs_zkp::random_scalar(&mut rng, params.order())?;
//!
//! let prover = Prover::new(&params, value, blinding)?;
//! let commitment = prover.commitment();
//! let proof = prover.prove(&mut rng)?;
//!
//! let verifier = Verifier::new(&params, commitment);
//! assert!(verifier.verify(&proof));
//! # Ok(())
//! # }
//! ```

/// Short-Weierstrass curves and the elliptic-curve group law.
pub mod curve;
/// Error types.
pub mod error;
/// Finite-field arithmetic over a prime modulus.
pub mod field;
/// The recursive O(log n) inner-product argument.
pub mod inner_product;
/// Public, reproducible proof-system parameters.
pub mod params;
/// Pedersen commitment schemes.
pub mod pedersen;
/// The Bulletproofs range-proof protocol.
pub mod range_proof;
/// Secure randomness.
pub mod rng;
/// Modular big-integer helpers.
pub mod scalar;
/// Merlin transcript wrapper for Fiat-Shamir challenges.
pub mod transcript;
/// Fixed-length vectors with modular arithmetic.
pub mod vector;

pub use curve::{Curve, Point};
pub use error::{Error, Result};
pub use field::{FieldElement, FiniteField};
pub use inner_product::InnerProductProof;
pub use params::Parameters;
pub use range_proof::{Prover, RangeProof, Verifier};
pub use rng::{random_scalar, SecureRng};
pub use transcript::ProofTranscript;
pub use vector::Vector;
