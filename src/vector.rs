//! Fixed-length big-integer vectors with modular arithmetic operators.
//!
//! Every binary operator checks that both operands have the same length
//! before computing anything, and reduces each component (and each
//! accumulation step) modulo the supplied order.

use num_bigint::BigUint;
use num_traits::Zero;

use crate::scalar;
use crate::{Error, Result};

/// An ordered, fixed-length sequence of big integers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Vector(Vec<BigUint>);

impl Vector {
    /// Wraps a sequence of elements.
    pub fn new(elems: Vec<BigUint>) -> Self {
        Self(elems)
    }

    /// A vector of `size` zeroes.
    pub fn zeroes(size: usize) -> Self {
        Self(vec![BigUint::zero(); size])
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the vector has no elements.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The underlying elements.
    pub fn elems(&self) -> &[BigUint] {
        &self.0
    }

    /// The sub-vector `[lo, hi)`.
    pub fn slice(&self, lo: usize, hi: usize) -> Vector {
        Vector(self.0[lo..hi].to_vec())
    }

    fn check_len(&self, other: &Vector) -> Result<()> {
        if self.len() != other.len() {
            return Err(Error::Structural(format!(
                "vector length mismatch: {} vs {}",
                self.len(),
                other.len()
            )));
        }
        Ok(())
    }

    /// Component-wise sum modulo `order`.
    pub fn add_mod(&self, other: &Vector, order: &BigUint) -> Result<Vector> {
        self.check_len(other)?;
        Ok(Vector(
            self.0
                .iter()
                .zip(&other.0)
                .map(|(a, b)| scalar::add_mod(a, b, order))
                .collect(),
        ))
    }

    /// Inner product modulo `order`, reduced at every accumulation step so
    /// intermediate magnitudes stay bounded.
    pub fn inner_prod_mod(&self, other: &Vector, order: &BigUint) -> Result<BigUint> {
        self.check_len(other)?;
        let mut acc = BigUint::zero();
        for (a, b) in self.0.iter().zip(&other.0) {
            acc = scalar::add_mod(&acc, &scalar::mul_mod(a, b, order), order);
        }
        Ok(acc)
    }

    /// Hadamard (component-wise) product modulo `order`.
    pub fn hadamard_mod(&self, other: &Vector, order: &BigUint) -> Result<Vector> {
        self.check_len(other)?;
        Ok(Vector(
            self.0
                .iter()
                .zip(&other.0)
                .map(|(a, b)| scalar::mul_mod(a, b, order))
                .collect(),
        ))
    }

    /// Broadcast scalar addition modulo `order`.
    pub fn scalar_add_mod(&self, s: &BigUint, order: &BigUint) -> Vector {
        Vector(
            self.0
                .iter()
                .map(|a| scalar::add_mod(a, s, order))
                .collect(),
        )
    }

    /// Broadcast scalar multiplication modulo `order`.
    pub fn scalar_mul_mod(&self, s: &BigUint, order: &BigUint) -> Vector {
        Vector(
            self.0
                .iter()
                .map(|a| scalar::mul_mod(a, s, order))
                .collect(),
        )
    }
}
