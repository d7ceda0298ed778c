//! Finite-field arithmetic over a prime modulus.
//!
//! Mirrors the usual split between the field (binary operations) and its
//! elements (unary operations). Elements are immutable values: every
//! operation returns a new, canonically reduced residue.

use num_bigint::BigUint;
use num_traits::{One, Zero};
use rand_core::RngCore;

use crate::scalar;
use crate::{Error, Result};

/// A finite field of prime order `q`.
///
/// Primality of the modulus is a precondition, not checked: inversion uses
/// Fermat's little theorem and square roots use Tonelli-Shanks, both of
/// which assume a prime modulus.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FiniteField {
    q: BigUint,
}

impl FiniteField {
    /// Creates the field `F_q`. Fails for a modulus below 2.
    pub fn new(q: BigUint) -> Result<Self> {
        if q < BigUint::from(2u8) {
            return Err(Error::Domain("field modulus must be at least 2".into()));
        }
        Ok(Self { q })
    }

    /// The field modulus.
    pub fn order(&self) -> &BigUint {
        &self.q
    }

    /// Wraps an integer into the field, reducing into `[0, q)`.
    pub fn element(&self, n: BigUint) -> FieldElement {
        FieldElement {
            n: n % &self.q,
            q: self.q.clone(),
        }
    }

    /// The additive identity.
    pub fn zero(&self) -> FieldElement {
        self.element(BigUint::zero())
    }

    /// The multiplicative identity.
    pub fn one(&self) -> FieldElement {
        self.element(BigUint::one())
    }

    /// Uniform random element in `[0, q)` from a secure source.
    pub fn random<R: RngCore>(&self, rng: &mut R) -> Result<FieldElement> {
        Ok(self.element(crate::rng::random_scalar(rng, &self.q)?))
    }

    /// `x + y`.
    pub fn add(&self, x: &FieldElement, y: &FieldElement) -> FieldElement {
        self.element(&x.n + &y.n)
    }

    /// `x - y`.
    pub fn sub(&self, x: &FieldElement, y: &FieldElement) -> FieldElement {
        self.element(scalar::sub_mod(&x.n, &y.n, &self.q))
    }

    /// `x * y`.
    pub fn mul(&self, x: &FieldElement, y: &FieldElement) -> FieldElement {
        self.element(&x.n * &y.n)
    }

    /// `x / y`, via the modular inverse. Fails when `y` is zero.
    pub fn div(&self, x: &FieldElement, y: &FieldElement) -> Result<FieldElement> {
        let y_inv = y.inv()?;
        Ok(self.mul(x, &y_inv))
    }

    /// A square root of `n`, when one exists.
    ///
    /// Tonelli-Shanks, with the direct exponentiation shortcut for
    /// `q = 3 (mod 4)`. Non-residues fail with a domain error; which of the
    /// two roots is returned is deterministic, so derived parameters are
    /// reproducible.
    pub fn sqrt(&self, n: &FieldElement) -> Result<FieldElement> {
        let q = &self.q;
        if n.n.is_zero() {
            return Ok(self.zero());
        }

        // Euler's criterion: n^((q-1)/2) must be 1 for a residue.
        let one = BigUint::one();
        let legendre_exp = (q - &one) >> 1;
        if n.n.modpow(&legendre_exp, q) != one {
            return Err(Error::Domain("element is not a quadratic residue".into()));
        }

        if q % BigUint::from(4u8) == BigUint::from(3u8) {
            let exp = (q + &one) >> 2;
            return Ok(self.element(n.n.modpow(&exp, q)));
        }

        // General case: write q - 1 = s * 2^e with s odd.
        let mut s = q - &one;
        let mut e = 0u32;
        while (&s & &one).is_zero() {
            s >>= 1;
            e += 1;
        }

        // Deterministic search for a non-residue to seed the algorithm.
        let mut z = BigUint::from(2u8);
        while z.modpow(&legendre_exp, q) == one {
            z += &one;
        }

        let mut m = e;
        let mut c = z.modpow(&s, q);
        let mut t = n.n.modpow(&s, q);
        let mut r = n.n.modpow(&((&s + &one) >> 1), q);

        while t != one {
            // Least i with t^(2^i) = 1.
            let mut i = 0u32;
            let mut probe = t.clone();
            while probe != one {
                probe = (&probe * &probe) % q;
                i += 1;
            }

            let gap = m - i - 1;
            let mut b = c.clone();
            for _ in 0..gap {
                b = (&b * &b) % q;
            }
            m = i;
            c = (&b * &b) % q;
            t = (&t * &c) % q;
            r = (&r * &b) % q;
        }

        Ok(self.element(r))
    }
}

/// An element of a prime field: a residue paired with its modulus.
///
/// Equality requires both the residue and the modulus to match.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldElement {
    n: BigUint,
    q: BigUint,
}

impl FieldElement {
    /// The canonical residue in `[0, q)`.
    pub fn residue(&self) -> &BigUint {
        &self.n
    }

    /// The field this element belongs to.
    pub fn field(&self) -> FiniteField {
        FiniteField { q: self.q.clone() }
    }

    /// `-self`.
    pub fn neg(&self) -> FieldElement {
        FieldElement {
            n: scalar::neg_mod(&self.n, &self.q),
            q: self.q.clone(),
        }
    }

    /// `self^2`.
    pub fn square(&self) -> FieldElement {
        FieldElement {
            n: (&self.n * &self.n) % &self.q,
            q: self.q.clone(),
        }
    }

    /// `self^e`.
    pub fn exp(&self, e: &BigUint) -> FieldElement {
        FieldElement {
            n: self.n.modpow(e, &self.q),
            q: self.q.clone(),
        }
    }

    /// `self^-1`. Fails for zero.
    pub fn inv(&self) -> Result<FieldElement> {
        Ok(FieldElement {
            n: scalar::inv_mod(&self.n, &self.q)?,
            q: self.q.clone(),
        })
    }

    /// Whether this is the additive identity.
    pub fn is_zero(&self) -> bool {
        self.n.is_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SecureRng;

    fn f29() -> FiniteField {
        FiniteField::new(BigUint::from(29u32)).unwrap()
    }

    fn el(f: &FiniteField, n: u64) -> FieldElement {
        f.element(BigUint::from(n))
    }

    #[test]
    fn construction_normalizes() {
        let f = f29();
        assert_eq!(el(&f, 31), el(&f, 2));
        assert_eq!(el(&f, 29), f.zero());
    }

    #[test]
    fn arithmetic_basics() {
        let f = f29();
        assert_eq!(f.add(&el(&f, 17), &el(&f, 20)), el(&f, 8));
        assert_eq!(f.sub(&el(&f, 3), &el(&f, 5)), el(&f, 27));
        assert_eq!(f.mul(&el(&f, 6), &el(&f, 7)), el(&f, 13));
        assert_eq!(el(&f, 12).neg(), el(&f, 17));
        assert_eq!(el(&f, 6).square(), el(&f, 7));
    }

    #[test]
    fn division_and_inverse() {
        let f = f29();
        for n in 1u64..29 {
            let x = el(&f, n);
            let inv = x.inv().unwrap();
            assert_eq!(f.mul(&x, &inv), f.one());
            assert_eq!(f.div(&f.one(), &x).unwrap(), inv);
        }
        assert!(f.zero().inv().is_err());
        assert!(f.div(&el(&f, 3), &f.zero()).is_err());
    }

    #[test]
    fn exponentiation_matches_repeated_multiplication() {
        let f = f29();
        let x = el(&f, 5);
        let mut acc = f.one();
        for e in 0u64..10 {
            assert_eq!(x.exp(&BigUint::from(e)), acc);
            acc = f.mul(&acc, &x);
        }
    }

    #[test]
    fn sqrt_on_one_mod_four_field() {
        // 29 = 1 (mod 4) exercises the full Tonelli-Shanks path.
        let f = f29();
        for n in 1u64..29 {
            let sq = el(&f, n).square();
            let root = f.sqrt(&sq).unwrap();
            assert_eq!(root.square(), sq);
        }
    }

    #[test]
    fn sqrt_on_three_mod_four_field() {
        let f = FiniteField::new(BigUint::from(23u32)).unwrap();
        for n in 1u64..23 {
            let sq = f.element(BigUint::from(n)).square();
            let root = f.sqrt(&sq).unwrap();
            assert_eq!(root.square(), sq);
        }
    }

    #[test]
    fn sqrt_rejects_non_residue() {
        let f = f29();
        // 2 is a non-residue mod 29.
        assert!(f.sqrt(&el(&f, 2)).is_err());
    }

    #[test]
    fn equality_requires_same_modulus() {
        let f = f29();
        let g = FiniteField::new(BigUint::from(31u32)).unwrap();
        assert_ne!(el(&f, 3), g.element(BigUint::from(3u64)));
    }

    #[test]
    fn random_elements_are_canonical() {
        let f = f29();
        let mut rng = SecureRng::new();
        for _ in 0..32 {
            let x = f.random(&mut rng).unwrap();
            assert!(x.residue() < f.order());
        }
    }
}
