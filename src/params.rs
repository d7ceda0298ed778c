//! Public, reproducible proof-system parameters.
//!
//! Bulletproofs have no trusted setup. Every generator besides the curve's
//! standard base point is derived by hashing public data to a curve point
//! ("nothing up my sleeve"), so the prover and verifier reconstruct
//! identical parameters from `(curve, bit length)` alone, with no
//! communication and no trapdoor.

use num_bigint::BigUint;
use num_traits::One;
use sha3::{Digest, Sha3_256};

use crate::curve::{Curve, Point};
use crate::field::FiniteField;
use crate::{Error, Result};

/// Default domain separator mixed into generator derivation.
pub const DEFAULT_DOMAIN_SEPARATOR: &[u8] = b"bulletproofs-zkp-generators";

/// Default bound on the number of aggregatable proofs.
pub const DEFAULT_AGGREGATION_BOUND: usize = 16;

/// Cap on hash-to-curve increment retries. Roughly half of all x
/// coordinates have a valid y, so failing this often means a broken curve
/// description rather than bad luck.
const HASH_TO_POINT_MAX_ATTEMPTS: usize = 1000;

/// Public parameters of the proof system, constructed once and shared
/// read-only by all provers and verifiers.
///
/// - `g`: standard base point of the curve subgroup
/// - `h`: second generator with unknown discrete log w.r.t. `g`
/// - `u`: generator binding inner products during compression
/// - `g_vec`, `h_vec`: `m * n` independent generators for vector commitments
/// - `l`: prime order of the subgroup
/// - `n`: bit length of the committed range `[0, 2^n)`
/// - `m`: bound on proof aggregation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Parameters {
    curve: Curve,
    g: Point,
    h: Point,
    u: Point,
    l: BigUint,
    n: usize,
    m: usize,
    g_vec: Vec<Point>,
    h_vec: Vec<Point>,
}

impl Parameters {
    /// Generates parameters over secp256k1 for ranges of `bitlength` bits,
    /// with the default aggregation bound of 16.
    pub fn secp256k1(bitlength: usize) -> Result<Self> {
        Self::secp256k1_with_bound(bitlength, DEFAULT_AGGREGATION_BOUND)
    }

    /// Generates parameters over secp256k1 with an explicit aggregation
    /// bound and the default domain separator.
    pub fn secp256k1_with_bound(bitlength: usize, aggregation_bound: usize) -> Result<Self> {
        Self::secp256k1_with_separator(bitlength, aggregation_bound, DEFAULT_DOMAIN_SEPARATOR)
    }

    /// Generates parameters over secp256k1 with an explicit aggregation
    /// bound and domain separator.
    ///
    /// Bit-for-bit reproducible: the same inputs always derive the same
    /// generators.
    pub fn secp256k1_with_separator(
        bitlength: usize,
        aggregation_bound: usize,
        domain_separator: &[u8],
    ) -> Result<Self> {
        if bitlength == 0 || aggregation_bound == 0 {
            return Err(Error::Structural(
                "bit length and aggregation bound must be positive".into(),
            ));
        }

        let parse = |hex: &str| -> BigUint {
            BigUint::parse_bytes(hex.as_bytes(), 16)
                .unwrap_or_else(|| unreachable!("secp256k1 constants are valid hex"))
        };

        let field_order =
            parse("fffffffffffffffffffffffffffffffffffffffffffffffffffffffefffffc2f");
        let generator_x =
            parse("79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798");
        let generator_y =
            parse("483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8");
        let subgroup_order =
            parse("fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141");

        let field = FiniteField::new(field_order)?;
        let a = field.zero();
        let b = field.element(BigUint::from(7u8));
        let curve = Curve::new(a, b, field);
        let g = Point::new(generator_x.clone(), generator_y);

        // H is derived by hashing the base point's x coordinate to a curve
        // point, so its discrete log w.r.t. G is unknown to everyone.
        let hashed_g = Sha3_256::digest(generator_x.to_bytes_be());
        let h = hash_to_point(&curve, &hashed_g)?;

        let width = curve.coordinate_width();
        let h_bytes = h.to_bytes(width);

        // 2 * m * n independent generators, two fresh hashes per index.
        let count = aggregation_bound * bitlength;
        let mut g_vec = Vec::with_capacity(count);
        let mut h_vec = Vec::with_capacity(count);
        for i in 0..count as u64 {
            let h_digest = generator_digest(&h_bytes, domain_separator, 2 * i);
            let g_digest = generator_digest(&h_bytes, domain_separator, 2 * i + 1);

            h_vec.push(hash_to_point(&curve, &h_digest)?);
            g_vec.push(hash_to_point(&curve, &g_digest)?);
        }

        let u = h.clone();
        Ok(Self {
            curve,
            g,
            h,
            u,
            l: subgroup_order,
            n: bitlength,
            m: aggregation_bound,
            g_vec,
            h_vec,
        })
    }

    /// The underlying curve.
    pub fn curve(&self) -> &Curve {
        &self.curve
    }

    /// The standard base generator.
    pub fn g(&self) -> &Point {
        &self.g
    }

    /// The nothing-up-my-sleeve second generator.
    pub fn h(&self) -> &Point {
        &self.h
    }

    /// The inner-product binding generator.
    pub fn u(&self) -> &Point {
        &self.u
    }

    /// The prime order of the curve subgroup.
    pub fn order(&self) -> &BigUint {
        &self.l
    }

    /// Bit length of the committed range `[0, 2^n)`.
    pub fn bitlength(&self) -> usize {
        self.n
    }

    /// Bound on proof aggregation.
    pub fn aggregation_bound(&self) -> usize {
        self.m
    }

    /// Generator vector for the left-hand committed vectors.
    pub fn g_vec(&self) -> &[Point] {
        &self.g_vec
    }

    /// Generator vector for the right-hand committed vectors.
    pub fn h_vec(&self) -> &[Point] {
        &self.h_vec
    }

    /// `2^n` as an exclusive upper bound for committed values.
    pub fn range_bound(&self) -> BigUint {
        BigUint::one() << self.n
    }
}

fn generator_digest(h_bytes: &[u8], domain_separator: &[u8], index: u64) -> [u8; 32] {
    let mut hasher = Sha3_256::new();
    hasher.update(h_bytes);
    hasher.update(domain_separator);
    // Minimal big-endian index, matching BigUint::to_bytes_be (zero is
    // empty).
    hasher.update(BigUint::from(index).to_bytes_be());
    hasher.finalize().into()
}

/// Maps hash output to a curve point: interpret the digest as a candidate
/// x coordinate and increment until the curve has a point there.
fn hash_to_point(curve: &Curve, digest: &[u8]) -> Result<Point> {
    let field_order = curve.field().order();
    let mut x = BigUint::from_bytes_be(digest) % field_order;

    for _ in 0..HASH_TO_POINT_MAX_ATTEMPTS {
        match curve.at(&x) {
            Ok(point) => return Ok(point),
            Err(_) => x = (x + BigUint::one()) % field_order,
        }
    }

    Err(Error::Domain(
        "hash-to-point exhausted its retry budget".into(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_params() -> Parameters {
        Parameters::secp256k1_with_bound(4, 1).unwrap()
    }

    #[test]
    fn generation_is_reproducible() {
        let p1 = small_params();
        let p2 = small_params();
        assert_eq!(p1, p2);
    }

    #[test]
    fn base_point_and_derived_generators_are_on_curve() {
        let params = small_params();
        let curve = params.curve();

        assert!(curve.is_on_curve(params.g()));
        assert!(curve.is_on_curve(params.h()));
        assert!(curve.is_on_curve(params.u()));
        for p in params.g_vec().iter().chain(params.h_vec()) {
            assert!(curve.is_on_curve(p));
        }
    }

    #[test]
    fn generator_vectors_have_m_times_n_entries() {
        let params = Parameters::secp256k1_with_bound(4, 2).unwrap();
        assert_eq!(params.g_vec().len(), 8);
        assert_eq!(params.h_vec().len(), 8);
        assert_eq!(params.bitlength(), 4);
        assert_eq!(params.aggregation_bound(), 2);
    }

    #[test]
    fn derived_generators_are_pairwise_distinct() {
        let params = small_params();
        let mut all: Vec<&Point> = params.g_vec().iter().chain(params.h_vec()).collect();
        all.push(params.h());
        all.push(params.g());

        for (i, p) in all.iter().enumerate() {
            for q in &all[i + 1..] {
                assert_ne!(p, q);
            }
        }
    }

    #[test]
    fn separator_changes_generators() {
        let p1 = small_params();
        let p2 = Parameters::secp256k1_with_separator(4, 1, b"different-separator").unwrap();
        assert_ne!(p1.g_vec()[0], p2.g_vec()[0]);
        // H does not depend on the separator, only the generator vectors do.
        assert_eq!(p1.h(), p2.h());
    }

    #[test]
    fn rejects_degenerate_dimensions() {
        assert!(Parameters::secp256k1_with_bound(0, 1).is_err());
        assert!(Parameters::secp256k1_with_bound(4, 0).is_err());
    }
}
