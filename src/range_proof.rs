//! Bulletproofs range proofs.
//!
//! A prover holding an opening `(v, blinding)` of a Pedersen commitment `V`
//! convinces a verifier that `v` lies in `[0, 2^n)` without revealing `v`.
//! The protocol commits to the bit decomposition of `v`, collapses the bit
//! constraints into a single inner-product relation under transcript
//! challenges `y`, `z`, blinds it with a degree-two polynomial evaluated at
//! a third challenge `x`, and finally compresses the `O(n)` witness vectors
//! into an `O(log n)` inner-product argument.
//!
//! All challenges come from a merlin transcript (Fiat-Shamir), so the proof
//! is non-interactive and verification is a pure function of
//! `(parameters, commitment, proof)`.

use num_bigint::BigUint;
use num_traits::One;
use rand_core::RngCore;

use crate::curve::Point;
use crate::inner_product::{self, InnerProductProof};
use crate::params::Parameters;
use crate::pedersen;
use crate::rng;
use crate::scalar;
use crate::transcript::ProofTranscript;
use crate::vector::Vector;
use crate::{Error, Result};

/// Canonical byte width of one coordinate / scalar for the secp-class
/// curves the parameters generate.
const ENCODED_WIDTH: usize = 32;

/// A non-interactive range proof.
///
/// Produced by [`Prover::prove`], consumed by [`Verifier::verify`]:
/// four commitments, three response scalars, and the compressed
/// inner-product transcript.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RangeProof {
    a: Point,
    s: Point,
    t1: Point,
    t2: Point,
    taux: BigUint,
    mu: BigUint,
    t: BigUint,
    ipa: InnerProductProof,
}

impl RangeProof {
    /// Serializes the proof as fixed-width big-endian byte strings:
    /// `A || S || T1 || T2 || taux || mu || t || (L_i || R_i)* || a || b`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        for point in [&self.a, &self.s, &self.t1, &self.t2] {
            out.extend_from_slice(&point.to_bytes(ENCODED_WIDTH));
        }
        for s in [&self.taux, &self.mu, &self.t] {
            out.extend_from_slice(&scalar::to_bytes_fixed(s, ENCODED_WIDTH));
        }
        for (l, r) in self.ipa.l_vec.iter().zip(&self.ipa.r_vec) {
            out.extend_from_slice(&l.to_bytes(ENCODED_WIDTH));
            out.extend_from_slice(&r.to_bytes(ENCODED_WIDTH));
        }
        out.extend_from_slice(&scalar::to_bytes_fixed(&self.ipa.a, ENCODED_WIDTH));
        out.extend_from_slice(&scalar::to_bytes_fixed(&self.ipa.b, ENCODED_WIDTH));
        out
    }

    /// Parses a serialized proof, rejecting malformed lengths before any
    /// cryptographic interpretation.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        const POINT: usize = 2 * ENCODED_WIDTH;
        const HEAD: usize = 4 * POINT + 3 * ENCODED_WIDTH;
        const TAIL: usize = 2 * ENCODED_WIDTH;

        if bytes.len() < HEAD + TAIL || (bytes.len() - HEAD - TAIL) % (2 * POINT) != 0 {
            return Err(Error::Structural(format!(
                "malformed proof encoding of {} bytes",
                bytes.len()
            )));
        }
        let rounds = (bytes.len() - HEAD - TAIL) / (2 * POINT);

        let mut offset = 0;
        let a = read_point(bytes, &mut offset)?;
        let s = read_point(bytes, &mut offset)?;
        let t1 = read_point(bytes, &mut offset)?;
        let t2 = read_point(bytes, &mut offset)?;

        let taux = read_scalar(bytes, &mut offset);
        let mu = read_scalar(bytes, &mut offset);
        let t = read_scalar(bytes, &mut offset);

        let mut l_vec = Vec::with_capacity(rounds);
        let mut r_vec = Vec::with_capacity(rounds);
        for _ in 0..rounds {
            l_vec.push(read_point(bytes, &mut offset)?);
            r_vec.push(read_point(bytes, &mut offset)?);
        }
        let ipa_a = read_scalar(bytes, &mut offset);
        let ipa_b = read_scalar(bytes, &mut offset);

        Ok(Self {
            a,
            s,
            t1,
            t2,
            taux,
            mu,
            t,
            ipa: InnerProductProof {
                l_vec,
                r_vec,
                a: ipa_a,
                b: ipa_b,
            },
        })
    }
}

fn read_point(bytes: &[u8], offset: &mut usize) -> Result<Point> {
    let width = 2 * ENCODED_WIDTH;
    let p = Point::from_bytes(&bytes[*offset..*offset + width], ENCODED_WIDTH)?;
    *offset += width;
    Ok(p)
}

fn read_scalar(bytes: &[u8], offset: &mut usize) -> BigUint {
    let s = BigUint::from_bytes_be(&bytes[*offset..*offset + ENCODED_WIDTH]);
    *offset += ENCODED_WIDTH;
    s
}

/// Shared challenge schedule for prover and verifier: everything up to and
/// including the polynomial challenge `x`.
struct Challenges {
    y: BigUint,
    z: BigUint,
    x: BigUint,
}

fn derive_challenges(
    transcript: &mut ProofTranscript,
    params: &Parameters,
    commitment: &Point,
    a: &Point,
    s: &Point,
    t1: &Point,
    t2: &Point,
) -> Challenges {
    let order = params.order();
    transcript.append_u64(b"rp-bits", params.bitlength() as u64);
    transcript.append_point(b"V", commitment);
    transcript.append_point(b"A", a);
    transcript.append_point(b"S", s);
    let y = transcript.challenge_scalar(order);
    let z = transcript.challenge_scalar(order);
    transcript.append_point(b"T1", t1);
    transcript.append_point(b"T2", t2);
    let x = transcript.challenge_scalar(order);
    Challenges { y, z, x }
}

/// `h'` generators for the compression step: `h'_i = h_vec[i]^{y^-i}`.
fn folded_h_generators(params: &Parameters, y: &BigUint) -> Result<Vec<Point>> {
    let n = params.bitlength();
    let order = params.order();
    let y_inv = scalar::inv_mod(y, order)?;
    let y_inv_powers = scalar::powers(&y_inv, n, order);

    Ok(params.h_vec()[..n]
        .iter()
        .zip(&y_inv_powers)
        .map(|(h, e)| params.curve().scalar_mul(h, e))
        .collect())
}

/// `delta(y, z) = (z - z^2) * <1, y^n> - z^3 * <1, 2^n> mod L`.
fn delta(params: &Parameters, y: &BigUint, z: &BigUint) -> BigUint {
    let n = params.bitlength();
    let order = params.order();
    let two = BigUint::from(2u8);

    let sum_y = scalar::powers(y, n, order)
        .iter()
        .fold(BigUint::default(), |acc, p| scalar::add_mod(&acc, p, order));
    let sum_two = scalar::powers(&two, n, order)
        .iter()
        .fold(BigUint::default(), |acc, p| scalar::add_mod(&acc, p, order));

    let z_sq = scalar::mul_mod(z, z, order);
    let z_cu = scalar::mul_mod(&z_sq, z, order);
    let first = scalar::mul_mod(&scalar::sub_mod(z, &z_sq, order), &sum_y, order);
    let second = scalar::mul_mod(&z_cu, &sum_two, order);
    scalar::sub_mod(&first, &second, order)
}

/// Range-proof prover: holds the secret opening `(value, blinding)` of a
/// Pedersen commitment and produces proofs that the value is in range.
pub struct Prover<'a> {
    params: &'a Parameters,
    value: BigUint,
    blinding: BigUint,
}

impl<'a> Prover<'a> {
    /// Creates a prover for an opening of `Commit(value, blinding)`.
    ///
    /// Fails fast, before any secret-dependent computation, when the value
    /// is outside `[0, 2^n)` or the configured bit length cannot feed the
    /// inner-product compression.
    pub fn new(params: &'a Parameters, value: BigUint, blinding: BigUint) -> Result<Self> {
        if !params.bitlength().is_power_of_two() {
            return Err(Error::Structural(format!(
                "bit length {} is not a power of two",
                params.bitlength()
            )));
        }
        if value >= params.range_bound() {
            return Err(Error::Structural(format!(
                "value does not fit in {} bits",
                params.bitlength()
            )));
        }
        let blinding = blinding % params.order();
        Ok(Self {
            params,
            value,
            blinding,
        })
    }

    /// The public commitment `V = G^value * H^blinding` this prover's
    /// proofs are bound to.
    pub fn commitment(&self) -> Point {
        pedersen::commit_with_blinding(self.params, &self.value, &self.blinding)
    }

    /// Generates a non-interactive range proof.
    pub fn prove<R: RngCore>(&self, rng: &mut R) -> Result<RangeProof> {
        let mut transcript = ProofTranscript::new(self.params.curve().coordinate_width());
        self.prove_with_transcript(rng, &mut transcript)
    }

    /// Generates a proof on a caller-supplied transcript, allowing extra
    /// context (session ids, application domains) to bind the proof.
    pub fn prove_with_transcript<R: RngCore>(
        &self,
        rng: &mut R,
        transcript: &mut ProofTranscript,
    ) -> Result<RangeProof> {
        let params = self.params;
        let curve = params.curve();
        let order = params.order();
        let n = params.bitlength();
        let g_vec = &params.g_vec()[..n];
        let h_vec = &params.h_vec()[..n];
        let one = BigUint::one();

        // Bit decomposition: <a_l, 2^n> = v and a_r = a_l - 1^n.
        let a_l = Vector::new(scalar::bits_le(&self.value, n));
        let a_r = a_l.scalar_add_mod(&scalar::sub_mod(order, &one, order), order);

        let alpha = rng::random_scalar(rng, order)?;
        let a_commit = pedersen::blinded_vector_commit(params, g_vec, h_vec, &a_l, &a_r, &alpha)?;

        let s_l = Vector::new(
            (0..n)
                .map(|_| rng::random_scalar(rng, order))
                .collect::<Result<_>>()?,
        );
        let s_r = Vector::new(
            (0..n)
                .map(|_| rng::random_scalar(rng, order))
                .collect::<Result<_>>()?,
        );
        let rho = rng::random_scalar(rng, order)?;
        let s_commit = pedersen::blinded_vector_commit(params, g_vec, h_vec, &s_l, &s_r, &rho)?;

        // t(X) = <l(X), r(X)> = t0 + t1*X + t2*X^2, committed coefficient
        // by coefficient before the evaluation challenge exists.
        let tau1 = rng::random_scalar(rng, order)?;
        let tau2 = rng::random_scalar(rng, order)?;

        let commitment = self.commitment();

        // First transcript pass is split around the T1/T2 commitments, so
        // y and z exist before t1/t2 are computable.
        let order_minus = |s: &BigUint| scalar::sub_mod(order, s, order);
        transcript.append_u64(b"rp-bits", n as u64);
        transcript.append_point(b"V", &commitment);
        transcript.append_point(b"A", &a_commit);
        transcript.append_point(b"S", &s_commit);
        let y = transcript.challenge_scalar(order);
        let z = transcript.challenge_scalar(order);

        let y_powers = Vector::new(scalar::powers(&y, n, order));
        let two_powers = Vector::new(scalar::powers(&BigUint::from(2u8), n, order));
        let z_sq = scalar::mul_mod(&z, &z, order);

        // l(X) = (a_l - z*1) + s_l*X
        let l0 = a_l.scalar_add_mod(&order_minus(&z), order);
        let l1 = s_l;
        // r(X) = y^n o (a_r + s_r*X + z*1) + z^2*2^n
        let r0 = y_powers
            .hadamard_mod(&a_r.scalar_add_mod(&z, order), order)?
            .add_mod(&two_powers.scalar_mul_mod(&z_sq, order), order)?;
        let r1 = y_powers.hadamard_mod(&s_r, order)?;

        let t1_coeff = scalar::add_mod(
            &l0.inner_prod_mod(&r1, order)?,
            &l1.inner_prod_mod(&r0, order)?,
            order,
        );
        let t2_coeff = l1.inner_prod_mod(&r1, order)?;

        let t1_commit = pedersen::commit_with_blinding(params, &t1_coeff, &tau1);
        let t2_commit = pedersen::commit_with_blinding(params, &t2_coeff, &tau2);

        transcript.append_point(b"T1", &t1_commit);
        transcript.append_point(b"T2", &t2_commit);
        let x = transcript.challenge_scalar(order);
        let x_sq = scalar::mul_mod(&x, &x, order);

        // Evaluate the response at x.
        let l = l0.add_mod(&l1.scalar_mul_mod(&x, order), order)?;
        let r = r0.add_mod(&r1.scalar_mul_mod(&x, order), order)?;
        let t = l.inner_prod_mod(&r, order)?;
        let taux = scalar::add_mod(
            &scalar::add_mod(
                &scalar::mul_mod(&tau2, &x_sq, order),
                &scalar::mul_mod(&tau1, &x, order),
                order,
            ),
            &scalar::mul_mod(&z_sq, &self.blinding, order),
            order,
        );
        let mu = scalar::add_mod(&alpha, &scalar::mul_mod(&rho, &x, order), order);

        transcript.append_scalar(b"taux", &taux);
        transcript.append_scalar(b"mu", &mu);
        transcript.append_scalar(b"t", &t);
        let w = transcript.challenge_scalar(order);
        let u_w = curve.scalar_mul(params.u(), &w);

        // Compress l, r into the inner-product argument under the folded
        // h' generators.
        let h_prime = folded_h_generators(params, &y)?;
        let ipa = inner_product::prove(curve, order, &u_w, g_vec, &h_prime, &l, &r, transcript)?;

        Ok(RangeProof {
            a: a_commit,
            s: s_commit,
            t1: t1_commit,
            t2: t2_commit,
            taux,
            mu,
            t,
            ipa,
        })
    }
}

/// Range-proof verifier for a published Pedersen commitment.
pub struct Verifier<'a> {
    params: &'a Parameters,
    commitment: Point,
}

impl<'a> Verifier<'a> {
    /// Creates a verifier bound to a commitment `V`.
    pub fn new(params: &'a Parameters, commitment: Point) -> Self {
        Self { params, commitment }
    }

    /// Verifies a range proof. Accept or reject, nothing in between: no
    /// diagnostic detail leaves the verifier.
    pub fn verify(&self, proof: &RangeProof) -> bool {
        let mut transcript = ProofTranscript::new(self.params.curve().coordinate_width());
        self.verify_with_transcript(proof, &mut transcript)
    }

    /// Verifies against a caller-supplied transcript; must carry the same
    /// context the prover's transcript did.
    pub fn verify_with_transcript(
        &self,
        proof: &RangeProof,
        transcript: &mut ProofTranscript,
    ) -> bool {
        self.check(proof, transcript).is_ok()
    }

    fn check(&self, proof: &RangeProof, transcript: &mut ProofTranscript) -> Result<()> {
        let params = self.params;
        let curve = params.curve();
        let order = params.order();
        let n = params.bitlength();

        if !n.is_power_of_two() {
            return Err(Error::Structural(format!(
                "bit length {n} is not a power of two"
            )));
        }
        // Malformed input fails before any algebra.
        for point in [&self.commitment, &proof.a, &proof.s, &proof.t1, &proof.t2] {
            if !curve.is_on_curve(point) {
                return Err(Error::Domain("point is not on the curve".into()));
            }
        }
        for s in [&proof.taux, &proof.mu, &proof.t] {
            if *s >= *order {
                return Err(Error::Domain("scalar is out of range".into()));
            }
        }

        let challenges = derive_challenges(
            transcript,
            params,
            &self.commitment,
            &proof.a,
            &proof.s,
            &proof.t1,
            &proof.t2,
        );
        let Challenges { y, z, x } = challenges;
        let z_sq = scalar::mul_mod(&z, &z, order);
        let x_sq = scalar::mul_mod(&x, &x, order);

        // First check: g^t * h^taux == V^{z^2} * g^{delta(y,z)} * T1^x * T2^{x^2}.
        let lhs = curve.double_scalar_mul(params.g(), params.h(), &proof.t, &proof.taux);
        let rhs = curve.add(
            &curve.double_scalar_mul(&self.commitment, params.g(), &z_sq, &delta(params, &y, &z)),
            &curve.double_scalar_mul(&proof.t1, &proof.t2, &x, &x_sq),
        );
        if lhs != rhs {
            return Err(Error::Verification);
        }

        transcript.append_scalar(b"taux", &proof.taux);
        transcript.append_scalar(b"mu", &proof.mu);
        transcript.append_scalar(b"t", &proof.t);
        let w = transcript.challenge_scalar(order);
        let u_w = curve.scalar_mul(params.u(), &w);

        // Reconstruct P = A * S^x * g^{-z} * h'^{z*y^n + z^2*2^n} and strip
        // the blinding, leaving the inner-product commitment
        // g^l * h'^r * u_w^t.
        let h_prime = folded_h_generators(params, &y)?;
        let g_vec = &params.g_vec()[..n];
        let y_powers = scalar::powers(&y, n, order);
        let two_powers = scalar::powers(&BigUint::from(2u8), n, order);
        let neg_z = scalar::sub_mod(order, &z, order);

        let mut p = curve.add(&proof.a, &curve.scalar_mul(&proof.s, &x));
        for i in 0..n {
            let h_exp = scalar::add_mod(
                &scalar::mul_mod(&z, &y_powers[i], order),
                &scalar::mul_mod(&z_sq, &two_powers[i], order),
                order,
            );
            let term = curve.double_scalar_mul(&g_vec[i], &h_prime[i], &neg_z, &h_exp);
            p = curve.add(&p, &term);
        }

        let neg_mu = scalar::sub_mod(order, &proof.mu, order);
        let p_ipa = curve.add(
            &p,
            &curve.double_scalar_mul(params.h(), &u_w, &neg_mu, &proof.t),
        );

        inner_product::verify(
            curve,
            order,
            &u_w,
            g_vec,
            &h_prime,
            &p_ipa,
            &proof.ipa,
            transcript,
        )
        .map_err(|_| Error::Verification)
    }
}
