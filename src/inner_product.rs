//! Recursive inner-product argument with O(log n) proof size.
//!
//! Given a public commitment `P = g^a * h^b * u^<a,b>` over length-n
//! vectors, the argument proves knowledge of `a` and `b` without revealing
//! them. Each round halves the problem: the prover commits to the cross
//! terms of the low/high halves, the transcript yields a challenge `x`, and
//! vectors and generators fold into a problem of half the size. The base
//! case `n = 1` sends the two remaining scalars in the clear.
//!
//! The halving is a loop over mutable working buffers rather than actual
//! recursion, so no per-round reallocation of the generator vectors occurs
//! beyond the initial copy.

use num_bigint::BigUint;

use crate::curve::{Curve, Point};
use crate::scalar;
use crate::transcript::ProofTranscript;
use crate::vector::Vector;
use crate::{Error, Result};

/// Transcript of one inner-product argument: `log2(n)` rounds of `(L, R)`
/// commitments plus the two base-case scalars.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InnerProductProof {
    pub(crate) l_vec: Vec<Point>,
    pub(crate) r_vec: Vec<Point>,
    pub(crate) a: BigUint,
    pub(crate) b: BigUint,
}

impl InnerProductProof {
    /// Number of halving rounds recorded in the proof.
    pub fn rounds(&self) -> usize {
        self.l_vec.len()
    }
}

fn check_dimensions(n: usize, h: usize, a: usize, b: usize) -> Result<()> {
    if h != n || a != n || b != n {
        return Err(Error::Structural(format!(
            "inner-product vectors must share one length, got {n}/{h}/{a}/{b}"
        )));
    }
    if !n.is_power_of_two() {
        return Err(Error::Structural(format!(
            "inner-product size {n} is not a power of two"
        )));
    }
    Ok(())
}

/// `sum_i g[i]^a[i] * h[i]^b[i] * u^c` over equal-length halves.
fn cross_commitment(
    curve: &Curve,
    g: &[Point],
    a: &[BigUint],
    h: &[Point],
    b: &[BigUint],
    u: &Point,
    c: &BigUint,
) -> Point {
    let mut acc = curve.scalar_mul(u, c);
    for i in 0..g.len() {
        let term = curve.double_scalar_mul(&g[i], &h[i], &a[i], &b[i]);
        acc = curve.add(&acc, &term);
    }
    acc
}

/// Folds generator halves: `out[i] = lo[i]^x_lo * hi[i]^x_hi`.
fn fold_generators(curve: &Curve, lo: &[Point], hi: &[Point], x_lo: &BigUint, x_hi: &BigUint) -> Vec<Point> {
    lo.iter()
        .zip(hi)
        .map(|(l, h)| curve.double_scalar_mul(l, h, x_lo, x_hi))
        .collect()
}

/// Folds scalar halves: `out[i] = lo[i]*x_lo + hi[i]*x_hi mod order`.
fn fold_scalars(
    lo: &[BigUint],
    hi: &[BigUint],
    x_lo: &BigUint,
    x_hi: &BigUint,
    order: &BigUint,
) -> Vec<BigUint> {
    lo.iter()
        .zip(hi)
        .map(|(l, h)| {
            scalar::add_mod(
                &scalar::mul_mod(l, x_lo, order),
                &scalar::mul_mod(h, x_hi, order),
                order,
            )
        })
        .collect()
}

/// Proves knowledge of `a`, `b` with `P = g^a * h^b * u^<a,b>`.
///
/// The challenges bind `(L_i, R_i)` into the shared transcript in order,
/// so the argument inherits everything appended by the enclosing protocol.
pub fn prove(
    curve: &Curve,
    order: &BigUint,
    u: &Point,
    g: &[Point],
    h: &[Point],
    a: &Vector,
    b: &Vector,
    transcript: &mut ProofTranscript,
) -> Result<InnerProductProof> {
    let mut n = g.len();
    check_dimensions(n, h.len(), a.len(), b.len())?;
    transcript.append_u64(b"ipa-n", n as u64);

    let mut g = g.to_vec();
    let mut h = h.to_vec();
    let mut a: Vec<BigUint> = a.elems().to_vec();
    let mut b: Vec<BigUint> = b.elems().to_vec();

    let rounds = n.trailing_zeros() as usize;
    let mut l_vec = Vec::with_capacity(rounds);
    let mut r_vec = Vec::with_capacity(rounds);

    while n > 1 {
        n /= 2;
        let (a_lo, a_hi) = a.split_at(n);
        let (b_lo, b_hi) = b.split_at(n);
        let (g_lo, g_hi) = g.split_at(n);
        let (h_lo, h_hi) = h.split_at(n);

        let c_l = Vector::new(a_lo.to_vec())
            .inner_prod_mod(&Vector::new(b_hi.to_vec()), order)?;
        let c_r = Vector::new(a_hi.to_vec())
            .inner_prod_mod(&Vector::new(b_lo.to_vec()), order)?;

        let l = cross_commitment(curve, g_hi, a_lo, h_lo, b_hi, u, &c_l);
        let r = cross_commitment(curve, g_lo, a_hi, h_hi, b_lo, u, &c_r);

        transcript.append_point(b"ipa-L", &l);
        transcript.append_point(b"ipa-R", &r);
        let x = transcript.challenge_scalar(order);
        let x_inv = scalar::inv_mod(&x, order)?;

        let a_next = fold_scalars(a_lo, a_hi, &x, &x_inv, order);
        let b_next = fold_scalars(b_lo, b_hi, &x_inv, &x, order);
        let g_next = fold_generators(curve, g_lo, g_hi, &x_inv, &x);
        let h_next = fold_generators(curve, h_lo, h_hi, &x, &x_inv);

        a = a_next;
        b = b_next;
        g = g_next;
        h = h_next;

        l_vec.push(l);
        r_vec.push(r);
    }

    Ok(InnerProductProof {
        l_vec,
        r_vec,
        a: a[0].clone(),
        b: b[0].clone(),
    })
}

/// Verifies an inner-product proof against the commitment `p`.
///
/// Recomputes the folded commitment `L^{x^2} * P * R^{x^-2}` round by
/// round, folds the generators with the same challenges, and checks the
/// base case `g^a * h^b * u^{ab}`. Any divergence, including a transcript
/// mismatch, surfaces as a bare verification failure.
pub fn verify(
    curve: &Curve,
    order: &BigUint,
    u: &Point,
    g: &[Point],
    h: &[Point],
    p: &Point,
    proof: &InnerProductProof,
    transcript: &mut ProofTranscript,
) -> Result<()> {
    let n = g.len();
    check_dimensions(n, h.len(), n, n)?;
    if proof.l_vec.len() != proof.r_vec.len()
        || proof.l_vec.len() != n.trailing_zeros() as usize
    {
        return Err(Error::Structural(format!(
            "proof has {} rounds, expected {}",
            proof.l_vec.len(),
            n.trailing_zeros()
        )));
    }
    for point in proof.l_vec.iter().chain(&proof.r_vec) {
        if !curve.is_on_curve(point) {
            return Err(Error::Domain("proof point is not on the curve".into()));
        }
    }
    if proof.a >= *order || proof.b >= *order {
        return Err(Error::Domain("proof scalar is out of range".into()));
    }

    transcript.append_u64(b"ipa-n", n as u64);

    let mut g = g.to_vec();
    let mut h = h.to_vec();
    let mut p_acc = p.clone();
    let mut half = n;

    for (l, r) in proof.l_vec.iter().zip(&proof.r_vec) {
        half /= 2;

        transcript.append_point(b"ipa-L", l);
        transcript.append_point(b"ipa-R", r);
        let x = transcript.challenge_scalar(order);
        let x_inv = scalar::inv_mod(&x, order)?;
        let x_sq = scalar::mul_mod(&x, &x, order);
        let x_inv_sq = scalar::mul_mod(&x_inv, &x_inv, order);

        // P' = L^{x^2} * P * R^{x^-2}
        let lr = curve.double_scalar_mul(l, r, &x_sq, &x_inv_sq);
        p_acc = curve.add(&p_acc, &lr);

        let (g_lo, g_hi) = g.split_at(half);
        let (h_lo, h_hi) = h.split_at(half);
        g = fold_generators(curve, g_lo, g_hi, &x_inv, &x);
        h = fold_generators(curve, h_lo, h_hi, &x, &x_inv);
    }

    let ab = scalar::mul_mod(&proof.a, &proof.b, order);
    let expected = cross_commitment(
        curve,
        &g[..1],
        std::slice::from_ref(&proof.a),
        &h[..1],
        std::slice::from_ref(&proof.b),
        u,
        &ab,
    );

    if p_acc != expected {
        return Err(Error::Verification);
    }
    Ok(())
}
