//! Pedersen commitments over curve scalar multiplication.
//!
//! A commitment `G^v * H^r` is hiding (the uniform blinding `r` masks `v`)
//! and binding (opening to a different value requires the discrete log of
//! `H` w.r.t. `G`). Additive homomorphism,
//! `Commit(v1, r1) + Commit(v2, r2) = Commit(v1 + v2, r1 + r2 mod L)`,
//! is relied on by the range proof and locked in by tests.

use num_bigint::BigUint;
use rand_core::RngCore;

use crate::curve::Point;
use crate::params::Parameters;
use crate::rng;
use crate::vector::Vector;
use crate::{Error, Result};

/// Commits to `value` with a fresh uniform blinding factor in `[0, L)`.
///
/// Returns the published point and the secret blinding, which the committer
/// keeps and never transmits.
pub fn commit<R: RngCore>(
    params: &Parameters,
    value: &BigUint,
    rng: &mut R,
) -> Result<(Point, BigUint)> {
    let blinding = rng::random_scalar(rng, params.order())?;
    let point = commit_with_blinding(params, value, &blinding);
    Ok((point, blinding))
}

/// The deterministic half of the commitment: `G^value * H^blinding`,
/// computed in one combined double-and-add pass.
pub fn commit_with_blinding(params: &Parameters, value: &BigUint, blinding: &BigUint) -> Point {
    let v = value % params.order();
    let r = blinding % params.order();
    params
        .curve()
        .double_scalar_mul(params.g(), params.h(), &v, &r)
}

/// Vector Pedersen commitment `sum_i g_vec[i]^a_i * h_vec[i]^b_i`.
///
/// Commits to two vectors at once under per-index generators; used for the
/// bit-decomposition vectors of the range proof.
pub fn vector_commit(
    params: &Parameters,
    g_vec: &[Point],
    h_vec: &[Point],
    a: &Vector,
    b: &Vector,
) -> Result<Point> {
    if g_vec.len() != a.len() || h_vec.len() != b.len() || a.len() != b.len() {
        return Err(Error::Structural(format!(
            "vector commitment size mismatch: generators {}/{}, vectors {}/{}",
            g_vec.len(),
            h_vec.len(),
            a.len(),
            b.len()
        )));
    }

    let curve = params.curve();
    let mut acc = Point::Infinity;
    for i in 0..a.len() {
        let term = curve.double_scalar_mul(&g_vec[i], &h_vec[i], &a.elems()[i], &b.elems()[i]);
        acc = curve.add(&acc, &term);
    }
    Ok(acc)
}

/// Vector commitment with an extra blinding term `H^blinding`.
pub fn blinded_vector_commit(
    params: &Parameters,
    g_vec: &[Point],
    h_vec: &[Point],
    a: &Vector,
    b: &Vector,
    blinding: &BigUint,
) -> Result<Point> {
    let curve = params.curve();
    let blind = curve.scalar_mul(params.h(), &(blinding % params.order()));
    Ok(curve.add(&blind, &vector_commit(params, g_vec, h_vec, a, b)?))
}
