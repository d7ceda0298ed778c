//! Merlin transcript wrapper for the Fiat-Shamir transformation.
//!
//! Challenges are pure functions of the ordered transcript contents, so the
//! prover and verifier derive identical scalars without interaction, and
//! proofs are replayable in tests.

use merlin::Transcript as MerlinTranscript;
use num_bigint::BigUint;
use num_traits::Zero;

use crate::curve::Point;

/// Protocol label for transcript initialization.
const PROTOCOL_LABEL: &[u8] = b"bulletproofs-zkp range proof v1";

/// Domain separation tag for challenge generation.
const CHALLENGE_DST: &[u8] = b"challenge";

/// Number of extra bits for statistical security when reducing a challenge
/// into `[0, order)` (128 bits).
const EXTRA_SECURITY_BITS: u64 = 128;

/// Transcript of the proof so far; the source of all verifier challenges.
pub struct ProofTranscript {
    inner: MerlinTranscript,
    coord_width: usize,
}

impl ProofTranscript {
    /// Creates a transcript bound to the crate's protocol label.
    ///
    /// `coord_width` is the canonical byte width of one curve coordinate,
    /// so appended points always serialize identically on both sides.
    pub fn new(coord_width: usize) -> Self {
        let mut inner = MerlinTranscript::new(PROTOCOL_LABEL);
        inner.append_message(b"protocol", b"bulletproofs");
        Self { inner, coord_width }
    }

    /// Appends application context, binding proofs to a caller-chosen
    /// domain (session id, purpose string) to prevent replay elsewhere.
    pub fn append_context(&mut self, context: &[u8]) {
        self.inner.append_message(b"context", context);
    }

    /// Appends a curve point in canonical `X || Y` encoding.
    pub fn append_point(&mut self, label: &'static [u8], point: &Point) {
        self.inner
            .append_message(label, &point.to_bytes(self.coord_width));
    }

    /// Appends a scalar in minimal big-endian encoding.
    pub fn append_scalar(&mut self, label: &'static [u8], scalar: &BigUint) {
        self.inner.append_message(label, &scalar.to_bytes_be());
    }

    /// Appends a small integer (sizes, bit lengths) as 8 big-endian bytes.
    pub fn append_u64(&mut self, label: &'static [u8], value: u64) {
        self.inner.append_message(label, &value.to_be_bytes());
    }

    /// Derives a nonzero challenge scalar in `[1, order)`.
    ///
    /// Samples `order.bits() + 128` bits and reduces, so the result is
    /// statistically uniform. A zero draw (negligible for cryptographic
    /// orders) re-challenges; the merlin state advances on every draw, so
    /// both sides stay in lockstep.
    pub fn challenge_scalar(&mut self, order: &BigUint) -> BigUint {
        let byte_len = ((order.bits() + EXTRA_SECURITY_BITS) as usize).div_ceil(8);
        loop {
            let mut buf = vec![0u8; byte_len];
            self.inner.challenge_bytes(CHALLENGE_DST, &mut buf);
            let challenge = BigUint::from_bytes_be(&buf) % order;
            if !challenge.is_zero() {
                return challenge;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order() -> BigUint {
        BigUint::from(0xffff_fffb_u64)
    }

    #[test]
    fn challenges_are_deterministic() {
        let mut t1 = ProofTranscript::new(32);
        t1.append_scalar(b"v", &BigUint::from(42u32));
        t1.append_point(b"p", &Point::new(BigUint::from(3u8), BigUint::from(4u8)));

        let mut t2 = ProofTranscript::new(32);
        t2.append_scalar(b"v", &BigUint::from(42u32));
        t2.append_point(b"p", &Point::new(BigUint::from(3u8), BigUint::from(4u8)));

        assert_eq!(t1.challenge_scalar(&order()), t2.challenge_scalar(&order()));
    }

    #[test]
    fn challenges_diverge_on_different_input() {
        let mut t1 = ProofTranscript::new(32);
        t1.append_scalar(b"v", &BigUint::from(42u32));

        let mut t2 = ProofTranscript::new(32);
        t2.append_scalar(b"v", &BigUint::from(43u32));

        assert_ne!(t1.challenge_scalar(&order()), t2.challenge_scalar(&order()));
    }

    #[test]
    fn challenges_diverge_on_reordering() {
        let a = BigUint::from(1u8);
        let b = BigUint::from(2u8);

        let mut t1 = ProofTranscript::new(32);
        t1.append_scalar(b"x", &a);
        t1.append_scalar(b"x", &b);

        let mut t2 = ProofTranscript::new(32);
        t2.append_scalar(b"x", &b);
        t2.append_scalar(b"x", &a);

        assert_ne!(t1.challenge_scalar(&order()), t2.challenge_scalar(&order()));
    }

    #[test]
    fn challenges_are_in_range_and_nonzero() {
        let mut t = ProofTranscript::new(32);
        t.append_context(b"range check");
        let order = order();
        for _ in 0..32 {
            let c = t.challenge_scalar(&order);
            assert!(!c.is_zero());
            assert!(c < order);
        }
    }

    #[test]
    fn context_separates_transcripts() {
        let mut t1 = ProofTranscript::new(32);
        t1.append_context(b"session-1");

        let mut t2 = ProofTranscript::new(32);
        t2.append_context(b"session-2");

        assert_ne!(t1.challenge_scalar(&order()), t2.challenge_scalar(&order()));
    }
}
