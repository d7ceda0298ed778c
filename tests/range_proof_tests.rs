use std::sync::OnceLock;

use bulletproofs_zkp::{
    random_scalar, Parameters, ProofTranscript, Prover, RangeProof, SecureRng, Verifier,
};
use num_bigint::BigUint;

/// Shared parameters: 8-bit range, no aggregation headroom, so the whole
/// suite derives generators once.
fn params() -> &'static Parameters {
    static PARAMS: OnceLock<Parameters> = OnceLock::new();
    PARAMS.get_or_init(|| Parameters::secp256k1_with_bound(8, 1).expect("parameter generation"))
}

fn prove_value(value: u64) -> (bulletproofs_zkp::Point, RangeProof) {
    let params = params();
    let mut rng = SecureRng::new();
    let blinding = random_scalar(&mut rng, params.order()).expect("randomness");
    let prover = Prover::new(params, BigUint::from(value), blinding).expect("in-range value");
    let commitment = prover.commitment();
    let proof = prover.prove(&mut rng).expect("proof generation");
    (commitment, proof)
}

#[test]
fn accepts_valid_proofs_across_the_range() {
    for value in [0u64, 1, 42, 255] {
        let (commitment, proof) = prove_value(value);
        let verifier = Verifier::new(params(), commitment);
        assert!(verifier.verify(&proof), "value {value} should verify");
    }
}

#[test]
fn rejects_any_flipped_proof_byte() {
    let (commitment, proof) = prove_value(199);
    let bytes = proof.to_bytes();

    // One offset inside every component of the serialized proof:
    // A, S, T1, T2 (64 bytes each), taux, mu, t (32 each), the IPA round
    // points, and the two final IPA scalars.
    let component_offsets = [
        5usize,            // A, x coordinate
        40,                // A, y coordinate
        64 + 11,           // S
        128 + 30,          // T1
        192 + 47,          // T2
        256 + key_byte(),  // taux
        288 + key_byte(),  // mu
        320 + key_byte(),  // t
        352 + 9,           // IPA L_0
        352 + 64 + 9,      // IPA R_0
        bytes.len() - 64 + 13, // IPA final a
        bytes.len() - 32 + 13, // IPA final b
    ];

    let verifier = Verifier::new(params(), commitment);
    for offset in component_offsets {
        let mut corrupted = bytes.clone();
        corrupted[offset] ^= 0xff;

        match RangeProof::from_bytes(&corrupted) {
            Ok(tampered) => assert!(
                !verifier.verify(&tampered),
                "corrupted byte at offset {offset} must be rejected"
            ),
            // Structural rejection at decode time is also a rejection.
            Err(_) => {}
        }
    }
}

fn key_byte() -> usize {
    // A mid-scalar byte, always significant for 256-bit scalars.
    16
}

#[test]
fn rejects_proof_for_different_commitment() {
    let (_, proof) = prove_value(77);
    let (other_commitment, _) = prove_value(77);

    // Same value, fresh blinding: verification must still fail because the
    // proof binds the exact commitment point.
    let verifier = Verifier::new(params(), other_commitment);
    assert!(!verifier.verify(&proof));
}

#[test]
fn out_of_range_values_cannot_be_proven() {
    let params = params();
    for value in [256u64, 257, u64::MAX] {
        assert!(Prover::new(params, BigUint::from(value), BigUint::from(3u8)).is_err());
    }
}

#[test]
fn proofs_are_randomized_but_both_verify() {
    let params = params();
    let mut rng = SecureRng::new();
    let blinding = random_scalar(&mut rng, params.order()).unwrap();
    let prover = Prover::new(params, BigUint::from(99u8), blinding).unwrap();
    let commitment = prover.commitment();

    let proof1 = prover.prove(&mut rng).unwrap();
    let proof2 = prover.prove(&mut rng).unwrap();
    assert_ne!(proof1.to_bytes(), proof2.to_bytes());

    let verifier = Verifier::new(params, commitment);
    assert!(verifier.verify(&proof1));
    assert!(verifier.verify(&proof2));
}

#[test]
fn serialized_proof_layout_is_stable() {
    let (commitment, proof) = prove_value(123);
    let bytes = proof.to_bytes();

    // 4 points, 3 scalars, log2(8) = 3 rounds of two points, 2 scalars.
    assert_eq!(bytes.len(), 4 * 64 + 3 * 32 + 3 * 128 + 64);

    let decoded = RangeProof::from_bytes(&bytes).expect("round trip");
    assert_eq!(hex::encode(decoded.to_bytes()), hex::encode(&bytes));

    let verifier = Verifier::new(params(), commitment);
    assert!(verifier.verify(&decoded));
}

#[test]
fn transcript_context_binds_proofs_to_a_session() {
    let params = params();
    let mut rng = SecureRng::new();
    let blinding = random_scalar(&mut rng, params.order()).unwrap();
    let prover = Prover::new(params, BigUint::from(5u8), blinding).unwrap();
    let commitment = prover.commitment();

    let width = params.curve().coordinate_width();
    let mut prove_transcript = ProofTranscript::new(width);
    prove_transcript.append_context(b"transfer #42");
    let proof = prover
        .prove_with_transcript(&mut rng, &mut prove_transcript)
        .unwrap();

    let verifier = Verifier::new(params, commitment);

    let mut same_session = ProofTranscript::new(width);
    same_session.append_context(b"transfer #42");
    assert!(verifier.verify_with_transcript(&proof, &mut same_session));

    let mut other_session = ProofTranscript::new(width);
    other_session.append_context(b"transfer #43");
    assert!(!verifier.verify_with_transcript(&proof, &mut other_session));

    // And without any context at all.
    assert!(!verifier.verify(&proof));
}
