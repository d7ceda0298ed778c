use std::sync::OnceLock;

use bulletproofs_zkp::{random_scalar, Parameters, Prover, SecureRng, Vector, Verifier};
use num_bigint::BigUint;
use proptest::prelude::*;

fn params() -> &'static Parameters {
    static PARAMS: OnceLock<Parameters> = OnceLock::new();
    PARAMS.get_or_init(|| Parameters::secp256k1_with_bound(4, 1).expect("parameter generation"))
}

proptest! {
    // End-to-end proving is expensive over bignum arithmetic; a handful of
    // sampled values is plenty on top of the fixed-value unit tests.
    #![proptest_config(ProptestConfig::with_cases(6))]

    #[test]
    fn any_in_range_value_proves_and_verifies(value in 0u64..16) {
        let params = params();
        let mut rng = SecureRng::new();
        let blinding = random_scalar(&mut rng, params.order()).unwrap();

        let prover = Prover::new(params, BigUint::from(value), blinding).unwrap();
        let commitment = prover.commitment();
        let proof = prover.prove(&mut rng).unwrap();

        let verifier = Verifier::new(params, commitment);
        prop_assert!(verifier.verify(&proof));
    }

    #[test]
    fn commitment_homomorphism(v1 in 0u64..1 << 30, v2 in 0u64..1 << 30) {
        let params = params();
        let mut rng = SecureRng::new();

        let (c1, r1) = bulletproofs_zkp::pedersen::commit(params, &BigUint::from(v1), &mut rng).unwrap();
        let (c2, r2) = bulletproofs_zkp::pedersen::commit(params, &BigUint::from(v2), &mut rng).unwrap();

        let sum_value = BigUint::from(v1 + v2);
        let sum_blinding = (r1 + r2) % params.order();
        let expected = bulletproofs_zkp::pedersen::commit_with_blinding(params, &sum_value, &sum_blinding);

        prop_assert_eq!(params.curve().add(&c1, &c2), expected);
    }

    #[test]
    fn inner_product_is_bilinear(
        a in proptest::collection::vec(0u64..1 << 20, 4),
        b in proptest::collection::vec(0u64..1 << 20, 4),
        c in proptest::collection::vec(0u64..1 << 20, 4),
    ) {
        let order = params().order().clone();
        let to_vec = |xs: &[u64]| Vector::new(xs.iter().map(|&x| BigUint::from(x)).collect());
        let (a, b, c) = (to_vec(&a), to_vec(&b), to_vec(&c));

        let lhs = a.inner_prod_mod(&b.add_mod(&c, &order).unwrap(), &order).unwrap();
        let rhs = (a.inner_prod_mod(&b, &order).unwrap() + a.inner_prod_mod(&c, &order).unwrap()) % &order;
        prop_assert_eq!(lhs, rhs);
    }

    #[test]
    fn scalar_mul_distributes_over_base_point(m in 1u64..1 << 20, n in 1u64..1 << 20) {
        let params = params();
        let curve = params.curve();
        let g = params.g();

        let sum = (BigUint::from(m) + BigUint::from(n)) % params.order();
        let lhs = curve.scalar_mul(g, &sum);
        let rhs = curve.add(
            &curve.scalar_mul(g, &BigUint::from(m)),
            &curve.scalar_mul(g, &BigUint::from(n)),
        );
        prop_assert_eq!(lhs, rhs);
    }
}
