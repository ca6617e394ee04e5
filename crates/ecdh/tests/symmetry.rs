//! ECDH symmetry over random key pairs

use dhsecret_api::AlgorithmId;
use dhsecret_backend::{ExprBackend, NativeBackend, SoftPrimitives};
use dhsecret_ecdh::{compute_secret_ecc, EccKey};
use p256::elliptic_curve::sec1::ToEncodedPoint;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

fn key_from_seed(seed: u64) -> EccKey {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let secret = p256::SecretKey::random(&mut rng);
    let point = secret.public_key().to_encoded_point(false);
    EccKey::private_from_raw(
        AlgorithmId::EcdhP256,
        point.x().unwrap(),
        point.y().unwrap(),
        &secret.to_bytes(),
    )
    .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn shared_secret_is_symmetric(seed_a in any::<u64>(), seed_b in any::<u64>()) {
        let alice = key_from_seed(seed_a);
        let bob = key_from_seed(seed_b);
        let backend = ExprBackend::new(SoftPrimitives::new());

        let ab = compute_secret_ecc(&backend, &alice, &bob.to_public()).unwrap();
        let ba = compute_secret_ecc(&backend, &bob, &alice.to_public()).unwrap();
        prop_assert_eq!(ab.len(), 32);
        prop_assert_eq!(&ab, &ba);

        let native = compute_secret_ecc(&NativeBackend, &alice, &bob.to_public()).unwrap();
        prop_assert_eq!(&ab, &native);
    }
}
