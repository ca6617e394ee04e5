use super::*;
use crate::config::LengthPolicy;
use crate::EccKey;
use dhsecret_api::{AlgorithmId, Status};
use dhsecret_backend::testing::{FaultStage, FaultyPrimitives};
use dhsecret_backend::{
    BackendError, Capabilities, ErrorCode, ErrorSource, ExprBackend, NativeBackend, SharedValue,
    SoftPrimitives,
};
use p256::elliptic_curve::sec1::ToEncodedPoint;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use std::sync::atomic::{AtomicUsize, Ordering};

// NIST CAVS ECC CDH, P-256, COUNT = 0
const QCAVS_X: &str = "700c48f77f56584c5cc632ca65640db91b6bacce3a4df6b42ce7cc838833d287";
const QCAVS_Y: &str = "db71e509e3fd9b060ddb20ba5c51dcc5948d46fbf640dfe0441782cab85fa4ac";
const D_IUT: &str = "7d7dc5f71eb29ddaf80d6214632eeae03d9058af1fb6d22ed80badb62bc1a534";
const QIUT_X: &str = "ead218590119e8876b29146ff89ca61770c4edbbf97d38ce385ed281d8a6b230";
const QIUT_Y: &str = "28af61281fd35e2fa7002523acc85a429cb06ee6648325389f59edfce1405141";
const Z_IUT: &str = "46fc62106420ff012e54a434fbdd2d25ccc5852060561e68040dd7778997bd7b";

// Public key 2G; the shared x-coordinate with D_IUT has its top bit set
const TWO_G_X: &str = "7cf27b188d034f7e8a52380304b51ac3c08969e277f21b35a60b48fc47669978";
const TWO_G_Y: &str = "07775510db8ed040293d9ac69f7430dbba7dade63ce982299e04b79d227873d1";
const Z_TWO_G: &str = "fa293cc8cc53c0ce70aea0272c09a8395032ca2de4686eb9315e6d4fbcad98f9";

// Public key 342G; the shared x-coordinate with D_IUT starts with a zero byte
const G342_X: &str = "9c60a9732fe08c3981783d41ede5239e3bb23f5b39942c9759a047a97a8b9c08";
const G342_Y: &str = "4420997b1eb596d2fd6eb40ab9d34fe43ac9eeb6b54f5da29a65676ef0af40c4";
const Z_342G: &str = "004a2b814f63f71f5b1e20c62efdaea7826cac5dd8c69239f8cc8bd1ff03d9c1";

fn h(s: &str) -> Vec<u8> {
    hex::decode(s).unwrap()
}

fn iut_private() -> EccKey {
    EccKey::private_from_raw(AlgorithmId::EcdhP256, &h(QIUT_X), &h(QIUT_Y), &h(D_IUT)).unwrap()
}

fn public(x: &str, y: &str) -> EccKey {
    EccKey::public_from_raw(AlgorithmId::EcdhP256, &h(x), &h(y)).unwrap()
}

fn backends() -> Vec<Box<dyn EcdhBackend>> {
    vec![
        Box::new(ExprBackend::new(SoftPrimitives::new())),
        Box::new(NativeBackend),
    ]
}

fn strict() -> EngineConfig {
    EngineConfig {
        length_policy: LengthPolicy::Strict,
        ..EngineConfig::default()
    }
}

/// Native backend counting its exchange calls
#[derive(Default)]
struct CountingBackend {
    calls: AtomicUsize,
}

impl EcdhBackend for CountingBackend {
    fn name(&self) -> &'static str {
        "counting"
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::NATIVE_REQUIRED
    }

    fn required_capabilities(&self) -> Capabilities {
        Capabilities::NATIVE_REQUIRED
    }

    fn exchange<'a>(
        &'a self,
        curve: &CurveParams,
        private_scalar: &[u8],
        public_point: &[u8],
    ) -> core::result::Result<Box<dyn SharedValue + 'a>, BackendError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        NativeBackend.exchange(curve, private_scalar, public_point)
    }
}

#[test]
fn test_nist_vector_on_every_backend() {
    let expected = h(Z_IUT);
    for backend in backends() {
        let secret = compute_secret_ecc(backend.as_ref(), &iut_private(), &public(QCAVS_X, QCAVS_Y)).unwrap();
        assert_eq!(secret.len(), 32, "{}", backend.name());
        assert_eq!(secret.as_bytes(), &expected[..], "{}", backend.name());
    }
}

#[test]
fn test_high_bit_secret_is_stripped_to_width() {
    let expected = h(Z_TWO_G);
    for backend in backends() {
        let secret = compute_secret_with(
            backend.as_ref(),
            &strict(),
            &iut_private(),
            &public(TWO_G_X, TWO_G_Y),
        )
        .unwrap();
        assert_eq!(secret.as_bytes(), &expected[..], "{}", backend.name());
    }
}

#[test]
fn test_leading_zero_secret_follows_length_policy() {
    let expected = h(Z_342G);
    for backend in backends() {
        let secret = compute_secret_ecc(backend.as_ref(), &iut_private(), &public(G342_X, G342_Y)).unwrap();
        assert_eq!(secret.len(), 32);
        assert_eq!(secret.as_bytes(), &expected[..], "{}", backend.name());

        let err = compute_secret_with(
            backend.as_ref(),
            &strict(),
            &iut_private(),
            &public(G342_X, G342_Y),
        )
        .unwrap_err();
        assert_eq!(err.status(), Status::InternalError, "{}", backend.name());
    }
}

#[test]
fn test_unsupported_algorithm_never_reaches_backend() {
    let backend = CountingBackend::default();
    let cs = 48;
    let private = EccKey::private_from_raw(AlgorithmId::EcdhP384, &vec![1; cs], &vec![2; cs], &vec![3; cs]).unwrap();
    let public = private.to_public();

    let err = compute_secret_ecc(&backend, &private, &public).unwrap_err();
    assert_eq!(
        err,
        Error::UnsupportedAlgorithm {
            context: "compute_secret_ecc",
            algorithm: AlgorithmId::EcdhP384,
        }
    );
    assert_eq!(err.status(), Status::InternalError);
    assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_mismatched_algorithms_are_rejected() {
    let backend = CountingBackend::default();
    let cs = 48;
    let private = EccKey::private_from_raw(AlgorithmId::EcdhP384, &vec![1; cs], &vec![2; cs], &vec![3; cs]).unwrap();

    let err = compute_secret_ecc(&backend, &private, &public(QCAVS_X, QCAVS_Y)).unwrap_err();
    assert!(matches!(err, Error::InvalidKey { .. }));
    assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_export_refusal_is_passed_through() {
    let backend = CountingBackend::default();
    let public_only = iut_private().to_public();

    let err = compute_secret_ecc(&backend, &public_only, &public(QCAVS_X, QCAVS_Y)).unwrap_err();
    assert_eq!(err.status(), Status::InvalidParameter);
    assert!(matches!(err, Error::KeyExport { .. }));
    assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_every_backend_fault_is_internal_and_leak_free() {
    for stage in FaultStage::ALL {
        let backend = ExprBackend::new(FaultyPrimitives::failing_at(SoftPrimitives::new(), stage));

        let result = compute_secret_ecc(&backend, &iut_private(), &public(QCAVS_X, QCAVS_Y));
        let err = result.unwrap_err();
        assert_eq!(err.status(), Status::InternalError, "stage {:?}", stage);
        assert_eq!(backend.primitives().live_objects(), 0, "stage {:?}", stage);
    }
}

#[test]
fn test_successful_run_is_leak_free() {
    let backend = ExprBackend::new(FaultyPrimitives::new(SoftPrimitives::new()));
    let secret = compute_secret_ecc(&backend, &iut_private(), &public(QCAVS_X, QCAVS_Y)).unwrap();
    assert_eq!(secret.as_bytes(), &h(Z_IUT)[..]);
    assert_eq!(backend.primitives().live_objects(), 0);
}

#[test]
fn test_invalid_peer_point_is_internal_error() {
    let mut y = h(QCAVS_Y);
    y[31] ^= 0x01;
    let peer = EccKey::public_from_raw(AlgorithmId::EcdhP256, &h(QCAVS_X), &y).unwrap();

    for backend in backends() {
        let err = compute_secret_ecc(backend.as_ref(), &iut_private(), &peer).unwrap_err();
        assert!(matches!(err, Error::Backend { .. }), "{}", backend.name());
        assert_eq!(err.status(), Status::InternalError);
    }
}

struct ExhaustedBackend;

impl EcdhBackend for ExhaustedBackend {
    fn name(&self) -> &'static str {
        "exhausted"
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::NATIVE_REQUIRED
    }

    fn required_capabilities(&self) -> Capabilities {
        Capabilities::NATIVE_REQUIRED
    }

    fn exchange<'a>(
        &'a self,
        _curve: &CurveParams,
        _private_scalar: &[u8],
        _public_point: &[u8],
    ) -> core::result::Result<Box<dyn SharedValue + 'a>, BackendError> {
        Err(BackendError::new(ErrorSource::Native, ErrorCode::OutOfCore))
    }
}

#[test]
fn test_backend_out_of_core_maps_to_no_memory() {
    let err = compute_secret_ecc(&ExhaustedBackend, &iut_private(), &public(QCAVS_X, QCAVS_Y)).unwrap_err();
    assert_eq!(err.status(), Status::NoMemory);
    assert_eq!(err.context(), "exchange::execute");
}

fn random_key(rng: &mut ChaCha20Rng) -> EccKey {
    let secret = p256::SecretKey::random(rng);
    let point = secret.public_key().to_encoded_point(false);
    EccKey::private_from_raw(
        AlgorithmId::EcdhP256,
        point.x().unwrap(),
        point.y().unwrap(),
        &secret.to_bytes(),
    )
    .unwrap()
}

#[test]
fn test_random_pairs_agree_across_parties_and_backends() {
    let mut rng = ChaCha20Rng::seed_from_u64(42);
    let expression = ExprBackend::new(SoftPrimitives::new());

    for _ in 0..16 {
        let alice = random_key(&mut rng);
        let bob = random_key(&mut rng);

        let ab = compute_secret_ecc(&expression, &alice, &bob.to_public()).unwrap();
        let ba = compute_secret_ecc(&NativeBackend, &bob, &alice.to_public()).unwrap();
        assert_eq!(ab.len(), 32);
        assert_eq!(ab, ba);
    }
}

#[test]
fn test_engine_carries_its_config() {
    let engine = Engine::new(std::sync::Arc::new(NativeBackend), strict());
    assert_eq!(engine.backend().name(), "native-p256");
    assert_eq!(engine.config().length_policy, LengthPolicy::Strict);
    assert!(engine.compute_secret(&iut_private(), &public(G342_X, G342_Y)).is_err());
    assert!(format!("{:?}", engine).contains("native-p256"));
}
