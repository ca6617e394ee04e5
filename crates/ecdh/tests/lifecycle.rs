//! Process-wide initialization and teardown

use std::sync::Arc;

use dhsecret_api::{AlgorithmId, Error, Status};
use dhsecret_backend::testing::FaultyPrimitives;
use dhsecret_backend::{BackendKind, Capabilities, ExprBackend, NativeBackend, SoftPrimitives};
use dhsecret_ecdh::{
    compute_secret, initialize, initialize_with, is_available, uninitialize, EccKey, EngineConfig,
};
use once_cell::sync::Lazy;
use parking_lot::Mutex;

// The engine is global; tests touching it run one at a time
static LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

fn key_pair() -> (EccKey, EccKey) {
    let h = |s: &str| hex::decode(s).unwrap();
    let private = EccKey::private_from_raw(
        AlgorithmId::EcdhP256,
        &h("ead218590119e8876b29146ff89ca61770c4edbbf97d38ce385ed281d8a6b230"),
        &h("28af61281fd35e2fa7002523acc85a429cb06ee6648325389f59edfce1405141"),
        &h("7d7dc5f71eb29ddaf80d6214632eeae03d9058af1fb6d22ed80badb62bc1a534"),
    )
    .unwrap();
    let public = EccKey::public_from_raw(
        AlgorithmId::EcdhP256,
        &h("700c48f77f56584c5cc632ca65640db91b6bacce3a4df6b42ce7cc838833d287"),
        &h("db71e509e3fd9b060ddb20ba5c51dcc5948d46fbf640dfe0441782cab85fa4ac"),
    )
    .unwrap();
    (private, public)
}

#[test]
fn test_compute_without_backend_is_unavailable() {
    let _guard = LOCK.lock();
    uninitialize();
    assert!(!is_available());

    let (private, public) = key_pair();
    let err = compute_secret(&private, &public).unwrap_err();
    assert_eq!(
        err,
        Error::BackendUnavailable {
            context: "compute_secret"
        }
    );
    assert_eq!(err.status(), Status::NotSupported);
}

#[test]
fn test_initialize_and_uninitialize() {
    let _guard = LOCK.lock();
    let (private, public) = key_pair();

    for kind in [BackendKind::Expression, BackendKind::Native] {
        let config = EngineConfig {
            backend: kind,
            ..EngineConfig::default()
        };
        assert!(initialize(&config), "{}", kind);
        assert!(is_available());

        let secret = compute_secret(&private, &public).unwrap();
        assert_eq!(
            hex::encode(secret.as_bytes()),
            "46fc62106420ff012e54a434fbdd2d25ccc5852060561e68040dd7778997bd7b"
        );

        uninitialize();
        assert!(!is_available());
        uninitialize();
    }
}

#[test]
fn test_disabled_backend_fails_initialization() {
    let _guard = LOCK.lock();
    uninitialize();

    let config = EngineConfig {
        backend: BackendKind::Disabled,
        ..EngineConfig::default()
    };
    assert!(!initialize(&config));
    assert!(!is_available());
}

#[test]
fn test_missing_capability_drops_backend() {
    let _guard = LOCK.lock();
    uninitialize();

    let primitives = FaultyPrimitives::new(SoftPrimitives::new())
        .with_capabilities(Capabilities::EXPRESSION_REQUIRED - Capabilities::POINT_DECODE);
    let backend = Arc::new(ExprBackend::new(primitives));
    let probe = Arc::clone(&backend);

    assert!(!initialize_with(backend, EngineConfig::default()));
    assert!(!is_available());
    // only the probe is left
    assert_eq!(Arc::strong_count(&probe), 1);
}

#[test]
fn test_reinitialize_replaces_backend() {
    let _guard = LOCK.lock();
    let (private, public) = key_pair();

    assert!(initialize_with(
        Arc::new(ExprBackend::new(SoftPrimitives::new())),
        EngineConfig::default()
    ));
    assert!(initialize_with(Arc::new(NativeBackend), EngineConfig::default()));
    assert!(compute_secret(&private, &public).is_ok());

    uninitialize();
    assert!(!is_available());
}

#[test]
fn test_failed_initialize_unloads_previous_backend() {
    let _guard = LOCK.lock();
    let (private, public) = key_pair();

    assert!(initialize_with(Arc::new(NativeBackend), EngineConfig::default()));
    let disabled = EngineConfig {
        backend: BackendKind::Disabled,
        ..EngineConfig::default()
    };
    assert!(!initialize(&disabled));
    assert!(!is_available());
    assert!(matches!(
        compute_secret(&private, &public),
        Err(Error::BackendUnavailable { .. })
    ));

    assert!(initialize_with(Arc::new(NativeBackend), EngineConfig::default()));
    let primitives = FaultyPrimitives::new(SoftPrimitives::new())
        .with_capabilities(Capabilities::EXPRESSION_REQUIRED - Capabilities::PK_ENCRYPT);
    assert!(!initialize_with(
        Arc::new(ExprBackend::new(primitives)),
        EngineConfig::default()
    ));
    assert!(!is_available());
}
