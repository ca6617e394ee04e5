use super::*;
use crate::error::{ErrorCode, ErrorSource};
use crate::testing::{FaultStage, FaultyPrimitives};
use dhsecret_api::{curve_params, AlgorithmId};

// NIST CAVS ECC CDH, P-256, COUNT = 0
const QCAVS: &str = "04\
    700c48f77f56584c5cc632ca65640db91b6bacce3a4df6b42ce7cc838833d287\
    db71e509e3fd9b060ddb20ba5c51dcc5948d46fbf640dfe0441782cab85fa4ac";
const D_IUT: &str = "7d7dc5f71eb29ddaf80d6214632eeae03d9058af1fb6d22ed80badb62bc1a534";
const Z_IUT: &str = "46fc62106420ff012e54a434fbdd2d25ccc5852060561e68040dd7778997bd7b";

fn p256() -> &'static CurveParams {
    curve_params(AlgorithmId::EcdhP256).unwrap()
}

fn print_all(value: &dyn SharedValue) -> Vec<u8> {
    let len = value.print(MpiFormat::Std, None).unwrap();
    let mut out = vec![0u8; len];
    let written = value.print(MpiFormat::Std, Some(&mut out)).unwrap();
    out.truncate(written);
    out
}

#[test]
fn test_exchange_nist_vector() {
    let backend = ExprBackend::new(SoftPrimitives::new());
    let scalar = hex::decode(D_IUT).unwrap();
    let point = hex::decode(QCAVS).unwrap();

    let shared = backend.exchange(p256(), &scalar, &point).unwrap();
    assert_eq!(print_all(shared.as_ref()), hex::decode(Z_IUT).unwrap());
}

#[test]
fn test_exchange_rejects_point_off_curve() {
    let backend = ExprBackend::new(SoftPrimitives::new());
    let scalar = hex::decode(D_IUT).unwrap();
    let mut point = hex::decode(QCAVS).unwrap();
    point[64] ^= 0x01;

    let err = backend.exchange(p256(), &scalar, &point).err().unwrap();
    assert_eq!(err, BackendError::new(ErrorSource::Pubkey, ErrorCode::InvalidPoint));
}

#[test]
fn test_exchange_rejects_zero_scalar() {
    let backend = ExprBackend::new(SoftPrimitives::new());
    let point = hex::decode(QCAVS).unwrap();

    let err = backend.exchange(p256(), &[0u8; 32], &point).err().unwrap();
    assert_eq!(err.code, ErrorCode::BadSecretKey);
}

#[test]
fn test_exchange_rejects_unknown_curve() {
    let backend = ExprBackend::new(SoftPrimitives::new());
    let curve = CurveParams {
        name: "NIST P-384",
        ..*p256()
    };
    let scalar = hex::decode(D_IUT).unwrap();
    let point = hex::decode(QCAVS).unwrap();

    let err = backend.exchange(&curve, &scalar, &point).err().unwrap();
    assert_eq!(err.code, ErrorCode::UnknownCurve);
}

#[test]
fn test_encrypt_result_carries_both_points() {
    let p = SoftPrimitives::new();
    let scalar = hex::decode(D_IUT).unwrap();
    let point = hex::decode(QCAVS).unwrap();

    let pubkey = p
        .sexp_build(PUBLIC_KEY_FORMAT, &[SexpArg::Str("NIST P-256"), SexpArg::Bytes(&point)])
        .unwrap();
    let data = p.sexp_build(RAW_DATA_FORMAT, &[SexpArg::Bytes(&scalar)]).unwrap();
    let encrypted = p.pk_encrypt(&data, &pubkey).unwrap();

    assert_eq!(encrypted.car(), Some("enc-val"));
    let s = p.sexp_extract_param(&encrypted, "", "s").unwrap();
    let e = p.sexp_extract_param(&encrypted, "ecdh", "e").unwrap();
    assert_eq!(s.as_be_bytes().len(), 65);
    assert_eq!(e.as_be_bytes().len(), 65);
    assert_eq!(&s.as_be_bytes()[1..33], &hex::decode(Z_IUT).unwrap()[..]);
}

#[test]
fn test_encrypt_requires_raw_flag() {
    let p = SoftPrimitives::new();
    let point = hex::decode(QCAVS).unwrap();
    let pubkey = p
        .sexp_build(PUBLIC_KEY_FORMAT, &[SexpArg::Str("NIST P-256"), SexpArg::Bytes(&point)])
        .unwrap();
    let data = p
        .sexp_build("(data(flags pkcs1)(value %b))", &[SexpArg::Bytes(&[1])])
        .unwrap();

    let err = p.pk_encrypt(&data, &pubkey).unwrap_err();
    assert_eq!(err.code, ErrorCode::NotImplemented);
}

#[test]
fn test_every_fault_releases_all_objects() {
    let scalar = hex::decode(D_IUT).unwrap();
    let point = hex::decode(QCAVS).unwrap();

    for stage in FaultStage::ALL {
        let backend = ExprBackend::new(FaultyPrimitives::failing_at(SoftPrimitives::new(), stage));
        let result = backend
            .exchange(p256(), &scalar, &point)
            .and_then(|shared| {
                let len = shared.print(MpiFormat::Std, None)?;
                let mut out = vec![0u8; len];
                shared.print(MpiFormat::Std, Some(&mut out))
            });

        assert_eq!(result, Err(stage.error()), "stage {:?}", stage);
        assert_eq!(backend.primitives().live_objects(), 0, "stage {:?}", stage);
    }
}

#[test]
fn test_successful_exchange_releases_all_objects() {
    let backend = ExprBackend::new(FaultyPrimitives::new(SoftPrimitives::new()));
    let scalar = hex::decode(D_IUT).unwrap();
    let point = hex::decode(QCAVS).unwrap();

    let shared = backend.exchange(p256(), &scalar, &point).unwrap();
    assert_eq!(backend.primitives().live_objects(), 1);
    assert_eq!(print_all(shared.as_ref()), hex::decode(Z_IUT).unwrap());
    drop(shared);
    assert_eq!(backend.primitives().live_objects(), 0);
}
