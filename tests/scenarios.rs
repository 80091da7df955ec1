mod common;

use base64ct::{Base64UrlUnpadded, Encoding};
use common::{bit_flips, read_jwk, read_storage, TestResult};
use jose_keys::{
    jwa::{self, JsonWebAlgorithm},
    jwk::{
        AnyJsonWebKey, DecryptingKey, EcCurve, EcPrivateKey, JsonWebKey, SigningKey, SymmetricKey,
        ValidatingKey,
    },
    sealed_data::{Ciphertext, SealedData},
    Error,
};

const NONE: &JsonWebAlgorithm = &JsonWebAlgorithm::None;

fn aes_gcm_variants() -> [jwa::AesGcm; 3] {
    [
        jwa::AesGcm::Aes128,
        jwa::AesGcm::Aes192,
        jwa::AesGcm::Aes256,
    ]
}

#[test]
fn a128gcm_hello() -> TestResult {
    let key = SymmetricKey::for_aes_gcm([0x24u8; 16])?;
    assert_eq!(key.storage().get_str("alg"), Some("A128GCM"));

    let sealed = key.encrypt(b"hello", NONE)?;
    assert_eq!(key.decrypt((&sealed).into(), NONE)?, b"hello");
    Ok(())
}

#[test]
fn hs256_detects_a_tampered_body() -> TestResult {
    let key = SymmetricKey::generate_hmac(jwa::Hmac::Hs256)?;

    let signature = key.sign(b"token-body", NONE)?;
    key.validate(&signature, b"token-body", NONE)?;
    assert!(matches!(
        key.validate(&signature, b"token-bodx", NONE),
        Err(Error::AuthenticationFailure)
    ));
    Ok(())
}

// RFC 7515, appendix A.1
#[test]
fn rfc7515_hs256() -> TestResult {
    let key = SymmetricKey::from_storage(read_storage("hs256")?)?;
    let signing_input = "eyJ0eXAiOiJKV1QiLA0KICJhbGciOiJIUzI1NiJ9.\
                         eyJpc3MiOiJqb2UiLA0KICJleHAiOjEzMDA4MTkzODAsDQogImh0dHA6Ly9leGFtcGxlLmNvbS9pc19yb290Ijp0cnVlfQ";
    let expected = Base64UrlUnpadded::decode_vec("dBjftJeZ4CVP-mB92K27uhbUJU1p1r_wW1gFWFOEjXk")
        .map_err(|_| "invalid base64url")?;

    assert_eq!(key.sign(signing_input.as_bytes(), NONE)?, expected);
    key.validate(&expected, signing_input.as_bytes(), &jwa::Hmac::Hs256.into())?;
    Ok(())
}

fn decode(signature: &str) -> TestResult<Vec<u8>> {
    Ok(Base64UrlUnpadded::decode_vec(signature).map_err(|_| "invalid base64url")?)
}

// ES256 from RFC 7515 appendix A.3, ES512 from appendix A.4. The ES384
// signature was produced with OpenSSL over the same kind of signing input.
#[test]
fn ecdsa_known_answers() -> TestResult {
    let vectors = [
        (
            "rfc7515-a3.pub",
            jwa::EcDSA::Es256,
            "eyJhbGciOiJFUzI1NiJ9.\
             eyJpc3MiOiJqb2UiLA0KICJleHAiOjEzMDA4MTkzODAsDQogImh0dHA6Ly9leGFtcGxlLmNvbS9pc19yb290Ijp0cnVlfQ",
            "DtEhU3ljbEg8L38VWAfUAqOyKAM6-Xx-F4GawxaepmXFCgfTjDxw5djxLa8ISlSApmWQxfKTUJqPP3-Kg6NU1Q",
        ),
        (
            "p384",
            jwa::EcDSA::Es384,
            "eyJhbGciOiJFUzM4NCJ9.eyJzdWIiOiJrYXQifQ",
            "P39CC0LCFSYbONBX-Owij0UxemJKeVUQ5dnkyzU6jy--OjB4xtXN7AZpjAmLLOlx\
             YBts5-2PeWGk5yQ7Tsz-bTXbcBz-S4GjQhV_-iQGwC926ogFi4KPpNbA4leQ9ssN",
        ),
        (
            "rfc7515-a4",
            jwa::EcDSA::Es512,
            "eyJhbGciOiJFUzUxMiJ9.UGF5bG9hZA",
            "AdwMgeerwtHoh-l192l60hp9wAHZFVJbLfD_UxMi70cwnZOYaRI1bKPWROc-mZZq\
             wqT2SI-KGDKB34XO0aw_7XdtAG8GaSwFKdCAPZgoXD2YBJZCPEX3xKpRwcdOO8Kp\
             EHwJjyqOgzDO7iKvU8vcnwNrmxYbSW9ERBXukOXolLzeO_Jn",
        ),
    ];

    for (name, alg, signing_input, signature) in vectors {
        let key: AnyJsonWebKey = serde_json::from_value(read_jwk(name)?)?;
        let signature = decode(signature)?;
        assert_eq!(signature.len(), alg.signature_size());

        key.validate(&signature, signing_input.as_bytes(), NONE)?;
        key.validate(&signature, signing_input.as_bytes(), &alg.into())?;

        let mut tampered = signing_input.as_bytes().to_vec();
        tampered.push(b'.');
        assert!(matches!(
            key.validate(&signature, &tampered, NONE),
            Err(Error::AuthenticationFailure)
        ));
    }
    Ok(())
}

#[test]
fn published_private_keys_sign() -> TestResult {
    for name in ["p384", "rfc7515-a4"] {
        let key = EcPrivateKey::from_storage(read_storage(name)?)?;
        let signature = key.sign(b"eyJhbGciOiJub25lIn0.e30", NONE)?;
        key.to_public_key()
            .validate(&signature, b"eyJhbGciOiJub25lIn0.e30", NONE)?;
    }
    Ok(())
}

#[test]
fn aead_roundtrip_for_every_size() -> TestResult {
    for variant in aes_gcm_variants() {
        let key = SymmetricKey::generate_aes_gcm(variant)?;
        let alg = JsonWebAlgorithm::from(variant);

        for plaintext in [&b""[..], &b"a"[..], &[0xffu8; 1000][..]] {
            let sealed = key.encrypt(plaintext, &alg)?;
            assert_eq!(sealed.ciphertext().len(), plaintext.len());
            assert_eq!(key.decrypt((&sealed).into(), &alg)?, plaintext);
        }
    }
    Ok(())
}

#[test]
fn sealed_and_combined_decrypt_the_same() -> TestResult {
    for variant in aes_gcm_variants() {
        let key = SymmetricKey::generate_aes_gcm(variant)?;
        let sealed = key.encrypt(b"either shape", NONE)?;

        let combined = sealed.to_combined();
        let split = SealedData::from_combined(
            &combined,
            jwa::AesGcm::NONCE_SIZE,
            jwa::AesGcm::TAG_SIZE,
        )?;
        assert_eq!(split, sealed);
        assert_eq!(split.to_combined(), combined);

        let from_sealed = key.decrypt(Ciphertext::Sealed(&sealed), NONE)?;
        let from_combined = key.decrypt(Ciphertext::Combined(&combined), NONE)?;
        assert_eq!(from_sealed, from_combined);
        assert_eq!(from_sealed, b"either shape");
    }
    Ok(())
}

#[test]
fn aad_is_authenticated() -> TestResult {
    let key = SymmetricKey::generate_aes_gcm(jwa::AesGcm::Aes256)?;
    let aad = b"eyJhbGciOiJkaXIiLCJlbmMiOiJBMjU2R0NNIn0";

    let sealed = key.encrypt_with_aad(b"content", aad, NONE)?;
    assert_eq!(key.decrypt_with_aad((&sealed).into(), aad, NONE)?, b"content");
    assert!(matches!(
        key.decrypt((&sealed).into(), NONE),
        Err(Error::AuthenticationFailure)
    ));
    Ok(())
}

#[test]
fn tampered_ciphertexts_fail() -> TestResult {
    let key = SymmetricKey::generate_aes_gcm(jwa::AesGcm::Aes128)?;
    let combined = key.encrypt(b"hello", NONE)?.to_combined();

    for tampered in bit_flips(&combined) {
        assert!(matches!(
            key.decrypt((&tampered).into(), NONE),
            Err(Error::AuthenticationFailure)
        ));
    }

    assert!(matches!(
        key.decrypt(Ciphertext::Combined(&combined[..27]), NONE),
        Err(Error::MalformedEncoding(_))
    ));
    Ok(())
}

#[test]
fn signatures_survive_no_bit_flip() -> TestResult {
    for curve in [EcCurve::P256, EcCurve::P384, EcCurve::P521] {
        let key = EcPrivateKey::generate(curve)?;
        let public = key.to_public_key();
        let message = b"M";

        let signature = key.sign(message, NONE)?;
        public.validate(&signature, message, NONE)?;

        // every fifth bit still reaches every byte of r and s
        for tampered in bit_flips(&signature).step_by(5) {
            assert!(matches!(
                public.validate(&tampered, message, NONE),
                Err(Error::AuthenticationFailure)
            ));
        }
        for tampered in bit_flips(message) {
            assert!(matches!(
                public.validate(&signature, &tampered, NONE),
                Err(Error::AuthenticationFailure)
            ));
        }
    }
    Ok(())
}

#[test]
fn none_behaves_like_the_stored_algorithm() -> TestResult {
    let hmac = SymmetricKey::generate_hmac(jwa::Hmac::Hs512)?;
    let explicit = JsonWebAlgorithm::from(jwa::Hmac::Hs512);
    assert_eq!(hmac.sign(b"x", NONE)?, hmac.sign(b"x", &explicit)?);
    hmac.validate(&hmac.sign(b"x", &explicit)?, b"x", NONE)?;

    // P-384 signatures are deterministic, so both calls must agree
    let ec = EcPrivateKey::generate(EcCurve::P384)?;
    let explicit = JsonWebAlgorithm::from(jwa::EcDSA::Es384);
    assert_eq!(ec.sign(b"x", NONE)?, ec.sign(b"x", &explicit)?);

    let aes = SymmetricKey::generate_aes_gcm(jwa::AesGcm::Aes192)?;
    let explicit = JsonWebAlgorithm::from(jwa::AesGcm::Aes192);
    let sealed = aes.encrypt(b"x", NONE)?;
    assert_eq!(aes.decrypt((&sealed).into(), &explicit)?, b"x");
    let sealed = aes.encrypt(b"x", &explicit)?;
    assert_eq!(aes.decrypt((&sealed).into(), NONE)?, b"x");
    Ok(())
}

#[test]
fn hmac_on_an_ec_key() -> TestResult {
    let key = EcPrivateKey::generate(EcCurve::P256)?;
    let hs256 = JsonWebAlgorithm::from(jwa::Hmac::Hs256);

    assert!(matches!(
        key.sign(b"x", &hs256),
        Err(Error::UnknownAlgorithm(alg)) if alg == hs256
    ));
    assert!(matches!(
        key.to_public_key().validate(&[0; 32], b"x", &hs256),
        Err(Error::UnknownAlgorithm(_))
    ));
    Ok(())
}

#[test]
fn a256gcm_on_a_128_bit_key() -> TestResult {
    let key = SymmetricKey::for_aes_gcm([1u8; 16])?;
    let a256gcm = JsonWebAlgorithm::from(jwa::AesGcm::Aes256);

    assert!(matches!(
        key.encrypt(b"x", &a256gcm),
        Err(Error::IncorrectKeySize)
    ));

    let sealed = key.encrypt(b"x", NONE)?;
    assert!(matches!(
        key.decrypt((&sealed).into(), &a256gcm),
        Err(Error::IncorrectKeySize)
    ));
    Ok(())
}

#[test]
fn keys_without_any_algorithm() -> TestResult {
    let key = SymmetricKey::new([0u8; 32]);

    assert!(matches!(
        key.sign(b"x", NONE),
        Err(Error::UnknownAlgorithm(JsonWebAlgorithm::None))
    ));
    assert!(matches!(
        key.encrypt(b"x", NONE),
        Err(Error::UnknownAlgorithm(JsonWebAlgorithm::None))
    ));
    assert!(matches!(
        key.sign(b"x", &"PS256".parse()?),
        Err(Error::UnknownAlgorithm(JsonWebAlgorithm::Other(_)))
    ));

    key.sign(b"x", &jwa::Hmac::Hs256.into())?;
    Ok(())
}
