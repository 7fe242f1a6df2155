//! Signed JWT material mimicking what EVE SSO hands back after login.
//!
//! A single RSA key pair is generated per test process; the public half is served from the
//! mocked JWKS endpoint and the private half signs every access token.

use std::{sync::OnceLock, time::Duration};

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::Utc;
use eve_esi::model::oauth2::{EveJwtClaims, EveJwtKey, EveJwtKeys};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use oauth2::{basic::BasicTokenType, AccessToken, EmptyExtraTokenFields, RefreshToken, StandardTokenResponse};
use openssl::rsa::Rsa;

use crate::constant::TEST_ESI_CLIENT_ID;

pub static RSA_KEY_ID: &str = "JWT-Signature-Key-1";

struct TestKeyPair {
    private_pem: Vec<u8>,
    n: String,
    e: String,
}

fn key_pair() -> &'static TestKeyPair {
    static KEY_PAIR: OnceLock<TestKeyPair> = OnceLock::new();

    KEY_PAIR.get_or_init(|| {
        let rsa = Rsa::generate(2048).expect("generate RSA key");

        TestKeyPair {
            private_pem: rsa.private_key_to_pem().expect("encode RSA private key"),
            n: URL_SAFE_NO_PAD.encode(rsa.n().to_vec()),
            e: URL_SAFE_NO_PAD.encode(rsa.e().to_vec()),
        }
    })
}

/// Claims for `character_id` owned by `owner_hash`, valid for 15 minutes.
pub fn mock_jwt_claims(character_id: i64, owner_hash: &str) -> EveJwtClaims {
    let now = Utc::now();
    EveJwtClaims {
        iss: "https://login.eveonline.com".to_string(),
        sub: format!("CHARACTER:EVE:{}", character_id),
        aud: vec![TEST_ESI_CLIENT_ID.to_string(), "EVE Online".to_string()],
        jti: "test_jti".to_string(),
        kid: RSA_KEY_ID.to_string(),
        tenant: "tranquility".to_string(),
        region: "world".to_string(),
        exp: now + chrono::Duration::seconds(900),
        iat: now,
        scp: vec![],
        name: format!("Character {}", character_id),
        owner: owner_hash.to_string(),
        azp: TEST_ESI_CLIENT_ID.to_string(),
    }
}

/// JWKS document containing the test RSA key alongside an unused ES256 key, as EVE SSO does.
pub fn mock_jwt_keys() -> EveJwtKeys {
    let keys = key_pair();

    EveJwtKeys {
        skip_unresolved_json_web_keys: false,
        keys: vec![
            EveJwtKey::RS256 {
                e: keys.e.clone(),
                kid: RSA_KEY_ID.to_string(),
                kty: "RSA".to_string(),
                n: keys.n.clone(),
                r#use: "sig".to_string(),
            },
            EveJwtKey::ES256 {
                crv: "P-256".to_string(),
                kid: "JWT-Signature-Key-2".to_string(),
                kty: "EC".to_string(),
                r#use: "sig".to_string(),
                x: "ITcDYJ8WVpDO4QtZ169xXUt7GB1Y6-oMKIwJ3nK1tFU".to_string(),
                y: "ZAJr0f4V2Eu7xBgLMgQBdJ2DZ2mp8JykOhX4XgU_UEY".to_string(),
            },
        ],
    }
}

/// Token response whose access token is `claims` signed with the test key.
pub fn mock_jwt_token(
    claims: &EveJwtClaims,
) -> StandardTokenResponse<EmptyExtraTokenFields, BasicTokenType> {
    let encoding_key =
        EncodingKey::from_rsa_pem(&key_pair().private_pem).expect("load RSA encoding key");

    let mut header = Header::new(Algorithm::RS256);
    header.kid = Some(RSA_KEY_ID.to_string());

    let access_token_secret = encode(&header, claims, &encoding_key).expect("sign JWT");

    let mut token = StandardTokenResponse::new(
        AccessToken::new(access_token_secret),
        BasicTokenType::Bearer,
        EmptyExtraTokenFields {},
    );
    token.set_expires_in(Some(&Duration::from_secs(1200)));
    token.set_refresh_token(Some(RefreshToken::new("mock_refresh_token".to_string())));

    token
}
