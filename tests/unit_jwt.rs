//! Token round-trip properties: claims survive encode/decode, and a token
//! is only valid against the secret that minted it.

use dealdesk::config::jwt::JwtConfig;
use dealdesk::utils::jwt::{create_access_token, verify_token};
use uuid::Uuid;

mod common;

#[test]
fn test_claims_survive_round_trip() {
    let config = common::test_jwt_config();
    let user_id = Uuid::new_v4();
    let company_id = Uuid::new_v4();

    let token = create_access_token(
        user_id,
        "agent@acme.test",
        Some(company_id),
        "level_10",
        &config,
    )
    .unwrap();
    let claims = verify_token(&token, &config).unwrap();

    assert_eq!(claims.sub, user_id.to_string());
    assert_eq!(claims.email, "agent@acme.test");
    assert_eq!(claims.company_id, Some(company_id));
    assert_eq!(claims.role, "level_10");
    assert_eq!(claims.exp, claims.iat + config.access_token_expiry as usize);
}

#[test]
fn test_company_id_is_optional() {
    let config = common::test_jwt_config();

    let token =
        create_access_token(Uuid::new_v4(), "owner@acme.test", None, "company", &config).unwrap();
    let claims = verify_token(&token, &config).unwrap();

    assert_eq!(claims.company_id, None);
    assert_eq!(claims.role, "company");
}

#[test]
fn test_garbage_token_rejected() {
    let config = common::test_jwt_config();

    assert!(verify_token("definitely.not.jwt", &config).is_err());
    assert!(verify_token("", &config).is_err());
}

#[test]
fn test_token_bound_to_secret() {
    let minting = common::test_jwt_config();
    let verifying = JwtConfig {
        secret: "a_completely_different_secret".to_string(),
        access_token_expiry: 3600,
    };

    let token =
        create_access_token(Uuid::new_v4(), "agent@acme.test", None, "subadmin", &minting).unwrap();

    assert!(verify_token(&token, &verifying).is_err());
    assert!(verify_token(&token, &minting).is_ok());
}
