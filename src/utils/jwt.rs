use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use crate::config::jwt::JwtConfig;
use crate::modules::auth::model::Claims;
use crate::utils::errors::AppError;

pub fn create_access_token(
    user_id: Uuid,
    email: &str,
    company_id: Option<Uuid>,
    role: &str,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    let issued_at = Utc::now().timestamp() as usize;
    let claims = Claims {
        sub: user_id.to_string(),
        email: email.to_string(),
        company_id,
        role: role.to_string(),
        iat: issued_at,
        exp: issued_at + jwt_config.access_token_expiry as usize,
    };

    let key = EncodingKey::from_secret(jwt_config.secret.as_bytes());
    encode(&Header::default(), &claims, &key)
        .map_err(|e| AppError::internal_error(format!("Failed to create token: {}", e)))
}

pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AppError> {
    let key = DecodingKey::from_secret(jwt_config.secret.as_bytes());
    let data = decode::<Claims>(token, &key, &Validation::default())
        .map_err(|_| AppError::unauthorized("Invalid or expired token"))?;
    Ok(data.claims)
}
