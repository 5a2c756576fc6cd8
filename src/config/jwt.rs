use super::{env_or, env_parse_or};

#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    /// Access-token lifetime in seconds.
    pub access_token_expiry: i64,
}

impl JwtConfig {
    pub fn from_env() -> Self {
        Self {
            secret: env_or("JWT_SECRET", "your-secret-key-change-in-production"),
            access_token_expiry: env_parse_or("JWT_ACCESS_EXPIRY", 3600),
        }
    }
}
