use tower_governor::governor::{GovernorConfig, GovernorConfigBuilder};
use tower_governor::key_extractor::PeerIpKeyExtractor;

use super::env_parse_or;

/// Rate limiting, keyed by peer IP. Only the auth endpoints are governed;
/// they are the credential-stuffing target.
#[derive(Clone, Debug)]
pub struct RateLimitConfig {
    pub auth_per_second: u64,
    pub auth_burst_size: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            auth_per_second: 10,
            auth_burst_size: 5,
        }
    }
}

impl RateLimitConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            auth_per_second: env_parse_or("RATE_LIMIT_AUTH_PER_SECOND", defaults.auth_per_second),
            auth_burst_size: env_parse_or("RATE_LIMIT_AUTH_BURST_SIZE", defaults.auth_burst_size),
        }
    }

    pub fn auth_governor_config(
        &self,
    ) -> GovernorConfig<PeerIpKeyExtractor, ::governor::middleware::NoOpMiddleware> {
        GovernorConfigBuilder::default()
            .per_second(self.auth_per_second)
            .burst_size(self.auth_burst_size)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .expect("Failed to build auth rate limiter config")
    }
}
