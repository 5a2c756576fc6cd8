//! Environment-driven configuration.
//!
//! Every config struct loads once at startup via `from_env()` and lives in
//! the shared application state. Missing variables fall back to development
//! defaults; only `DATABASE_URL` is required.

use std::env;
use std::str::FromStr;

pub mod cors;
pub mod database;
pub mod email;
pub mod jwt;
pub mod rate_limit;

pub(crate) fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

pub(crate) fn env_parse_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(default)
}

pub(crate) fn env_flag(key: &str, default: bool) -> bool {
    match env::var(key) {
        Ok(v) => v == "1" || v.eq_ignore_ascii_case("true"),
        Err(_) => default,
    }
}
