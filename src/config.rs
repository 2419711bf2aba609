//! Configuration sources: CLI flags carry everything except credentials,
//! which come from the environment.

use anyhow::{Context, Result};

/// Environment variable holding the upstream API bearer token.
pub const BEARER_TOKEN_ENV: &str = "NAMEWATCH_BEARER_TOKEN";

/// Default upstream profile API.
pub const DEFAULT_API_BASE: &str = "https://api.twitter.com";

/// Default port for the user-data API.
pub const DEFAULT_PORT: u16 = 7700;

/// Read the bearer token from the environment.
pub fn bearer_token() -> Result<String> {
    std::env::var(BEARER_TOKEN_ENV)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .with_context(|| format!("bearer token is missing — set {BEARER_TOKEN_ENV}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_token_missing_names_variable() {
        std::env::remove_var(BEARER_TOKEN_ENV);
        let err = bearer_token().unwrap_err();
        assert!(err.to_string().contains(BEARER_TOKEN_ENV));
    }
}
