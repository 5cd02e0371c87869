//! Bearer token lookup for gateway requests.

use tracing::debug;

use crate::core::keyring::{read_secret, KeyringAccessError};

pub const TOKEN_ENV: &str = "TERRYANN_TOKEN";
pub const KEYRING_SERVICE: &str = "terryann-cli";
pub const KEYRING_USER: &str = "gateway";

/// Token from `TERRYANN_TOKEN`, falling back to the system keyring.
pub fn resolve_auth_token() -> Option<String> {
    resolve_token_with(
        |key| std::env::var(key).ok(),
        || read_secret(KEYRING_SERVICE, KEYRING_USER),
    )
}

pub fn resolve_token_with<E, K>(env: E, keyring: K) -> Option<String>
where
    E: Fn(&str) -> Option<String>,
    K: FnOnce() -> Result<Option<String>, KeyringAccessError>,
{
    if let Some(token) = env(TOKEN_ENV).and_then(non_blank) {
        debug!("using auth token from {TOKEN_ENV}");
        return Some(token);
    }

    match keyring() {
        Ok(token) => token.and_then(non_blank),
        Err(err) => {
            debug!(
                recoverable = err.is_recoverable(),
                "keyring lookup failed, continuing without token: {err}"
            );
            None
        }
    }
}

fn non_blank(token: String) -> Option<String> {
    let trimmed = token.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
