/*
[INPUT]:  API key and secret (programmatic or environment)
[OUTPUT]: Immutable credentials for request signing
[POS]:    Auth layer - secret material storage
[UPDATE]: When adding credential sources
*/

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};

use crate::auth::NonceGenerator;
use crate::http::{BitsoError, Result};

/// Environment variable holding the public API key
pub const API_KEY_ENV: &str = "BITSO_API_KEY";
/// Environment variable holding the API secret
pub const API_SECRET_ENV: &str = "BITSO_API_SECRET";

/// API credentials for authenticated requests.
///
/// The secret is zeroized on drop and redacted from `Debug` output. Clones
/// share one nonce sequence, so every client built from them signs with
/// strictly increasing nonces.
pub struct Credentials {
    api_key: String,
    api_secret: SecretString,
    nonces: Arc<NonceGenerator>,
}

impl Credentials {
    /// Create credentials from an API key and secret
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        let api_secret = api_secret.into();

        if api_key.trim().is_empty() {
            return Err(BitsoError::Config("API key must not be empty".to_string()));
        }
        if api_secret.is_empty() {
            return Err(BitsoError::Config("API secret must not be empty".to_string()));
        }

        Ok(Self {
            api_key,
            api_secret: SecretString::from(api_secret),
            nonces: Arc::new(NonceGenerator::new()),
        })
    }

    /// Read `BITSO_API_KEY` and `BITSO_API_SECRET` from the environment
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var(API_KEY_ENV)
            .map_err(|_| BitsoError::Config(format!("{API_KEY_ENV} is not set")))?;
        let api_secret = std::env::var(API_SECRET_ENV)
            .map_err(|_| BitsoError::Config(format!("{API_SECRET_ENV} is not set")))?;

        Self::new(api_key, api_secret)
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub(crate) fn secret_bytes(&self) -> &[u8] {
        self.api_secret.expose_secret().as_bytes()
    }

    /// Next nonce from the sequence shared by every clone
    pub(crate) fn next_nonce(&self) -> u64 {
        self.nonces.next()
    }
}

impl Clone for Credentials {
    fn clone(&self) -> Self {
        Self {
            api_key: self.api_key.clone(),
            api_secret: SecretString::from(self.api_secret.expose_secret().to_owned()),
            nonces: Arc::clone(&self.nonces),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("api_secret", &"[REDACTED]")
            .finish()
    }
}
