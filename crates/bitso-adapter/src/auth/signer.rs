/*
[INPUT]:  Secret key, public key, nonce, HTTP method, request path, JSON body
[OUTPUT]: HMAC-SHA256 signatures and `Bitso key:nonce:signature` header values
[POS]:    Auth layer - cryptographic signing for request authentication
[UPDATE]: When changing signing algorithm or header format
*/

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::http::{BitsoError, Result};

type HmacSha256 = Hmac<Sha256>;

/// Authorization header scheme
pub const AUTH_SCHEME: &str = "Bitso";

/// Stateless HMAC-SHA256 request signer
#[derive(Debug, Clone, Copy, Default)]
pub struct HmacSigner;

impl HmacSigner {
    /// Build the signed message: `{nonce}{METHOD}{path}{body}`
    pub fn message(nonce: u64, method: &str, request_path: &str, body: Option<&str>) -> String {
        format!(
            "{nonce}{}{request_path}{}",
            method.to_ascii_uppercase(),
            body.unwrap_or_default()
        )
    }

    /// HMAC-SHA256 over `message`, lower-case hex (64 chars)
    pub fn sign_message(secret: &[u8], message: &str) -> Result<String> {
        let mut mac = HmacSha256::new_from_slice(secret)
            .map_err(|e| BitsoError::Signing(format!("invalid HMAC key: {e}")))?;
        mac.update(message.as_bytes());
        Ok(hex::encode(mac.finalize().into_bytes()))
    }

    /// Produce the full `Authorization` header value
    pub fn auth_header(
        secret: &[u8],
        api_key: &str,
        nonce: u64,
        method: &str,
        request_path: &str,
        body: Option<&str>,
    ) -> Result<String> {
        let message = Self::message(nonce, method, request_path, body);
        let signature = Self::sign_message(secret, &message)?;
        Ok(format!("{AUTH_SCHEME} {api_key}:{nonce}:{signature}"))
    }
}
