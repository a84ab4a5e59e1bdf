/*
[INPUT]:  Request method, path and body plus client credentials
[OUTPUT]: Signed Authorization header for private endpoints
[POS]:    HTTP layer - request signing for authenticated endpoints
[UPDATE]: When changing signing algorithm or header format
*/

use crate::auth::{Credentials, HmacSigner};
use crate::http::Result;

/// Signs private requests with a fresh nonce each time.
///
/// Nonces come from the credentials, so signers built from clones of the
/// same credentials never reuse or reorder one.
#[derive(Debug, Clone)]
pub struct RequestSigner {
    credentials: Credentials,
}

impl RequestSigner {
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Sign a request and return the `Authorization` header value.
    ///
    /// `request_path` includes the leading slash and query string, and
    /// `body` must be the exact string sent on the wire.
    pub fn sign_request(&self, method: &str, request_path: &str, body: Option<&str>) -> Result<String> {
        let nonce = self.credentials.next_nonce();
        HmacSigner::auth_header(
            self.credentials.secret_bytes(),
            self.credentials.api_key(),
            nonce,
            method,
            request_path,
            body,
        )
    }
}
