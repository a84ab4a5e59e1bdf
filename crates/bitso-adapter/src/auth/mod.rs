/*
[INPUT]:  API credentials and request descriptors
[OUTPUT]: Nonces and signed Authorization header values
[POS]:    Auth layer - handles Bitso API authentication
[UPDATE]: When auth flow or signature methods change
*/

pub mod credentials;
pub mod nonce;
pub mod signer;

pub use credentials::{API_KEY_ENV, API_SECRET_ENV, Credentials};
pub use nonce::NonceGenerator;
pub use signer::{AUTH_SCHEME, HmacSigner};
