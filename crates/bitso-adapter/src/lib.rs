/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public Bitso adapter crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod auth;
pub mod http;
pub mod types;

// Re-export commonly used types from auth
pub use auth::{Credentials, HmacSigner, NonceGenerator};

// Re-export commonly used types from http
pub use http::{
    BitsoClient,
    BitsoError,
    ClientConfig,
    Environment,
    MockTransport,
    RequestSigner,
    Result,
    Transport,
};

// Re-export all types
pub use types::*;
