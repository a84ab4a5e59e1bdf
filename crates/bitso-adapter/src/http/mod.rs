/*
[INPUT]:  HTTP client configuration and API endpoints
[OUTPUT]: HTTP responses and typed API results
[POS]:    HTTP layer - REST API communication
[UPDATE]: When adding new endpoints or changing client behavior
*/

pub mod account;
pub mod client;
pub mod envelope;
pub mod error;
pub mod funding;
pub mod public;
pub mod query;
pub mod signature;
pub mod trade;
pub mod transport;

pub use error::{BitsoError, Result};
pub use query::join_params;
pub use signature::RequestSigner;
pub use transport::{HttpRequest, HttpResponse, MockTransport, ReqwestTransport, Transport};

pub use client::{
    BitsoClient, ClientConfig, DEFAULT_USER_AGENT, DEVELOPMENT_BASE_URL, Environment,
    PRODUCTION_BASE_URL,
};
