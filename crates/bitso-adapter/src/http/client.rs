/*
[INPUT]:  HTTP configuration (environment, timeouts, throttle), credentials
[OUTPUT]: Configured client ready for public and signed API calls
[POS]:    HTTP layer - core client implementation
[UPDATE]: When adding connection options or changing client behavior
*/

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Method, Url};
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::auth::Credentials;
use crate::http::transport::{HttpRequest, ReqwestTransport, Transport};
use crate::http::{BitsoError, RequestSigner, Result};

/// Base URLs for the Bitso API
pub const PRODUCTION_BASE_URL: &str = "https://api.bitso.com";
pub const DEVELOPMENT_BASE_URL: &str = "https://dev.bitso.com";

/// User-Agent sent with every request
pub const DEFAULT_USER_AGENT: &str = concat!("bitso-adapter-rust/", env!("CARGO_PKG_VERSION"));

/// Exchange environment selected at construction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Environment {
    #[default]
    Production,
    Development,
}

impl Environment {
    pub fn base_url(self) -> &'static str {
        match self {
            Environment::Production => PRODUCTION_BASE_URL,
            Environment::Development => DEVELOPMENT_BASE_URL,
        }
    }
}

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub environment: Environment,
    pub timeout: Duration,
    pub connect_timeout: Duration,
    /// Minimum spacing between consecutive requests, `None` disables throttling
    pub min_request_interval: Option<Duration>,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            environment: Environment::Production,
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            min_request_interval: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Per-call limits carried by a scoped client
#[derive(Debug, Clone, Default)]
struct CallOptions {
    deadline: Option<Duration>,
    cancellation: Option<CancellationToken>,
}

/// Main HTTP client for the Bitso API.
///
/// Cloning is cheap; clones share the transport and the nonce sequence.
#[derive(Debug, Clone)]
pub struct BitsoClient {
    transport: Arc<dyn Transport>,
    base_url: Url,
    signer: Option<RequestSigner>,
    options: CallOptions,
}

impl BitsoClient {
    /// Client for private and public endpoints against production
    pub fn new(credentials: Credentials) -> Result<Self> {
        Self::with_config(ClientConfig::default(), Some(credentials))
    }

    /// Client restricted to public market data endpoints
    pub fn public() -> Result<Self> {
        Self::with_config(ClientConfig::default(), None)
    }

    /// Client with explicit configuration
    pub fn with_config(config: ClientConfig, credentials: Option<Credentials>) -> Result<Self> {
        let base_url = config.environment.base_url();
        Self::with_base_url(config, base_url, credentials)
    }

    /// Client against an arbitrary base URL (mock servers, proxies)
    pub fn with_base_url(
        config: ClientConfig,
        base_url: &str,
        credentials: Option<Credentials>,
    ) -> Result<Self> {
        let transport = ReqwestTransport::new(&config)?;
        Self::with_transport(Arc::new(transport), base_url, credentials)
    }

    /// Client over a custom [`Transport`]
    pub fn with_transport(
        transport: Arc<dyn Transport>,
        base_url: &str,
        credentials: Option<Credentials>,
    ) -> Result<Self> {
        Ok(Self {
            transport,
            base_url: Url::parse(base_url)?,
            signer: credentials.map(RequestSigner::new),
            options: CallOptions::default(),
        })
    }

    /// Scoped client whose requests fail with `Timeout` after `deadline`
    #[must_use]
    pub fn with_deadline(&self, deadline: Duration) -> Self {
        let mut scoped = self.clone();
        scoped.options.deadline = Some(deadline);
        scoped
    }

    /// Scoped client whose requests abort with `Cancelled` once `token` fires
    #[must_use]
    pub fn with_cancellation(&self, token: CancellationToken) -> Self {
        let mut scoped = self.clone();
        scoped.options.cancellation = Some(token);
        scoped
    }

    /// Get credentials if set
    pub fn credentials(&self) -> Option<&Credentials> {
        self.signer.as_ref().map(RequestSigner::credentials)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Unauthenticated GET; returns the raw body
    pub(crate) async fn public_get(&self, endpoint: &str) -> Result<String> {
        let url = self.base_url.join(endpoint)?;
        self.dispatch(Method::GET, url, None, None).await
    }

    /// Signed GET; returns the raw body
    pub(crate) async fn private_get(&self, endpoint: &str) -> Result<String> {
        self.private_request(Method::GET, endpoint, None).await
    }

    /// Signed DELETE; returns the raw body
    pub(crate) async fn private_delete(&self, endpoint: &str) -> Result<String> {
        self.private_request(Method::DELETE, endpoint, None).await
    }

    /// Signed POST with a JSON body; returns the raw body
    pub(crate) async fn private_post<B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: Option<&B>,
    ) -> Result<String> {
        let body = body
            .map(serde_json::to_string)
            .transpose()
            .map_err(|e| BitsoError::invalid_input(format!("request body is not serializable: {e}")))?;
        self.private_request(Method::POST, endpoint, body).await
    }

    async fn private_request(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<String>,
    ) -> Result<String> {
        let signer = self.signer.as_ref().ok_or_else(|| {
            BitsoError::Config("credentials are required for private endpoints".to_string())
        })?;

        let url = self.base_url.join(endpoint)?;
        self.dispatch(method, url, body, Some(signer)).await
    }

    /// Throttle, sign and send one request under the scoped deadline and
    /// cancellation token.
    ///
    /// The nonce is drawn after the throttle wait so concurrent callers
    /// reach the exchange in nonce order.
    async fn dispatch(
        &self,
        method: Method,
        url: Url,
        body: Option<String>,
        signer: Option<&RequestSigner>,
    ) -> Result<String> {
        debug!(method = %method, path = %signed_path(&url), "Dispatching request");

        let send = async {
            self.transport.throttle().await;

            let headers = match signer {
                Some(signer) => signed_headers(signer, &method, &url, body.as_deref())?,
                None => HeaderMap::new(),
            };
            let request = HttpRequest {
                method,
                url,
                headers,
                body,
                timeout: self.options.deadline,
            };
            self.transport.execute(request).await
        };

        let call = async {
            match self.options.deadline {
                Some(deadline) => tokio::time::timeout(deadline, send)
                    .await
                    .map_err(|_| BitsoError::Timeout {
                        millis: u64::try_from(deadline.as_millis()).unwrap_or(u64::MAX),
                    })?,
                None => send.await,
            }
        };

        let response = match &self.options.cancellation {
            Some(token) => tokio::select! {
                biased;
                () = token.cancelled() => return Err(BitsoError::Cancelled),
                response = call => response?,
            },
            None => call.await?,
        };

        if !response.status.is_success() {
            warn!(status = response.status.as_u16(), "Non-success HTTP status");
        }
        Ok(response.body)
    }
}

/// Authorization (and content type, when there is a body) for a signed call
fn signed_headers(
    signer: &RequestSigner,
    method: &Method,
    url: &Url,
    body: Option<&str>,
) -> Result<HeaderMap> {
    let authorization = signer.sign_request(method.as_str(), &signed_path(url), body)?;

    let mut headers = HeaderMap::new();
    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&authorization)
            .map_err(|e| BitsoError::Signing(format!("invalid header value: {e}")))?,
    );
    if body.is_some() {
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    }
    Ok(headers)
}

/// Path plus query exactly as it goes on the wire
fn signed_path(url: &Url) -> String {
    match url.query() {
        Some(query) => format!("{}?{}", url.path(), query),
        None => url.path().to_string(),
    }
}
