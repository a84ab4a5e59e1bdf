/*
[INPUT]:  Fully-formed HTTP requests (method, URL, headers, body, timeout)
[OUTPUT]: Status code and raw response body text
[POS]:    HTTP layer - network seam between the facade and reqwest
[UPDATE]: When changing connection options or request throttling
*/

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex as StdMutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::{Client, Method, StatusCode, Url};
use tokio::sync::Mutex;
use tokio::time::{Instant, sleep_until};
use tracing::trace;

use crate::http::{ClientConfig, Result};

/// Request descriptor handed to a [`Transport`]
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Option<String>,
    pub timeout: Option<Duration>,
}

/// Raw response; the body is returned whatever the status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub body: String,
}

/// Executes HTTP requests for the client.
///
/// Implementations must not retry and must report network failures as
/// errors instead of empty bodies. The client awaits `throttle` before it
/// signs a request, so nonces reach the exchange in the order they were
/// issued.
#[async_trait]
pub trait Transport: Send + Sync + std::fmt::Debug {
    /// Wait for a send slot; no-op unless the transport rate-limits
    async fn throttle(&self) {}

    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse>;
}

/// Default transport backed by `reqwest`
#[derive(Debug)]
pub struct ReqwestTransport {
    http_client: Client,
    min_interval: Option<Duration>,
    last_request: Mutex<Option<Instant>>,
}

impl ReqwestTransport {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            http_client,
            min_interval: config.min_request_interval,
            last_request: Mutex::new(None),
        })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    /// Wait until `min_interval` has passed since the previous request
    async fn throttle(&self) {
        let Some(interval) = self.min_interval else {
            return;
        };

        let mut last = self.last_request.lock().await;
        if let Some(previous) = *last {
            let ready_at = previous + interval;
            if ready_at > Instant::now() {
                trace!(wait_ms = (ready_at - Instant::now()).as_millis() as u64, "Throttling request");
                sleep_until(ready_at).await;
            }
        }
        *last = Some(Instant::now());
    }

    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        let HttpRequest {
            method,
            url,
            headers,
            body,
            timeout,
        } = request;

        let mut builder = self.http_client.request(method, url).headers(headers);
        if let Some(body) = body {
            builder = builder.body(body);
        }
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;
        trace!(status = status.as_u16(), body = %body, "Received response");

        Ok(HttpResponse { status, body })
    }
}

/// Canned transport for tests.
///
/// Answers every request with the same status and body and records what it
/// was asked to send.
#[derive(Debug)]
pub struct MockTransport {
    status: StatusCode,
    body: String,
    delay: Option<Duration>,
    requests: StdMutex<Vec<HttpRequest>>,
    throttles: AtomicUsize,
}

impl MockTransport {
    /// Respond `200 OK` with `body`
    pub fn with_body(body: impl Into<String>) -> Self {
        Self::with_status(StatusCode::OK, body)
    }

    pub fn with_status(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            delay: None,
            requests: StdMutex::new(Vec::new()),
            throttles: AtomicUsize::new(0),
        }
    }

    /// Hold every response for `delay` before answering
    #[must_use]
    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Requests received so far
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of requests received so far
    pub fn calls(&self) -> usize {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Number of times the client waited for a send slot
    pub fn throttle_calls(&self) -> usize {
        self.throttles.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn throttle(&self) {
        self.throttles.fetch_add(1, Ordering::SeqCst);
    }

    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        Ok(HttpResponse {
            status: self.status,
            body: self.body.clone(),
        })
    }
}
