use std::fmt;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use reqwest::{header, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::time::sleep;

use crate::request::ApiRequest;
use crate::response::{self, ApiResponse};
use crate::{NodestyError, RestClientOptions};

/// Delay between attempts when the failed response carried no rate-limit
/// reset header.
const FALLBACK_RETRY_DELAY_MS: u64 = 1_000;

/// Header carrying the absolute timestamp (ms since the Unix epoch) at
/// which the per-token rate limit resets.
const RATE_LIMIT_RESET_HEADER: &str = "x-ratelimit-reset";

/// Shared request layer behind every service facade.
///
/// Injects the `Authorization: PAT <token>` header, bounds each attempt
/// with the configured timeout, retries retryable failures with a backoff
/// paced by the server's rate-limit reset header, and normalizes every
/// terminal response into the [`ApiResponse`] envelope. Holds no per-call
/// state, so one instance serves arbitrarily many concurrent calls.
#[derive(Clone)]
pub(crate) struct RestClient {
    http: reqwest::Client,
    authorization: String,
    options: RestClientOptions,
}

impl fmt::Debug for RestClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RestClient")
            .field("authorization", &"<redacted>")
            .field("options", &self.options)
            .finish()
    }
}

/// Retry disposition of a single attempt.
enum Disposition {
    Terminal,
    Retry { reset_ms: Option<u64> },
}

impl RestClient {
    pub(crate) fn new(
        access_token: String,
        options: RestClientOptions,
    ) -> Result<Self, NodestyError> {
        let access_token = access_token.trim().to_owned();
        if access_token.is_empty() {
            return Err(NodestyError::Configuration(
                "access token must not be empty".to_owned(),
            ));
        }

        Ok(Self {
            http: reqwest::Client::new(),
            authorization: format!("PAT {access_token}"),
            options,
        })
    }

    /// Executes a call and decodes the success payload into `T`.
    pub(crate) async fn request<T: DeserializeOwned>(&self, request: ApiRequest) -> ApiResponse<T> {
        match self.send_with_retry(&request).await {
            ApiResponse::Success(Some(raw)) => match serde_json::from_value::<T>(raw) {
                Ok(data) => ApiResponse::Success(Some(data)),
                Err(err) => {
                    ApiResponse::Failure(Some(format!("failed to decode response payload: {err}")))
                }
            },
            ApiResponse::Success(None) => ApiResponse::Success(None),
            ApiResponse::Failure(message) => ApiResponse::Failure(message),
        }
    }

    /// Executes an action call whose payload, if any, is discarded.
    pub(crate) async fn request_unit(&self, request: ApiRequest) -> ApiResponse<()> {
        match self.send_with_retry(&request).await {
            ApiResponse::Success(_) => ApiResponse::Success(None),
            ApiResponse::Failure(message) => ApiResponse::Failure(message),
        }
    }

    async fn send_with_retry(&self, request: &ApiRequest) -> ApiResponse<Value> {
        if let Some(reason) = &request.encode_error {
            return ApiResponse::Failure(Some(reason.clone()));
        }

        let url = format!("{}{}", self.options.base_url, request.path);
        let mut attempt: u32 = 0;
        loop {
            let (envelope, disposition) = self.dispatch_once(&url, request).await;

            match disposition {
                Disposition::Retry { reset_ms } if attempt < self.options.retry => {
                    let delay = self.backoff(reset_ms);
                    tracing::debug!(
                        path = %request.path,
                        attempt,
                        "retrying request after {} ms",
                        delay.as_millis()
                    );
                    sleep(delay).await;
                    attempt += 1;
                }
                Disposition::Retry { .. } => {
                    tracing::debug!(
                        path = %request.path,
                        attempts = attempt + 1,
                        "request failed, retries exhausted"
                    );
                    return envelope;
                }
                Disposition::Terminal => return envelope,
            }
        }
    }

    /// Issues one attempt and classifies its outcome. Non-2xx statuses are
    /// not transport failures; the body is read and normalized whatever the
    /// status was.
    async fn dispatch_once(
        &self,
        url: &str,
        request: &ApiRequest,
    ) -> (ApiResponse<Value>, Disposition) {
        let mut builder = self
            .http
            .request(request.method.clone(), url)
            .header(header::AUTHORIZATION, &self.authorization)
            .timeout(Duration::from_millis(self.options.timeout_ms));
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = match builder.send().await {
            Ok(response) => response,
            Err(err) => {
                return (
                    ApiResponse::Failure(Some(format!("request failed: {err}"))),
                    Disposition::Retry { reset_ms: None },
                );
            }
        };

        let status = response.status();
        let reset_ms = rate_limit_reset(response.headers());

        let body = match response.text().await {
            Ok(body) => body,
            Err(err) => {
                return (
                    ApiResponse::Failure(Some(format!("failed to read response body: {err}"))),
                    Disposition::Retry { reset_ms },
                );
            }
        };

        if body.trim().is_empty() {
            // Action endpoints complete with no content; a missing body on
            // a failed exchange is a retryable transport fault.
            return if status.is_success() {
                (ApiResponse::Success(None), Disposition::Terminal)
            } else {
                (
                    ApiResponse::Failure(Some(format!(
                        "empty response body (status {})",
                        status.as_u16()
                    ))),
                    Disposition::Retry { reset_ms },
                )
            };
        }

        match serde_json::from_str::<Value>(&body) {
            Ok(raw) => {
                let envelope = response::normalize(raw);
                let disposition = if is_retryable_status(status) {
                    Disposition::Retry { reset_ms }
                } else {
                    Disposition::Terminal
                };
                (envelope, disposition)
            }
            Err(err) => (
                ApiResponse::Failure(Some(format!("invalid JSON response: {err}"))),
                Disposition::Retry { reset_ms },
            ),
        }
    }

    fn backoff(&self, reset_ms: Option<u64>) -> Duration {
        backoff_delay(reset_ms, unix_time_ms(), self.options.rate_limit_offset_ms)
    }
}

/// Computes the delay before the next attempt: time until the advertised
/// rate-limit reset plus the configured offset, or the fixed fallback when
/// the server sent no reset timestamp.
fn backoff_delay(reset_ms: Option<u64>, now_ms: u64, offset_ms: u64) -> Duration {
    match reset_ms {
        Some(reset) => Duration::from_millis(reset.saturating_sub(now_ms).saturating_add(offset_ms)),
        None => Duration::from_millis(FALLBACK_RETRY_DELAY_MS),
    }
}

fn is_retryable_status(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}

fn rate_limit_reset(headers: &header::HeaderMap) -> Option<u64> {
    headers
        .get(RATE_LIMIT_RESET_HEADER)?
        .to_str()
        .ok()?
        .trim()
        .parse()
        .ok()
}

fn unix_time_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or_default()
}
