//! reqwest-backed HRMS API client
//!
//! All requests share one `reqwest::Client` configured with the JSON content
//! type and a fixed deadline. Failures are classified into [`ApiFailure`]s at
//! this boundary, logged, and returned as normalized [`ApiError`]s.

use std::error::Error as StdError;
use std::io;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Method, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::traits::HrmsApi;
use super::types::{
    AttendanceQuery, AttendanceRecord, AttendanceStats, Employee, NewAttendance, NewEmployee,
};
use crate::config::ClientConfig;
use crate::error::{ApiError, ApiFailure, ApiResult, TransportFailure};

/// HTTP client for the HRMS backend.
#[derive(Debug, Clone)]
pub struct ApiClient {
    /// HTTP client for API requests
    client: Client,
    /// Parsed base URL every path is appended to
    base_url: Url,
}

impl ApiClient {
    /// Create a new client from configuration
    pub fn new(config: &ClientConfig) -> ApiResult<Self> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            ApiError::new(ApiFailure::local(format!(
                "Invalid API base URL '{}': {}",
                config.base_url, e
            )))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::new(ApiFailure::local(format!(
                "Invalid API base URL '{}'",
                config.base_url
            ))));
        }

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout())
            .build()
            .map_err(|e| {
                ApiError::new(ApiFailure::local(format!(
                    "Failed to create HTTP client: {}",
                    e
                )))
            })?;

        Ok(Self { client, base_url })
    }

    /// Returns the base URL requests are sent to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Builds `base/segment/segment/...`, percent-encoding each segment.
    fn endpoint(&self, segments: &[&str]) -> ApiResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                ApiError::new(ApiFailure::local(format!(
                    "Invalid API base URL '{}'",
                    self.base_url
                )))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Sends a request and returns the response if its status is a success.
    async fn execute(
        &self,
        method: Method,
        url: Url,
        build: impl FnOnce(RequestBuilder) -> RequestBuilder,
    ) -> ApiResult<Response> {
        tracing::debug!(method = %method, url = %url, "API request");

        let request = build(self.client.request(method.clone(), url.clone()));
        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                let failure = classify_send_error(&e);
                let error = ApiError::new(failure)
                    .add_context("method", method.as_str())
                    .add_context("url", url.as_str());
                if error.failure.is_transport() {
                    tracing::error!(
                        method = %method,
                        url = %url,
                        message = %error.message,
                        cause = %e,
                        "Network error"
                    );
                } else {
                    tracing::error!(message = %error.message, cause = %e, "Request setup error");
                }
                return Err(error);
            }
        };

        let status = response.status();
        tracing::debug!(method = %method, url = %url, status = status.as_u16(), "API response");

        if status.is_success() {
            return Ok(response);
        }

        let payload = match response.text().await {
            Ok(body) => decode_payload(&body),
            Err(e) => {
                tracing::warn!(cause = %e, "Failed to read error response body");
                None
            }
        };
        let error = ApiError::new(ApiFailure::rejected(status.as_u16(), payload.clone()))
            .add_context("method", method.as_str())
            .add_context("url", url.as_str());
        tracing::error!(
            status = status.as_u16(),
            method = %method,
            url = %url,
            message = %error.message,
            data = ?payload,
            "API error"
        );
        Err(error)
    }

    /// Decodes a successful JSON response body.
    async fn decode<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
        response.json::<T>().await.map_err(|e| {
            let failure = if e.is_timeout() {
                ApiFailure::timeout()
            } else {
                ApiFailure::local(format!("Failed to parse response: {}", e))
            };
            let error = ApiError::new(failure);
            tracing::error!(message = %error.message, "Response decode error");
            error
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> ApiResult<T> {
        let url = self.endpoint(segments)?;
        let response = self.execute(Method::GET, url, |r| r).await?;
        Self::decode(response).await
    }
}

/// Parses an error body as JSON, keeping non-JSON text as a string.
fn decode_payload(body: &str) -> Option<Value> {
    if body.is_empty() {
        return None;
    }
    Some(serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.to_string())))
}

/// Maps a `reqwest` send error onto the failure taxonomy.
fn classify_send_error(error: &reqwest::Error) -> ApiFailure {
    if error.is_builder() {
        return ApiFailure::local(error.to_string());
    }
    if error.is_timeout() {
        return ApiFailure::timeout();
    }
    if error.is_connect() {
        return match io_error_kind(error) {
            Some(io::ErrorKind::ConnectionRefused | io::ErrorKind::ConnectionReset) => {
                ApiFailure::Transport(TransportFailure::Other(error.to_string()))
            }
            Some(io::ErrorKind::TimedOut) => ApiFailure::timeout(),
            _ => ApiFailure::Transport(TransportFailure::NetworkUnreachable),
        };
    }
    ApiFailure::Transport(TransportFailure::Other(error.to_string()))
}

/// Finds the first `io::Error` in the source chain.
fn io_error_kind(error: &reqwest::Error) -> Option<io::ErrorKind> {
    let mut source = error.source();
    while let Some(cause) = source {
        if let Some(io_error) = cause.downcast_ref::<io::Error>() {
            return Some(io_error.kind());
        }
        source = cause.source();
    }
    None
}

#[async_trait]
impl HrmsApi for ApiClient {
    async fn list_employees(&self) -> ApiResult<Vec<Employee>> {
        self.get_json(&["api", "employees"]).await
    }

    async fn get_employee(&self, id: &str) -> ApiResult<Employee> {
        self.get_json(&["api", "employees", id]).await
    }

    async fn create_employee(&self, employee: &NewEmployee) -> ApiResult<Employee> {
        let url = self.endpoint(&["api", "employees"])?;
        let response = self
            .execute(Method::POST, url, |r| r.json(employee))
            .await?;
        Self::decode(response).await
    }

    async fn delete_employee(&self, id: &str) -> ApiResult<()> {
        let url = self.endpoint(&["api", "employees", id])?;
        self.execute(Method::DELETE, url, |r| r).await?;
        Ok(())
    }

    async fn list_attendance(&self, query: &AttendanceQuery) -> ApiResult<Vec<AttendanceRecord>> {
        let url = self.endpoint(&["api", "attendance"])?;
        let response = self
            .execute(Method::GET, url, |r| r.query(query))
            .await?;
        Self::decode(response).await
    }

    async fn attendance_for_employee(
        &self,
        employee_id: &str,
    ) -> ApiResult<Vec<AttendanceRecord>> {
        self.get_json(&["api", "attendance", "employee", employee_id])
            .await
    }

    async fn create_attendance(&self, attendance: &NewAttendance) -> ApiResult<AttendanceRecord> {
        let url = self.endpoint(&["api", "attendance"])?;
        let response = self
            .execute(Method::POST, url, |r| r.json(attendance))
            .await?;
        Self::decode(response).await
    }

    async fn attendance_stats(&self, employee_id: &str) -> ApiResult<AttendanceStats> {
        self.get_json(&["api", "attendance", "stats", employee_id])
            .await
    }
}
