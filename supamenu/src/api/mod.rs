//! REST client for the SupaMenu backend.
//!
//! [`ApiClient`] attaches the session's bearer token, sends the request over
//! the configured [`HttpTransport`] and normalises every failure into an
//! [`ApiError`]. The endpoint groups live in the submodules.

mod auth;
mod dashboard;
mod restaurants;

use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use web_common::ApiErrorBody;

use crate::errors::ApiError;
use crate::session::SessionContext;
use crate::transport::{ApiRequest, ApiResponse, HttpTransport};

const SESSION_EXPIRED: &str = "Your session has expired. Please sign in again.";

#[derive(Debug, Clone)]
pub struct ApiClient<T> {
    transport: T,
    session: SessionContext,
}

impl<T: HttpTransport> ApiClient<T> {
    pub fn new(transport: T, session: SessionContext) -> Self {
        Self { transport, session }
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Sends an authenticated request and decodes a JSON body.
    pub async fn execute<R: DeserializeOwned>(
        &self,
        request: ApiRequest,
        fallback: &str,
    ) -> Result<R, ApiError> {
        let request = self.authorize(request)?;
        let response = self.send(request, fallback).await?;
        serde_json::from_slice(&response.body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Sends an authenticated request whose body is ignored.
    pub async fn execute_empty(&self, request: ApiRequest, fallback: &str) -> Result<(), ApiError> {
        let request = self.authorize(request)?;
        self.send(request, fallback).await.map(|_| ())
    }

    /// Sends a request without a credential (login, signup).
    pub async fn execute_public<R: DeserializeOwned>(
        &self,
        request: ApiRequest,
        fallback: &str,
    ) -> Result<R, ApiError> {
        let response = self.send(request, fallback).await?;
        serde_json::from_slice(&response.body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    fn authorize(&self, request: ApiRequest) -> Result<ApiRequest, ApiError> {
        match self.session.bearer() {
            Some(token) => Ok(request.bearer(token)),
            None => Err(ApiError::MissingCredential),
        }
    }

    async fn send(&self, request: ApiRequest, fallback: &str) -> Result<ApiResponse, ApiError> {
        let method = request.method;
        let path = request.path.clone();
        debug!(?method, %path, "sending request");

        let response = self.transport.send(request).await.map_err(|e| {
            warn!(?method, %path, error = %e, "transport failure");
            ApiError::from(e)
        })?;

        if response.is_success() {
            debug!(?method, %path, status = response.status, "request succeeded");
            return Ok(response);
        }

        let error = classify(&response, fallback);
        warn!(?method, %path, status = response.status, error = %error, "request failed");
        Err(error)
    }
}

/// Maps a non-2xx response onto the error taxonomy.
pub fn classify(response: &ApiResponse, fallback: &str) -> ApiError {
    let body: ApiErrorBody = serde_json::from_slice(&response.body).unwrap_or_default();
    let status = response.status;
    match status {
        401 | 403 => ApiError::Unauthorized {
            status,
            message: body.message.unwrap_or_else(|| SESSION_EXPIRED.to_string()),
        },
        400..=499 => ApiError::Rejected {
            status,
            message: body.message.unwrap_or_else(|| fallback.to_string()),
            details: body.details,
        },
        _ => ApiError::Server {
            status,
            message: body.message.unwrap_or_else(|| fallback.to_string()),
        },
    }
}
