use reqwest::multipart::{Form, Part};
use reqwest::Client;
use tracing::trace;

use super::ApiClientConfig;
use crate::errors::ConfigError;
use crate::transport::{ApiRequest, ApiResponse, FormBody, FormPart, HttpTransport, Method, RequestBody, TransportError};

/// [`HttpTransport`] over `reqwest`. Works natively and on `wasm32` (fetch).
///
/// Timeouts are whatever the underlying client does by default.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
    config: ApiClientConfig,
}

impl ReqwestTransport {
    pub fn new(config: ApiClientConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            client: Client::new(),
            config,
        })
    }

    pub fn config(&self) -> &ApiClientConfig {
        &self.config
    }
}

impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let url = self.config.endpoint(&request.path);
        trace!(%url, "http request");

        let mut builder = match request.method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
            Method::Delete => self.client.delete(&url),
        };
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token);
        }
        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Multipart(form) => builder.multipart(to_multipart(form)?),
        };

        let response = builder.send().await.map_err(map_error)?;
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(map_error)?;
        Ok(ApiResponse::new(status, body.to_vec()))
    }
}

fn to_multipart(body: FormBody) -> Result<Form, TransportError> {
    let mut form = Form::new();
    for part in body.into_parts() {
        form = match part {
            FormPart::Text { name, value } => form.text(name, value),
            FormPart::File { name, file_name, content_type, bytes } => {
                let part = Part::bytes(bytes)
                    .file_name(file_name)
                    .mime_str(&content_type)
                    .map_err(|e| TransportError::InvalidRequest(e.to_string()))?;
                form.part(name, part)
            }
        };
    }
    Ok(form)
}

fn map_error(error: reqwest::Error) -> TransportError {
    if error.is_timeout() {
        TransportError::Timeout
    } else if error.is_builder() {
        TransportError::InvalidRequest(error.to_string())
    } else {
        TransportError::Network(error.to_string())
    }
}
