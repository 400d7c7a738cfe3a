//! HTTP client for posts API requests.
//!
//! This module provides a low-level HTTP client wrapper that builds request
//! URLs, checks response status and parses JSON bodies.

use super::ApiError;
use reqwest::Response;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Makes requests to the posts service and tries to conform response data
/// to the requested type.
///
pub struct Client {
    pub(crate) base_url: String,
    http_client: reqwest::Client,
}

impl Client {
    /// Returns a new instance for the given base URL.
    ///
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Client {
            base_url: base_url.trim_end_matches('/').to_owned(),
            http_client: builder.build()?,
        })
    }

    /// Make GET request and return the response, or an error for any
    /// non-success status.
    ///
    pub async fn get(&self, path: &str, params: &[(&str, String)]) -> Result<Response, ApiError> {
        let request_url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        let mut request = self.http_client.get(&request_url);
        if !params.is_empty() {
            request = request.query(params);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let response_text = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("Unable to read response"));
            log::error!(
                "GET {} failed with status {}: {}",
                request_url,
                status,
                response_text
            );
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: response_text,
            });
        }
        Ok(response)
    }

    /// Make GET request and deserialize the JSON body.
    ///
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let response = self.get(path, params).await?;
        parse_json(response).await
    }
}

/// Deserialize a response body, logging the body when it does not conform.
///
pub(crate) async fn parse_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let response_bytes = response.bytes().await?;
    serde_json::from_slice::<T>(&response_bytes).map_err(|e| {
        log::error!(
            "Failed to deserialize API response: {}. Response body: {}",
            e,
            String::from_utf8_lossy(&response_bytes)
        );
        ApiError::from(e)
    })
}
