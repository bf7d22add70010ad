//! HTTP client for API communication.

use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::error::CliError;

/// Header carrying the caller-supplied privileged flag.
const ADMIN_HEADER: &str = "x-roster-admin";

/// API client for communicating with the roster service.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new API client for the given server.
    pub fn new(server: &str, admin: bool) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if admin {
            headers.insert(ADMIN_HEADER, HeaderValue::from_static("true"));
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: server.trim_end_matches('/').to_string(),
        })
    }

    /// Build a URL for an endpoint.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Make a GET request.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, CliError> {
        let response = self.client.get(self.url(path)).send().await?;

        self.handle_response(response).await
    }

    /// Make a POST request with a JSON body.
    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, CliError> {
        let response = self.client.post(self.url(path)).json(body).send().await?;

        self.handle_response(response).await
    }

    /// Make a POST request with no body and no expected response body.
    pub async fn post_no_content(&self, path: &str) -> Result<(), CliError> {
        let response = self.client.post(self.url(path)).send().await?;

        if response.status().is_success() {
            Ok(())
        } else {
            self.handle_error(response).await
        }
    }

    /// Make a POST request with no body, expecting a JSON response.
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, CliError> {
        let response = self.client.post(self.url(path)).send().await?;

        self.handle_response(response).await
    }

    /// Make a DELETE request.
    pub async fn delete(&self, path: &str) -> Result<(), CliError> {
        let response = self.client.delete(self.url(path)).send().await?;

        if response.status().is_success() {
            Ok(())
        } else {
            self.handle_error(response).await
        }
    }

    /// Handle a successful or error response.
    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, CliError> {
        let status = response.status();

        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| CliError::Other(anyhow::anyhow!("Failed to parse response: {}", e)))
        } else {
            self.handle_error(response).await
        }
    }

    /// Handle an error response.
    async fn handle_error<T>(&self, response: reqwest::Response) -> Result<T, CliError> {
        let status = response.status().as_u16();

        // The service replies with problem+json bodies
        let problem: ProblemResponse = response.json().await.unwrap_or_else(|_| ProblemResponse {
            code: "unknown".to_string(),
            detail: "Unknown error".to_string(),
        });

        Err(CliError::api(status, problem.code, problem.detail))
    }
}

/// Problem-details error body from the service.
#[derive(Debug, Deserialize)]
struct ProblemResponse {
    #[serde(default)]
    code: String,
    #[serde(default)]
    detail: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_building() {
        let client = ApiClient::new("http://127.0.0.1:8080/", false).unwrap();
        assert_eq!(
            client.url("/v1/assignments"),
            "http://127.0.0.1:8080/v1/assignments"
        );
    }
}
