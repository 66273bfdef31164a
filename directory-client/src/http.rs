//! HTTP client over the directory REST API

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use crate::{ClientError, ClientResult};
use shared::models::{Employee, EmployeeCreate, EmployeeUpdate};
use shared::response::ApiResponse;

/// Typed client for the employee directory API
#[derive(Debug, Clone)]
pub struct DirectoryClient {
    client: Client,
    base_url: String,
}

impl DirectoryClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Base URL the client talks to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Decode an envelope response, mapping error shapes onto [`ClientError`]
    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> ClientResult<ApiResponse<T>> {
        let status = response.status();
        let text = response.text().await?;

        let Ok(envelope) = serde_json::from_str::<ApiResponse<T>>(&text) else {
            // Non-envelope body (proxy error page, bad gateway, ...)
            return match status {
                StatusCode::NOT_FOUND => Err(ClientError::NotFound("Employee not found".into())),
                s if s.is_success() => Err(ClientError::InvalidResponse(text)),
                _ => Err(ClientError::Server(format!("Request failed ({status})"))),
            };
        };

        if status.is_success() && envelope.success {
            return Ok(envelope);
        }

        let message = envelope
            .message
            .unwrap_or_else(|| "An error occurred".to_string());
        tracing::debug!(status = %status, message = %message, "request rejected");

        match status {
            StatusCode::NOT_FOUND => Err(ClientError::NotFound(message)),
            StatusCode::BAD_REQUEST => match envelope.errors {
                Some(errors) if !errors.is_empty() => Err(ClientError::Validation(errors)),
                _ => Err(ClientError::Rejected(message)),
            },
            _ => Err(ClientError::Server(message)),
        }
    }

    fn expect_data<T>(envelope: ApiResponse<T>) -> ClientResult<T> {
        envelope
            .data
            .ok_or_else(|| ClientError::InvalidResponse("Missing response data".into()))
    }

    /// List employees, optionally filtered by a search term
    pub async fn list(&self, search: Option<&str>) -> ClientResult<Vec<Employee>> {
        let url = format!("{}/api/employees", self.base_url);
        let mut request = self.client.get(&url);
        if let Some(term) = search.filter(|s| !s.is_empty()) {
            request = request.query(&[("search", term)]);
        }
        let response = request.send().await?;
        Self::expect_data(self.handle_response(response).await?)
    }

    /// Fetch a single employee by id
    pub async fn get(&self, id: i64) -> ClientResult<Employee> {
        let url = format!("{}/api/employees/{}", self.base_url, id);
        let response = self.client.get(&url).send().await?;
        Self::expect_data(self.handle_response(response).await?)
    }

    /// Create a new employee
    pub async fn create(&self, payload: &EmployeeCreate) -> ClientResult<Employee> {
        let url = format!("{}/api/employees", self.base_url);
        let response = self.client.post(&url).json(payload).send().await?;
        Self::expect_data(self.handle_response(response).await?)
    }

    /// Partially update an employee
    pub async fn update(&self, id: i64, payload: &EmployeeUpdate) -> ClientResult<Employee> {
        let url = format!("{}/api/employees/{}", self.base_url, id);
        let response = self.client.put(&url).json(payload).send().await?;
        Self::expect_data(self.handle_response(response).await?)
    }

    /// Delete an employee
    pub async fn delete(&self, id: i64) -> ClientResult<()> {
        let url = format!("{}/api/employees/{}", self.base_url, id);
        let response = self.client.delete(&url).send().await?;
        let _envelope: ApiResponse<serde_json::Value> = self.handle_response(response).await?;
        Ok(())
    }
}
