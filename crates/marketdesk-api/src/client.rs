//! HTTP client for the storefront backend's category and product endpoints.
//!
//! Category lookups are idempotent and retried on transient failures.
//! Product submission is sent once; a non-2xx answer becomes
//! [`ApiError::Rejected`] carrying the backend's message when it gave one.

use std::time::Duration;

use marketdesk_core::{AppConfig, CategoryItem, SubmissionPayload};
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::retry::retry_with_backoff;
use crate::types::{CategoryFieldsResponse, ErrorBody, SubmitResponse};

/// Client for the storefront REST API.
///
/// Use [`StoreApiClient::from_config`] in the application, or
/// [`StoreApiClient::new`] to point at a mock server in tests.
pub struct StoreApiClient {
    client: Client,
    base_url: Url,
    api_token: Option<String>,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl StoreApiClient {
    /// Creates a client with the given timeout and `User-Agent`, no token and
    /// no retries.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the underlying `reqwest::Client` cannot
    /// be constructed, or [`ApiError::InvalidBaseUrl`] if `base_url` does not
    /// parse.
    pub fn new(base_url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Ensure exactly one trailing slash so relative joins append to the
        // base path instead of replacing its last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| ApiError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            base_url,
            api_token: None,
            max_retries: 0,
            backoff_base_ms: 0,
        })
    }

    /// Creates a client from application configuration, including token and
    /// retry policy.
    ///
    /// # Errors
    ///
    /// See [`StoreApiClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, ApiError> {
        Ok(Self::new(
            &config.api_base_url,
            config.request_timeout_secs,
            &config.user_agent,
        )?
        .with_token(config.api_token.clone())
        .with_retry_policy(config.max_retries, config.retry_backoff_base_ms))
    }

    #[must_use]
    pub fn with_token(mut self, api_token: Option<String>) -> Self {
        self.api_token = api_token;
        self
    }

    #[must_use]
    pub fn with_retry_policy(mut self, max_retries: u32, backoff_base_ms: u64) -> Self {
        self.max_retries = max_retries;
        self.backoff_base_ms = backoff_base_ms;
        self
    }

    /// Fetches the required/optional field lists for a category.
    ///
    /// # Errors
    ///
    /// - [`ApiError::UnexpectedStatus`] on a non-2xx status (5xx/429 retried).
    /// - [`ApiError::Http`] on network failure after all retries.
    /// - [`ApiError::Deserialize`] if the body does not match the expected shape.
    pub async fn category_fields(
        &self,
        category_id: i64,
    ) -> Result<CategoryFieldsResponse, ApiError> {
        let url = self.endpoint(&format!("categories/{category_id}/fields"))?;
        self.get_json(url, &format!("category fields (category_id={category_id})"))
            .await
    }

    /// Fetches the model variants ("items") offered within a category.
    ///
    /// # Errors
    ///
    /// Same as [`StoreApiClient::category_fields`].
    pub async fn category_items(&self, category_id: i64) -> Result<Vec<CategoryItem>, ApiError> {
        let url = self.endpoint(&format!("categories/{category_id}/items"))?;
        self.get_json(url, &format!("category items (category_id={category_id})"))
            .await
    }

    /// Posts a product submission. Never retried.
    ///
    /// An empty 2xx body is accepted as a response without a message.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Rejected`] on any non-2xx status.
    /// - [`ApiError::Http`] on network failure.
    /// - [`ApiError::Deserialize`] if a non-empty 2xx body is not valid JSON.
    pub async fn submit_product(
        &self,
        payload: &SubmissionPayload,
    ) -> Result<SubmitResponse, ApiError> {
        let url = self.endpoint("products/submit")?;
        let response = self
            .authorize(self.client.post(url.clone()))
            .json(payload)
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(ErrorBody::into_message);
            tracing::warn!(
                status = status.as_u16(),
                message = message.as_deref().unwrap_or(""),
                "product submission rejected"
            );
            return Err(ApiError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        if body.trim().is_empty() {
            return Ok(SubmitResponse::default());
        }
        serde_json::from_str(&body).map_err(|e| ApiError::Deserialize {
            context: url.to_string(),
            source: e,
        })
    }

    /// Resolves a path relative to the base URL.
    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path)
            .map_err(|e| ApiError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: format!("cannot join '{path}': {e}"),
            })
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.api_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Sends a GET with retries, asserts a 2xx status, and parses the body.
    async fn get_json<T: DeserializeOwned>(&self, url: Url, context: &str) -> Result<T, ApiError> {
        retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            let url = url.clone();
            async move {
                let response = self.authorize(self.client.get(url.clone())).send().await?;
                let status = response.status();
                if !status.is_success() {
                    return Err(ApiError::UnexpectedStatus {
                        status: status.as_u16(),
                        url: url.to_string(),
                    });
                }
                let body = response.text().await?;
                serde_json::from_str::<T>(&body).map_err(|e| ApiError::Deserialize {
                    context: context.to_owned(),
                    source: e,
                })
            }
        })
        .await
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
