//! REST client for the school records collection.

use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use torreblanca_core::record::{ListEnvelope, NewRecord, Record, RecordPatch};
use torreblanca_core::types::DbId;
use torreblanca_core::validation::{self, SubmissionFields};

use crate::api::RecordApi;
use crate::config::{ClientConfig, ConfigError};
use crate::error::ClientError;
use crate::http::{ensure_success, json_request, parse_json};

/// Stateless HTTP client for one records collection.
///
/// Owns the base URL (e.g. `https://host/api/colegio/`) and a
/// [`reqwest::Client`]. Cloning is cheap; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct RecordService {
    client: reqwest::Client,
    base_url: String,
}

impl RecordService {
    /// Create a service for the collection at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create a service reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Self { client, base_url }
    }

    /// Create a service from loaded configuration.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ConfigError> {
        Ok(Self::with_client(config.http_client()?, config.records_url()))
    }

    /// Collection URL, always ending in `/`.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Check a payload before create/update. Pure; logs the rejection
    /// reason and returns `false` when the payload is not submittable.
    pub fn validate(payload: &impl SubmissionFields) -> bool {
        validation::is_valid_submission(payload)
    }

    fn item_url(&self, id: DbId) -> String {
        format!("{}{id}/", self.base_url)
    }
}

#[async_trait]
impl RecordApi for RecordService {
    async fn list_all(&self) -> Result<ListEnvelope, ClientError> {
        let result: Result<ListEnvelope, ClientError> = async {
            let response = json_request(&self.client, Method::GET, &self.base_url)
                .send()
                .await?;
            let response = ensure_success(response, "listing records")?;
            parse_json(response).await
        }
        .await;

        result.inspect_err(|e| tracing::error!(error = %e, "Failed to list records"))
    }

    async fn get_by_id(&self, id: DbId) -> Result<Record, ClientError> {
        let result: Result<Record, ClientError> = async {
            let response = json_request(&self.client, Method::GET, &self.item_url(id))
                .send()
                .await?;
            if response.status() == StatusCode::NOT_FOUND {
                return Err(ClientError::NotFound { id });
            }
            let response = ensure_success(response, "fetching record")?;
            parse_json(response).await
        }
        .await;

        result.inspect_err(|e| tracing::error!(id, error = %e, "Failed to fetch record"))
    }

    async fn create(&self, payload: &NewRecord) -> Result<Record, ClientError> {
        let result: Result<Record, ClientError> = async {
            let response = json_request(&self.client, Method::POST, &self.base_url)
                .json(payload)
                .send()
                .await?;
            let response = ensure_success(response, "creating record")?;
            parse_json(response).await
        }
        .await;

        match &result {
            Ok(record) => tracing::info!(id = record.id, "Record created"),
            Err(e) => tracing::error!(error = %e, "Failed to create record"),
        }
        result
    }

    async fn update(&self, id: DbId, payload: &RecordPatch) -> Result<Record, ClientError> {
        let result: Result<Record, ClientError> = async {
            let response = json_request(&self.client, Method::PUT, &self.item_url(id))
                .json(payload)
                .send()
                .await?;
            let response = ensure_success(response, "updating record")?;
            parse_json(response).await
        }
        .await;

        match &result {
            Ok(_) => tracing::info!(id, "Record updated"),
            Err(e) => tracing::error!(id, error = %e, "Failed to update record"),
        }
        result
    }

    async fn delete(&self, id: DbId) -> Result<(), ClientError> {
        let result: Result<(), ClientError> = async {
            let response = json_request(&self.client, Method::DELETE, &self.item_url(id))
                .send()
                .await?;
            ensure_success(response, "deleting record")?;
            Ok(())
        }
        .await;

        match &result {
            Ok(()) => tracing::info!(id, "Record deleted"),
            Err(e) => tracing::error!(id, error = %e, "Failed to delete record"),
        }
        result
    }
}
