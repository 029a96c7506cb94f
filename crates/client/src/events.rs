//! REST client for the read-only events feed.

use async_trait::async_trait;
use reqwest::Method;
use torreblanca_core::events::{extract_events, Event};

use crate::api::EventsApi;
use crate::config::{ClientConfig, ConfigError};
use crate::error::ClientError;
use crate::http::{ensure_success, json_request, parse_json};

/// Stateless HTTP client for the events collection.
#[derive(Debug, Clone)]
pub struct EventsService {
    client: reqwest::Client,
    url: String,
}

impl EventsService {
    /// Create a service for the events collection at `url`.
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), url)
    }

    /// Create a service reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    /// Create a service from loaded configuration.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ConfigError> {
        Ok(Self::with_client(config.http_client()?, config.events_url()))
    }

    /// Events collection URL.
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl EventsApi for EventsService {
    async fn list_events(&self) -> Result<Vec<Event>, ClientError> {
        let result: Result<Vec<Event>, ClientError> = async {
            let response = json_request(&self.client, Method::GET, &self.url)
                .send()
                .await?;
            let response = ensure_success(response, "fetching events")?;
            let body: serde_json::Value = parse_json(response).await?;
            Ok(extract_events(body)?)
        }
        .await;

        result.inspect_err(|e| tracing::error!(error = %e, "Failed to fetch events"))
    }
}
