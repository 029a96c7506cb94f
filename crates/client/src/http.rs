//! Request/response helpers shared by the services.

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::error::ClientError;

const JSON: &str = "application/json";

/// Start a request carrying the JSON content negotiation headers every
/// call sends.
pub(crate) fn json_request(client: &reqwest::Client, method: Method, url: &str) -> RequestBuilder {
    tracing::debug!(%method, url, "Sending API request");
    client
        .request(method, url)
        .header(CONTENT_TYPE, JSON)
        .header(ACCEPT, JSON)
}

/// Ensure the response has a success status code. Returns the response
/// unchanged on success, or a [`ClientError::Transport`] otherwise.
pub(crate) fn ensure_success(
    response: Response,
    operation: &'static str,
) -> Result<Response, ClientError> {
    let status = response.status();
    if !status.is_success() {
        return Err(ClientError::Transport {
            operation,
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("Unknown Status").to_string(),
        });
    }
    Ok(response)
}

/// Decode a successful response body as JSON.
///
/// The body is read as text first so that malformed payloads surface as
/// [`ClientError::Parse`] rather than a transport error.
pub(crate) async fn parse_json<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| ClientError::Parse(e.to_string()))
}
