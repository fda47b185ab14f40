use crate::domain::DomainError;
use reqwest::{header, Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

pub fn build_client(timeout: Duration) -> Client {
    let mut headers = header::HeaderMap::new();
    headers.insert(header::ACCEPT, header::HeaderValue::from_static("application/json"));

    Client::builder()
        .user_agent(concat!("lensgallery/", env!("CARGO_PKG_VERSION")))
        .default_headers(headers)
        .timeout(timeout)
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// Rejects non-success statuses, then decodes the body as JSON.
/// Transport failures and bad statuses are network errors; a body that
/// doesn't decode is malformed.
pub async fn read_json<T: DeserializeOwned>(res: Response, what: &str) -> Result<T, DomainError> {
    if !res.status().is_success() {
        return Err(DomainError::Network(format!(
            "{} request failed with status {}",
            what,
            res.status()
        )));
    }

    let body_text = res
        .text()
        .await
        .map_err(|e| DomainError::Network(format!("Failed to read {} response body: {}", what, e)))?;

    serde_json::from_str(&body_text)
        .map_err(|e| DomainError::Malformed(format!("Failed to parse {} JSON: {}", what, e)))
}
