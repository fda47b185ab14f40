use crate::domain::{DomainError, PhotoRecord, PhotoSource};
use crate::infrastructure::http_client::read_json;
use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

/// Photo-listing service reached over HTTP GET.
pub struct HttpPhotoSource {
    client: Client,
    url: String,
}

impl HttpPhotoSource {
    pub fn new(client: Client, url: String) -> Self {
        Self { client, url }
    }
}

#[async_trait]
impl PhotoSource for HttpPhotoSource {
    async fn fetch_photos(&self) -> Result<Vec<PhotoRecord>, DomainError> {
        debug!("Fetching photo listing from {}", self.url);
        let res = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| DomainError::Network(format!("Request failed: {}", e)))?;

        read_json(res, "photo listing").await
    }
}
