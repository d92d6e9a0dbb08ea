use reqwest::{Client, Url};

use super::error::FetchError;
use crate::state::config::{ApiConfig, CLIENT_ID_ENV};
use crate::state::data::Wallpaper;

/// Client for the random-photo endpoint
///
/// Cheap to clone: the underlying `reqwest::Client` is reference counted,
/// so every background task gets its own handle to the same pool.
#[derive(Debug, Clone)]
pub struct PhotoClient {
    http: Client,
    base_url: String,
    client_id: Option<String>,
    count: u8,
}

impl PhotoClient {
    pub fn new(config: &ApiConfig) -> Result<Self, FetchError> {
        let http = Client::builder().timeout(config.timeout()).build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client_id: config.client_id.clone(),
            count: config.count,
        })
    }

    /// The shared HTTP client, reused for downloads
    pub fn http(&self) -> &Client {
        &self.http
    }

    /// Photos requested per batch
    pub fn count(&self) -> u8 {
        self.count
    }

    fn random_url(&self) -> Result<Url, FetchError> {
        let client_id = self
            .client_id
            .as_deref()
            .ok_or(FetchError::MissingClientId { env: CLIENT_ID_ENV })?;

        let raw = format!("{}/photos/random", self.base_url);
        let mut url = Url::parse(&raw).map_err(|e| FetchError::InvalidUrl {
            url: raw.clone(),
            reason: e.to_string(),
        })?;

        url.query_pairs_mut()
            .append_pair("count", &self.count.to_string())
            .append_pair("client_id", client_id);

        Ok(url)
    }

    /// Fetch one batch of random photos, in the order the API returns them
    pub async fn random_photos(&self) -> Result<Vec<Wallpaper>, FetchError> {
        let url = self.random_url()?;
        let body = self.get(url.as_str()).await?;
        let photos: Vec<Wallpaper> = serde_json::from_slice(&body)?;

        tracing::debug!("📥 Received {} photos", photos.len());
        Ok(photos)
    }

    /// Fetch the raw bytes behind an image URL
    pub async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        self.get(url).await
    }

    async fn get(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let response = self.http.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.bytes().await?.to_vec())
    }
}
