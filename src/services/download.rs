use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

/// Transport that fetches image bytes given a URL.
#[async_trait]
pub trait ImageDownloader: Send + Sync {
    async fn download(&self, url: &str) -> Result<Vec<u8>, DownloadError>;
}

/// Downloader backed by a plain HTTP client.
pub struct HttpDownloader {
    http: Client,
}

impl HttpDownloader {
    pub fn new(timeout: Duration) -> Result<Self, DownloadError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(DownloadError::Http)?;
        Ok(Self { http })
    }
}

#[async_trait]
impl ImageDownloader for HttpDownloader {
    async fn download(&self, url: &str) -> Result<Vec<u8>, DownloadError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(DownloadError::Http)?
            .error_for_status()
            .map_err(DownloadError::Http)?;

        let data = response.bytes().await.map_err(DownloadError::Http)?;

        // Sniff the magic bytes so a 200 with an HTML error page still counts
        // as a failed download.
        image::guess_format(&data).map_err(|_| DownloadError::NotAnImage)?;

        Ok(data.to_vec())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("response body is not a recognized image format")]
    NotAnImage,
}
