use async_trait::async_trait;
use base64::Engine;
use reqwest::Client;
use serde::Deserialize;

/// Transport that pushes an image payload to a remote host and returns a
/// reference to it.
#[async_trait]
pub trait ImageUploader: Send + Sync {
    async fn upload(&self, image: &[u8]) -> Result<String, UploadError>;
}

/// Client for the Imgur image upload API.
pub struct ImgurClient {
    http: Client,
    api_url: String,
    client_id: String,
}

#[derive(Deserialize)]
struct ImgurResponse {
    data: ImgurImage,
}

#[derive(Deserialize)]
struct ImgurImage {
    link: String,
}

impl ImgurClient {
    pub fn new(api_url: String, client_id: String) -> Self {
        Self {
            http: Client::new(),
            api_url,
            client_id,
        }
    }
}

#[async_trait]
impl ImageUploader for ImgurClient {
    async fn upload(&self, image: &[u8]) -> Result<String, UploadError> {
        if image.is_empty() {
            return Err(UploadError::Rejected("empty image payload".to_string()));
        }

        let body = serde_json::json!({
            "image": base64::engine::general_purpose::STANDARD.encode(image),
        });

        let response = self
            .http
            .post(&self.api_url)
            .header("Authorization", format!("Client-ID {}", self.client_id))
            .json(&body)
            .send()
            .await
            .map_err(UploadError::Http)?
            .error_for_status()
            .map_err(UploadError::Http)?;

        let parsed: ImgurResponse = response.json().await.map_err(UploadError::Http)?;
        Ok(parsed.data.link)
    }
}

/// Stand-in used when no Imgur client id is configured: accepts every payload
/// without performing network I/O.
pub struct NoopUploader;

#[async_trait]
impl ImageUploader for NoopUploader {
    async fn upload(&self, _image: &[u8]) -> Result<String, UploadError> {
        Ok(String::new())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("upload rejected: {0}")]
    Rejected(String),
}
