use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    /// Server bind address (e.g., "0.0.0.0:8000").
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Imgur API client id. When unset, uploads are a no-op.
    #[serde(default)]
    pub imgur_client_id: Option<String>,

    /// Imgur image upload endpoint.
    #[serde(default = "default_imgur_api_url")]
    pub imgur_api_url: String,

    /// Per-request timeout for image downloads, in seconds.
    #[serde(default = "default_download_timeout_secs")]
    pub download_timeout_secs: u64,
}

fn default_bind_addr() -> String {
    "0.0.0.0:8000".to_string()
}

fn default_imgur_api_url() -> String {
    "https://api.imgur.com/3/image".to_string()
}

fn default_download_timeout_secs() -> u64 {
    30
}

impl AppConfig {
    pub fn from_env() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env()
    }
}
