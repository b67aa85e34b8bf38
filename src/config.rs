use serde::Deserialize;
use std::time::Duration;

#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_max_file_size")]
    pub max_file_size_mb: u64,

    // Mock render settings
    #[serde(default = "default_render_delay_ms")]
    pub render_delay_ms: u64,
    #[serde(default = "default_video_url")]
    pub video_url: String,

    // Message returned by the data server
    #[serde(default = "default_data_message")]
    pub data_message: String,

    // Check uploaded bytes against the declared content type.
    // Off by default: clients' declared types are trusted as-is.
    #[serde(default)]
    pub verify_file_signatures: bool,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_max_file_size() -> u64 {
    50
}

fn default_render_delay_ms() -> u64 {
    2500
}

fn default_video_url() -> String {
    "https://backend-api-c1hc.onrender.com/sample-output.mp4".to_string()
}

fn default_data_message() -> String {
    "Hello from the backend!".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_file_size_mb: default_max_file_size(),
            render_delay_ms: default_render_delay_ms(),
            video_url: default_video_url(),
            data_message: default_data_message(),
            verify_file_signatures: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, envy::Error> {
        envy::from_env()
    }

    pub fn max_file_size_bytes(&self) -> u64 {
        self.max_file_size_mb * 1024 * 1024
    }

    /// Body limit for `/render`: both files at the ceiling.
    pub fn max_request_body_bytes(&self) -> usize {
        // Allow some overhead for multipart boundaries/headers.
        ((self.max_file_size_mb * 2 + 10) * 1024 * 1024) as usize
    }

    pub fn render_delay(&self) -> Duration {
        Duration::from_millis(self.render_delay_ms)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
