use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Base URL of the remote scoring service
    #[serde(default = "default_recommender_url")]
    pub recommender_url: String,

    /// Optional JSON file replacing the built-in catalog
    #[serde(default)]
    pub catalog_path: Option<String>,

    /// Number of recommendations returned when the caller does not ask for a count
    #[serde(default = "default_limit")]
    pub default_limit: usize,

    /// Raw affinity value that maps to a full sub-score
    #[serde(default = "default_normalization_ceiling")]
    pub normalization_ceiling: f64,

    /// Probe the remote service once before accepting requests
    #[serde(default = "default_probe_on_startup")]
    pub probe_on_startup: bool,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_recommender_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_limit() -> usize {
    6
}

fn default_normalization_ceiling() -> f64 {
    10.0
}

fn default_probe_on_startup() -> bool {
    true
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Socket address the server binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
