use serde::Deserialize;

use crate::infrastructure::observability::ObservabilityConfig;

const DEFAULT_HTML_TEXT: &str = "Default text (k8s Configmap / Secret not loaded)";

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
    #[serde(default)]
    pub app: AppSettings,
    #[serde(default)]
    pub peers: PeersConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub html: HtmlConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Identity of this instance
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_app_version")]
    pub version: String,
    /// Defaults to the `HOSTNAME` env var Kubernetes sets for each pod
    #[serde(default = "default_pod_name")]
    pub pod_name: String,
    /// Overrides the detected "<name> running at <address>" identifier
    #[serde(default)]
    pub identifier: Option<String>,
}

/// Base URLs of the sibling demo services
#[derive(Debug, Clone, Deserialize)]
pub struct PeersConfig {
    #[serde(default = "default_yellow_url")]
    pub yellow_url: String,
    #[serde(default = "default_white_url")]
    pub white_url: String,
    #[serde(default = "default_peer_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_storage_root")]
    pub root: String,
}

/// Values normally injected from a Kubernetes ConfigMap or Secret
#[derive(Debug, Clone, Deserialize)]
pub struct HtmlConfig {
    #[serde(default = "default_html_text")]
    pub hardcoded: String,
    #[serde(default = "default_background_color")]
    pub background_color: String,
    #[serde(default = "default_text_color")]
    pub text_color: String,
    #[serde(default = "default_html_text")]
    pub text_one: String,
    #[serde(default = "default_html_text")]
    pub text_two: String,
    #[serde(default = "default_html_text")]
    pub text_three: String,
    #[serde(default = "default_html_text")]
    pub text_four: String,
    #[serde(default = "default_html_text")]
    pub text_five: String,
    #[serde(default = "default_html_text")]
    pub text_six: String,
    #[serde(default = "default_html_text")]
    pub sealed_secret_config_file: String,
}

fn default_app_name() -> String {
    "devops-blue".to_string()
}

fn default_app_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn default_pod_name() -> String {
    std::env::var("HOSTNAME").unwrap_or_else(|_| "not-kubernetes".to_string())
}

fn default_yellow_url() -> String {
    "http://localhost:8112".to_string()
}

fn default_white_url() -> String {
    "http://localhost:8113".to_string()
}

fn default_peer_timeout_secs() -> u64 {
    30
}

fn default_storage_root() -> String {
    "upload".to_string()
}

fn default_html_text() -> String {
    DEFAULT_HTML_TEXT.to_string()
}

fn default_background_color() -> String {
    "#ffffff".to_string()
}

fn default_text_color() -> String {
    "#000000".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8111,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            version: default_app_version(),
            pod_name: default_pod_name(),
            identifier: None,
        }
    }
}

impl Default for PeersConfig {
    fn default() -> Self {
        Self {
            yellow_url: default_yellow_url(),
            white_url: default_white_url(),
            timeout_secs: default_peer_timeout_secs(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root: default_storage_root(),
        }
    }
}

impl Default for HtmlConfig {
    fn default() -> Self {
        Self {
            hardcoded: default_html_text(),
            background_color: default_background_color(),
            text_color: default_text_color(),
            text_one: default_html_text(),
            text_two: default_html_text(),
            text_three: default_html_text(),
            text_four: default_html_text(),
            text_five: default_html_text(),
            text_six: default_html_text(),
            sealed_secret_config_file: default_html_text(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
