//! Application configuration

mod app_config;

pub use app_config::{
    AppConfig, AppSettings, HtmlConfig, LogFormat, LoggingConfig, PeersConfig, ServerConfig,
    StorageConfig,
};
