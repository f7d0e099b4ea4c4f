use crate::normalize::FALLBACK_IMAGE_URL;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Provider used to generate recipes when none is named explicitly
    #[serde(default = "default_provider")]
    pub default_provider: String,
    /// Map of provider name to provider configuration
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
    /// Search and featured-list behaviour
    #[serde(default)]
    pub catalog: CatalogConfig,
    /// Persistent store settings
    #[serde(default)]
    pub store: StoreConfig,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_provider: default_provider(),
            providers: HashMap::new(),
            catalog: CatalogConfig::default(),
            store: StoreConfig::default(),
            timeout: default_timeout(),
        }
    }
}

/// Configuration for a specific generative provider
#[derive(Debug, Deserialize, Clone)]
pub struct ProviderConfig {
    /// Whether this provider is enabled
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Model identifier (e.g., "gpt-4o-mini", "MiniMax-M2")
    pub model: String,
    /// Temperature for generation (0.0-1.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Maximum tokens to generate
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// API key for authentication (can also be set via environment variable)
    pub api_key: Option<String>,
    /// Base URL for API endpoint (for compatible or proxy endpoints)
    pub base_url: Option<String>,
}

impl ProviderConfig {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            enabled: true,
            model: model.into(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            api_key: None,
            base_url: None,
        }
    }
}

/// Configuration for search and the featured list
#[derive(Debug, Deserialize, Clone)]
pub struct CatalogConfig {
    /// Query sent to the backend when the featured list has to be generated
    #[serde(default = "default_featured_query")]
    pub featured_query: String,
    /// Page size of the "recent recipes" read for the featured list
    #[serde(default = "default_featured_limit")]
    pub featured_limit: usize,
    /// Image used when a recipe has no absolute image URL
    #[serde(default = "default_fallback_image_url")]
    pub fallback_image_url: String,
    /// Persist live search results, not only generated featured lists
    #[serde(default)]
    pub persist_search_results: bool,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            featured_query: default_featured_query(),
            featured_limit: default_featured_limit(),
            fallback_image_url: default_fallback_image_url(),
            persist_search_results: false,
        }
    }
}

/// Configuration for the recipe store
#[derive(Debug, Clone, Deserialize, Default)]
pub struct StoreConfig {
    /// JSON snapshot the in-memory store is loaded from and saved to
    #[serde(default)]
    pub snapshot_path: Option<PathBuf>,
}

// Default value functions
fn default_provider() -> String {
    "catalog".to_string()
}

fn default_enabled() -> bool {
    true
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    4000
}

fn default_timeout() -> u64 {
    60
}

fn default_featured_query() -> String {
    "budgetbytes popular recipes top rated".to_string()
}

fn default_featured_limit() -> usize {
    12
}

fn default_fallback_image_url() -> String {
    FALLBACK_IMAGE_URL.to_string()
}

impl AppConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECETARIO__ prefix
    /// 2. recetario.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RECETARIO__PROVIDERS__OPENAI__API_KEY
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }
}

/// Load configuration from file and environment variables
///
/// See [`AppConfig::load`] for the source priority.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from("recetario")
}

/// Like [`load_config`], reading the file `name` (extension optional) instead.
///
/// A missing file is not an error; a file that cannot be parsed is.
pub fn load_config_from(name: &str) -> Result<AppConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name(name).required(false))
        // Use double underscore for nested: RECETARIO__CATALOG__FEATURED_LIMIT
        .add_source(
            Environment::with_prefix("RECETARIO")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
