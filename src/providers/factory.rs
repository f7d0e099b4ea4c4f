use crate::config::{AppConfig, ProviderConfig};
use crate::providers::{
    AnthropicProvider, CatalogProvider, GoogleProvider, LlmProvider, OllamaProvider,
    OpenAIProvider,
};
use std::error::Error;
use std::time::Duration;

pub struct ProviderFactory;

impl ProviderFactory {
    /// Create a provider instance from configuration
    pub fn create(
        provider_name: &str,
        config: &ProviderConfig,
        timeout: Duration,
    ) -> Result<Box<dyn LlmProvider>, Box<dyn Error>> {
        // Validate that provider is enabled
        if !config.enabled {
            return Err(format!(
                "Provider '{}' is not enabled in configuration",
                provider_name
            )
            .into());
        }

        match provider_name {
            "openai" => Ok(Box::new(OpenAIProvider::new(config, timeout)?)),
            "anthropic" => Ok(Box::new(AnthropicProvider::new(config, timeout)?)),
            "google" => Ok(Box::new(GoogleProvider::new(config, timeout)?)),
            "ollama" => Ok(Box::new(OllamaProvider::new(config, timeout)?)),
            "catalog" => Ok(Box::new(CatalogProvider)),
            _ => Err(format!("Unknown provider: {}", provider_name).into()),
        }
    }

    /// Create the named provider, or the configured default when `name` is `None`
    ///
    /// The offline catalogue needs no configuration entry.
    pub fn from_config(
        config: &AppConfig,
        name: Option<&str>,
    ) -> Result<Box<dyn LlmProvider>, Box<dyn Error>> {
        let provider_name = name.unwrap_or(config.default_provider.as_str());
        let timeout = Duration::from_secs(config.timeout);

        match config.providers.get(provider_name) {
            Some(provider_config) => Self::create(provider_name, provider_config, timeout),
            None if provider_name == "catalog" => Ok(Box::new(CatalogProvider)),
            None => Err(format!(
                "Provider '{}' not found in configuration",
                provider_name
            )
            .into()),
        }
    }

    /// Get the default provider from configuration
    pub fn get_default_provider(config: &AppConfig) -> Result<Box<dyn LlmProvider>, Box<dyn Error>> {
        Self::from_config(config, None)
    }

    /// List all available provider names
    pub fn available_providers() -> Vec<&'static str> {
        vec!["openai", "anthropic", "google", "ollama", "catalog"]
    }
}
