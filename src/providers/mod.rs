mod anthropic;
mod catalog;
mod factory;
mod google;
mod ollama;
mod open_ai;
mod prompt;

pub use anthropic::AnthropicProvider;
pub use catalog::CatalogProvider;
pub use factory::ProviderFactory;
pub use google::GoogleProvider;
pub use ollama::OllamaProvider;
pub use open_ai::OpenAIProvider;
pub use prompt::{build_search_prompt, RECIPE_SEARCH_PROMPT, SYSTEM_PROMPT};

use async_trait::async_trait;
use reqwest::Client;
use std::error::Error;
use std::time::Duration;

/// Unified trait for all generative text backends
///
/// A provider is an untrusted text generator: it is asked for a JSON array of
/// recipes but whatever text comes back is handed to the parser as is.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Get the provider name (e.g., "openai", "anthropic")
    fn provider_name(&self) -> &str;

    /// Generate a completion for the given system and user prompts
    async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, Box<dyn Error + Send + Sync>>;
}

pub(crate) fn http_client(timeout: Duration) -> Result<Client, Box<dyn Error>> {
    Ok(Client::builder().timeout(timeout).build()?)
}

/// Default request timeout for providers built without configuration
pub(crate) const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);
