use crate::config::ProviderConfig;
use crate::providers::{http_client, LlmProvider, DEFAULT_TIMEOUT};
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde_json::{json, Value};
use std::error::Error;
use std::time::Duration;

pub struct OllamaProvider {
    client: Client,
    base_url: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl OllamaProvider {
    /// Create a new Ollama provider from configuration
    pub fn new(config: &ProviderConfig, timeout: Duration) -> Result<Self, Box<dyn Error>> {
        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| "http://localhost:11434".to_string());

        Ok(OllamaProvider {
            client: http_client(timeout)?,
            base_url,
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }

    #[doc(hidden)]
    pub fn with_base_url(base_url: String, model: String) -> Result<Self, Box<dyn Error>> {
        Ok(OllamaProvider {
            client: http_client(DEFAULT_TIMEOUT)?,
            base_url,
            model,
            temperature: 0.7,
            max_tokens: 4000,
        })
    }
}

#[async_trait]
impl LlmProvider for OllamaProvider {
    fn provider_name(&self) -> &str {
        "ollama"
    }

    async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, Box<dyn Error + Send + Sync>> {
        // Ollama uses OpenAI-compatible API
        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .json(&json!({
                "model": self.model,
                "messages": [
                    {"role": "system", "content": system_prompt},
                    {"role": "user", "content": user_prompt}
                ],
                "temperature": self.temperature,
                "max_tokens": self.max_tokens
            }))
            .send()
            .await?;

        let response_body: Value = response.json().await?;
        debug!("Ollama response: {:?}", response_body);

        // Check for API error response
        if let Some(error) = response_body.get("error") {
            let error_message = error
                .as_str()
                .unwrap_or_else(|| error["message"].as_str().unwrap_or("Unknown error"));
            return Err(format!("Ollama API error: {}", error_message).into());
        }

        let text = response_body["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| {
                format!(
                    "Failed to extract content from Ollama response. Response: {}",
                    response_body
                )
            })?
            .to_string();

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    #[tokio::test]
    async fn test_ollama_complete() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"choices": [{"message": {"content": "[{\"title\": \"Tacos\"}]"}}]}"#)
            .create();

        let provider = OllamaProvider::with_base_url(server.url(), "llama3".to_string()).unwrap();
        let result = provider.complete("system", "tacos").await.unwrap();
        assert!(result.contains("Tacos"));
        mock.assert();
    }

    #[tokio::test]
    async fn test_ollama_error_body() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(404)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error": {"message": "model 'llama9' not found"}}"#)
            .create();

        let provider = OllamaProvider::with_base_url(server.url(), "llama9".to_string()).unwrap();
        let error = provider.complete("system", "tacos").await.unwrap_err();
        assert!(error.to_string().contains("not found"));
        mock.assert();
    }

    #[test]
    fn test_default_base_url() {
        let provider = OllamaProvider::new(&ProviderConfig::new("llama3"), DEFAULT_TIMEOUT).unwrap();
        assert_eq!(provider.base_url, "http://localhost:11434");
        assert_eq!(provider.provider_name(), "ollama");
    }
}
