use crate::providers::LlmProvider;
use async_trait::async_trait;
use log::info;
use std::error::Error;

/// Six bilingual budget recipes, in the backend's response shape.
pub const BUILTIN_CATALOG: &str = include_str!("catalog.json");

/// Offline provider that answers every prompt with the built-in catalogue.
///
/// Used for development and demos without an API key; the response goes
/// through the same parser and normalizer as a live backend's.
#[derive(Debug, Clone, Default)]
pub struct CatalogProvider;

#[async_trait]
impl LlmProvider for CatalogProvider {
    fn provider_name(&self) -> &str {
        "catalog"
    }

    async fn complete(
        &self,
        _system_prompt: &str,
        _user_prompt: &str,
    ) -> Result<String, Box<dyn Error + Send + Sync>> {
        info!("Serving built-in recipe catalogue");
        Ok(BUILTIN_CATALOG.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser;

    #[tokio::test]
    async fn test_catalog_parses() {
        let text = CatalogProvider.complete("system", "anything").await.unwrap();
        let records = parser::try_parse(&text).unwrap();
        assert_eq!(records.len(), 6);
        assert!(records.iter().all(|r| r.title_en.is_some()));
        assert!(records
            .iter()
            .all(|r| r.ingredients.as_ref().is_some_and(|i| !i.is_empty())));
    }

    #[test]
    fn test_provider_name() {
        assert_eq!(CatalogProvider.provider_name(), "catalog");
    }
}
