use std::str::FromStr;
use std::sync::Arc;

use log::debug;

use crate::config::AppConfig;
use crate::error::{RecipeError, Result};
use crate::locale::Locale;
use crate::model::{Recipe, RecipeId};
use crate::normalize::Normalizer;
use crate::providers::{LlmProvider, ProviderFactory};
use crate::slug;
use crate::sources::{GeneratedSource, RecipeSource, StoredSource};
use crate::store::RecipeStore;

/// Which recipe source serves the process
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SourceMode {
    /// Generative backend only, with an in-process memo (default)
    #[default]
    Generated,
    /// Persistent store in front of the generative backend
    Stored,
}

impl FromStr for SourceMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "generated" => Ok(SourceMode::Generated),
            "stored" => Ok(SourceMode::Stored),
            other => Err(format!("Unknown source mode: {}", other)),
        }
    }
}

/// Builder for composing a [`RecipeService`]
#[derive(Default)]
pub struct RecipeServiceBuilder {
    provider: Option<Box<dyn LlmProvider>>,
    provider_name: Option<String>,
    store: Option<Arc<dyn RecipeStore>>,
    config: Option<AppConfig>,
    mode: SourceMode,
}

impl RecipeServiceBuilder {
    /// Use this provider instead of creating one from configuration
    ///
    /// # Example
    /// ```
    /// use recetario::providers::CatalogProvider;
    /// use recetario::RecipeService;
    ///
    /// let builder = RecipeService::builder().provider(Box::new(CatalogProvider));
    /// ```
    pub fn provider(mut self, provider: Box<dyn LlmProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Create the named provider from configuration instead of the default one
    ///
    /// # Example
    /// ```
    /// use recetario::RecipeService;
    ///
    /// let builder = RecipeService::builder().provider_name("anthropic");
    /// ```
    pub fn provider_name(mut self, name: impl Into<String>) -> Self {
        self.provider_name = Some(name.into());
        self
    }

    /// Set the store used in [`SourceMode::Stored`]
    pub fn store(mut self, store: Arc<dyn RecipeStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Set the configuration (defaults to [`AppConfig::default`])
    pub fn config(mut self, config: AppConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Select the recipe source
    ///
    /// # Example
    /// ```
    /// use recetario::{RecipeService, SourceMode};
    ///
    /// let builder = RecipeService::builder().mode(SourceMode::Stored);
    /// ```
    pub fn mode(mut self, mode: SourceMode) -> Self {
        self.mode = mode;
        self
    }

    /// Compose the service
    ///
    /// # Errors
    /// Returns `RecipeError::BuilderError` if:
    /// - The provider cannot be created from configuration
    /// - Stored mode is selected without a store
    ///
    /// # Example
    /// ```
    /// use recetario::providers::CatalogProvider;
    /// use recetario::RecipeService;
    ///
    /// let service = RecipeService::builder()
    ///     .provider(Box::new(CatalogProvider))
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(service.source_name(), "generated");
    /// ```
    pub fn build(self) -> Result<RecipeService> {
        let config = self.config.unwrap_or_default();

        let provider = match self.provider {
            Some(provider) => provider,
            None => ProviderFactory::from_config(&config, self.provider_name.as_deref())
                .map_err(|e| RecipeError::BuilderError(e.to_string()))?,
        };
        debug!("Using provider {}", provider.provider_name());

        let source: Box<dyn RecipeSource> = match self.mode {
            SourceMode::Generated => Box::new(GeneratedSource::new(
                provider,
                Normalizer::new(config.catalog.fallback_image_url.clone()),
                config.catalog.featured_query.clone(),
            )),
            SourceMode::Stored => {
                let store = self.store.ok_or_else(|| {
                    RecipeError::BuilderError(
                        "Stored mode needs a store. Use .store()".to_string(),
                    )
                })?;
                Box::new(StoredSource::new(provider, store, &config.catalog))
            }
        };

        Ok(RecipeService { source })
    }
}

/// Entry point for finding and showing recipes
pub struct RecipeService {
    source: Box<dyn RecipeSource>,
}

impl RecipeService {
    /// Creates a new builder for composing the service
    pub fn builder() -> RecipeServiceBuilder {
        RecipeServiceBuilder::default()
    }

    pub fn source_name(&self) -> &str {
        self.source.source_name()
    }

    pub async fn search(&self, query: &str) -> Result<Vec<Recipe>> {
        self.source.search(query).await
    }

    pub async fn get_by_id(&self, id: RecipeId, locale: Locale) -> Result<Option<Recipe>> {
        self.source.get_by_id(id, locale).await
    }

    /// Resolve a recipe path segment; a segment without a usable id is not found
    pub async fn get_by_slug(&self, slug: &str, locale: Locale) -> Result<Option<Recipe>> {
        match slug::decode(slug) {
            Ok(id) => self.get_by_id(id, locale).await,
            Err(e) => {
                debug!("{}", e);
                Ok(None)
            }
        }
    }

    pub async fn get_featured(&self) -> Result<Vec<Recipe>> {
        self.source.get_featured().await
    }

    /// Show listed recipes in `locale`.
    ///
    /// Each recipe is looked up again so stored recipes get their translations;
    /// one the source cannot find is localized from its own bilingual fields.
    pub async fn localize(&self, recipes: Vec<Recipe>, locale: Locale) -> Vec<Recipe> {
        let mut localized = Vec::with_capacity(recipes.len());
        for recipe in recipes {
            match self.get_by_id(recipe.id, locale).await {
                Ok(Some(found)) => localized.push(found),
                _ => localized.push(recipe.localized(locale)),
            }
        }
        localized
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::CatalogProvider;
    use crate::store::MemoryStore;

    #[test]
    fn test_stored_mode_requires_store() {
        let result = RecipeService::builder()
            .provider(Box::new(CatalogProvider))
            .mode(SourceMode::Stored)
            .build();
        assert!(matches!(result, Err(RecipeError::BuilderError(_))));
    }

    #[test]
    fn test_unknown_provider_name() {
        let result = RecipeService::builder().provider_name("telepathy").build();
        assert!(matches!(result, Err(RecipeError::BuilderError(_))));
    }

    #[test]
    fn test_default_composition() {
        let service = RecipeService::builder().build().unwrap();
        assert_eq!(service.source_name(), "generated");

        let stored = RecipeService::builder()
            .mode(SourceMode::Stored)
            .store(Arc::new(MemoryStore::new()))
            .build()
            .unwrap();
        assert_eq!(stored.source_name(), "stored");
    }

    #[test]
    fn test_source_mode_from_str() {
        assert_eq!("Stored".parse::<SourceMode>(), Ok(SourceMode::Stored));
        assert_eq!("generated".parse::<SourceMode>(), Ok(SourceMode::Generated));
        assert!("database".parse::<SourceMode>().is_err());
    }

    #[tokio::test]
    async fn test_slug_lookup() {
        let service = RecipeService::builder().build().unwrap();
        let recipes = service.search("pollo").await.unwrap();
        let first = &recipes[0];

        let by_slug = service
            .get_by_slug(&slug::encode(first), Locale::Es)
            .await
            .unwrap();
        assert_eq!(by_slug.as_ref().map(|r| r.id), Some(first.id));

        assert!(service.get_by_slug("not-a-recipe", Locale::Es).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_localize_stored_featured() {
        let service = RecipeService::builder()
            .mode(SourceMode::Stored)
            .store(Arc::new(MemoryStore::new()))
            .build()
            .unwrap();
        service.get_featured().await.unwrap();

        // Second read comes from the store, in English.
        let featured = service.get_featured().await.unwrap();
        assert!(featured.iter().any(|r| r.title == "Lemon Garlic Chicken"));

        let spanish = service.localize(featured, Locale::Es).await;
        assert!(spanish.iter().any(|r| r.title == "Pollo al Limón con Ajo"));
    }
}
