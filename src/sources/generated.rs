use crate::cache::RecipeCache;
use crate::error::Result;
use crate::locale::Locale;
use crate::model::{Recipe, RecipeId};
use crate::normalize::Normalizer;
use crate::providers::LlmProvider;
use crate::slug::NOT_FOUND_ID;
use crate::sources::{generate, RecipeSource};
use async_trait::async_trait;
use log::debug;

/// Recipe source backed only by the generative backend.
///
/// Every recipe it returns is remembered in both locales, so the detail page
/// of anything listed earlier in the process can be served without a store.
pub struct GeneratedSource {
    provider: Box<dyn LlmProvider>,
    normalizer: Normalizer,
    cache: RecipeCache,
    featured_query: String,
}

impl GeneratedSource {
    pub fn new(
        provider: Box<dyn LlmProvider>,
        normalizer: Normalizer,
        featured_query: impl Into<String>,
    ) -> Self {
        GeneratedSource {
            provider,
            normalizer,
            cache: RecipeCache::new(),
            featured_query: featured_query.into(),
        }
    }

    pub fn cache(&self) -> &RecipeCache {
        &self.cache
    }

    async fn generate_and_remember(&self, query: &str) -> Result<Vec<Recipe>> {
        let recipes = generate(self.provider.as_ref(), &self.normalizer, query).await?;
        for recipe in &recipes {
            self.cache.insert_bilingual(recipe).await;
        }
        Ok(recipes)
    }
}

#[async_trait]
impl RecipeSource for GeneratedSource {
    fn source_name(&self) -> &str {
        "generated"
    }

    async fn search(&self, query: &str) -> Result<Vec<Recipe>> {
        self.generate_and_remember(query).await
    }

    async fn get_by_id(&self, id: RecipeId, locale: Locale) -> Result<Option<Recipe>> {
        if id == NOT_FOUND_ID {
            return Ok(None);
        }
        let recipe = self.cache.get(id, locale).await;
        if recipe.is_none() {
            debug!("Recipe {} ({}) was never generated in this process", id, locale);
        }
        Ok(recipe)
    }

    async fn get_featured(&self) -> Result<Vec<Recipe>> {
        self.generate_and_remember(&self.featured_query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::CatalogProvider;

    fn catalog_source() -> GeneratedSource {
        GeneratedSource::new(
            Box::new(CatalogProvider),
            Normalizer::default(),
            "popular",
        )
    }

    #[tokio::test]
    async fn test_search_remembers_results() {
        let source = catalog_source();
        let recipes = source.search("cheap dinner").await.unwrap();
        assert_eq!(recipes.len(), 6);
        assert_eq!(source.cache().len().await, 12);

        let first = &recipes[0];
        let spanish = source.get_by_id(first.id, Locale::Es).await.unwrap().unwrap();
        assert_eq!(spanish.title, first.title);

        let english = source.get_by_id(first.id, Locale::En).await.unwrap().unwrap();
        assert_eq!(Some(english.title), first.title_en.clone());
    }

    #[tokio::test]
    async fn test_unknown_id() {
        let source = catalog_source();
        assert!(source.get_by_id(12345, Locale::Es).await.unwrap().is_none());
        assert!(source.get_by_id(NOT_FOUND_ID, Locale::Es).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_featured_uses_catalog() {
        let source = catalog_source();
        let featured = source.get_featured().await.unwrap();
        assert_eq!(featured.len(), 6);
        assert!(featured.iter().all(|r| !r.is_degraded()));
    }
}
