use crate::cache::RecipeCache;
use crate::config::CatalogConfig;
use crate::error::Result;
use crate::locale::Locale;
use crate::model::{Recipe, RecipeId};
use crate::normalize::Normalizer;
use crate::providers::LlmProvider;
use crate::slug::NOT_FOUND_ID;
use crate::sources::{generate, RecipeSource};
use crate::store::{NewRecipe, RecipeStore};
use crate::translation::merge;
use async_trait::async_trait;
use log::{debug, info, warn};
use std::sync::Arc;

/// Recipe source that puts the persistent store in front of the backend.
///
/// Detail lookups read through a [`RecipeCache`] into the store and overlay
/// translations for non-canonical locales. The featured list comes from the
/// store and is generated and persisted once when the store has nothing.
///
/// Only recipes carrying a store-assigned id enter the read-through cache.
/// Generated recipes the store never accepted are kept apart and are served
/// only for ids the store does not know.
pub struct StoredSource {
    provider: Box<dyn LlmProvider>,
    store: Arc<dyn RecipeStore>,
    normalizer: Normalizer,
    cache: RecipeCache,
    unsaved: RecipeCache,
    featured_query: String,
    featured_limit: usize,
    persist_search_results: bool,
}

impl StoredSource {
    pub fn new(
        provider: Box<dyn LlmProvider>,
        store: Arc<dyn RecipeStore>,
        catalog: &CatalogConfig,
    ) -> Self {
        StoredSource {
            provider,
            store,
            normalizer: Normalizer::new(catalog.fallback_image_url.clone()),
            cache: RecipeCache::new(),
            unsaved: RecipeCache::new(),
            featured_query: catalog.featured_query.clone(),
            featured_limit: catalog.featured_limit,
            persist_search_results: catalog.persist_search_results,
        }
    }

    pub fn cache(&self) -> &RecipeCache {
        &self.cache
    }

    /// Store generated recipes, one batch, and hand them back with the ids
    /// the store assigned. Rows the store refuses keep their generated id.
    async fn persist(&self, recipes: Vec<Recipe>) -> Vec<Recipe> {
        if recipes.is_empty() {
            return recipes;
        }
        let rows: Vec<NewRecipe> = recipes.iter().map(NewRecipe::from_generated).collect();
        let mut outcomes = self.store.insert_batch(&rows).await.into_iter();

        let mut persisted = Vec::with_capacity(recipes.len());
        for recipe in recipes {
            let recipe = match outcomes.next() {
                Some(Ok(id)) => {
                    let recipe = Recipe { id, ..recipe };
                    self.cache.insert_bilingual(&recipe).await;
                    recipe
                }
                outcome => {
                    if let Some(Err(e)) = outcome {
                        warn!("Could not store '{}': {}", recipe.title, e);
                    }
                    self.unsaved.insert_bilingual(&recipe).await;
                    recipe
                }
            };
            persisted.push(recipe);
        }
        persisted
    }

    async fn load(&self, id: RecipeId, locale: Locale) -> Option<Recipe> {
        let canonical = match self.store.find_by_id(id).await {
            Ok(Some(recipe)) => recipe,
            Ok(None) => {
                debug!("Recipe {} not in {}", id, self.store.store_name());
                return None;
            }
            Err(e) => {
                warn!("Lookup of recipe {} failed: {}", id, e);
                return None;
            }
        };

        if locale == Locale::CANONICAL {
            return Some(canonical);
        }
        match self.store.translations(id, locale).await {
            Ok(overlay) => Some(merge(&canonical, &overlay)),
            Err(e) => {
                warn!("No {} translation for recipe {}: {}", locale, id, e);
                Some(canonical)
            }
        }
    }
}

#[async_trait]
impl RecipeSource for StoredSource {
    fn source_name(&self) -> &str {
        "stored"
    }

    async fn search(&self, query: &str) -> Result<Vec<Recipe>> {
        let recipes = generate(self.provider.as_ref(), &self.normalizer, query).await?;
        if self.persist_search_results {
            return Ok(self.persist(recipes).await);
        }
        for recipe in &recipes {
            self.unsaved.insert_bilingual(recipe).await;
        }
        Ok(recipes)
    }

    async fn get_by_id(&self, id: RecipeId, locale: Locale) -> Result<Option<Recipe>> {
        if id == NOT_FOUND_ID {
            return Ok(None);
        }
        if let Some(recipe) = self.cache.get(id, locale).await {
            debug!("Cache hit for recipe {} ({})", id, locale);
            return Ok(Some(recipe));
        }

        debug!("Cache miss for recipe {} ({})", id, locale);
        match self.load(id, locale).await {
            Some(recipe) => {
                self.cache.insert(locale, recipe.clone()).await;
                Ok(Some(recipe))
            }
            None => Ok(self.unsaved.get(id, locale).await),
        }
    }

    async fn get_featured(&self) -> Result<Vec<Recipe>> {
        match self.store.recent(self.featured_limit).await {
            Ok(recipes) if !recipes.is_empty() => return Ok(recipes),
            Ok(_) => info!("Store is empty, generating featured recipes"),
            Err(e) => warn!("Featured read failed, generating instead: {}", e),
        }

        let generated = generate(
            self.provider.as_ref(),
            &self.normalizer,
            &self.featured_query,
        )
        .await?;
        Ok(self.persist(generated).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::CatalogProvider;
    use crate::store::MemoryStore;

    fn catalog_source(store: Arc<MemoryStore>) -> StoredSource {
        StoredSource::new(Box::new(CatalogProvider), store, &CatalogConfig::default())
    }

    #[tokio::test]
    async fn test_featured_warms_store() {
        let store = Arc::new(MemoryStore::new());
        let source = catalog_source(store.clone());

        let featured = source.get_featured().await.unwrap();
        assert_eq!(featured.len(), 6);
        assert_eq!(store.len().await, 6);
        let mut ids: Vec<RecipeId> = featured.iter().map(|r| r.id).collect();
        ids.sort();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);

        let again = source.get_featured().await.unwrap();
        assert_eq!(again.len(), 6);
        assert!(again.iter().all(|r| r.title_en.is_none()));
    }

    #[tokio::test]
    async fn test_stored_recipe_in_both_locales() {
        let store = Arc::new(MemoryStore::new());
        catalog_source(store.clone()).get_featured().await.unwrap();

        // Fresh source: nothing cached, everything comes from the store.
        let source = catalog_source(store);
        let english = source.get_by_id(1, Locale::En).await.unwrap().unwrap();
        let spanish = source.get_by_id(1, Locale::Es).await.unwrap().unwrap();
        assert_eq!(english.title, "Lemon Garlic Chicken");
        assert_eq!(spanish.title, "Pollo al Limón con Ajo");
        assert_eq!(english.ingredients.len(), spanish.ingredients.len());
    }

    #[tokio::test]
    async fn test_search_is_not_persisted_by_default() {
        let store = Arc::new(MemoryStore::new());
        let source = catalog_source(store.clone());

        let recipes = source.search("lentils").await.unwrap();
        assert_eq!(recipes.len(), 6);
        assert!(store.is_empty().await);
        assert!(source.cache().is_empty().await);

        let cached = source.get_by_id(recipes[4].id, Locale::Es).await.unwrap();
        assert_eq!(cached.unwrap().title, "Sopa de Lentejas");
    }

    #[tokio::test]
    async fn test_search_persisted_when_configured() {
        let store = Arc::new(MemoryStore::new());
        let catalog = CatalogConfig {
            persist_search_results: true,
            ..Default::default()
        };
        let source = StoredSource::new(Box::new(CatalogProvider), store.clone(), &catalog);

        let recipes = source.search("lentils").await.unwrap();
        assert_eq!(store.len().await, 6);
        assert_eq!(recipes[0].id, 1);
        assert_eq!(source.cache().len().await, 12);
    }
}
