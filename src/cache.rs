use crate::locale::Locale;
use crate::model::{Recipe, RecipeId};
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Process-wide memo of recipes already shown, keyed by id and locale.
///
/// Entries never expire and are never refreshed; the cache is a shortcut in
/// front of the real sources, not a source of truth. Concurrent misses for the
/// same key may both write, and the last write wins.
#[derive(Debug, Default)]
pub struct RecipeCache {
    entries: RwLock<HashMap<(RecipeId, Locale), Recipe>>,
}

impl RecipeCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, id: RecipeId, locale: Locale) -> Option<Recipe> {
        self.entries.read().await.get(&(id, locale)).cloned()
    }

    pub async fn insert(&self, locale: Locale, recipe: Recipe) {
        self.entries.write().await.insert((recipe.id, locale), recipe);
    }

    /// Remember a bilingual recipe under every locale it can be shown in.
    pub async fn insert_bilingual(&self, recipe: &Recipe) {
        let mut entries = self.entries.write().await;
        for locale in Locale::ALL {
            entries.insert((recipe.id, locale), recipe.localized(locale));
        }
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}
