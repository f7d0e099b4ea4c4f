//! The persistent recipe store seam.
//!
//! The core depends on four query shapes only: a bounded page of recent
//! recipes, a single recipe by id, the translation rows of one recipe for one
//! locale, and a batch insert of recipes with their child rows. Recipes come
//! back in [`Locale::CANONICAL`]; translations are merged by the caller.

mod memory;

pub use memory::MemoryStore;

use crate::error::Result;
use crate::locale::Locale;
use crate::model::{Recipe, RecipeId};
use crate::translation::{split_for_storage, TranslationOverlay};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[async_trait]
pub trait RecipeStore: Send + Sync {
    /// Get the store name, for logs
    fn store_name(&self) -> &str;

    /// Most recent recipes first, at most `limit`, with ingredients, steps and nutrition
    async fn recent(&self, limit: usize) -> Result<Vec<Recipe>>;

    /// One recipe with ingredients, steps and nutrition
    async fn find_by_id(&self, id: RecipeId) -> Result<Option<Recipe>>;

    /// Translation rows of a recipe for `locale`; empty when there are none
    async fn translations(&self, id: RecipeId, locale: Locale) -> Result<TranslationOverlay>;

    /// Insert recipes with their child rows, one outcome per input row.
    ///
    /// Ids carried by the input are ignored; the store assigns its own and
    /// returns them. A failing row never prevents the others from being stored.
    async fn insert_batch(&self, recipes: &[NewRecipe]) -> Vec<Result<RecipeId>>;
}

/// A recipe ready to be persisted: the canonical record and its translations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewRecipe {
    pub recipe: Recipe,
    pub translations: Vec<LocalizedOverlay>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalizedOverlay {
    pub locale: Locale,
    pub overlay: TranslationOverlay,
}

impl NewRecipe {
    /// Prepare a bilingual generated recipe: English canonical text plus a
    /// Spanish overlay holding the original text.
    pub fn from_generated(recipe: &Recipe) -> Self {
        let (canonical, overlay) = split_for_storage(recipe);
        let translations = if overlay.is_empty() {
            Vec::new()
        } else {
            vec![LocalizedOverlay {
                locale: Locale::Es,
                overlay,
            }]
        };
        NewRecipe {
            recipe: canonical,
            translations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::tests::sample_recipe;

    #[test]
    fn test_from_generated() {
        let new = NewRecipe::from_generated(&sample_recipe());
        assert_eq!(new.recipe.title, "Lemon Garlic Chicken");
        assert_eq!(new.translations.len(), 1);
        assert_eq!(new.translations[0].locale, Locale::Es);
        assert_eq!(
            new.translations[0].overlay.title.as_deref(),
            Some("Pollo al Limón con Ajo")
        );
    }

    #[test]
    fn test_from_generated_without_english() {
        let spanish_only = Recipe {
            title_en: None,
            description_en: None,
            ingredients: Vec::new(),
            instructions: Vec::new(),
            ..sample_recipe()
        };
        let new = NewRecipe::from_generated(&spanish_only);
        assert_eq!(new.recipe.title, "Pollo al Limón con Ajo");
        assert!(new.translations.is_empty());
    }
}
