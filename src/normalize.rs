use crate::model::{Ingredient, InstructionStep, Recipe, RecipeId};
use crate::partial::{PartialIngredient, PartialRecipe, PartialStep};
use chrono::Utc;
use log::debug;
use std::collections::HashSet;
use uuid::Uuid;

/// Image shown for recipes without a usable absolute image URL.
pub const FALLBACK_IMAGE_URL: &str =
    "https://images.unsplash.com/photo-1546069901-ba9599a7e63c?auto=format&fit=crop&w=800&q=80";

/// Synthesized ids are drawn from `1..=SYNTHETIC_ID_SPACE`.
const SYNTHETIC_ID_SPACE: u128 = 1_000_000_000_000;

/// Turns partial records into complete recipes.
///
/// Normalization is total: every field falls back to an empty, zero or fixed
/// value instead of failing the record. Records without title, ingredients or
/// steps still come out, and [`Recipe::is_degraded`] reports them.
#[derive(Debug, Clone)]
pub struct Normalizer {
    fallback_image_url: String,
}

impl Default for Normalizer {
    fn default() -> Self {
        Normalizer {
            fallback_image_url: FALLBACK_IMAGE_URL.to_string(),
        }
    }
}

impl Normalizer {
    pub fn new(fallback_image_url: impl Into<String>) -> Self {
        Normalizer {
            fallback_image_url: fallback_image_url.into(),
        }
    }

    pub fn normalize(&self, partial: PartialRecipe) -> Recipe {
        let now = Utc::now().timestamp_millis();
        let id = partial
            .id
            .as_deref()
            .and_then(coerce_id)
            .unwrap_or_else(synthesize_id);
        let created_at = partial.created_at.unwrap_or(now);

        let recipe = Recipe {
            id,
            title: partial
                .title
                .or_else(|| partial.title_en.clone())
                .unwrap_or_default(),
            title_en: partial.title_en,
            description: partial
                .description
                .or_else(|| partial.description_en.clone())
                .unwrap_or_default(),
            description_en: partial.description_en,
            original_url: partial.original_url.unwrap_or_default(),
            image_url: partial
                .image_url
                .filter(|url| is_absolute_url(url))
                .unwrap_or_else(|| self.fallback_image_url.clone()),
            prep_time: partial.prep_time.unwrap_or_default(),
            cook_time: partial.cook_time.unwrap_or_default(),
            servings: partial.servings.unwrap_or(0),
            cost_estimate: partial.cost_estimate,
            ingredients: partial
                .ingredients
                .unwrap_or_default()
                .into_iter()
                .filter_map(normalize_ingredient)
                .collect(),
            instructions: partial
                .instructions
                .unwrap_or_default()
                .into_iter()
                .filter_map(normalize_step)
                .collect(),
            nutrition: partial.nutrition.filter(|n| !n.is_empty()),
            tags: dedupe(partial.tags.unwrap_or_default()),
            rating: partial.rating.unwrap_or(0.0),
            rating_count: partial.rating_count.unwrap_or(0),
            view_count: partial.view_count.unwrap_or(0),
            created_at,
            updated_at: partial.updated_at.unwrap_or(created_at),
        };

        if recipe.is_degraded() {
            debug!("Recipe {} is missing title, ingredients or steps", recipe.id);
        }
        recipe
    }

    pub fn normalize_all(&self, partials: Vec<PartialRecipe>) -> Vec<Recipe> {
        partials
            .into_iter()
            .map(|partial| self.normalize(partial))
            .collect()
    }
}

/// Normalize with the default fallback image.
pub fn normalize(partial: PartialRecipe) -> Recipe {
    Normalizer::default().normalize(partial)
}

/// Only URLs with an `http` scheme prefix are considered absolute.
pub fn is_absolute_url(url: &str) -> bool {
    url.starts_with("http")
}

fn coerce_id(raw: &str) -> Option<RecipeId> {
    raw.trim().parse::<RecipeId>().ok().filter(|id| *id != 0)
}

/// Random id for a record that arrived without one.
///
/// Not globally unique and never used as a persistence key.
fn synthesize_id() -> RecipeId {
    let value = Uuid::new_v4().as_u128() % SYNTHETIC_ID_SPACE + 1;
    value as RecipeId
}

fn normalize_ingredient(partial: PartialIngredient) -> Option<Ingredient> {
    if partial.item.is_none() && partial.item_en.is_none() && partial.quantity.is_none() {
        return None;
    }
    Some(Ingredient {
        item: partial
            .item
            .or_else(|| partial.item_en.clone())
            .unwrap_or_default(),
        item_en: partial.item_en,
        quantity: partial.quantity.unwrap_or_default(),
    })
}

fn normalize_step(partial: PartialStep) -> Option<InstructionStep> {
    let description = partial
        .description
        .or_else(|| partial.description_en.clone())?;
    Some(InstructionStep {
        description,
        description_en: partial.description_en,
    })
}

fn dedupe(tags: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    tags.into_iter()
        .filter(|tag| seen.insert(tag.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Nutrition;

    #[test]
    fn test_empty_partial_is_total() {
        let recipe = normalize(PartialRecipe::default());
        assert_ne!(recipe.id, 0);
        assert_eq!(recipe.title, "");
        assert!(recipe.ingredients.is_empty());
        assert!(recipe.instructions.is_empty());
        assert_eq!(recipe.servings, 0);
        assert_eq!(recipe.image_url, FALLBACK_IMAGE_URL);
        assert_eq!(recipe.created_at, recipe.updated_at);
        assert!(recipe.created_at > 0);
        assert!(recipe.is_degraded());
    }

    #[test]
    fn test_image_url_validation() {
        let relative = normalize(PartialRecipe {
            image_url: Some("/images/tacos.jpg".to_string()),
            ..Default::default()
        });
        assert_eq!(relative.image_url, FALLBACK_IMAGE_URL);

        let absolute = normalize(PartialRecipe {
            image_url: Some("https://cdn.example.com/tacos.jpg".to_string()),
            ..Default::default()
        });
        assert_eq!(absolute.image_url, "https://cdn.example.com/tacos.jpg");

        let custom = Normalizer::new("https://example.com/placeholder.png")
            .normalize(PartialRecipe::default());
        assert_eq!(custom.image_url, "https://example.com/placeholder.png");
    }

    #[test]
    fn test_id_coercion() {
        let numeric = normalize(PartialRecipe {
            id: Some("99".to_string()),
            ..Default::default()
        });
        assert_eq!(numeric.id, 99);

        for unusable in ["0", "k3j9x2ab1", "-5"] {
            let recipe = normalize(PartialRecipe {
                id: Some(unusable.to_string()),
                ..Default::default()
            });
            assert_ne!(recipe.id, 0);
            assert!(recipe.id as u128 <= SYNTHETIC_ID_SPACE);
        }
    }

    #[test]
    fn test_english_text_fills_missing_spanish() {
        let recipe = normalize(PartialRecipe {
            title_en: Some("Lentil Soup".to_string()),
            description_en: Some("Comforting".to_string()),
            ingredients: Some(vec![PartialIngredient {
                item: None,
                item_en: Some("Dry lentils".to_string()),
                quantity: Some("1 cup".to_string()),
            }]),
            instructions: Some(vec![PartialStep {
                description: None,
                description_en: Some("Simmer".to_string()),
            }]),
            ..Default::default()
        });
        assert_eq!(recipe.title, "Lentil Soup");
        assert_eq!(recipe.description, "Comforting");
        assert_eq!(recipe.ingredients[0].item, "Dry lentils");
        assert_eq!(recipe.instructions[0].description, "Simmer");
        assert!(!recipe.is_degraded());
    }

    #[test]
    fn test_blank_entries_dropped_order_kept() {
        let recipe = normalize(PartialRecipe {
            ingredients: Some(vec![
                PartialIngredient {
                    item: Some("Arroz".to_string()),
                    ..Default::default()
                },
                PartialIngredient::default(),
                PartialIngredient {
                    quantity: Some("2".to_string()),
                    ..Default::default()
                },
            ]),
            instructions: Some(vec![
                PartialStep {
                    description: Some("Uno".to_string()),
                    ..Default::default()
                },
                PartialStep::default(),
                PartialStep {
                    description: Some("Dos".to_string()),
                    ..Default::default()
                },
            ]),
            ..Default::default()
        });
        assert_eq!(recipe.ingredients.len(), 2);
        assert_eq!(recipe.ingredients[0].item, "Arroz");
        assert_eq!(recipe.ingredients[1].quantity, "2");
        let steps: Vec<_> = recipe.instructions.iter().map(|s| s.description.as_str()).collect();
        assert_eq!(steps, vec!["Uno", "Dos"]);
    }

    #[test]
    fn test_tags_deduped_in_order() {
        let recipe = normalize(PartialRecipe {
            tags: Some(vec![
                "Cena".to_string(),
                "Pollo".to_string(),
                "Cena".to_string(),
                "Rápido".to_string(),
            ]),
            ..Default::default()
        });
        assert_eq!(recipe.tags, vec!["Cena", "Pollo", "Rápido"]);
    }

    #[test]
    fn test_timestamps_and_metadata_kept() {
        let recipe = normalize(PartialRecipe {
            created_at: Some(1_000),
            rating: Some(4.5),
            rating_count: Some(10),
            nutrition: Some(Nutrition::default()),
            ..Default::default()
        });
        assert_eq!(recipe.created_at, 1_000);
        assert_eq!(recipe.updated_at, 1_000);
        assert_eq!(recipe.rating, 4.5);
        assert_eq!(recipe.rating_count, 10);
        assert!(recipe.nutrition.is_none());
    }
}
