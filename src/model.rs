use crate::locale::Locale;
use serde::{Deserialize, Serialize};

/// Identifier of a recipe. `0` is reserved as the "no such recipe" sentinel.
pub type RecipeId = u64;

/// A complete, validated recipe.
///
/// Built either by [`crate::normalize::normalize`] from a generated partial
/// record or by a [`crate::store::RecipeStore`] from persisted rows. Values are
/// never mutated in place; localisation produces a new recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: RecipeId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_en: Option<String>,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_en: Option<String>,
    pub original_url: String,
    pub image_url: String,
    pub prep_time: String,
    pub cook_time: String,
    pub servings: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_estimate: Option<String>,
    pub ingredients: Vec<Ingredient>,
    pub instructions: Vec<InstructionStep>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nutrition: Option<Nutrition>,
    pub tags: Vec<String>,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub rating_count: u32,
    #[serde(default)]
    pub view_count: u64,
    /// Epoch milliseconds
    pub created_at: i64,
    /// Epoch milliseconds
    pub updated_at: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    pub item: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_en: Option<String>,
    pub quantity: String,
}

/// One preparation step; its position in [`Recipe::instructions`] is its step number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstructionStep {
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_en: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Nutrition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calories: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protein: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carbs: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fat: Option<String>,
}

impl Nutrition {
    pub fn is_empty(&self) -> bool {
        self.calories.is_none() && self.protein.is_none() && self.carbs.is_none() && self.fat.is_none()
    }
}

/// Number of tags shown on a recipe card.
pub const CARD_TAG_COUNT: usize = 3;

impl Recipe {
    /// A recipe missing its title, ingredients or steps is still shown, but as degraded.
    pub fn is_degraded(&self) -> bool {
        self.title.trim().is_empty() || self.ingredients.is_empty() || self.instructions.is_empty()
    }

    /// Tags displayed on a recipe card, in display order.
    pub fn card_tags(&self) -> &[String] {
        let end = self.tags.len().min(CARD_TAG_COUNT);
        &self.tags[..end]
    }

    /// Leading amount of the cost estimate, e.g. `$6.50` for `$6.50 total`.
    pub fn cost_badge(&self) -> Option<&str> {
        self.cost_estimate
            .as_deref()
            .and_then(|cost| cost.split_whitespace().next())
    }

    /// Steps paired with their 1-based step number.
    pub fn numbered_steps(&self) -> impl Iterator<Item = (usize, &InstructionStep)> {
        self.instructions
            .iter()
            .enumerate()
            .map(|(index, step)| (index + 1, step))
    }

    /// Select the text of a bilingual (generated) recipe for `locale`.
    ///
    /// For English every primary text field takes its `*En` counterpart when one
    /// is present; Spanish is the natural language of generated recipes, so the
    /// recipe is returned as is.
    pub fn localized(&self, locale: Locale) -> Recipe {
        match locale {
            Locale::Es => self.clone(),
            Locale::En => Recipe {
                title: prefer(&self.title_en, &self.title),
                description: prefer(&self.description_en, &self.description),
                ingredients: self
                    .ingredients
                    .iter()
                    .map(|ingredient| Ingredient {
                        item: prefer(&ingredient.item_en, &ingredient.item),
                        ..ingredient.clone()
                    })
                    .collect(),
                instructions: self
                    .instructions
                    .iter()
                    .map(|step| InstructionStep {
                        description: prefer(&step.description_en, &step.description),
                        ..step.clone()
                    })
                    .collect(),
                ..self.clone()
            },
        }
    }

    /// Text read aloud by the recipe page, in display order.
    pub fn narration(&self, locale: Locale) -> String {
        let (ingredients_label, of, steps_label, step) = match locale {
            Locale::Es => ("Ingredientes", "de", "Instrucciones", "Paso"),
            Locale::En => ("Ingredients", "of", "Instructions", "Step"),
        };

        let mut text = format!("{}. {}. ", self.title, self.description);
        text.push_str(&format!("{}: ", ingredients_label));
        for ingredient in &self.ingredients {
            text.push_str(&format!("{} {} {}. ", ingredient.quantity, of, ingredient.item));
        }
        text.push_str(&format!("{}: ", steps_label));
        for (number, instruction) in self.numbered_steps() {
            text.push_str(&format!("{} {}: {}. ", step, number, instruction.description));
        }
        text.trim_end().to_string()
    }
}

fn prefer(translated: &Option<String>, fallback: &str) -> String {
    match translated.as_deref().map(str::trim) {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => fallback.to_string(),
    }
}
