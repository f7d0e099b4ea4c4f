use crate::model::{Ingredient, InstructionStep, Recipe};
use log::debug;
use serde::{Deserialize, Serialize};

/// Locale-specific text to lay over a canonical recipe.
///
/// Recipe-level fields replace the canonical value only when present.
/// Ingredient and step entries are matched by position, never by content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationOverlay {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<IngredientTranslation>,
    #[serde(default)]
    pub instructions: Vec<StepTranslation>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientTranslation {
    pub ingredient_index: usize,
    pub item: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepTranslation {
    pub step_index: usize,
    pub description: String,
}

impl TranslationOverlay {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.ingredients.is_empty()
            && self.instructions.is_empty()
    }
}

/// Lay `overlay` over `canonical`, returning the localized recipe.
///
/// Absent or blank overlay values inherit the canonical text. Entries pointing
/// past the end of the canonical ingredients or steps are ignored, so the
/// result always has the canonical lengths.
pub fn merge(canonical: &Recipe, overlay: &TranslationOverlay) -> Recipe {
    let mut ingredients = canonical.ingredients.clone();
    for translation in &overlay.ingredients {
        match ingredients.get_mut(translation.ingredient_index) {
            Some(ingredient) if !translation.item.trim().is_empty() => {
                ingredient.item = translation.item.clone();
            }
            Some(_) => {}
            None => debug!(
                "Ignoring ingredient translation {} for recipe {} ({} ingredients)",
                translation.ingredient_index,
                canonical.id,
                canonical.ingredients.len()
            ),
        }
    }

    let mut instructions = canonical.instructions.clone();
    for translation in &overlay.instructions {
        match instructions.get_mut(translation.step_index) {
            Some(step) if !translation.description.trim().is_empty() => {
                step.description = translation.description.clone();
            }
            Some(_) => {}
            None => debug!(
                "Ignoring step translation {} for recipe {} ({} steps)",
                translation.step_index,
                canonical.id,
                canonical.instructions.len()
            ),
        }
    }

    Recipe {
        title: present(&overlay.title).unwrap_or_else(|| canonical.title.clone()),
        description: present(&overlay.description)
            .unwrap_or_else(|| canonical.description.clone()),
        ingredients,
        instructions,
        ..canonical.clone()
    }
}

/// Split a bilingual generated recipe into the English canonical record the
/// store keeps and the Spanish overlay that restores the original text.
pub fn split_for_storage(recipe: &Recipe) -> (Recipe, TranslationOverlay) {
    let english = recipe.localized(crate::locale::Locale::En);

    let overlay = TranslationOverlay {
        title: differs(&recipe.title, &english.title),
        description: differs(&recipe.description, &english.description),
        ingredients: recipe
            .ingredients
            .iter()
            .zip(&english.ingredients)
            .enumerate()
            .filter(|(_, (spanish, english))| spanish.item != english.item)
            .map(|(index, (spanish, _))| IngredientTranslation {
                ingredient_index: index,
                item: spanish.item.clone(),
            })
            .collect(),
        instructions: recipe
            .instructions
            .iter()
            .zip(&english.instructions)
            .enumerate()
            .filter(|(_, (spanish, english))| spanish.description != english.description)
            .map(|(index, (spanish, _))| StepTranslation {
                step_index: index,
                description: spanish.description.clone(),
            })
            .collect(),
    };

    let canonical = Recipe {
        title_en: None,
        description_en: None,
        ingredients: english
            .ingredients
            .into_iter()
            .map(|ingredient| Ingredient {
                item_en: None,
                ..ingredient
            })
            .collect(),
        instructions: english
            .instructions
            .into_iter()
            .map(|step| InstructionStep {
                description_en: None,
                ..step
            })
            .collect(),
        ..english
    };

    (canonical, overlay)
}

fn present(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .filter(|text| !text.trim().is_empty())
        .map(String::from)
}

fn differs(original: &str, english: &str) -> Option<String> {
    (original != english).then(|| original.to_string())
}
