use crate::model::Nutrition;
use chrono::DateTime;
use serde_json::{Map, Value};

/// A recipe-shaped record as produced by the generative backend.
///
/// Every field is optional and nothing here is validated beyond its JSON type;
/// [`crate::normalize::normalize`] is the only way to turn one into a
/// [`crate::model::Recipe`]. Empty strings are read as absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartialRecipe {
    /// Raw id as text, whatever JSON type it arrived as
    pub id: Option<String>,
    pub title: Option<String>,
    pub title_en: Option<String>,
    pub description: Option<String>,
    pub description_en: Option<String>,
    pub original_url: Option<String>,
    pub image_url: Option<String>,
    pub prep_time: Option<String>,
    pub cook_time: Option<String>,
    pub servings: Option<u32>,
    pub cost_estimate: Option<String>,
    pub tags: Option<Vec<String>>,
    pub ingredients: Option<Vec<PartialIngredient>>,
    pub instructions: Option<Vec<PartialStep>>,
    pub nutrition: Option<Nutrition>,
    pub rating: Option<f64>,
    pub rating_count: Option<u32>,
    pub view_count: Option<u64>,
    /// Epoch milliseconds
    pub created_at: Option<i64>,
    /// Epoch milliseconds
    pub updated_at: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartialIngredient {
    pub item: Option<String>,
    pub item_en: Option<String>,
    pub quantity: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartialStep {
    pub description: Option<String>,
    pub description_en: Option<String>,
}

impl PartialRecipe {
    /// Read a partial record from a JSON object.
    ///
    /// Keys are accepted in camelCase (the backend's shape) or snake_case.
    /// Values of an unexpected type are treated as absent rather than as an error.
    pub fn from_json(object: &Map<String, Value>) -> Self {
        PartialRecipe {
            id: field(object, "id", "id").and_then(text),
            title: field(object, "title", "title").and_then(text),
            title_en: field(object, "titleEn", "title_en").and_then(text),
            description: field(object, "description", "description").and_then(text),
            description_en: field(object, "descriptionEn", "description_en").and_then(text),
            original_url: field(object, "originalUrl", "original_url").and_then(text),
            image_url: field(object, "imageUrl", "image_url").and_then(text),
            prep_time: field(object, "prepTime", "prep_time").and_then(text),
            cook_time: field(object, "cookTime", "cook_time").and_then(text),
            servings: field(object, "servings", "servings").and_then(count),
            cost_estimate: field(object, "costEstimate", "cost_estimate").and_then(text),
            tags: field(object, "tags", "tags").and_then(tags),
            ingredients: field(object, "ingredients", "ingredients").and_then(ingredients),
            instructions: field(object, "instructions", "instructions").and_then(steps),
            nutrition: field(object, "nutrition", "nutrition").and_then(nutrition),
            rating: field(object, "rating", "rating").and_then(number),
            rating_count: field(object, "ratingCount", "rating_count").and_then(count),
            view_count: field(object, "viewCount", "view_count")
                .and_then(count)
                .map(u64::from),
            created_at: field(object, "createdAt", "created_at").and_then(timestamp),
            updated_at: field(object, "updatedAt", "updated_at").and_then(timestamp),
        }
    }
}

fn field<'a>(object: &'a Map<String, Value>, camel: &str, snake: &str) -> Option<&'a Value> {
    object
        .get(camel)
        .or_else(|| object.get(snake))
        .filter(|value| !value.is_null())
}

/// Non-empty trimmed text; numbers are accepted and rendered as text.
fn text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}

fn number(value: &Value) -> Option<f64> {
    let parsed: Option<f64> = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    parsed.filter(|n| n.is_finite())
}

/// Non-negative whole number; strings such as `"4 servings"` yield their leading digits.
fn count(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f.round() as u64))
            .and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => {
            let digits: String = s.trim().chars().take_while(char::is_ascii_digit).collect();
            digits.parse().ok()
        }
        _ => None,
    }
}

/// Epoch milliseconds from a number or an RFC 3339 string.
fn timestamp(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => DateTime::parse_from_rfc3339(s.trim())
            .ok()
            .map(|dt| dt.timestamp_millis()),
        _ => None,
    }
}

fn tags(value: &Value) -> Option<Vec<String>> {
    match value {
        Value::Array(items) => Some(items.iter().filter_map(text).collect()),
        // "Cena, Pollo" style
        Value::String(s) => Some(
            s.split(',')
                .map(str::trim)
                .filter(|tag| !tag.is_empty())
                .map(String::from)
                .collect(),
        ),
        _ => None,
    }
}

fn ingredients(value: &Value) -> Option<Vec<PartialIngredient>> {
    let items = value.as_array()?;
    Some(
        items
            .iter()
            .filter_map(|item| match item {
                Value::Object(object) => Some(PartialIngredient {
                    item: field(object, "item", "item")
                        .or_else(|| field(object, "name", "name"))
                        .and_then(text),
                    item_en: field(object, "itemEn", "item_en").and_then(text),
                    quantity: field(object, "quantity", "quantity").and_then(text),
                }),
                Value::String(_) => Some(PartialIngredient {
                    item: text(item),
                    ..Default::default()
                }),
                _ => None,
            })
            .collect(),
    )
}

fn steps(value: &Value) -> Option<Vec<PartialStep>> {
    let items = value.as_array()?;
    Some(
        items
            .iter()
            .filter_map(|step| match step {
                Value::Object(object) => Some(PartialStep {
                    description: field(object, "description", "description")
                        .or_else(|| field(object, "text", "text"))
                        .and_then(text),
                    description_en: field(object, "descriptionEn", "description_en")
                        .and_then(text),
                }),
                Value::String(_) => Some(PartialStep {
                    description: text(step),
                    description_en: None,
                }),
                _ => None,
            })
            .collect(),
    )
}

fn nutrition(value: &Value) -> Option<Nutrition> {
    let object = value.as_object()?;
    let nutrition = Nutrition {
        calories: field(object, "calories", "calories").and_then(text),
        protein: field(object, "protein", "protein").and_then(text),
        carbs: field(object, "carbs", "carbs").and_then(text),
        fat: field(object, "fat", "fat").and_then(text),
    };
    (!nutrition.is_empty()).then_some(nutrition)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn partial(value: Value) -> PartialRecipe {
        PartialRecipe::from_json(value.as_object().unwrap())
    }

    #[test]
    fn test_full_backend_shape() {
        let record = partial(json!({
            "title": "Tacos de Frijoles Negros",
            "titleEn": "Black Bean Tacos",
            "description": "Tacos vegetarianos",
            "descriptionEn": "Vegetarian tacos",
            "originalUrl": "https://www.budgetbytes.com/black-bean-tacos/",
            "imageUrl": "https://images.example.com/tacos.jpg",
            "prepTime": "10 mins",
            "cookTime": "15 mins",
            "servings": 6,
            "costEstimate": "$4.80 total",
            "tags": ["Mexicano", "Vegetariano"],
            "ingredients": [{"item": "Tortillas", "itemEn": "Tortillas", "quantity": "12"}],
            "instructions": [{"stepNumber": 1, "description": "Calentar", "descriptionEn": "Warm"}],
            "nutrition": {"calories": "240", "protein": "10g", "carbs": "38g", "fat": "6g"}
        }));

        assert_eq!(record.title.as_deref(), Some("Tacos de Frijoles Negros"));
        assert_eq!(record.title_en.as_deref(), Some("Black Bean Tacos"));
        assert_eq!(record.servings, Some(6));
        assert_eq!(record.tags.as_ref().unwrap().len(), 2);
        let ingredients = record.ingredients.unwrap();
        assert_eq!(ingredients[0].quantity.as_deref(), Some("12"));
        let steps = record.instructions.unwrap();
        assert_eq!(steps[0].description_en.as_deref(), Some("Warm"));
        assert_eq!(record.nutrition.unwrap().fat.as_deref(), Some("6g"));
        assert!(record.id.is_none());
    }

    #[test]
    fn test_empty_object() {
        assert_eq!(partial(json!({})), PartialRecipe::default());
    }

    #[test]
    fn test_wrong_types_are_absent() {
        let record = partial(json!({
            "title": ["not", "text"],
            "servings": {"count": 4},
            "ingredients": "flour and eggs",
            "nutrition": [],
            "createdAt": true
        }));
        assert!(record.title.is_none());
        assert!(record.servings.is_none());
        assert!(record.ingredients.is_none());
        assert!(record.nutrition.is_none());
        assert!(record.created_at.is_none());
    }

    #[test]
    fn test_lenient_values() {
        let record = partial(json!({
            "id": 17,
            "title": "   ",
            "servings": "4 servings",
            "tags": "Cena, Pollo, ",
            "ingredients": ["2 eggs", {"name": "flour"}, 3],
            "instructions": ["Mix", {"text": "Bake"}],
            "created_at": "2024-03-01T12:00:00Z",
            "rating": "4.5",
            "viewCount": 12
        }));
        assert_eq!(record.id.as_deref(), Some("17"));
        assert!(record.title.is_none());
        assert_eq!(record.servings, Some(4));
        assert_eq!(record.tags.unwrap(), vec!["Cena", "Pollo"]);
        let ingredients = record.ingredients.unwrap();
        assert_eq!(ingredients.len(), 2);
        assert_eq!(ingredients[1].item.as_deref(), Some("flour"));
        let steps = record.instructions.unwrap();
        assert_eq!(steps[1].description.as_deref(), Some("Bake"));
        assert_eq!(record.created_at, Some(1_709_294_400_000));
        assert_eq!(record.rating, Some(4.5));
        assert_eq!(record.view_count, Some(12));
    }

    #[test]
    fn test_negative_and_fractional_counts() {
        assert_eq!(partial(json!({"servings": -3})).servings, None);
        assert_eq!(partial(json!({"servings": 2.6})).servings, Some(3));
    }
}
