//! Best-effort extraction of recipe records from generated text.
//!
//! The backend is asked for a bare JSON array but is free to wrap it in code
//! fences or prose. This is a lossy text transform, not a JSON tokenizer: after
//! dropping fence markers it keeps everything from the first `[` to the last
//! `]`. Text where prose itself contains brackets around the array will not
//! parse, and that is accepted.

use crate::error::{RecipeError, Result};
use crate::partial::PartialRecipe;
use log::{debug, warn};
use serde_json::Value;

const FENCE_MARKERS: [&str; 3] = ["```json", "```JSON", "```"];

/// Parse generated text into partial records, degrading to an empty list.
///
/// Failures are logged and never surfaced: a search with an unreadable
/// response simply has no results.
pub fn parse(raw: &str) -> Vec<PartialRecipe> {
    match try_parse(raw) {
        Ok(records) => records,
        Err(e) => {
            warn!("{}", e);
            Vec::new()
        }
    }
}

/// Parse generated text into partial records.
///
/// Only JSON syntax is enforced. Non-object array entries are skipped; missing
/// fields are expected. A lone object is read as a one-element list.
pub fn try_parse(raw: &str) -> Result<Vec<PartialRecipe>> {
    let candidate = extract_json_array(raw);
    if candidate.is_empty() {
        return Err(RecipeError::MalformedResponse("empty response".to_string()));
    }

    let value: Value = serde_json::from_str(&candidate).map_err(|e| {
        RecipeError::MalformedResponse(format!("{} - response was: {}", e, preview(raw)))
    })?;

    let entries = match value {
        Value::Array(entries) => entries,
        object @ Value::Object(_) => {
            debug!("Backend returned a single object instead of an array");
            vec![object]
        }
        other => {
            return Err(RecipeError::MalformedResponse(format!(
                "expected a JSON array, got: {}",
                preview(&other.to_string())
            )))
        }
    };

    let total = entries.len();
    let records: Vec<PartialRecipe> = entries
        .iter()
        .filter_map(|entry| match entry {
            Value::Object(object) => Some(PartialRecipe::from_json(object)),
            other => {
                debug!("Skipping non-object entry: {}", other);
                None
            }
        })
        .collect();

    debug!("Parsed {} of {} entries as recipes", records.len(), total);
    Ok(records)
}

/// Strip fence markers and slice from the first `[` to the last `]`.
///
/// Without a bracket pair the trimmed text is returned whole.
pub fn extract_json_array(raw: &str) -> String {
    let mut text = raw.to_string();
    for marker in FENCE_MARKERS {
        text = text.replace(marker, "");
    }
    let text = text.trim();

    match (text.find('['), text.rfind(']')) {
        (Some(start), Some(end)) if start < end => text[start..=end].to_string(),
        _ => {
            debug!("No JSON array brackets found, parsing text as is");
            text.to_string()
        }
    }
}

fn preview(text: &str) -> String {
    const LIMIT: usize = 200;
    match text.char_indices().nth(LIMIT) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fenced_array() {
        let records = parse("```json\n[{\"title\":\"Tacos\"}]\n```");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title.as_deref(), Some("Tacos"));
    }

    #[test]
    fn test_extract_with_prose() {
        assert_eq!(
            extract_json_array("Sure! Here you go:\n[1, 2]\nEnjoy."),
            "[1, 2]"
        );
        assert_eq!(extract_json_array("  {\"a\": 1}  "), "{\"a\": 1}");
        assert_eq!(extract_json_array("] backwards ["), "] backwards [");
    }

    #[test]
    fn test_invalid_json_is_empty() {
        assert!(parse("I could not find any recipes, sorry.").is_empty());
        assert!(matches!(
            try_parse("not json"),
            Err(RecipeError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_empty_response() {
        assert!(matches!(
            try_parse("```json\n```"),
            Err(RecipeError::MalformedResponse(_))
        ));
        assert!(parse("").is_empty());
    }

    #[test]
    fn test_scalar_json_is_malformed() {
        assert!(matches!(try_parse("42"), Err(RecipeError::MalformedResponse(_))));
    }

    #[test]
    fn test_single_object() {
        let records = try_parse(r#"{"title": "Sopa"}"#).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title.as_deref(), Some("Sopa"));
    }

    #[test]
    fn test_skips_non_objects() {
        let records = try_parse(r#"[{"title": "A"}, "B", 3, null, {"title": "C"}]"#).unwrap();
        let titles: Vec<_> = records.iter().filter_map(|r| r.title.as_deref()).collect();
        assert_eq!(titles, vec!["A", "C"]);
    }

    #[test]
    fn test_preview_is_char_safe() {
        let long = "ñ".repeat(500);
        let shown = preview(&long);
        assert!(shown.ends_with("..."));
        assert_eq!(shown.chars().count(), 203);
    }
}
