//! Conversion between a recipe and the path segment used to link to it.
//!
//! A slug is `<title-token>-<id>`. The title token is cosmetic: it is built so
//! that it never contains a trailing separator, which leaves the final
//! `-`-delimited segment as the only authoritative part.

use crate::error::{RecipeError, Result};
use crate::locale::Locale;
use crate::model::{Recipe, RecipeId};

pub const SEPARATOR: char = '-';

/// Id returned by [`id_from_slug`] when a slug carries no usable id.
pub const NOT_FOUND_ID: RecipeId = 0;

const EMPTY_TITLE_TOKEN: &str = "recipe";

/// Build the slug for `recipe` from its title and id.
pub fn encode(recipe: &Recipe) -> String {
    format!("{}{}{}", slugify_title(&recipe.title), SEPARATOR, recipe.id)
}

/// Recover the id from the last segment of `slug`.
pub fn decode(slug: &str) -> Result<RecipeId> {
    let trimmed = slug.trim().trim_matches('/');
    let segment = trimmed.rsplit(SEPARATOR).next().unwrap_or_default();

    match segment.parse::<RecipeId>() {
        Ok(id) if id != NOT_FOUND_ID => Ok(id),
        _ => Err(RecipeError::InvalidSlug(slug.to_string())),
    }
}

/// Like [`decode`], but maps an unusable slug to [`NOT_FOUND_ID`] so callers
/// can treat it as an ordinary "not found".
pub fn id_from_slug(slug: &str) -> RecipeId {
    decode(slug).unwrap_or(NOT_FOUND_ID)
}

/// Site path of a recipe page, e.g. `/es/recipes/sopa-de-lentejas-7`.
pub fn recipe_path(locale: Locale, recipe: &Recipe) -> String {
    format!("/{}/recipes/{}", locale, encode(recipe))
}

/// Lowercase ASCII token for a title.
///
/// Accented Latin letters are folded to their base letter, whitespace, `-` and
/// `_` runs become a single separator, everything else is dropped.
pub fn slugify_title(title: &str) -> String {
    let mut token = String::with_capacity(title.len());
    let mut pending_separator = false;

    for c in title.chars().flat_map(char::to_lowercase).map(fold_accent) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_separator && !token.is_empty() {
                token.push(SEPARATOR);
            }
            pending_separator = false;
            token.push(c);
        } else if c.is_whitespace() || c == SEPARATOR || c == '_' {
            pending_separator = true;
        }
    }

    if token.is_empty() {
        EMPTY_TITLE_TOKEN.to_string()
    } else {
        token
    }
}

fn fold_accent(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ä' | 'ã' | 'å' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'ö' | 'õ' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ñ' => 'n',
        'ç' => 'c',
        other => other,
    }
}
