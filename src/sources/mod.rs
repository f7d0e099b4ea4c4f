//! Interchangeable recipe sources.
//!
//! [`GeneratedSource`] answers everything from the generative backend and
//! remembers what it has shown; [`StoredSource`] puts the persistent store in
//! front of the backend and overlays translations. Which one serves a process
//! is decided once, by [`crate::RecipeService::builder`].

mod generated;
mod stored;

pub use generated::GeneratedSource;
pub use stored::StoredSource;

use crate::error::{RecipeError, Result};
use crate::locale::Locale;
use crate::model::{Recipe, RecipeId};
use crate::normalize::Normalizer;
use crate::parser;
use crate::providers::{build_search_prompt, LlmProvider, SYSTEM_PROMPT};
use async_trait::async_trait;
use log::{debug, info};

#[async_trait]
pub trait RecipeSource: Send + Sync {
    /// Get the source name, for logs
    fn source_name(&self) -> &str;

    /// Recipes matching `query`, possibly none.
    ///
    /// Unreadable backend output yields an empty list; only a failed backend
    /// call is an error ([`RecipeError::BackendUnavailable`]).
    async fn search(&self, query: &str) -> Result<Vec<Recipe>>;

    /// The recipe with `id`, shown in `locale`, or `None` when unknown
    async fn get_by_id(&self, id: RecipeId, locale: Locale) -> Result<Option<Recipe>>;

    /// The list shown on the home page
    async fn get_featured(&self) -> Result<Vec<Recipe>>;
}

/// Ask the backend for recipes matching `query` and shape the answer.
pub(crate) async fn generate(
    provider: &dyn LlmProvider,
    normalizer: &Normalizer,
    query: &str,
) -> Result<Vec<Recipe>> {
    let prompt = build_search_prompt(query);
    let text = provider
        .complete(SYSTEM_PROMPT, &prompt)
        .await
        .map_err(|e| {
            RecipeError::BackendUnavailable(format!("{}: {}", provider.provider_name(), e))
        })?;
    debug!("{} answered with {} bytes", provider.provider_name(), text.len());

    let recipes = normalizer.normalize_all(parser::parse(&text));
    info!("Generated {} recipes for '{}'", recipes.len(), query.trim());
    Ok(recipes)
}
