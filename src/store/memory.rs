use crate::error::{RecipeError, Result};
use crate::locale::Locale;
use crate::model::{Recipe, RecipeId};
use crate::store::{NewRecipe, RecipeStore};
use crate::translation::TranslationOverlay;
use async_trait::async_trait;
use chrono::Utc;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;

/// In-process recipe store with an optional JSON snapshot on disk.
///
/// Ids are assigned sequentially from 1. When a snapshot path is set, every
/// successful batch insert rewrites the snapshot.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<StoreState>,
    snapshot_path: Option<PathBuf>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreState {
    last_id: RecipeId,
    recipes: BTreeMap<RecipeId, Recipe>,
    translations: Vec<TranslationRow>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TranslationRow {
    recipe_id: RecipeId,
    locale: Locale,
    overlay: TranslationOverlay,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a store backed by `path`, loading the snapshot if the file exists
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let state = match tokio::fs::read(&path).await {
            Ok(bytes) => {
                let state: StoreState = serde_json::from_slice(&bytes)?;
                info!(
                    "Loaded {} recipes from {}",
                    state.recipes.len(),
                    path.display()
                );
                state
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No snapshot at {}, starting empty", path.display());
                StoreState::default()
            }
            Err(e) => return Err(e.into()),
        };

        Ok(MemoryStore {
            state: RwLock::new(state),
            snapshot_path: Some(path),
        })
    }

    /// Write the current contents to the snapshot file, if one is configured
    pub async fn save(&self) -> Result<()> {
        let Some(path) = &self.snapshot_path else {
            return Ok(());
        };
        let bytes = {
            let state = self.state.read().await;
            serde_json::to_vec_pretty(&*state)?
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(path, bytes).await?;
        Ok(())
    }

    pub async fn len(&self) -> usize {
        self.state.read().await.recipes.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.state.read().await.recipes.is_empty()
    }
}

fn check_row(recipe: &Recipe) -> Result<()> {
    if recipe.title.trim().is_empty() {
        return Err(RecipeError::RejectedRecipe("missing title".to_string()));
    }
    if recipe.ingredients.is_empty() {
        return Err(RecipeError::RejectedRecipe(format!(
            "'{}' has no ingredients",
            recipe.title
        )));
    }
    if recipe.instructions.is_empty() {
        return Err(RecipeError::RejectedRecipe(format!(
            "'{}' has no instructions",
            recipe.title
        )));
    }
    Ok(())
}

#[async_trait]
impl RecipeStore for MemoryStore {
    fn store_name(&self) -> &str {
        "memory"
    }

    async fn recent(&self, limit: usize) -> Result<Vec<Recipe>> {
        let state = self.state.read().await;
        let mut recipes: Vec<&Recipe> = state.recipes.values().collect();
        recipes.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(recipes.into_iter().take(limit).cloned().collect())
    }

    async fn find_by_id(&self, id: RecipeId) -> Result<Option<Recipe>> {
        Ok(self.state.read().await.recipes.get(&id).cloned())
    }

    async fn translations(&self, id: RecipeId, locale: Locale) -> Result<TranslationOverlay> {
        let state = self.state.read().await;
        Ok(state
            .translations
            .iter()
            .find(|row| row.recipe_id == id && row.locale == locale)
            .map(|row| row.overlay.clone())
            .unwrap_or_default())
    }

    async fn insert_batch(&self, recipes: &[NewRecipe]) -> Vec<Result<RecipeId>> {
        let now = Utc::now().timestamp_millis();
        let mut outcomes = Vec::with_capacity(recipes.len());
        {
            let mut state = self.state.write().await;
            for new in recipes {
                if let Err(e) = check_row(&new.recipe) {
                    outcomes.push(Err(e));
                    continue;
                }

                state.last_id += 1;
                let id = state.last_id;
                let recipe = Recipe {
                    id,
                    updated_at: now,
                    ..new.recipe.clone()
                };
                state.recipes.insert(id, recipe);
                for translation in &new.translations {
                    state.translations.push(TranslationRow {
                        recipe_id: id,
                        locale: translation.locale,
                        overlay: translation.overlay.clone(),
                    });
                }
                outcomes.push(Ok(id));
            }
        }

        let stored = outcomes.iter().filter(|o| o.is_ok()).count();
        info!("Stored {} of {} recipes", stored, recipes.len());
        if stored > 0 {
            if let Err(e) = self.save().await {
                warn!("Failed to write store snapshot: {}", e);
            }
        }
        outcomes
    }
}
