//! Recipe normalization and localization for a bilingual budget recipe site.
//!
//! Generated recipe text goes through [`parser`] and [`normalize`] into
//! [`Recipe`] values; stored recipes get their translations laid over them by
//! [`translation::merge`]; [`slug`] maps recipes to and from path segments.
//! [`RecipeService`] composes all of it behind one [`sources::RecipeSource`].

pub mod builder;
pub mod cache;
pub mod config;
pub mod error;
pub mod locale;
pub mod model;
pub mod normalize;
pub mod parser;
pub mod partial;
pub mod providers;
pub mod slug;
pub mod sources;
pub mod store;
pub mod translation;

pub use builder::{RecipeService, RecipeServiceBuilder, SourceMode};
pub use cache::RecipeCache;
pub use config::AppConfig;
pub use error::{RecipeError, Result};
pub use locale::Locale;
pub use model::{Ingredient, InstructionStep, Nutrition, Recipe, RecipeId};
pub use partial::PartialRecipe;
pub use translation::TranslationOverlay;
