use thiserror::Error;

/// Errors that can occur while finding, shaping or storing recipes
#[derive(Error, Debug)]
pub enum RecipeError {
    /// The generative backend call failed outright (network, auth, rate limit)
    #[error("Recipe backend unavailable: {0}")]
    BackendUnavailable(String),

    /// The backend answered with text that holds no parseable JSON array
    #[error("Malformed backend response: {0}")]
    MalformedResponse(String),

    /// A path segment does not carry a recoverable recipe id
    #[error("Invalid recipe slug: {0}")]
    InvalidSlug(String),

    /// The persistent store could not be read or written
    #[error("Recipe store unavailable: {0}")]
    StoreUnavailable(String),

    /// The store refused a row (missing title, ingredients or steps)
    #[error("Recipe rejected by store: {0}")]
    RejectedRecipe(String),

    /// Service composition error
    #[error("Builder error: {0}")]
    BuilderError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),

    /// Filesystem error (store snapshots)
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RecipeError>;
